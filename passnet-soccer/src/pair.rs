//! Unordered pairs with a canonical ordering of their members.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Two distinct members held in ascending order, so that `{a, b}` and `{b, a}` are the same value.
/// Serves as an aggregation key whose symmetry holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnorderedPair<T> {
    first: T,
    second: T,
}
impl<T: Ord> UnorderedPair<T> {
    /// Forms a pair, or `None` if the two members are equal.
    pub fn new(a: T, b: T) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> &T {
        &self.first
    }

    pub fn second(&self) -> &T {
        &self.second
    }

    pub fn contains<Q>(&self, member: &Q) -> bool
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        self.first == *member || self.second == *member
    }

    /// The member opposite `member`, if `member` belongs to the pair.
    pub fn other<Q>(&self, member: &Q) -> Option<&T>
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        if self.first == *member {
            Some(&self.second)
        } else if self.second == *member {
            Some(&self.first)
        } else {
            None
        }
    }

    pub fn into_members(self) -> (T, T) {
        (self.first, self.second)
    }

    pub fn map<U: Ord>(self, mut f: impl FnMut(T) -> U) -> Option<UnorderedPair<U>> {
        UnorderedPair::new(f(self.first), f(self.second))
    }
}

impl UnorderedPair<&str> {
    pub fn to_owned_pair(&self) -> UnorderedPair<String> {
        UnorderedPair {
            first: self.first.to_owned(),
            second: self.second.to_owned(),
        }
    }
}

impl UnorderedPair<String> {
    pub fn as_str_pair(&self) -> UnorderedPair<&str> {
        UnorderedPair {
            first: &self.first,
            second: &self.second,
        }
    }
}

impl<T: Display> Display for UnorderedPair<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}, {}}}", self.first, self.second)
    }
}
