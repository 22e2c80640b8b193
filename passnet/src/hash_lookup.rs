//! A bidirectional mapping between items and their insertion indices.

use std::borrow::Borrow;
use std::hash::Hash;
use std::ops::Index;

use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct HashLookup<T: Eq + Hash> {
    item_to_index: FxHashMap<T, usize>,
    index_to_item: Vec<T>,
}
impl<T: Eq + Hash> HashLookup<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let item_to_index = FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        let index_to_item = Vec::with_capacity(capacity);
        Self {
            item_to_index,
            index_to_item,
        }
    }

    /// Appends a new item, returning its index.
    ///
    /// # Panics
    /// If the item is already present.
    pub fn push(&mut self, item: T) -> usize
    where
        T: Clone,
    {
        let index = self.index_to_item.len();
        Self::insert_unique(&mut self.item_to_index, &item, index);
        self.index_to_item.push(item);
        index
    }

    /// Resolves the index of `item`, appending it if absent.
    pub fn index_or_push(&mut self, item: T) -> usize
    where
        T: Clone,
    {
        match self.item_to_index.get(&item) {
            Some(&index) => index,
            None => self.push(item),
        }
    }

    pub fn item_at(&self, index: usize) -> Option<&T> {
        self.index_to_item.get(index)
    }

    pub fn index_of<Q>(&self, item: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.item_to_index.get(item).copied()
    }

    pub fn len(&self) -> usize {
        self.index_to_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_item.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.index_to_item
    }

    fn insert_unique(item_to_index: &mut FxHashMap<T, usize>, item: &T, index: usize)
    where
        T: Clone,
    {
        if let Some(existing_index) = item_to_index.insert(item.clone(), index) {
            item_to_index.insert(item.clone(), existing_index);
            panic!("duplicate item at index {index}, previously at {existing_index}")
        }
    }
}

impl<T: Eq + Hash> Index<usize> for HashLookup<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.item_at(index)
            .unwrap_or_else(|| panic!("no item at index {index}"))
    }
}

impl<T: Eq + Hash + Clone> From<Vec<T>> for HashLookup<T> {
    fn from(index_to_item: Vec<T>) -> Self {
        let mut item_to_index =
            FxHashMap::with_capacity_and_hasher(index_to_item.len(), Default::default());
        for (index, item) in index_to_item.iter().enumerate() {
            HashLookup::insert_unique(&mut item_to_index, item, index);
        }
        Self {
            item_to_index,
            index_to_item,
        }
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for HashLookup<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_resolve() {
        let mut lookup = HashLookup::with_capacity(2);
        assert!(lookup.is_empty());
        assert_eq!(0, lookup.push("Puyol".to_string()));
        assert_eq!(1, lookup.push("Piqué".to_string()));
        assert_eq!(2, lookup.len());
        assert_eq!(Some(1), lookup.index_of("Piqué"));
        assert_eq!(Some(&"Puyol".to_string()), lookup.item_at(0));
        assert_eq!(None, lookup.index_of("Abidal"));
        assert_eq!(None, lookup.item_at(2));
    }

    #[test]
    fn index_or_push_reuses_existing() {
        let mut lookup = HashLookup::with_capacity(2);
        assert_eq!(0, lookup.index_or_push("Xavi"));
        assert_eq!(1, lookup.index_or_push("Iniesta"));
        assert_eq!(0, lookup.index_or_push("Xavi"));
        assert_eq!(&["Xavi", "Iniesta"], lookup.items());
    }

    #[test]
    fn from_iter() {
        let lookup: HashLookup<_> = ["Valdés", "Alves"].into_iter().collect();
        assert_eq!("Alves", lookup[1]);
        assert_eq!(Some(0), lookup.index_of(&"Valdés"));
    }

    #[test]
    #[should_panic(expected = "duplicate item at index 2, previously at 0")]
    fn from_vec_duplicate() {
        let _ = HashLookup::from(vec!["Messi", "Villa", "Messi"]);
    }

    #[test]
    #[should_panic(expected = "no item at index 1")]
    fn no_item_at_index() {
        let lookup = HashLookup::from(vec!["Pedro"]);
        let _ = lookup[1];
    }
}
