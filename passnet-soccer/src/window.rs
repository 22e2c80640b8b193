//! The stable-lineup window: the stretch of a match before a team's first substitution.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::event::{Event, MINUTE_LIMIT};

/// Cutoff used when a team makes no substitutions. Exceeds every valid match minute, so the
/// window then admits the whole match, stoppage time included.
pub const NO_SUBSTITUTION_CUTOFF: u16 = MINUTE_LIMIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StableWindow {
    cutoff: u16,
}
impl StableWindow {
    pub fn with_cutoff(cutoff: u16) -> Self {
        Self { cutoff }
    }

    pub fn whole_match() -> Self {
        Self::with_cutoff(NO_SUBSTITUTION_CUTOFF)
    }

    /// Derives the window from a team's events: the earliest substitution minute, regardless of
    /// the order in which the events are supplied.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        events
            .into_iter()
            .filter(|event| event.is_substitution())
            .map(|event| event.minute)
            .min()
            .map(Self::with_cutoff)
            .unwrap_or_else(Self::whole_match)
    }

    pub fn cutoff(&self) -> u16 {
        self.cutoff
    }

    pub fn is_whole_match(&self) -> bool {
        self.cutoff >= NO_SUBSTITUTION_CUTOFF
    }

    /// Whether an event at `minute` falls strictly before the cutoff.
    pub fn admits(&self, minute: u16) -> bool {
        minute < self.cutoff
    }

    /// Whether the window spans at least `min_stable_minutes`.
    pub fn spans(&self, min_stable_minutes: u16) -> bool {
        self.cutoff >= min_stable_minutes
    }
}

impl Default for StableWindow {
    fn default() -> Self {
        Self::whole_match()
    }
}

impl Display for StableWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_whole_match() {
            write!(f, "whole match")
        } else {
            write!(f, "before minute {}", self.cutoff)
        }
    }
}
