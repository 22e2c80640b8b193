//! Splitting a match's events by team, and the per-team facts derived from them.

use rustc_hash::FxHashMap;

use crate::data::RawEvent;
use crate::event::{Defect, Event, MalformedEvent};
use crate::window::StableWindow;

/// Anything attributable to a team.
pub trait TeamOf {
    fn team(&self) -> Option<&str>;
    fn event_id(&self) -> Option<&str>;
}

impl TeamOf for Event {
    fn team(&self) -> Option<&str> {
        Some(&self.team)
    }

    fn event_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

impl TeamOf for RawEvent {
    fn team(&self) -> Option<&str> {
        self.team.as_ref().map(|team| team.name.as_str())
    }

    fn event_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamEvents<E> {
    pub team: String,
    pub events: Vec<E>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture<E> {
    pub match_id: u64,
    pub teams: Vec<TeamEvents<E>>,
}
impl<E: TeamOf> Fixture<E> {
    /// Groups events by team, with teams in order of first appearance and each team's events in
    /// their original order. An event without a team cannot be attributed, which fails the split.
    pub fn split(match_id: u64, events: Vec<E>) -> Result<Self, MalformedEvent> {
        let mut team_indices: FxHashMap<String, usize> = FxHashMap::default();
        let mut teams: Vec<TeamEvents<E>> = vec![];
        for event in events {
            let team = match event.team() {
                Some(team) => team.to_owned(),
                None => {
                    return Err(MalformedEvent {
                        event_id: event.event_id().map(ToOwned::to_owned),
                        defect: Defect::MissingField("team"),
                    })
                }
            };
            let index = *team_indices.entry(team).or_insert_with_key(|team| {
                teams.push(TeamEvents {
                    team: team.clone(),
                    events: vec![],
                });
                teams.len() - 1
            });
            teams[index].events.push(event);
        }
        Ok(Self { match_id, teams })
    }
}

/// A team's stable-lineup window and the goals it scored inside that window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSummary {
    pub team: String,
    pub window: StableWindow,
    pub goals: u16,
}
impl TeamSummary {
    pub fn from_events(team: impl Into<String>, events: &[Event]) -> Self {
        let window = StableWindow::from_events(events);
        let goals = events
            .iter()
            .filter(|event| event.is_goal() && window.admits(event.minute))
            .count() as u16;
        Self {
            team: team.into(),
            window,
            goals,
        }
    }
}
