//! Typed match events and their validation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use thiserror::Error;

use crate::data::RawEvent;

/// Exclusive upper bound on a valid match minute. Extra time with stoppage comfortably fits below it.
pub const MINUTE_LIMIT: u16 = 150;

pub const GOAL_OUTCOME: &str = "Goal";

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString)]
pub enum EventType {
    Pass,
    Substitution,
    Shot,
    #[strum(default)]
    Other(String),
}
impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Pass => "Pass",
            EventType::Substitution => "Substitution",
            EventType::Shot => "Shot",
            EventType::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn from_coords(field: &'static str, coords: &[f64]) -> Result<Self, Defect> {
        match coords {
            [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Self::new(*x, *y)),
            [_, _, ..] => Err(Defect::NonFiniteLocation(field)),
            _ => Err(Defect::ShortLocation {
                field,
                len: coords.len(),
            }),
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A single on-pitch action. Construct from provider data with [`Event::try_from`], or directly
/// with [`Event::new`] and the `with_*` methods; either way, [`Event::validate`] decides whether
/// the record is usable.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub minute: u16,
    pub team: String,
    pub event_type: EventType,
    pub player: Option<String>,
    /// For passes, any outcome marks the pass as unsuccessful.
    pub outcome: Option<String>,
    pub location: Option<Point>,
    pub recipient: Option<String>,
}
impl Event {
    pub fn new(id: impl Into<String>, minute: u16, team: impl Into<String>, event_type: EventType) -> Self {
        Self {
            id: id.into(),
            minute,
            team: team.into(),
            event_type,
            player: None,
            outcome: None,
            location: None,
            recipient: None,
        }
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    pub fn with_location(mut self, x: f64, y: f64) -> Self {
        self.location = Some(Point::new(x, y));
        self
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn is_pass(&self) -> bool {
        self.event_type == EventType::Pass
    }

    pub fn is_substitution(&self) -> bool {
        self.event_type == EventType::Substitution
    }

    pub fn is_successful_pass(&self) -> bool {
        self.is_pass() && self.outcome.is_none()
    }

    pub fn is_goal(&self) -> bool {
        self.event_type == EventType::Shot && self.outcome.as_deref() == Some(GOAL_OUTCOME)
    }

    pub fn validate(&self) -> Result<(), MalformedEvent> {
        self.check().map_err(|defect| MalformedEvent {
            event_id: Some(self.id.clone()),
            defect,
        })
    }

    fn check(&self) -> Result<(), Defect> {
        if self.id.trim().is_empty() {
            return Err(Defect::MissingField("id"));
        }
        if self.minute >= MINUTE_LIMIT {
            return Err(Defect::MinuteOutOfRange(self.minute as i64));
        }
        if self.team.trim().is_empty() {
            return Err(Defect::MissingField("team"));
        }
        match self.event_type {
            EventType::Pass => {
                require_name("player", &self.player)?;
                match &self.location {
                    None => return Err(Defect::MissingField("location")),
                    Some(location) if !location.is_finite() => {
                        return Err(Defect::NonFiniteLocation("location"))
                    }
                    Some(_) => {}
                }
                if self.outcome.is_none() {
                    require_name("pass recipient", &self.recipient)?;
                }
                Ok(())
            }
            EventType::Substitution | EventType::Shot => require_name("player", &self.player),
            EventType::Other(_) => Ok(()),
        }
    }
}

fn require_name(field: &'static str, name: &Option<String>) -> Result<(), Defect> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => Err(Defect::MissingField(field)),
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Defect {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("minute {0} outside of [0, {})", MINUTE_LIMIT)]
    MinuteOutOfRange(i64),

    #[error("{field} has {len} coordinate(s), expected 2")]
    ShortLocation { field: &'static str, len: usize },

    #[error("{0} has a non-finite coordinate")]
    NonFiniteLocation(&'static str),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("malformed event {}: {defect}", .event_id.as_deref().unwrap_or("<no id>"))]
pub struct MalformedEvent {
    pub event_id: Option<String>,
    pub defect: Defect,
}

impl TryFrom<RawEvent> for Event {
    type Error = MalformedEvent;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let event_id = raw.id.clone();
        let malformed = |defect| MalformedEvent {
            event_id: event_id.clone(),
            defect,
        };

        let id = raw.id.ok_or_else(|| malformed(Defect::MissingField("id")))?;
        let minute = raw
            .minute
            .ok_or_else(|| malformed(Defect::MissingField("minute")))?;
        let minute = u16::try_from(minute)
            .ok()
            .filter(|&minute| minute < MINUTE_LIMIT)
            .ok_or_else(|| malformed(Defect::MinuteOutOfRange(minute)))?;
        let event_type = raw
            .event_type
            .map(|event_type| {
                // infallible thanks to the catch-all variant
                EventType::from_str(&event_type.name).unwrap_or(EventType::Other(event_type.name))
            })
            .ok_or_else(|| malformed(Defect::MissingField("type")))?;
        let team = raw
            .team
            .map(|team| team.name)
            .ok_or_else(|| malformed(Defect::MissingField("team")))?;
        let location = raw
            .location
            .map(|coords| Point::from_coords("location", &coords))
            .transpose()
            .map_err(malformed)?;

        let (outcome, recipient) = match event_type {
            EventType::Pass => match raw.pass {
                Some(pass) => (
                    pass.outcome.map(|outcome| outcome.name),
                    pass.recipient.map(|recipient| recipient.name),
                ),
                None => (None, None),
            },
            EventType::Shot => (raw.shot.and_then(|shot| shot.outcome).map(|outcome| outcome.name), None),
            EventType::Substitution => (
                raw.substitution
                    .and_then(|substitution| substitution.outcome)
                    .map(|outcome| outcome.name),
                None,
            ),
            EventType::Other(_) => (None, None),
        };

        let event = Event {
            id,
            minute,
            team,
            event_type,
            player: raw.player.map(|player| player.name),
            outcome,
            location,
            recipient,
        };
        event.validate()?;
        Ok(event)
    }
}
