//! Construction of passing networks from a team's match events.
//!
//! Only successful passes made before the team's first substitution are considered. Each player who
//! made such a pass becomes a node at the mean location of their passes; each pair of players who
//! exchanged passes (in either direction) becomes an edge weighted by the number of exchanges. The
//! whole network is abandoned when the stable-lineup window is shorter than configured.

use std::fmt::{Display, Formatter};

use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::event::{Event, MalformedEvent, Point};
use crate::pair::UnorderedPair;
use crate::window::{StableWindow, NO_SUBSTITUTION_CUTOFF};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerNode {
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Number of eligible passes made by the player.
    pub involvement: u32,
}
impl PlayerNode {
    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassEdge {
    pub pair: UnorderedPair<String>,
    pub count: u32,
}

/// An immutable passing network. Nodes are ordered by name and edges by pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassingNetwork {
    window: StableWindow,
    nodes: Vec<PlayerNode>,
    edges: Vec<PassEdge>,
}
impl PassingNetwork {
    pub fn window(&self) -> StableWindow {
        self.window
    }

    pub fn nodes(&self) -> &[PlayerNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[PassEdge] {
        &self.edges
    }

    pub fn node(&self, name: &str) -> Option<&PlayerNode> {
        self.nodes
            .binary_search_by(|node| node.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.nodes[index])
    }

    pub fn edge(&self, a: &str, b: &str) -> Option<&PassEdge> {
        let key = UnorderedPair::new(a, b)?;
        self.edges
            .binary_search_by(|edge| edge.pair.as_str_pair().cmp(&key))
            .ok()
            .map(|index| &self.edges[index])
    }

    /// The partners of `name`, with the number of passes exchanged with each, in partner order.
    pub fn partners<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (&'a str, u32)> + 'a {
        self.edges.iter().filter_map(move |edge| {
            edge.pair
                .other(name)
                .map(|partner| (partner.as_str(), edge.count))
        })
    }

    /// Total number of eligible passes across all nodes.
    pub fn total_involvement(&self) -> u32 {
        self.nodes.iter().map(|node| node.involvement).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insufficiency {
    CutoffTooEarly {
        cutoff: u16,
        min_stable_minutes: u16,
    },
    NoEligiblePasses {
        cutoff: u16,
    },
}

impl Display for Insufficiency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Insufficiency::CutoffTooEarly {
                cutoff,
                min_stable_minutes,
            } => write!(
                f,
                "first substitution at minute {cutoff}, under the {min_stable_minutes}-minute minimum"
            ),
            Insufficiency::NoEligiblePasses { cutoff } => {
                write!(f, "no successful passes before minute {cutoff}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkOutcome {
    Built(PassingNetwork),
    Empty(Insufficiency),
}
impl NetworkOutcome {
    pub fn network(&self) -> Option<&PassingNetwork> {
        match self {
            NetworkOutcome::Built(network) => Some(network),
            NetworkOutcome::Empty(_) => None,
        }
    }

    pub fn into_network(self) -> Option<PassingNetwork> {
        match self {
            NetworkOutcome::Built(network) => Some(network),
            NetworkOutcome::Empty(_) => None,
        }
    }

    pub fn insufficiency(&self) -> Option<Insufficiency> {
        match self {
            NetworkOutcome::Built(_) => None,
            NetworkOutcome::Empty(insufficiency) => Some(*insufficiency),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Networks whose stable-lineup window ends before this minute are discarded.
    pub min_stable_minutes: u16,
}
impl NetworkConfig {
    /// Requires the lineup to hold until half time.
    pub const HALF_TIME: NetworkConfig = NetworkConfig {
        min_stable_minutes: 45,
    };

    /// Requires the lineup to hold for the first half hour.
    pub const HALF_HOUR: NetworkConfig = NetworkConfig {
        min_stable_minutes: 30,
    };

    pub fn new(min_stable_minutes: u16) -> Result<Self, InvalidConfig> {
        if min_stable_minutes > NO_SUBSTITUTION_CUTOFF {
            return Err(InvalidConfig::UnreachableMinimum(min_stable_minutes));
        }
        Ok(Self { min_stable_minutes })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidConfig {
    #[error("minimum stable window of {0} minutes exceeds the {} minute cutoff of a match without substitutions", NO_SUBSTITUTION_CUTOFF)]
    UnreachableMinimum(u16),
}

#[derive(Debug, Clone)]
pub struct PassingNetworkBuilder {
    config: NetworkConfig,
}
impl PassingNetworkBuilder {
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn build(&self, events: &[Event]) -> Result<NetworkOutcome, MalformedEvent> {
        build(events, self.config.min_stable_minutes)
    }
}

impl TryFrom<NetworkConfig> for PassingNetworkBuilder {
    type Error = InvalidConfig;

    fn try_from(config: NetworkConfig) -> Result<Self, Self::Error> {
        let config = NetworkConfig::new(config.min_stable_minutes)?;
        Ok(Self { config })
    }
}

struct EligiblePass<'a> {
    actor: &'a str,
    recipient: &'a str,
    location: Point,
}
impl<'a> EligiblePass<'a> {
    fn select(event: &'a Event, window: &StableWindow) -> Option<Self> {
        if !event.is_successful_pass() || !window.admits(event.minute) {
            return None;
        }
        match (&event.player, &event.recipient, event.location) {
            (Some(actor), Some(recipient), Some(location)) => Some(Self {
                actor,
                recipient,
                location,
            }),
            _ => None,
        }
    }
}

#[derive(Default)]
struct LocationSum {
    x: f64,
    y: f64,
    count: u32,
}
impl LocationSum {
    fn add(&mut self, location: Point) {
        self.x += location.x;
        self.y += location.y;
        self.count += 1;
    }
}

/// Builds the passing network of one team in one match.
///
/// Every event is validated up front; the first malformed event fails the whole build. A window
/// shorter than `min_stable_minutes`, or a window without any successful passes, yields
/// [`NetworkOutcome::Empty`]. Passes to oneself count towards the passer's node but never form an
/// edge. Edges are kept only when both players made at least one eligible pass, since each end
/// needs a mean location.
pub fn build(events: &[Event], min_stable_minutes: u16) -> Result<NetworkOutcome, MalformedEvent> {
    for event in events {
        event.validate()?;
    }

    let window = StableWindow::from_events(events);
    if !window.spans(min_stable_minutes) {
        debug!("discarding network: window {window} is shorter than {min_stable_minutes} minutes");
        return Ok(NetworkOutcome::Empty(Insufficiency::CutoffTooEarly {
            cutoff: window.cutoff(),
            min_stable_minutes,
        }));
    }

    let mut locations: FxHashMap<&str, LocationSum> = FxHashMap::default();
    let mut pair_counts: FxHashMap<UnorderedPair<&str>, u32> = FxHashMap::default();
    for pass in events.iter().filter_map(|event| EligiblePass::select(event, &window)) {
        locations.entry(pass.actor).or_default().add(pass.location);
        if let Some(pair) = UnorderedPair::new(pass.actor, pass.recipient) {
            *pair_counts.entry(pair).or_default() += 1;
        }
    }

    if locations.is_empty() {
        debug!("discarding network: no eligible passes in window {window}");
        return Ok(NetworkOutcome::Empty(Insufficiency::NoEligiblePasses {
            cutoff: window.cutoff(),
        }));
    }

    let mut edges: Vec<_> = pair_counts
        .into_iter()
        .filter(|(pair, _)| locations.contains_key(pair.first()) && locations.contains_key(pair.second()))
        .map(|(pair, count)| PassEdge {
            pair: pair.to_owned_pair(),
            count,
        })
        .collect();
    edges.sort_by(|a, b| a.pair.cmp(&b.pair));

    let mut nodes: Vec<_> = locations
        .into_iter()
        .map(|(name, sum)| PlayerNode {
            name: name.to_owned(),
            x: sum.x / sum.count as f64,
            y: sum.y / sum.count as f64,
            involvement: sum.count,
        })
        .collect();
    nodes.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(
        "built network of {} players and {} pairs in window {window}",
        nodes.len(),
        edges.len()
    );
    Ok(NetworkOutcome::Built(PassingNetwork {
        window,
        nodes,
        edges,
    }))
}
