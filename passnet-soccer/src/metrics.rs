//! Summary statistics of a passing network.

use passnet::stats::SliceExt;

use crate::network::PassingNetwork;
use crate::sink::NetworkDocument;

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkMetrics {
    pub players: usize,
    pub edges: usize,
    pub total_passes: u32,
    /// Fraction of possible pairs that exchanged at least one pass.
    pub density: f64,
    /// Gini coefficient of the players' involvement counts.
    pub involvement_gini: f64,
    /// The largest share of involvement, less the share under a perfectly even spread.
    pub centralization: f64,
}
impl NetworkMetrics {
    /// Metrics of a saved network. A document carries no involvement counts, so each player's
    /// weighted degree stands in for their involvement.
    pub fn from_document(document: &NetworkDocument) -> Self {
        let degrees = weighted_degrees(document);
        let edge_counts: Vec<_> = document.edges().into_iter().map(|(_, count)| count).collect();
        let involvement: Vec<_> = degrees.into_iter().map(|(_, degree)| degree as f64).collect();
        Self::tally(&edge_counts, &involvement)
    }

    fn tally(edge_counts: &[u32], involvement: &[f64]) -> Self {
        let players = involvement.len();
        let possible_pairs = players * players.saturating_sub(1) / 2;
        let density = if possible_pairs == 0 {
            0.0
        } else {
            edge_counts.len() as f64 / possible_pairs as f64
        };
        let centralization = involvement
            .max_share()
            .map(|max_share| max_share - 1.0 / players as f64)
            .unwrap_or_default();

        Self {
            players,
            edges: edge_counts.len(),
            total_passes: edge_counts.iter().sum(),
            density,
            involvement_gini: involvement.gini().unwrap_or_default(),
            centralization,
        }
    }
}

impl From<&PassingNetwork> for NetworkMetrics {
    fn from(network: &PassingNetwork) -> Self {
        let edge_counts: Vec<_> = network.edges().iter().map(|edge| edge.count).collect();
        let involvement: Vec<_> = network
            .nodes()
            .iter()
            .map(|node| node.involvement as f64)
            .collect();
        Self::tally(&edge_counts, &involvement)
    }
}

/// Sum of edge counts incident to each player, in the order of [`NetworkDocument::player_names`].
pub fn weighted_degrees(document: &NetworkDocument) -> Vec<(&str, u32)> {
    let mut degrees: Vec<_> = document
        .player_names()
        .into_iter()
        .map(|name| (name, 0))
        .collect();
    for (pair, count) in document.edges() {
        for (name, degree) in &mut degrees {
            if pair.contains(&*name) {
                *degree += count;
            }
        }
    }
    degrees
}
