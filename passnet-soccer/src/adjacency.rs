//! Weighted adjacency matrices, ready for flag-complex filtrations in external topology tooling.
//!
//! Pass counts are min-max normalised and inverted, so that the most frequent partnerships carry
//! the smallest weights and enter a filtration first. Pairs that never exchanged a pass are
//! infinitely far apart; the diagonal is zero.

use std::io;
use std::path::Path;

use passnet::csv::CsvWriter;
use passnet::file;
use passnet::hash_lookup::HashLookup;
use passnet::matrix::Matrix;

use crate::network::PassingNetwork;
use crate::sink::NetworkDocument;

#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    players: HashLookup<String>,
    weights: Matrix,
}
impl AdjacencyMatrix {
    pub fn from_document(document: &NetworkDocument) -> Self {
        let mut names = document.player_names();
        names.sort_unstable();
        let players: HashLookup<String> = names.into_iter().map(ToOwned::to_owned).collect();
        let edges = document.edges();
        let mut weights = Matrix::hollow(players.len(), f64::INFINITY);
        let bounds = CountBounds::of(edges.iter().map(|(_, count)| *count));
        for (pair, count) in edges {
            // every name in an edge was registered above
            if let (Some(a), Some(b)) = (players.index_of(*pair.first()), players.index_of(*pair.second())) {
                weights.set_symmetric(a, b, bounds.weight(count));
            }
        }
        Self { players, weights }
    }

    pub fn players(&self) -> &[String] {
        self.players.items()
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        let a = self.players.index_of(a)?;
        let b = self.players.index_of(b)?;
        Some(self.weights[(a, b)])
    }

    /// Writes the matrix with a header row of player names and each row led by its player.
    pub fn write_csv<W: io::Write>(&self, writer: &mut CsvWriter<W>) -> Result<(), io::Error> {
        writer.append(std::iter::once(String::new()).chain(self.players().iter().cloned()))?;
        for (row, player) in self.players().iter().enumerate() {
            writer.append(
                std::iter::once(player.clone())
                    .chain(self.weights.row_slice(row).iter().map(ToString::to_string)),
            )?;
        }
        writer.flush()
    }

    pub fn write_csv_file(&self, path: impl AsRef<Path>) -> Result<(), io::Error> {
        file::ensure_parent_dir(&path)?;
        self.write_csv(&mut CsvWriter::create(path)?)
    }
}

impl From<&PassingNetwork> for AdjacencyMatrix {
    fn from(network: &PassingNetwork) -> Self {
        Self::from_document(&NetworkDocument::from(network))
    }
}

struct CountBounds {
    min: u32,
    max: u32,
}
impl CountBounds {
    fn of(counts: impl Iterator<Item = u32>) -> Self {
        counts.fold(
            Self {
                min: u32::MAX,
                max: u32::MIN,
            },
            |bounds, count| Self {
                min: bounds.min.min(count),
                max: bounds.max.max(count),
            },
        )
    }

    /// `1 − (count − min) / (max − min)`, or zero when every count is the same.
    fn weight(&self, count: u32) -> f64 {
        if self.max <= self.min {
            0.0
        } else {
            1.0 - (count - self.min) as f64 / (self.max - self.min) as f64
        }
    }
}
