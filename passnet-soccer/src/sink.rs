//! Persistence of passing networks.
//!
//! The builder never touches storage; a [`Sink`] is handed to whatever drives the builds. Two
//! on-disk shapes are supported. The JSON shape lists every player with their mean location and
//! partners, so each edge appears once from either end. The CSV shape is one row per edge.

use std::io;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ordinalizer::Ordinal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount, EnumIter, EnumString};

use passnet::csv::{CsvReader, CsvWriter, Record};
use passnet::file;

use crate::naming::{CompetitionDir, NetworkKey};
use crate::network::PassingNetwork;
use crate::pair::UnorderedPair;

pub trait Sink {
    fn write(&mut self, key: &NetworkKey, network: &PassingNetwork) -> Result<(), io::Error>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write(&mut self, key: &NetworkKey, network: &PassingNetwork) -> Result<(), io::Error> {
        (**self).write(key, network)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&mut self, key: &NetworkKey, network: &PassingNetwork) -> Result<(), io::Error> {
        (**self).write(key, network)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassRecord {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub passes: Vec<PassRecord>,
}

/// The JSON shape of a passing network.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkDocument(pub Vec<PlayerRecord>);
impl NetworkDocument {
    pub fn players(&self) -> &[PlayerRecord] {
        &self.0
    }

    /// Every distinct pair mentioned by the document, in pair order. An edge need only be listed
    /// from one of its ends; where both ends list it, the first mention wins. Self-references are
    /// ignored.
    pub fn edges(&self) -> Vec<(UnorderedPair<&str>, u32)> {
        let mut counts: FxHashMap<UnorderedPair<&str>, u32> = FxHashMap::default();
        for player in &self.0 {
            for partner in &player.passes {
                if let Some(pair) = UnorderedPair::new(player.name.as_str(), partner.name.as_str()) {
                    counts.entry(pair).or_insert(partner.count);
                }
            }
        }
        let mut edges: Vec<_> = counts.into_iter().collect();
        edges.sort_by(|(a, _), (b, _)| a.cmp(b));
        edges
    }

    /// Player names: those with records first, in record order, then any partner without a record.
    pub fn player_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.0.len());
        let records = self.0.iter().map(|player| player.name.as_str());
        let partners = self
            .0
            .iter()
            .flat_map(|player| player.passes.iter().map(|partner| partner.name.as_str()));
        for name in records.chain(partners) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

impl From<&PassingNetwork> for NetworkDocument {
    fn from(network: &PassingNetwork) -> Self {
        Self(
            network
                .nodes()
                .iter()
                .map(|node| PlayerRecord {
                    name: node.name.clone(),
                    x: node.x,
                    y: node.y,
                    passes: network
                        .partners(&node.name)
                        .map(|(name, count)| PassRecord {
                            name: name.to_owned(),
                            count,
                        })
                        .collect(),
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Ordinal, EnumCount, EnumIter, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Column {
    PlayerA,
    X,
    Y,
    PlayerB,
    XEnd,
    YEnd,
    PassCount,
}
impl Column {
    pub fn is_position(&self) -> bool {
        matches!(self, Column::X | Column::Y | Column::XEnd | Column::YEnd)
    }

    pub fn selection(positions: bool) -> Vec<Column> {
        Column::iter()
            .filter(|column| positions || !column.is_position())
            .collect()
    }
}

impl From<Column> for usize {
    fn from(column: Column) -> Self {
        column.ordinal()
    }
}

/// One record per edge, with every column populated.
pub fn edge_records(network: &PassingNetwork) -> Vec<Record> {
    network
        .edges()
        .iter()
        .filter_map(|edge| {
            let a = network.node(edge.pair.first())?;
            let b = network.node(edge.pair.second())?;
            let mut record = Record::with_capacity(Column::COUNT);
            record.set(Column::PlayerA, &a.name);
            record.set(Column::X, a.x);
            record.set(Column::Y, a.y);
            record.set(Column::PlayerB, &b.name);
            record.set(Column::XEnd, b.x);
            record.set(Column::YEnd, b.y);
            record.set(Column::PassCount, edge.count);
            Some(record)
        })
        .collect()
}

pub fn write_csv<W: io::Write>(
    writer: &mut CsvWriter<W>,
    network: &PassingNetwork,
    positions: bool,
) -> Result<(), io::Error> {
    let columns = Column::selection(positions);
    writer.append(columns.iter().map(ToString::to_string))?;
    for record in edge_records(network) {
        writer.append(columns.iter().map(|&column| record[column].clone()))?;
    }
    writer.flush()
}

#[derive(Debug, Clone)]
pub struct JsonSink {
    root: PathBuf,
    dir: CompetitionDir,
    pretty: bool,
}
impl JsonSink {
    pub fn new(root: impl Into<PathBuf>, dir: CompetitionDir) -> Self {
        Self {
            root: root.into(),
            dir,
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path_of(&self, key: &NetworkKey) -> PathBuf {
        self.dir.path_of(&self.root, key, "json")
    }
}

impl Sink for JsonSink {
    fn write(&mut self, key: &NetworkKey, network: &PassingNetwork) -> Result<(), io::Error> {
        let path = self.path_of(key);
        file::ensure_parent_dir(&path)?;
        let document = NetworkDocument::from(network);
        if self.pretty {
            file::write_json(path, &document)
        } else {
            file::write_json_compact(path, &document)
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvSink {
    root: PathBuf,
    dir: CompetitionDir,
    positions: bool,
}
impl CsvSink {
    pub fn new(root: impl Into<PathBuf>, dir: CompetitionDir, positions: bool) -> Self {
        Self {
            root: root.into(),
            dir,
            positions,
        }
    }

    pub fn path_of(&self, key: &NetworkKey) -> PathBuf {
        self.dir.path_of(&self.root, key, "csv")
    }
}

impl Sink for CsvSink {
    fn write(&mut self, key: &NetworkKey, network: &PassingNetwork) -> Result<(), io::Error> {
        let path = self.path_of(key);
        file::ensure_parent_dir(&path)?;
        let mut writer = CsvWriter::create(path)?;
        write_csv(&mut writer, network, self.positions)
    }
}

/// Retains every written network in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub written: Vec<(NetworkKey, NetworkDocument)>,
}

impl Sink for MemorySink {
    fn write(&mut self, key: &NetworkKey, network: &PassingNetwork) -> Result<(), io::Error> {
        self.written.push((key.clone(), NetworkDocument::from(network)));
        Ok(())
    }
}

pub fn read_document(path: impl AsRef<Path>) -> Result<NetworkDocument, io::Error> {
    file::read_json(path)
}

pub fn read_csv_document(path: impl AsRef<Path>) -> Result<NetworkDocument, io::Error> {
    read_csv(CsvReader::open(path)?)
}

/// Reads the CSV shape back into a document, with players in name order. Only players with an
/// edge are present; without position columns, every player sits at the origin.
pub fn read_csv<R: BufRead>(mut reader: CsvReader<R>) -> Result<NetworkDocument, io::Error> {
    let header = match reader.read() {
        Some(header) => header?,
        None => return Ok(NetworkDocument::default()),
    };
    let columns = header
        .iter()
        .map(|name| Column::from_str(name).map_err(|_| invalid_data(format!("unknown column '{name}'"))))
        .collect::<Result<Vec<_>, _>>()?;
    let index_of = |column: Column| columns.iter().position(|&candidate| candidate == column);
    let required = |column: Column| index_of(column).ok_or_else(|| invalid_data(format!("missing column '{column}'")));
    let (player_a, player_b, pass_count) = (
        required(Column::PlayerA)?,
        required(Column::PlayerB)?,
        required(Column::PassCount)?,
    );
    let positions = [Column::X, Column::Y, Column::XEnd, Column::YEnd].map(index_of);

    let mut players: Vec<PlayerRecord> = vec![];
    for (line, row) in reader.enumerate() {
        let row = row?;
        if row.len() != columns.len() {
            return Err(invalid_data(format!(
                "row {} has {} fields, expected {}",
                line + 1,
                row.len(),
                columns.len()
            )));
        }
        let count = parse_field::<u32>(&row[pass_count], line)?;
        let mut coords = [0.0; 4];
        for (coord, index) in coords.iter_mut().zip(positions) {
            if let Some(index) = index {
                *coord = parse_field::<f64>(&row[index], line)?;
            }
        }
        let [x, y, x_end, y_end] = coords;
        add_partner(&mut players, &row[player_a], x, y, &row[player_b], count);
        add_partner(&mut players, &row[player_b], x_end, y_end, &row[player_a], count);
    }
    players.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(NetworkDocument(players))
}

fn add_partner(players: &mut Vec<PlayerRecord>, name: &str, x: f64, y: f64, partner: &str, count: u32) {
    let pass = PassRecord {
        name: partner.to_owned(),
        count,
    };
    match players.iter_mut().find(|player| player.name == name) {
        Some(player) => player.passes.push(pass),
        None => players.push(PlayerRecord {
            name: name.to_owned(),
            x,
            y,
            passes: vec![pass],
        }),
    }
}

fn parse_field<T: FromStr>(field: &str, line: usize) -> Result<T, io::Error> {
    field
        .parse()
        .map_err(|_| invalid_data(format!("row {}: cannot parse '{field}'", line + 1)))
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

#[cfg(test)]
mod tests;
