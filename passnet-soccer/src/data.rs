//! Provider-shaped event records and the loading of match files from local storage.
//!
//! Each match file is a JSON array of events, named after the match ID (`<match_id>.json`), in
//! the layout of the StatsBomb open-data `events/` directory.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use passnet::file;
use passnet::file::ReadJsonFile;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Named {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
}
impl Named {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPass {
    #[serde(default)]
    pub recipient: Option<Named>,
    #[serde(default)]
    pub outcome: Option<Named>,
}

/// Detail block of event types that carry nothing but an outcome, as far as passing networks
/// are concerned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOutcome {
    #[serde(default)]
    pub outcome: Option<Named>,
}

/// An event exactly as the provider supplies it. Every field is optional here; required fields are
/// enforced when converting into [`Event`](crate::event::Event).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub minute: Option<i64>,
    #[serde(default, rename = "type")]
    pub event_type: Option<Named>,
    #[serde(default)]
    pub team: Option<Named>,
    #[serde(default)]
    pub player: Option<Named>,
    #[serde(default)]
    pub location: Option<Vec<f64>>,
    #[serde(default)]
    pub pass: Option<RawPass>,
    #[serde(default)]
    pub shot: Option<RawOutcome>,
    #[serde(default)]
    pub substitution: Option<RawOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchFile {
    pub match_id: u64,
    pub file: PathBuf,
}
impl MatchFile {
    pub fn from_path(file: PathBuf) -> anyhow::Result<Self> {
        let match_id = file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.parse().ok())
            .ok_or_else(|| anyhow!("cannot derive a match ID from {}", file.display()))?;
        Ok(Self { match_id, file })
    }

    pub fn read_events(&self) -> anyhow::Result<Vec<RawEvent>> {
        read_events(&self.file)
    }
}

pub fn read_events(path: impl AsRef<Path>) -> anyhow::Result<Vec<RawEvent>> {
    let path = path.as_ref();
    Vec::<RawEvent>::read_json_file(path).with_context(|| format!("reading events from {}", path.display()))
}

/// Locates every match file under `path`, ordered by match ID.
pub fn read_match_dir(path: impl AsRef<Path>) -> anyhow::Result<Vec<MatchFile>> {
    let mut files = vec![];
    file::recurse_dir(path.as_ref().into(), &mut files, &mut |ext| ext == "json")?;
    let mut matches = files
        .into_iter()
        .map(MatchFile::from_path)
        .collect::<Result<Vec<_>, _>>()?;
    matches.sort();
    Ok(matches)
}
