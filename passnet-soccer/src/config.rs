//! Settings of a batch run, loadable from a JSON file and overridable from the command line.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use passnet::file::ReadJsonFile;

use crate::naming::CompetitionDir;
use crate::network::{InvalidConfig, NetworkConfig, PassingNetworkBuilder};
use crate::sink::{CsvSink, JsonSink, Sink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root directory under which the `<season>/<competition>` directories are created.
    pub out: PathBuf,
    pub competition: String,
    pub season: String,
    pub min_stable_minutes: u16,
    pub format: OutputFormat,
    /// Whether CSV output carries the position columns.
    pub positions: bool,
    /// Whether JSON output is pretty-printed.
    pub pretty: bool,
}
impl PipelineConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        Self::read_json_file(path).with_context(|| format!("reading config from {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.competition.trim().is_empty() {
            bail!("competition must be specified");
        }
        if self.season.trim().is_empty() {
            bail!("season must be specified");
        }
        self.network_config()?;
        Ok(())
    }

    pub fn network_config(&self) -> Result<NetworkConfig, InvalidConfig> {
        NetworkConfig::new(self.min_stable_minutes)
    }

    pub fn builder(&self) -> Result<PassingNetworkBuilder, InvalidConfig> {
        PassingNetworkBuilder::try_from(self.network_config()?)
    }

    pub fn competition_dir(&self) -> CompetitionDir {
        CompetitionDir::new(&self.competition, &self.season)
    }

    pub fn sink(&self) -> Box<dyn Sink> {
        match self.format {
            OutputFormat::Json => {
                Box::new(JsonSink::new(&self.out, self.competition_dir()).pretty(self.pretty))
            }
            OutputFormat::Csv => Box::new(CsvSink::new(
                &self.out,
                self.competition_dir(),
                self.positions,
            )),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            out: PathBuf::from("networks"),
            competition: String::new(),
            season: String::new(),
            min_stable_minutes: NetworkConfig::HALF_TIME.min_stable_minutes,
            format: OutputFormat::default(),
            positions: true,
            pretty: false,
        }
    }
}
