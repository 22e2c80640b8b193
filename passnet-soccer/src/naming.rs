//! Naming of persisted networks.
//!
//! A network lands in `<root>/<season>/<competition>/<match>_<team>_<goals>_<cutoff>.<ext>`, where
//! `goals` counts the team's goals before its cutoff minute.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::anyhow;

/// Identifies one team's network in one match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetworkKey {
    pub match_id: u64,
    pub team: String,
    pub goals: u16,
    pub cutoff: u16,
}
impl NetworkKey {
    pub fn file_stem(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.match_id,
            sanitise_team(&self.team),
            self.goals,
            self.cutoff
        )
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.file_stem())
    }
}

impl Display for NetworkKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_stem())
    }
}

/// Parses a file stem produced by [`NetworkKey::file_stem`]. The team comes back in its sanitised
/// form.
impl FromStr for NetworkKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || anyhow!("network name '{s}' should be in the form <match>_<team>_<goals>_<cutoff>");
        let (match_id, rest) = s.split_once('_').ok_or_else(malformed)?;
        let (rest, cutoff) = rest.rsplit_once('_').ok_or_else(malformed)?;
        let (team, goals) = rest.rsplit_once('_').ok_or_else(malformed)?;
        if team.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            match_id: match_id.parse().map_err(|_| malformed())?,
            team: team.into(),
            goals: goals.parse().map_err(|_| malformed())?,
            cutoff: cutoff.parse().map_err(|_| malformed())?,
        })
    }
}

/// The competition and season that a batch of matches belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompetitionDir {
    pub competition: String,
    pub season: String,
}
impl CompetitionDir {
    pub fn new(competition: impl Into<String>, season: impl Into<String>) -> Self {
        Self {
            competition: competition.into(),
            season: season.into(),
        }
    }

    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(sanitise_season(&self.season)).join(sanitise_competition(&self.competition))
    }

    pub fn path_of(&self, root: impl AsRef<Path>, key: &NetworkKey, extension: &str) -> PathBuf {
        root.as_ref()
            .join(self.relative_path())
            .join(key.file_name(extension))
    }
}

pub fn sanitise_team(team: &str) -> String {
    team.replace(' ', "-")
}

pub fn sanitise_competition(competition: &str) -> String {
    competition.replace(' ', "-").replace('.', "")
}

pub fn sanitise_season(season: &str) -> String {
    season.replace('/', "-")
}
