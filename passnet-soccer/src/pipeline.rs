//! Building and persisting the networks of every team in a match.

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::data::RawEvent;
use crate::event::{Event, MalformedEvent};
use crate::fixture::{Fixture, TeamSummary};
use crate::naming::NetworkKey;
use crate::network::{Insufficiency, NetworkOutcome, PassingNetworkBuilder};
use crate::sink::Sink;

/// What became of one team's network.
#[derive(Debug, Clone, PartialEq)]
pub enum TeamReport {
    Written {
        key: NetworkKey,
        nodes: usize,
        edges: usize,
    },
    Skipped {
        team: String,
        reason: Insufficiency,
    },
    Malformed {
        team: String,
        error: MalformedEvent,
    },
}
impl TeamReport {
    pub fn team(&self) -> &str {
        match self {
            TeamReport::Written { key, .. } => &key.team,
            TeamReport::Skipped { team, .. } | TeamReport::Malformed { team, .. } => team,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, TeamReport::Written { .. })
    }
}

/// Tally of reports across any number of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportTally {
    pub written: usize,
    pub skipped: usize,
    pub malformed: usize,
}
impl ReportTally {
    pub fn add(&mut self, report: &TeamReport) {
        match report {
            TeamReport::Written { .. } => self.written += 1,
            TeamReport::Skipped { .. } => self.skipped += 1,
            TeamReport::Malformed { .. } => self.malformed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.written + self.skipped + self.malformed
    }
}

impl<'a> FromIterator<&'a TeamReport> for ReportTally {
    fn from_iter<T: IntoIterator<Item = &'a TeamReport>>(iter: T) -> Self {
        let mut tally = Self::default();
        for report in iter {
            tally.add(report);
        }
        tally
    }
}

/// Builds a network for each team in the match and hands every built network to the `sink`.
///
/// A team with a malformed event is reported and skipped without affecting the other team. The
/// match fails as a whole only when an event cannot be attributed to a team, or when the sink
/// fails.
pub fn process_match(
    match_id: u64,
    events: Vec<RawEvent>,
    builder: &PassingNetworkBuilder,
    sink: &mut impl Sink,
) -> anyhow::Result<Vec<TeamReport>> {
    let fixture = Fixture::split(match_id, events)
        .with_context(|| format!("splitting events of match {match_id}"))?;
    debug!("match {match_id} has {} team(s)", fixture.teams.len());

    let mut reports = Vec::with_capacity(fixture.teams.len());
    for team_events in fixture.teams {
        let team = team_events.team;
        let events = match team_events
            .events
            .into_iter()
            .map(Event::try_from)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(events) => events,
            Err(error) => {
                warn!("skipping {team} in match {match_id}: {error}");
                reports.push(TeamReport::Malformed { team, error });
                continue;
            }
        };

        let network = match builder.build(&events) {
            Ok(NetworkOutcome::Built(network)) => network,
            Ok(NetworkOutcome::Empty(reason)) => {
                info!("skipping {team} in match {match_id}: {reason}");
                reports.push(TeamReport::Skipped { team, reason });
                continue;
            }
            Err(error) => {
                warn!("skipping {team} in match {match_id}: {error}");
                reports.push(TeamReport::Malformed { team, error });
                continue;
            }
        };

        let summary = TeamSummary::from_events(team, &events);
        let key = NetworkKey {
            match_id,
            team: summary.team,
            goals: summary.goals,
            cutoff: summary.window.cutoff(),
        };
        sink.write(&key, &network)
            .with_context(|| format!("writing network {key}"))?;
        debug!(
            "wrote {key}: {} node(s), {} edge(s)",
            network.nodes().len(),
            network.edges().len()
        );
        reports.push(TeamReport::Written {
            key,
            nodes: network.nodes().len(),
            edges: network.edges().len(),
        });
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use std::io;

    use serde_json::{json, Value};

    use super::*;
    use crate::event::Defect;
    use crate::network::{NetworkConfig, PassingNetwork};
    use crate::sink::MemorySink;

    fn raw(value: Value) -> RawEvent {
        serde_json::from_value(value).unwrap()
    }

    fn pass(id: &str, minute: i64, team: &str, from: &str, to: &str, x: f64, y: f64) -> RawEvent {
        raw(json!({
            "id": id,
            "minute": minute,
            "type": {"name": "Pass"},
            "team": {"name": team},
            "player": {"name": from},
            "location": [x, y],
            "pass": {"recipient": {"name": to}}
        }))
    }

    fn substitution(id: &str, minute: i64, team: &str) -> RawEvent {
        raw(json!({
            "id": id,
            "minute": minute,
            "type": {"name": "Substitution"},
            "team": {"name": team},
            "player": {"name": "Bench"},
        }))
    }

    fn goal(id: &str, minute: i64, team: &str) -> RawEvent {
        raw(json!({
            "id": id,
            "minute": minute,
            "type": {"name": "Shot"},
            "team": {"name": team},
            "player": {"name": "Striker"},
            "location": [110.0, 40.0],
            "shot": {"outcome": {"name": "Goal"}}
        }))
    }

    fn builder(min_stable_minutes: u16) -> PassingNetworkBuilder {
        PassingNetworkBuilder::try_from(NetworkConfig::new(min_stable_minutes).unwrap()).unwrap()
    }

    #[test]
    fn writes_both_teams() {
        let events = vec![
            pass("1", 2, "Sevilla", "Banega", "Navas", 60.0, 40.0),
            pass("2", 3, "Real Madrid", "Modrić", "Kroos", 50.0, 30.0),
            pass("3", 4, "Sevilla", "Navas", "Banega", 70.0, 10.0),
            goal("4", 20, "Real Madrid"),
            pass("5", 30, "Real Madrid", "Kroos", "Modrić", 40.0, 35.0),
            goal("6", 70, "Real Madrid"),
            substitution("7", 65, "Real Madrid"),
        ];
        let mut sink = MemorySink::default();
        let reports = process_match(3_773_386, events, &builder(45), &mut sink).unwrap();
        assert_eq!(
            vec![
                TeamReport::Written {
                    key: NetworkKey {
                        match_id: 3_773_386,
                        team: "Sevilla".into(),
                        goals: 0,
                        cutoff: 150,
                    },
                    nodes: 2,
                    edges: 1,
                },
                TeamReport::Written {
                    key: NetworkKey {
                        match_id: 3_773_386,
                        team: "Real Madrid".into(),
                        goals: 1,
                        cutoff: 65,
                    },
                    nodes: 2,
                    edges: 1,
                },
            ],
            reports
        );
        assert_eq!(
            vec!["3773386_Sevilla_0_150", "3773386_Real-Madrid_1_65"],
            sink.written
                .iter()
                .map(|(key, _)| key.file_stem())
                .collect::<Vec<_>>()
        );
        let (_, sevilla) = &sink.written[0];
        assert_eq!(vec!["Banega", "Navas"], sevilla.player_names());
    }

    #[test]
    fn early_substitution_is_skipped() {
        let events = vec![
            pass("1", 2, "Eibar", "Orellana", "Enrich", 60.0, 40.0),
            pass("2", 3, "Eibar", "Enrich", "Orellana", 50.0, 30.0),
            substitution("3", 20, "Eibar"),
        ];
        let mut sink = MemorySink::default();
        let reports = process_match(1, events, &builder(30), &mut sink).unwrap();
        assert_eq!(
            vec![TeamReport::Skipped {
                team: "Eibar".into(),
                reason: Insufficiency::CutoffTooEarly {
                    cutoff: 20,
                    min_stable_minutes: 30
                }
            }],
            reports
        );
        assert!(sink.written.is_empty());
    }

    #[test]
    fn malformed_team_does_not_abort_the_other() {
        let mut broken = pass("2", 3, "Getafe", "Mata", "Molina", 50.0, 30.0);
        broken.location = Some(vec![50.0]);
        let events = vec![
            pass("1", 2, "Valencia", "Parejo", "Soler", 60.0, 40.0),
            broken,
            pass("3", 4, "Valencia", "Soler", "Parejo", 61.0, 41.0),
        ];
        let mut sink = MemorySink::default();
        let reports = process_match(2, events, &builder(45), &mut sink).unwrap();
        assert_eq!(2, reports.len());
        assert!(reports[0].is_written());
        assert_eq!(
            TeamReport::Malformed {
                team: "Getafe".into(),
                error: MalformedEvent {
                    event_id: Some("2".into()),
                    defect: Defect::ShortLocation {
                        field: "location",
                        len: 1
                    }
                }
            },
            reports[1]
        );
        assert_eq!(1, sink.written.len());

        let tally: ReportTally = reports.iter().collect();
        assert_eq!(
            ReportTally {
                written: 1,
                skipped: 0,
                malformed: 1
            },
            tally
        );
        assert_eq!(2, tally.total());
    }

    #[test]
    fn unattributable_event_fails_the_match() {
        let mut orphan = pass("2", 3, "Getafe", "Mata", "Molina", 50.0, 30.0);
        orphan.team = None;
        let events = vec![pass("1", 2, "Valencia", "Parejo", "Soler", 60.0, 40.0), orphan];
        let err = process_match(9, events, &builder(45), &mut MemorySink::default()).unwrap_err();
        assert_eq!("splitting events of match 9", err.to_string());
        assert_eq!(
            "malformed event 2: missing team",
            err.root_cause().to_string()
        );
    }

    #[test]
    fn sink_failure_propagates() {
        struct FailingSink;
        impl Sink for FailingSink {
            fn write(&mut self, _: &NetworkKey, _: &PassingNetwork) -> Result<(), io::Error> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
        }

        let events = vec![
            pass("1", 2, "Celta Vigo", "Aspas", "Mina", 60.0, 40.0),
            pass("2", 3, "Celta Vigo", "Mina", "Aspas", 50.0, 30.0),
        ];
        let err = process_match(5, events, &builder(45), &mut FailingSink).unwrap_err();
        assert_eq!("writing network 5_Celta-Vigo_0_150", err.to_string());
    }

    #[test]
    fn report_team() {
        let report = TeamReport::Skipped {
            team: "Alavés".into(),
            reason: Insufficiency::NoEligiblePasses { cutoff: 150 },
        };
        assert_eq!("Alavés", report.team());
        assert!(!report.is_written());
    }
}
