use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Cell, Col, Row, Table};

use crate::adjacency::AdjacencyMatrix;
use crate::metrics::{weighted_degrees, NetworkMetrics};
use crate::pipeline::{ReportTally, TeamReport};
use crate::sink::NetworkDocument;

pub fn tabulate_players(document: &NetworkDocument) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Player".into(),
                "X".into(),
                "Y".into(),
                "Partners".into(),
                "Degree".into(),
            ],
        ));
    let degrees = weighted_degrees(document);
    for player in document.players() {
        let degree = degrees
            .iter()
            .find(|(name, _)| *name == player.name)
            .map(|(_, degree)| *degree)
            .unwrap_or_default();
        table.push_row(Row::new(
            Styles::default(),
            vec![
                player.name.clone().into(),
                format!("{:.1}", player.x).into(),
                format!("{:.1}", player.y).into(),
                format!("{}", player.passes.len()).into(),
                format!("{degree}").into(),
            ],
        ));
    }
    table
}

pub fn tabulate_edges(document: &NetworkDocument) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Player A".into(), "Player B".into(), "Passes".into()],
        ));
    for (pair, count) in document.edges() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                pair.first().to_string().into(),
                pair.second().to_string().into(),
                format!("{count}").into(),
            ],
        ));
    }
    table
}

pub fn tabulate_metrics(metrics: &NetworkMetrics) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(16)).with(Left)),
        Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
    ]);
    for (label, value) in [
        ("Players", format!("{}", metrics.players)),
        ("Edges", format!("{}", metrics.edges)),
        ("Passes", format!("{}", metrics.total_passes)),
        ("Density", format!("{:.3}", metrics.density)),
        ("Gini", format!("{:.3}", metrics.involvement_gini)),
        ("Centralization", format!("{:.3}", metrics.centralization)),
    ] {
        table.push_row(Row::new(Styles::default(), vec![label.into(), value.into()]));
    }
    table
}

pub fn tabulate_reports(reports: &[(u64, TeamReport)]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(30)).with(Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Match".into(), "Team".into(), "Outcome".into(), "Detail".into()],
        ));
    for (match_id, report) in reports {
        let (outcome, detail) = match report {
            TeamReport::Written { key, nodes, edges } => (
                "written",
                format!("{key}: {nodes} players, {edges} edges"),
            ),
            TeamReport::Skipped { reason, .. } => ("skipped", reason.to_string()),
            TeamReport::Malformed { error, .. } => ("malformed", error.to_string()),
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{match_id}").into(),
                report.team().to_string().into(),
                outcome.into(),
                detail.into(),
            ],
        ));
    }
    table
}

pub fn tabulate_tally(tally: &ReportTally) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(10)).with(Left)),
        Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
    ]);
    for (label, count) in [
        ("Written", tally.written),
        ("Skipped", tally.skipped),
        ("Malformed", tally.malformed),
        ("Total", tally.total()),
    ] {
        table.push_row(Row::new(
            Styles::default(),
            vec![label.into(), format!("{count}").into()],
        ));
    }
    table
}

pub fn tabulate_adjacency(matrix: &AdjacencyMatrix) -> Table {
    let players = matrix.players();
    let mut cols = vec![Col::new(Styles::default().with(MinWidth(20)).with(Left))];
    cols.extend(
        players
            .iter()
            .map(|_| Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right))),
    );
    let mut header: Vec<Cell> = vec!["".into()];
    header.extend(players.iter().map(|player| player.clone().into()));
    let mut table = Table::default()
        .with_cols(cols)
        .with_row(Row::new(Styles::default().with(Header(true)), header));
    for (row, player) in players.iter().enumerate() {
        let mut cells: Vec<Cell> = vec![player.clone().into()];
        cells.extend(matrix.weights().row_slice(row).iter().map(|weight| -> Cell {
            if weight.is_finite() {
                format!("{weight:.2}").into()
            } else {
                "∞".into()
            }
        }));
        table.push_row(Row::new(Styles::default(), cells));
    }
    table
}
