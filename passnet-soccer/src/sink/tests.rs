use std::{env, fs, process};

use passnet::csv::CsvReader;

use super::*;
use crate::event::{Event, EventType};
use crate::network::build;

fn pass(id: &str, minute: u16, from: &str, to: &str, x: f64, y: f64) -> Event {
    Event::new(id, minute, "Leverkusen", EventType::Pass)
        .with_player(from)
        .with_recipient(to)
        .with_location(x, y)
}

fn network() -> PassingNetwork {
    build(
        &[
            pass("1", 1, "Bender", "Kampl", 40.0, 30.0),
            pass("2", 2, "Kampl", "Bender", 50.0, 50.0),
            pass("3", 3, "Kampl", "Çalhanoğlu", 60.0, 20.0),
            pass("4", 4, "Çalhanoğlu", "Kampl", 80.0, 10.0),
            pass("5", 5, "Leno", "Tah", 5.0, 40.0),
        ],
        0,
    )
    .unwrap()
    .into_network()
    .unwrap()
}

fn key() -> NetworkKey {
    NetworkKey {
        match_id: 3890260,
        team: "Bayer Leverkusen".into(),
        goals: 1,
        cutoff: 150,
    }
}

fn scratch_dir(label: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("passnet-sink-{label}-{}", process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn document_lists_edges_from_both_ends() {
    let document = NetworkDocument::from(&network());
    assert_eq!(
        NetworkDocument(vec![
            PlayerRecord {
                name: "Bender".into(),
                x: 40.0,
                y: 30.0,
                passes: vec![PassRecord { name: "Kampl".into(), count: 2 }],
            },
            PlayerRecord {
                name: "Kampl".into(),
                x: 55.0,
                y: 35.0,
                passes: vec![
                    PassRecord { name: "Bender".into(), count: 2 },
                    PassRecord { name: "Çalhanoğlu".into(), count: 2 },
                ],
            },
            PlayerRecord {
                name: "Leno".into(),
                x: 5.0,
                y: 40.0,
                passes: vec![],
            },
            PlayerRecord {
                name: "Çalhanoğlu".into(),
                x: 80.0,
                y: 10.0,
                passes: vec![PassRecord { name: "Kampl".into(), count: 2 }],
            },
        ]),
        document
    );
}

#[test]
fn document_json_shape() {
    let document = NetworkDocument::from(&network());
    let json = serde_json::to_value(&document).unwrap();
    assert_eq!(
        serde_json::json!({"name": "Bender", "x": 40.0, "y": 30.0, "passes": [{"name": "Kampl", "count": 2}]}),
        json[0]
    );
}

#[test]
fn document_edges_from_one_sided_listing() {
    let document: NetworkDocument = serde_json::from_str(
        r#"[
            {"name": "Bender", "x": 40.0, "y": 30.0, "passes": [{"name": "Kampl", "count": 4}, {"name": "Bender", "count": 1}]},
            {"name": "Kampl", "x": 55.0, "y": 35.0, "passes": [{"name": "Tah", "count": 2}]}
        ]"#,
    )
    .unwrap();
    assert_eq!(
        vec![
            (UnorderedPair::new("Bender", "Kampl").unwrap(), 4),
            (UnorderedPair::new("Kampl", "Tah").unwrap(), 2),
        ],
        document.edges()
    );
    assert_eq!(vec!["Bender", "Kampl", "Tah"], document.player_names());
}

#[test]
fn csv_with_positions() {
    let mut writer = CsvWriter::wrap(Vec::new());
    write_csv(&mut writer, &network(), true).unwrap();
    let written = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(
        "player_a,x,y,player_b,x_end,y_end,pass_count\n\
         Bender,40,30,Kampl,55,35,2\n\
         Kampl,55,35,Çalhanoğlu,80,10,2\n",
        written
    );
}

#[test]
fn csv_without_positions() {
    let mut writer = CsvWriter::wrap(Vec::new());
    write_csv(&mut writer, &network(), false).unwrap();
    let written = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(
        "player_a,player_b,pass_count\nBender,Kampl,2\nKampl,Çalhanoğlu,2\n",
        written
    );
}

#[test]
fn column_selection() {
    assert_eq!(7, Column::selection(true).len());
    assert_eq!(
        vec![Column::PlayerA, Column::PlayerB, Column::PassCount],
        Column::selection(false)
    );
    assert_eq!(6, usize::from(Column::PassCount));
}

#[test]
fn json_sink_round_trip() {
    let root = scratch_dir("json");
    let mut sink = JsonSink::new(&root, CompetitionDir::new("1. Bundesliga", "2015/2016")).pretty(true);
    sink.write(&key(), &network()).unwrap();

    let path = root.join("2015-2016/1-Bundesliga/3890260_Bayer-Leverkusen_1_150.json");
    assert_eq!(path, sink.path_of(&key()));
    assert_eq!(NetworkDocument::from(&network()), read_document(&path).unwrap());
    fs::remove_dir_all(root).unwrap();
}

#[test]
fn csv_sink_writes_rows() {
    let root = scratch_dir("csv");
    let mut sink = CsvSink::new(&root, CompetitionDir::new("La Liga", "2015/2016"), true);
    sink.write(&key(), &network()).unwrap();

    let rows = CsvReader::open(sink.path_of(&key()))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(3, rows.len());
    assert_eq!(vec!["Kampl", "55", "35", "Çalhanoğlu", "80", "10", "2"], rows[2]);
    fs::remove_dir_all(root).unwrap();
}

#[test]
fn memory_sink_through_mut_ref() {
    fn write_into(mut sink: impl Sink) {
        sink.write(&key(), &network()).unwrap();
    }
    let mut sink = MemorySink::default();
    write_into(&mut sink);
    assert_eq!(1, sink.written.len());
    assert_eq!(key(), sink.written[0].0);
    assert_eq!(4, sink.written[0].1.players().len());
}

fn csv_bytes(positions: bool) -> Vec<u8> {
    let mut writer = CsvWriter::wrap(Vec::new());
    write_csv(&mut writer, &network(), positions).unwrap();
    writer.into_inner()
}

#[test]
fn csv_reads_back_into_document() {
    let bytes = csv_bytes(true);
    let document = read_csv(CsvReader::wrap(bytes.as_slice())).unwrap();
    let mut expected = NetworkDocument::from(&network());
    expected.0.retain(|player| !player.passes.is_empty());
    assert_eq!(expected, document);
    assert_eq!(vec!["Bender", "Kampl", "Çalhanoğlu"], document.player_names());
}

#[test]
fn csv_without_positions_reads_at_origin() {
    let bytes = csv_bytes(false);
    let document = read_csv(CsvReader::wrap(bytes.as_slice())).unwrap();
    assert_eq!(3, document.players().len());
    assert!(document.players().iter().all(|player| player.x == 0.0 && player.y == 0.0));
    assert_eq!(
        NetworkDocument::from(&network()).edges(),
        document.edges()
    );
}

#[test]
fn csv_read_errors() {
    let read = |text: &str| read_csv(CsvReader::wrap(text.as_bytes()));
    assert_eq!(NetworkDocument::default(), read("").unwrap());
    assert_eq!(
        "unknown column 'passes'",
        read("player_a,player_b,passes\n").unwrap_err().to_string()
    );
    assert_eq!(
        "missing column 'pass_count'",
        read("player_a,player_b\n").unwrap_err().to_string()
    );
    assert_eq!(
        "row 1 has 2 fields, expected 3",
        read("player_a,player_b,pass_count\nA,B\n").unwrap_err().to_string()
    );
    assert_eq!(
        "row 2: cannot parse 'many'",
        read("player_a,player_b,pass_count\nA,B,1\nB,C,many\n")
            .unwrap_err()
            .to_string()
    );
}

#[test]
fn csv_file_round_trip() {
    let root = scratch_dir("csv-read");
    let mut sink = CsvSink::new(&root, CompetitionDir::new("La Liga", "2015/2016"), true);
    sink.write(&key(), &network()).unwrap();
    let document = read_csv_document(sink.path_of(&key())).unwrap();
    assert_eq!(Some(2), document.edges().first().map(|(_, count)| *count));
    fs::remove_dir_all(root).unwrap();
}
