use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use passnet_soccer::adjacency::AdjacencyMatrix;
use passnet_soccer::metrics::NetworkMetrics;
use passnet_soccer::naming::NetworkKey;
use passnet_soccer::print;
use passnet_soccer::sink::{read_csv_document, read_document};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// saved network to inspect, in either the JSON or the CSV shape
    file: PathBuf,

    /// write the weighted adjacency matrix to this CSV file
    #[clap(short = 'a', long)]
    adjacency: Option<PathBuf>,

    /// print the weighted adjacency matrix
    #[clap(short = 'm', long)]
    matrix: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !self.file.is_file() {
            bail!("{} is not a file", self.file.display());
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let stem = args
        .file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", args.file.display()))?;
    match stem.parse::<NetworkKey>() {
        Ok(key) => info!(
            "match {}, team {}, {} goal(s) before minute {}",
            key.match_id, key.team, key.goals, key.cutoff
        ),
        Err(err) => warn!("{err}"),
    }

    let is_csv = args
        .file
        .extension()
        .map_or(false, |extension| extension.eq_ignore_ascii_case("csv"));
    let document = if is_csv {
        read_csv_document(&args.file)
    } else {
        read_document(&args.file)
    }
    .with_context(|| format!("reading network from {}", args.file.display()))?;
    info!(
        "players:\n{}",
        Console::default().render(&print::tabulate_players(&document))
    );
    info!(
        "edges:\n{}",
        Console::default().render(&print::tabulate_edges(&document))
    );
    let metrics = NetworkMetrics::from_document(&document);
    info!(
        "metrics:\n{}",
        Console::default().render(&print::tabulate_metrics(&metrics))
    );

    let adjacency = AdjacencyMatrix::from_document(&document);
    if args.matrix {
        info!(
            "adjacency:\n{}",
            Console::default().render(&print::tabulate_adjacency(&adjacency))
        );
    }
    if let Some(path) = &args.adjacency {
        adjacency
            .write_csv_file(path)
            .with_context(|| format!("writing adjacency matrix to {}", path.display()))?;
        info!("wrote adjacency matrix to {}", path.display());
    }
    Ok(())
}
