use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use passnet::timed::Timed;
use passnet_soccer::config::{OutputFormat, PipelineConfig};
use passnet_soccer::data::read_match_dir;
use passnet_soccer::pipeline::{process_match, ReportTally};
use passnet_soccer::print;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// directory containing the match event files
    events: PathBuf,

    /// JSON file to source the settings from
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// competition name
    #[clap(long)]
    competition: Option<String>,

    /// season name, e.g. 2018/2019
    #[clap(long)]
    season: Option<String>,

    /// root directory to write the networks to
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,

    /// discard networks whose first substitution comes before this minute
    #[clap(short = 'm', long = "min-stable-minutes")]
    min_stable_minutes: Option<u16>,

    /// output format: json or csv
    #[clap(short = 'f', long)]
    format: Option<OutputFormat>,

    /// omit position columns from CSV output
    #[clap(long = "no-positions")]
    no_positions: bool,

    /// pretty-print JSON output
    #[clap(long)]
    pretty: bool,

    /// print a row for every team of every match
    #[clap(short = 'v', long)]
    verbose: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !self.events.is_dir() {
            bail!("{} is not a directory", self.events.display());
        }
        if self.config.is_none() && (self.competition.is_none() || self.season.is_none()) {
            bail!("either the -c flag or both --competition and --season must be specified");
        }
        Ok(())
    }

    fn pipeline_config(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(competition) = &self.competition {
            config.competition = competition.clone();
        }
        if let Some(season) = &self.season {
            config.season = season.clone();
        }
        if let Some(out) = &self.out {
            config.out = out.clone();
        }
        if let Some(min_stable_minutes) = self.min_stable_minutes {
            config.min_stable_minutes = min_stable_minutes;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.no_positions {
            config.positions = false;
        }
        if self.pretty {
            config.pretty = true;
        }
        config.validate()?;
        Ok(config)
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
    let config = args.pipeline_config()?;
    debug!("config: {config:?}");

    let builder = config.builder()?;
    let mut sink = config.sink();
    let matches = read_match_dir(&args.events)?;
    info!(
        "building {} networks for {} matches of {} {}",
        config.format,
        matches.len(),
        config.competition,
        config.season
    );

    let timed = Timed::value(|| {
        let mut reports = vec![];
        for match_file in &matches {
            let events = match match_file.read_events() {
                Ok(events) => events,
                Err(err) => {
                    warn!("skipping match {}: {err:#}", match_file.match_id);
                    continue;
                }
            };
            match process_match(match_file.match_id, events, &builder, &mut sink) {
                Ok(match_reports) => reports.extend(
                    match_reports
                        .into_iter()
                        .map(|report| (match_file.match_id, report)),
                ),
                Err(err) => warn!("skipping match {}: {err:#}", match_file.match_id),
            }
        }
        reports
    });

    let reports = &timed.value;
    if args.verbose {
        info!(
            "team reports:\n{}",
            Console::default().render(&print::tabulate_reports(&reports))
        );
    }
    let tally: ReportTally = reports.iter().map(|(_, report)| report).collect();
    info!(
        "summary:\n{}",
        Console::default().render(&print::tabulate_tally(&tally))
    );
    info!(
        "wrote {} networks to {} in {:.3}s",
        tally.written,
        config.out.join(config.competition_dir().relative_path()).display(),
        timed.elapsed_secs()
    );
    Ok(())
}
