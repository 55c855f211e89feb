//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser as ClapParser;

use chatstats::ChatStatsError;
use chatstats::cli::{Args, Command, StatsArgs, ViewArgs};
use chatstats::format::{ReportFormat, conversation_to_string, stats_to_string};
use chatstats::session::Session;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> Result<(), ChatStatsError> {
    match args.command {
        Command::Stats(stats) => run_stats(&stats),
        Command::View(view) => run_view(&view),
    }
}

fn run_stats(args: &StatsArgs) -> Result<(), ChatStatsError> {
    let format = ReportFormat::from(args.format);
    if !format.supports_stats() {
        return Err(ChatStatsError::invalid_format(
            "stats",
            format!("{format} is only available for `view`"),
        ));
    }

    let mut session = Session::new().with_stats_config(args.stats_config());
    session.load_path(&args.input)?;
    let Some(stats) = session.stats() else {
        return Ok(());
    };

    let rendered = stats_to_string(stats, format)?;
    emit(&rendered, args.output.as_deref())
}

fn run_view(args: &ViewArgs) -> Result<(), ChatStatsError> {
    let filter = args.filter()?;

    let mut session = Session::new();
    session.load_path(&args.input)?;
    let messages = session.dataset().map(|d| d.messages()).unwrap_or_default();

    let mut view = filter.apply(messages);
    log::info!("{} of {} messages match", view.len(), messages.len());
    if let Some(limit) = args.limit {
        let skip = view.len().saturating_sub(limit);
        view.drain(..skip);
    }

    let rendered = conversation_to_string(&view, args.format.into())?;
    emit(&rendered, args.output.as_deref())
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), ChatStatsError> {
    match output {
        Some(path) => {
            fs::write(path, content).map_err(ChatStatsError::WriteFailure)?;
            log::info!("output saved to {}", path.display());
            Ok(())
        }
        None => {
            print!("{content}");
            Ok(())
        }
    }
}
