use std::path::{Path, PathBuf};

use clap::Parser;
use host::{run_session, Recorder, Script, SessionSummary};
use tabletop::visualize_board;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Paths to click scripts (JSON) to replay, one session each
    #[clap(num_args(1..), value_delimiter = ' ')]
    scripts: Vec<PathBuf>,

    /// Print the final board of each session
    #[arg(short, long, default_value_t = false)]
    print_board: bool,

    /// Record each session's clicks and moves as JSON files into this directory
    #[arg(short, long)]
    record_to: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn print_summary(path: &Path, summary: &SessionSummary, print_board: bool) {
    eprintln!(
        "{}:\n- {} clicks\n- {} moves issued, {} applied, {} rejected",
        path.display(),
        summary.clicks,
        summary.moves_issued,
        summary.moves_applied,
        summary.moves_rejected
    );
    if print_board {
        println!("{}", visualize_board(&summary.view));
    }
    println!("{}", summary.final_pgn);
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let mut recorder = if let Some(dir_path) = args.record_to {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    for path in &args.scripts {
        let script = Script::load(path)?;
        info!(script = %path.display(), clicks = script.clicks.len(), "Replaying");
        let summary = run_session(&script, &mut recorder)?;
        if let Some(winner) = summary.winner {
            info!(?winner, "Game over");
        }
        print_summary(path, &summary, args.print_board);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
