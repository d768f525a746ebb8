use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::{HarnessError, Result};
use crate::replay::{ReplayOptions, replay};
use crate::trace::{SessionShape, chat_session, write_trace};

#[derive(Debug, Parser)]
#[command(
    name = "scrollwin-harness",
    about = "Replay host-event traces through the scroll window and check its invariants",
    version
)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a JSONL trace and write one frame record per `frame` event.
    Replay(ReplayArgs),

    /// Write a synthetic chat-history trace.
    Sample(SampleArgs),
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Trace file, or `-` for stdin.
    pub trace: PathBuf,

    /// Output file for frame records (default: stdout).
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Verify window invariants; exit with code 2 on the first violation.
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Args)]
pub struct SampleArgs {
    #[arg(long, default_value_t = 1000)]
    pub items: usize,

    #[arg(long, default_value_t = 80)]
    pub row_height: i64,

    #[arg(long, default_value_t = 400)]
    pub viewport_height: i64,

    /// Messages appended at the end of the session.
    #[arg(long, default_value_t = 5)]
    pub appends: usize,

    /// Output file (default: stdout).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay(args) => run_replay(args),
        Commands::Sample(args) => run_sample(args),
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the default `warn`.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn run_replay(args: ReplayArgs) -> Result<()> {
    let options = ReplayOptions {
        check_invariants: args.check,
    };
    let mut out = open_output(args.out.as_ref())?;

    let summary = if args.trace.as_os_str() == "-" {
        replay(io::stdin().lock(), &mut out, options)?
    } else {
        let file = File::open(&args.trace).map_err(|source| HarnessError::OpenTrace {
            path: args.trace.clone(),
            source,
        })?;
        replay(BufReader::new(file), &mut out, options)?
    };

    tracing::info!(
        frames = summary.frames,
        final_offset = summary.final_offset,
        "replay complete"
    );
    Ok(())
}

fn run_sample(args: SampleArgs) -> Result<()> {
    let records = chat_session(SessionShape {
        items: args.items,
        row_height: args.row_height,
        viewport_height: args.viewport_height,
        appends: args.appends,
    });
    let mut out = open_output(args.out.as_ref())?;
    write_trace(&mut out, &records)?;
    out.flush()?;
    Ok(())
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
