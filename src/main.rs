//! Pulse CLI - render and query Euclidean rhythms, or start the REPL

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use pulse::commands::CommandContext;
use pulse::{DisplayConfig, Rhythm};
use tracing::Level;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Euclidean rhythm toolkit", long_about = None)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Character shown for hits
    #[arg(long, default_value = "x", global = true)]
    hit: char,

    /// Character shown for rests
    #[arg(long, default_value = ".", global = true)]
    rest: char,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a rhythm as a row of hits and rests
    #[command(allow_negative_numbers = true)]
    Render {
        onsets: i64,
        pulses: i64,

        /// Rotation in steps (any integer)
        #[arg(short, long, default_value = "0")]
        phase: i64,

        /// Steps to read (defaults to pulses)
        #[arg(short, long)]
        length: Option<i64>,
    },
    /// Answer hit or rest for one or more cursors
    #[command(allow_negative_numbers = true)]
    Query {
        onsets: i64,
        pulses: i64,

        #[arg(required = true)]
        cursors: Vec<i64>,

        #[arg(short, long, default_value = "0")]
        phase: i64,

        #[arg(short, long)]
        length: Option<i64>,
    },
    /// Run a pattern file and print the value of every expression
    Run { file: String },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_rhythm(onsets: i64, pulses: i64, phase: i64, length: Option<i64>) -> Result<Rhythm> {
    let rhythm = Rhythm::new(onsets, pulses)?.with_phase(phase);
    Ok(match length {
        Some(length) => rhythm.with_length(length)?,
        None => rhythm,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut display = DisplayConfig {
        color: !cli.no_color,
        ..DisplayConfig::default()
    };
    if let Err(e) = display.set_style(cli.hit, cli.rest) {
        bail!(e);
    }
    display.apply_color();

    match cli.command {
        None => pulse::repl::start(display),
        Some(Commands::Render {
            onsets,
            pulses,
            phase,
            length,
        }) => {
            tracing::debug!(onsets, pulses, phase, ?length, "render");
            let rhythm = build_rhythm(onsets, pulses, phase, length)?;
            println!("{}", display.render(&rhythm));
            Ok(())
        }
        Some(Commands::Query {
            onsets,
            pulses,
            cursors,
            phase,
            length,
        }) => {
            tracing::debug!(onsets, pulses, phase, ?length, count = cursors.len(), "query");
            let rhythm = build_rhythm(onsets, pulses, phase, length)?;
            for cursor in cursors {
                let step = if rhythm.is_hit(cursor) { "hit" } else { "rest" };
                println!("{}\t{}", cursor, step);
            }
            Ok(())
        }
        Some(Commands::Run { file }) => {
            let mut ctx = CommandContext::new(display);
            let values = ctx
                .load_file(&file)
                .with_context(|| format!("while running {}", file))?;
            for value in values {
                println!("{}", ctx.display.describe(&value));
            }
            Ok(())
        }
    }
}
