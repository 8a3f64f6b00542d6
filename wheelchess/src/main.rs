//! Wheelchess terminal runner.
//!
//! Drives the selection controller on a fixed tick. Presses come either from
//! a script file or from stdin, one script line at a time, and the board is
//! repainted as text whenever the controller reports a change.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chess::{Board, Team};
use wheelchess::terminal::{Glyphs, TerminalSink};
use wheelchess::{config, load_script, parse_script, Controller, InputSource, PressFlags, ScriptedInput};

#[derive(Parser)]
#[command(name = "wheelchess", about = "Chess driven by a four-way switch")]
struct Cli {
    /// Replay presses from a script file instead of reading stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Starting piece placement, FEN style (first row is Black's home rank).
    #[arg(long)]
    position: Option<String>,

    /// Side to move in the starting position.
    #[arg(long, value_enum, default_value_t = Side::White)]
    turn: Side,

    /// Draw pieces as letters instead of chess symbols.
    #[arg(long)]
    ascii: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Team {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Team::White,
            Side::Black => Team::Black,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing()?;

    tracing::info!("Wheelchess starting up");
    let result = run(cli).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Wheelchess stopped with an error");
    }
    tracing::info!("Wheelchess shutting down");
    result
}

fn init_tracing() -> anyhow::Result<WorkerGuard> {
    let log_dir = config::get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "wheelchess");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(guard)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let board = match &cli.position {
        Some(placement) => Board::from_placement(placement, cli.turn.into())
            .with_context(|| format!("invalid --position '{placement}'"))?,
        None => Board::new(),
    };
    let period = config::get_tick_period();

    let mut input: Box<dyn InputSource> = match &cli.script {
        Some(path) => Box::new(ScriptedInput::new(load_script(path)?)),
        None => {
            let flags = Arc::new(PressFlags::new());
            tokio::spawn(feed_stdin(Arc::clone(&flags), period));
            Box::new(flags)
        }
    };

    let glyphs = if cli.ascii { Glyphs::Ascii } else { Glyphs::Unicode };
    let mut sink = TerminalSink::new(glyphs);
    let mut controller = Controller::with_board(board);
    let mut stdout = std::io::stdout();

    tracing::info!(tick = ?period, "game loop started");
    controller.start(&mut sink);
    sink.flush(&controller, &mut stdout)?;

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        controller.tick(input.poll(), &mut sink);
        sink.flush(&controller, &mut stdout)?;

        if controller.is_halted() {
            tracing::info!(frames = sink.frames(), "game over");
            break;
        }
        if input.is_exhausted() {
            tracing::info!(frames = sink.frames(), "input exhausted");
            break;
        }
    }
    Ok(())
}

/// Stand-in for the button interrupt: each stdin line is parsed as script
/// text and its ticks are raised one at a time, waiting for the game loop to
/// take each before raising the next.
async fn feed_stdin(flags: Arc<PressFlags>, period: Duration) {
    if let Err(e) = pump_lines(&flags, period).await {
        tracing::error!(error = %e, "stdin reader failed");
    }
    flags.close();
}

async fn pump_lines(flags: &PressFlags, period: Duration) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let ticks = match parse_script(&line) {
            Ok(ticks) => ticks,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring input line");
                eprintln!("{e}");
                continue;
            }
        };
        for presses in ticks {
            flags.press_all(presses);
            tokio::time::sleep(period).await;
            while !flags.peek().is_empty() {
                tokio::time::sleep(period).await;
            }
        }
    }
    Ok(())
}
