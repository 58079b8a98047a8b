use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use anyhow::Context;
use blockfall::{Game, HEIGHT, WIDTH};
use clap::{Parser, ValueEnum};
use log::{info, warn, LevelFilter};
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use rand::{rngs::StdRng, SeedableRng};
use tap::Pipe;

/// Clear the screen and move the cursor home.
const CLEAR: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Parser)]
#[command(about, override_usage = "blockfall [OPTIONS]")]
struct Args {
    /// Board width, in cells
    #[arg(long, default_value_t = WIDTH, value_parser = clap::value_parser!(u16).range(1..))]
    width: u16,
    /// Board height, in cells
    #[arg(long, default_value_t = HEIGHT, value_parser = clap::value_parser!(u16).range(1..))]
    height: u16,
    /// Pause between frames, in milliseconds
    #[arg(long, default_value_t = 30)]
    delay_ms: u64,
    /// Seed for a repeatable run
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many frames instead of running until interrupted
    #[arg(long)]
    frames: Option<u64>,
    /// Remove full rows after every block lands
    #[arg(long)]
    clear_full_rows: bool,
    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

// stdout carries the frames, so logs only ever go to a file
fn init_log(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
        )))
        .build(path)
        .with_context(|| format!("couldn't open log file {}", path.display()))?;
    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(level))
        .context("invalid log configuration")?;
    log4rs::init_config(config).context("couldn't install logger")?;
    Ok(())
}

/// Drop one block and print the board.
fn frame(game: &mut Game, rng: &mut StdRng, out: &mut impl Write) -> anyhow::Result<()> {
    game.step(rng)?;
    writeln!(out, "{CLEAR}{game}").context("couldn't write frame")?;
    out.flush().context("couldn't flush frame")?;
    Ok(())
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|err| err.kind() == io::ErrorKind::BrokenPipe)
}

/// Drop blocks and print a frame after each one until `interrupted` is set, the frame limit
/// is reached or the reader of `out` goes away.
///
/// Any other failed frame starts a new game rather than ending the run.
fn run(
    args: &Args,
    rng: &mut StdRng,
    interrupted: &AtomicBool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut game = Game::new(args.width, args.height).pipe(|game| {
        if args.clear_full_rows {
            game.with_full_rows_cleared()
        } else {
            game
        }
    });
    let delay = Duration::from_millis(args.delay_ms);
    let mut frames = 0;
    while !interrupted.load(Ordering::SeqCst) && args.frames.map_or(true, |limit| frames < limit) {
        match frame(&mut game, rng, out) {
            Ok(()) => frames += 1,
            Err(err) if is_broken_pipe(&err) => {
                info!("output closed after {frames} frames");
                break;
            }
            Err(err) => {
                warn!("{err:#}, starting a new game after {} turns", game.turn());
                game.reset();
                continue;
            }
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_log(path, args.log_level.into())?;
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    ctrlc::set_handler({
        let interrupted = Arc::clone(&interrupted);
        move || interrupted.store(true, Ordering::SeqCst)
    })
    .context("couldn't install interrupt handler")?;

    let mut rng = args
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    info!(
        "starting on a {}x{} board (seed: {:?})",
        args.width, args.height, args.seed
    );

    run(&args, &mut rng, &interrupted, &mut io::stdout().lock())?;
    info!("stopped");
    Ok(())
}
