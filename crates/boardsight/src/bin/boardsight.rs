use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use boardsight::board::{BoardFrame, FixedCorners, Side, Square};
use boardsight::{
    execute_move, plan_move, DragGesture, LogPointer, Orientation, ScreenshotSource, Session,
    SessionConfig,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use boardsight::core::level_from_verbosity;
#[cfg(not(feature = "tracing"))]
use boardsight::core::init_with_level;
#[cfg(feature = "tracing")]
use boardsight::core::{init_tracing, TracingFormat};
#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

#[derive(Parser, Debug)]
#[command(name = "boardsight", version, about = "Read and play an on-screen chessboard")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config template to edit with the calibrated corners.
    InitConfig {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = "pieces")]
        pieces_dir: PathBuf,
        #[arg(long, default_value = "white")]
        orientation: Orientation,
    },
    /// Classify the pieces on the given squares.
    Identify {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(long)]
        screen: PathBuf,
        #[arg(long)]
        json: bool,
        #[arg(required = true)]
        squares: Vec<String>,
    },
    /// Classify all 64 squares.
    Board {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(long)]
        screen: PathBuf,
        #[arg(long)]
        json: bool,
        /// Also write every cell crop as `<square>.png` into this directory.
        #[arg(long)]
        dump_dir: Option<PathBuf>,
    },
    /// Print the screen endpoints of a move.
    Plan {
        #[command(flatten)]
        session: SessionArgs,
        from: String,
        to: String,
    },
    /// Perform a move with a logging pointer; nothing on screen is touched.
    Move {
        #[command(flatten)]
        session: SessionArgs,
        from: String,
        to: String,
    },
    /// Crop one move-log entry for a text recognizer.
    MoveLog {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(long)]
        screen: PathBuf,
        /// 1-based move number.
        #[arg(long)]
        row: u32,
        #[arg(long, value_enum, default_value_t = SideArg::White)]
        side: SideArg,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Session config JSON.
    #[arg(long, short)]
    config: PathBuf,
    /// Override the configured orientation.
    #[arg(long)]
    orientation: Option<Orientation>,
}

impl SessionArgs {
    fn load(&self) -> Result<SessionConfig, Box<dyn std::error::Error>> {
        let mut cfg = SessionConfig::load_json(&self.config)?;
        if let Some(orientation) = self.orientation {
            cfg.orientation = orientation;
        }
        Ok(cfg)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SideArg {
    White,
    Black,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::White => Side::White,
            SideArg::Black => Side::Black,
        }
    }
}

#[derive(Serialize)]
struct SquareOut<'a> {
    square: String,
    label: Option<&'a str>,
    score: f32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::InitConfig {
            out,
            pieces_dir,
            orientation,
        } => {
            SessionConfig::template(pieces_dir, orientation)?.write_json(&out)?;
            println!("wrote {}", out.display());
        }
        Command::Identify {
            session,
            screen,
            json,
            squares,
        } => {
            let session = Session::from_config(&session.load()?)?;
            let screen = ScreenshotSource::open(&screen)?;
            let mut rows = Vec::with_capacity(squares.len());
            for sq in &squares {
                rows.push((sq.clone(), session.identify(&screen, sq)?));
            }
            if json {
                let out: Vec<_> = rows
                    .iter()
                    .map(|(square, r)| SquareOut {
                        square: square.clone(),
                        label: r.label.as_deref(),
                        score: r.score,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for (square, r) in &rows {
                    println!("{square}: {} ({:.3})", r.label.as_deref().unwrap_or("-"), r.score);
                }
            }
        }
        Command::Board {
            session,
            screen,
            json,
            dump_dir,
        } => {
            let session = Session::from_config(&session.load()?)?;
            let screen = ScreenshotSource::open(&screen)?;
            if let Some(dir) = dump_dir {
                dump_cells(&session, &screen, &dir)?;
            }
            let reading = session.read_board(&screen)?;
            if json {
                let out: Vec<_> = reading
                    .iter()
                    .map(|(square, r)| SquareOut {
                        square: square.to_string(),
                        label: r.label.as_deref(),
                        score: r.score,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{reading}");
                println!("lowest score {:.3}", reading.min_score());
            }
        }
        Command::Plan { session, from, to } => {
            let cfg = session.load()?;
            let frame = BoardFrame::detect(&FixedCorners(cfg.board))?;
            let (src, dst) = plan_move(&from, &to, &frame, cfg.orientation)?;
            println!("{from} {} {}", src.x, src.y);
            println!("{to} {} {}", dst.x, dst.y);
        }
        Command::Move { session, from, to } => {
            let cfg = session.load()?;
            let frame = BoardFrame::detect(&FixedCorners(cfg.board))?;
            let gesture: DragGesture = cfg.gesture();
            let mut pointer = LogPointer::default();
            let (src, dst) = execute_move(
                &from,
                &to,
                &frame,
                cfg.orientation,
                &mut pointer,
                &gesture,
            )?;
            println!("dragged {from} ({src}) -> {to} ({dst})");
        }
        Command::MoveLog {
            session,
            screen,
            row,
            side,
            out,
        } => {
            let session = Session::from_config(&session.load()?)?;
            let screen = ScreenshotSource::open(&screen)?;
            session.capture_move(&screen, row, side.into())?.save(&out)?;
            println!("wrote {}", out.display());
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = level_from_verbosity(verbose);
    #[cfg(feature = "tracing")]
    {
        if init_tracing(TracingFormat::Compact, level).is_ok() {
            let _ = LogTracer::init();
        }
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = init_with_level(level);
    }
}

fn dump_cells(
    session: &Session,
    screen: &ScreenshotSource,
    dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let board = session.capture_board(screen)?;
    for square in Square::all() {
        let name = square.to_string();
        let cell = session.capture_square(&board, &name)?;
        cell.save(dir.join(format!("{name}.png")))?;
    }
    log::info!("wrote 64 cells to {}", dir.display());
    Ok(())
}
