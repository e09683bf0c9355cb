//! Mimas terminal harness
//!
//! Runs sessions on an in-memory matrix, flying the ship with the
//! autopilot, and prints the panel as text.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;

use mimas::audio::LogBuzzer;
use mimas::consts::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SIM_DT};
use mimas::renderer::MatrixDisplay;
use mimas::sim::{GamePhase, TickInput};
use mimas::{DifficultyPreset, Game, Settings};

#[derive(Parser, Debug)]
#[command(name = "mimas", about = "Arcade shooter for a 32x16 LED matrix")]
struct Args {
    /// Settings file (JSON)
    #[arg(long, default_value = "mimas.json")]
    config: PathBuf,

    /// Starting level
    #[arg(long)]
    level: Option<u32>,

    /// Difficulty: a multiplier or easy/normal/hard
    #[arg(long)]
    difficulty: Option<String>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to simulate before exiting
    #[arg(long, default_value_t = 900)]
    ticks: u64,

    /// Pace ticks in real time and print every frame
    #[arg(long)]
    realtime: bool,

    /// Silence the buzzer
    #[arg(long)]
    mute: bool,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,
}

fn parse_difficulty(s: &str) -> Result<u32> {
    if let Ok(n) = s.parse::<u32>() {
        if n == 0 {
            bail!("difficulty must be at least 1");
        }
        return Ok(n);
    }
    DifficultyPreset::from_str(s)
        .map(|p| p.value())
        .with_context(|| format!("unknown difficulty '{}'", s))
}

fn settings_from(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load_or_default(&args.config);
    if let Some(level) = args.level {
        settings.select_level(level);
    }
    if let Some(difficulty) = &args.difficulty {
        settings.select_difficulty(parse_difficulty(difficulty)?);
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if args.mute {
        settings.muted = true;
    }
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = settings_from(&args)?;

    if args.save_config {
        settings
            .save(&args.config)
            .with_context(|| format!("failed to write {}", args.config.display()))?;
    }

    log::info!("Mimas starting...");
    let display = MatrixDisplay::open(DISPLAY_WIDTH, DISPLAY_HEIGHT);
    let mut game = Game::new(settings, display, LogBuzzer::default());
    game.start();

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let frame_time = Duration::from_secs_f32(SIM_DT);
    let mut sessions = 1u32;
    let mut last = Instant::now();
    let mut ticks_run = 0u64;

    while ticks_run < args.ticks {
        if args.realtime {
            let elapsed = last.elapsed();
            if elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
            let now = Instant::now();
            let dt = (now - last).as_secs_f32();
            last = now;
            ticks_run += game.update(dt, &input) as u64;
            print!("\x1b[H{}", game.display().to_ascii());
        } else {
            game.frame(&input);
            ticks_run += 1;
        }

        if game.phase() == GamePhase::GameOver {
            log::info!(
                "Session {} over: score {}, high score {}",
                sessions,
                game.state().score,
                game.state().high_score
            );
            game.restart();
            game.start();
            sessions += 1;
        }
    }

    println!("{}", game.display().to_ascii());
    println!(
        "sessions: {}  score: {}  high score: {}  tones: {}",
        sessions,
        game.state().score,
        game.state().high_score,
        game.audio().buzzer().tones_played
    );
    Ok(())
}
