use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;
use std::fs::File;
use std::path::PathBuf;

use cvplayer::player::PlaybackSession;
use cvplayer::terminal::{CrosstermInput, CrosstermScreen};
use cvplayer::utils::Config;

/// CVPlayer - a lightweight terminal player for cell-video files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cell-video file to play
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Restart from the first frame after the last one
    #[arg(short, long = "loop")]
    looping: bool,

    /// Start playing immediately instead of paused
    #[arg(long)]
    play: bool,

    /// Disable the color palette
    #[arg(long)]
    no_color: bool,

    /// Start with the panel overlay hidden
    #[arg(long)]
    hide_panel: bool,

    /// Enable debug logging (written to cvplayer.log)
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load()?;
    if args.looping {
        config.playback.looping = true;
    }
    if args.play {
        config.playback.autoplay = true;
    }
    if args.no_color {
        config.terminal.color = false;
    }
    if args.hide_panel {
        config.terminal.show_panel = false;
    }

    // The terminal is the renderer's canvas, so debug logs go to a file
    // instead of stderr.
    let level = if args.debug {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str()));
    builder.format_timestamp_millis();
    if args.debug {
        let log_file = File::create("cvplayer.log")?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }
    builder.init();

    info!("Starting cvplayer v{}", env!("CARGO_PKG_VERSION"));

    // Validate and prime the session before touching the terminal, so
    // open errors print like normal CLI errors.
    let mut session = PlaybackSession::open(&args.file, &config)?;

    let mut screen = CrosstermScreen::new(config.terminal.color)?;
    let mut input = CrosstermInput::new();
    let outcome = session.run(&mut screen, &mut input);

    session.shutdown();
    drop(screen);

    outcome?;
    info!("cvplayer exiting");
    Ok(())
}
