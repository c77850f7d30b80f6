mod input;
mod ui;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::CrosstermInput;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use simon::audio::{
    export_sounds, AudioSink, DeviceSink, FanOut, NullSink, ToneBank, WavRecorder,
};
use simon::build_info;
use simon::core::clock::SystemClock;
use simon::core::config::{GameConfig, CONFIG_FILE};
use simon::driver::{GameDriver, TickStatus};
use simon::presentation::BoardView;
use simon::simon::SimonPhase;
use simon::utils::logging::init_logging;
use simon::utils::persistence::data_path;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Play,
    Tones(PathBuf),
    Config,
    Version,
    Help,
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config = GameConfig::load();

    let command = match parse_args(&args, &mut config) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'simon --help' for usage.");
            std::process::exit(1);
        }
    };
    let config = config.validated();

    match command {
        Command::Version => {
            println!("{}", build_info::version_line());
            Ok(())
        }
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Config => show_config(),
        Command::Tones(dir) => export_tones(&config, &dir),
        Command::Play => play(&config),
    }
}

/// Apply flags to `config` and pick the command to run.
fn parse_args(args: &[String], config: &mut GameConfig) -> Result<Command, String> {
    let mut command = Command::Play;
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a number")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                config.seed = Some(seed);
            }
            "--record-wav" => {
                let value = iter.next().ok_or("--record-wav needs a file path")?;
                config.record_wav = Some(PathBuf::from(value));
            }
            "--mute" => config.muted = true,
            "--no-shuffle" => config.shuffle_pads = false,
            "tones" => {
                let dir = iter.next().ok_or("tones needs an output directory")?;
                command = Command::Tones(PathBuf::from(dir));
            }
            "config" => command = Command::Config,
            other => return Err(format!("Unknown command: {}", other)),
        }
    }
    Ok(command)
}

fn print_help() {
    println!("Simon - Terminal Memory-Sequence Game\n");
    println!("Usage: simon [options] [command]\n");
    println!("Commands:");
    println!("  tones DIR           Export every game sound as a WAV file");
    println!("  config              Show the config file path (writes defaults if missing)");
    println!("\nOptions:");
    println!("  --seed N            Fixed random seed");
    println!("  --record-wav PATH   Record all game audio to a WAV file");
    println!("  --mute              Disable audio");
    println!("  --no-shuffle        Keep the pads in red/green/blue/yellow order");
    println!("  --version           Show version information");
    println!("  --help              Show this help message");
}

fn show_config() -> io::Result<()> {
    let path = data_path(CONFIG_FILE)?;
    if path.exists() {
        println!("{}", path.display());
    } else {
        GameConfig::default().save()?;
        println!("Wrote default config to {}", path.display());
    }
    Ok(())
}

fn export_tones(config: &GameConfig, dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    // Exports ignore `muted`
    let bank = ToneBank::new(config.sample_rate, config.amplitude, false);
    for path in export_sounds(dir, &bank)? {
        println!("{}", path.display());
    }
    Ok(())
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

/// Speakers, unless muted. A missing device plays on silently.
fn open_device(config: &GameConfig) -> Option<DeviceSink> {
    if config.muted {
        return None;
    }
    match DeviceSink::open(config.sample_rate) {
        Ok(device) => Some(device),
        Err(e) => {
            log::warn!("no audio output, playing silently: {}", e);
            None
        }
    }
}

fn play(config: &GameConfig) -> io::Result<()> {
    match init_logging(config.log_filter()) {
        Ok(path) => log::info!("{} logging to {}", build_info::version_line(), path.display()),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    let seed = config.seed.unwrap_or_else(wall_clock_seed);
    log::info!("session seed {}", seed);

    let mut recorder = match (&config.record_wav, config.muted) {
        (Some(path), false) => Some(WavRecorder::create(path.clone(), config.sample_rate)?),
        _ => None,
    };
    let mut device = open_device(config);
    let mut silent = NullSink;

    let mut driver = GameDriver::new(config, StdRng::seed_from_u64(seed), SystemClock::new());
    let mut input = CrosstermInput::new(driver.game().layout);
    let mut board = BoardView::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut sinks: Vec<&mut dyn AudioSink> = Vec::new();
    if let Some(device) = device.as_mut() {
        sinks.push(device);
    }
    if let Some(recorder) = recorder.as_mut() {
        sinks.push(recorder);
    }
    if sinks.is_empty() {
        sinks.push(&mut silent);
    }
    let mut audio = FanOut::new(sinks);
    let result = run(
        &mut terminal,
        &mut driver,
        &mut input,
        &mut board,
        &mut audio,
        Duration::from_millis(config.frame_interval_ms),
    );

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(recorder) = recorder {
        let path = recorder.path().to_path_buf();
        let samples = recorder.samples_written();
        recorder.finish()?;
        println!("Recorded {} samples to {}", samples, path.display());
    }
    result?;

    let game = driver.game();
    if game.phase == SimonPhase::GameWon {
        println!("Congratulations! You've completed all levels!");
    } else {
        println!(
            "Goodbye! Reached level {} (best {}).",
            game.display_level(),
            game.best_level
        );
    }
    Ok(())
}

/// Main loop: tick, draw, sleep. Runs until the player quits.
fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    driver: &mut GameDriver<StdRng, SystemClock>,
    input: &mut CrosstermInput,
    board: &mut BoardView,
    audio: &mut dyn AudioSink,
    frame_interval: Duration,
) -> io::Result<()> {
    loop {
        let status = driver.tick(input, board, audio);

        terminal.draw(|frame| {
            let area = frame.size();
            let pads = ui::render_simon(frame, area, driver.game(), board);
            input.set_pad_areas(pads);
        })?;

        if status == TickStatus::Quit {
            return Ok(());
        }
        std::thread::sleep(frame_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("simon")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_args_plays_with_defaults() {
        let mut config = GameConfig::default();
        assert_eq!(parse_args(&args(&[]), &mut config), Ok(Command::Play));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = GameConfig::default();
        let command = parse_args(
            &args(&["--seed", "99", "--mute", "--no-shuffle", "--record-wav", "out.wav"]),
            &mut config,
        );
        assert_eq!(command, Ok(Command::Play));
        assert_eq!(config.seed, Some(99));
        assert!(config.muted);
        assert!(!config.shuffle_pads);
        assert_eq!(config.record_wav, Some(PathBuf::from("out.wav")));
    }

    #[test]
    fn test_subcommands() {
        let mut config = GameConfig::default();
        assert_eq!(
            parse_args(&args(&["tones", "sounds"]), &mut config),
            Ok(Command::Tones(PathBuf::from("sounds")))
        );
        assert_eq!(parse_args(&args(&["config"]), &mut config), Ok(Command::Config));
        assert_eq!(parse_args(&args(&["-v"]), &mut config), Ok(Command::Version));
        assert_eq!(parse_args(&args(&["--help"]), &mut config), Ok(Command::Help));
    }

    #[test]
    fn test_muted_opens_no_device() {
        let config = GameConfig {
            muted: true,
            ..GameConfig::default()
        };
        assert!(open_device(&config).is_none());
    }

    #[test]
    fn test_bad_arguments() {
        let mut config = GameConfig::default();
        assert!(parse_args(&args(&["--seed"]), &mut config).is_err());
        assert!(parse_args(&args(&["--seed", "abc"]), &mut config).is_err());
        assert!(parse_args(&args(&["tones"]), &mut config).is_err());
        assert_eq!(
            parse_args(&args(&["--bogus"]), &mut config),
            Err("Unknown command: --bogus".to_string())
        );
    }
}
