//! Hex Bounce headless runner
//!
//! Drives the simulation at the fixed rate and prints one JSON frame per tick
//! for an external renderer or plotting script.
//!
//! Usage: `hex-bounce [settings.json] [ticks] [seed]`

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use glam::Vec2;
use hex_bounce::consts::SIM_DT;
use hex_bounce::sim::{SimState, tick};
use hex_bounce::Settings;
use serde::Serialize;

/// Default number of ticks (10 seconds at 120 Hz)
const DEFAULT_TICKS: u64 = 1200;
/// Launch jitter applied when a seed is given (pixels/s per axis)
const LAUNCH_JITTER: f32 = 50.0;

/// One line of output
#[derive(Serialize)]
struct Frame<'a> {
    tick: u64,
    pos: Vec2,
    vel: Vec2,
    rotation: f32,
    vertices: &'a [Vec2],
    contacts: usize,
}

fn load_settings(path: Option<&str>) -> Result<Settings, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(Settings::from_json(&text)?)
        }
        None => Ok(Settings::default()),
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = load_settings(args.first().map(String::as_str))?;
    let ticks = match args.get(1) {
        Some(n) => n.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };
    if let Some(seed) = args.get(2) {
        settings.jitter_launch(seed.parse::<u64>()?, LAUNCH_JITTER);
    }

    let mut state = SimState::new(&settings)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut total_contacts = 0;

    for _ in 0..ticks {
        let report = tick(&mut state, SIM_DT);
        total_contacts += report.contacts.len();
        let frame = Frame {
            tick: state.time_ticks,
            pos: state.body.pos,
            vel: state.body.vel,
            rotation: state.boundary.rotation,
            vertices: state.current_vertices(),
            contacts: report.contacts.len(),
        };
        serde_json::to_writer(&mut out, &frame)?;
        writeln!(out)?;
    }
    out.flush()?;

    log::info!(
        "Ran {} ticks: {} contacts, final speed {:.2}",
        ticks,
        total_contacts,
        state.body.vel.length()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Hex Bounce (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("hex-bounce: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_bounce::ConfigError;

    #[test]
    fn test_load_settings_defaults_without_path() {
        assert_eq!(load_settings(None).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_settings_missing_file_is_io_error() {
        let err = load_settings(Some("/nonexistent/hex-bounce-settings.json")).unwrap_err();
        let io_err = err.downcast_ref::<io::Error>().expect("io error");
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_load_settings_bad_json_is_config_error() {
        let path = std::env::temp_dir().join("hex-bounce-bad-settings.json");
        std::fs::write(&path, "{ \"sides\": 2 }").unwrap();
        let err = load_settings(path.to_str()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::TooFewSides { sides: 2 })
        );
        let _ = std::fs::remove_file(path);
    }
}
