//! Headless NES runner.
//!
//! Runs a ROM for a number of frames and prints the requested
//! `Observable` values as a JSON object. With `--test`, drives the ROM
//! through the `$6000` conformance harness instead.

use std::path::PathBuf;
use std::process;

use emu_core::Observable;
use emu_nes::{Nes, NesButton, NesConfig, harness};

/// Queries printed when none are given.
const DEFAULT_QUERIES: &[&str] = &["cpu.pc", "frame_count", "clock.total"];

struct CliArgs {
    rom_path: Option<PathBuf>,
    frames: u64,
    queries: Vec<String>,
    presses: Vec<(NesButton, u64)>,
    test: bool,
}

fn usage() {
    eprintln!("Usage: emu-nes <rom.nes> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --frames <n>           Frames to run [default: 60]");
    eprintln!("  --query <path>         Print an observable value (repeatable)");
    eprintln!("  --press <button>@<f>   Press a button at frame f for 5 frames");
    eprintln!("  --test                 Run as a $6000-reporting test ROM");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        rom_path: None,
        frames: 60,
        queries: Vec::new(),
        presses: Vec::new(),
        test: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.frames = s.parse().unwrap_or(cli.frames);
                }
            }
            "--query" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.queries.push(s.clone());
                }
            }
            "--press" => {
                i += 1;
                let parsed = args.get(i).and_then(|s| {
                    let (name, frame) = s.split_once('@')?;
                    Some((NesButton::from_name(name)?, frame.parse().ok()?))
                });
                let Some(press) = parsed else {
                    eprintln!("--press expects <button>@<frame>, e.g. start@30");
                    process::exit(1);
                };
                cli.presses.push(press);
            }
            "--test" => cli.test = true,
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown argument: {other}");
                process::exit(1);
            }
            path => cli.rom_path = Some(PathBuf::from(path)),
        }
        i += 1;
    }

    cli
}

fn main() {
    env_logger::init();
    let cli = parse_args();

    let Some(rom_path) = cli.rom_path else {
        usage();
        process::exit(1);
    };

    if cli.test {
        match harness::run_file(&rom_path, cli.frames) {
            Ok(outcome) => {
                let report = serde_json::json!({
                    "status": outcome.status,
                    "passed": outcome.passed(),
                    "message": outcome.message,
                });
                println!("{report}");
                process::exit(i32::from(!outcome.passed()));
            }
            Err(e) => {
                eprintln!("{}: {e}", rom_path.display());
                process::exit(2);
            }
        }
    }

    let rom_data = match std::fs::read(&rom_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", rom_path.display());
            process::exit(1);
        }
    };
    let mut nes = match Nes::new(&NesConfig::new(rom_data)) {
        Ok(nes) => nes,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", rom_path.display());
            process::exit(1);
        }
    };

    for (button, frame) in cli.presses {
        nes.input_queue().enqueue_button(button, frame, 5);
    }
    for _ in 0..cli.frames {
        nes.run_frame();
    }

    let mut report = serde_json::Map::new();
    let queries: Vec<&str> = if cli.queries.is_empty() {
        DEFAULT_QUERIES.to_vec()
    } else {
        cli.queries.iter().map(String::as_str).collect()
    };
    for path in queries {
        let value = nes
            .query(path)
            .map_or(serde_json::Value::Null, |v| serde_json::Value::from(&v));
        report.insert(path.to_string(), value);
    }
    println!("{}", serde_json::Value::Object(report));
}
