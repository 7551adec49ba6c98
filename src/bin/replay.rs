// Standalone replay tool for contour-snake debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all turns
//   --turns <turn1,turn2>  Replay specific turns (comma-separated)
//   --validate <T:M,...>   Check logged moves against expectations
//   --verbose              Show detailed output for each turn
//   --config <path>        Path to Snake.toml (default: Snake.toml)

use std::env;
use std::process;

use contour_snake::config::Config;
use contour_snake::replay::ReplayEngine;
use contour_snake::types::Direction;

fn print_usage() {
    eprintln!("contour-snake replay tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all turns in the log");
    eprintln!("  --turns <T1,T2,...>     Replay specific turns (comma-separated)");
    eprintln!("  --validate <T:M,...>    Validate expected moves (format: turn:move|move,...)");
    eprintln!("  --verbose               Show detailed output for each turn");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
}

fn parse_turns(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(i32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 {
                return Err(format!("Invalid format '{}'. Expected 'turn:move'", pair));
            }

            let turn = parts[0]
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", parts[0], e))?;

            // Several acceptable moves may be separated by '|'
            let moves = parts[1]
                .split('|')
                .map(|m| m.parse::<Direction>())
                .collect::<Result<Vec<_>, _>>()?;

            Ok((turn, moves))
        })
        .collect()
}

enum Mode {
    All,
    Turns(Vec<i32>),
    Validate(Vec<(i32, Vec<Direction>)>),
}

fn next_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn run(args: &[String]) -> Result<(), String> {
    let log_file = &args[1];
    let mut config_path = "Snake.toml".to_string();
    let mut verbose = false;
    let mut mode = Mode::All;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => mode = Mode::All,
            "--turns" => {
                mode = Mode::Turns(parse_turns(next_value(args, i, "--turns")?)?);
                i += 1;
            }
            "--validate" => {
                mode = Mode::Validate(parse_expected_moves(next_value(args, i, "--validate")?)?);
                i += 1;
            }
            "--verbose" => verbose = true,
            "--config" => {
                config_path = next_value(args, i, "--config")?.to_string();
                i += 1;
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        log::warn!("{} ({}), using hardcoded defaults", e, config_path);
        Config::default_hardcoded()
    });

    let engine = ReplayEngine::new(config, verbose);
    let entries = engine.load_log_file(log_file)?;

    match mode {
        Mode::All => {
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Turns(turns) => {
            let results = engine.replay_turns(&entries, &turns)?;
            engine.print_report(&results);
        }
        Mode::Validate(expected) => {
            ReplayEngine::validate_expected_moves(&entries, &expected)?;
            println!("All {} expected moves validated", expected.len());
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(if args.iter().any(|a| a == "--help") { 0 } else { 1 });
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
