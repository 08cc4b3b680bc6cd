//! Chess system scenario runner CLI
//!
//! Replay a scenario of tournament commands and write the reports.

use chess_runner::{RunnerConfig, RunnerResult, Scenario, ScenarioRunner};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn print_usage() {
    println!("Chess System Scenario Runner");
    println!();
    println!("Usage:");
    println!("  chess_runner run <scenario.toml> [options]");
    println!("  chess_runner check <scenario.toml>");
    println!();
    println!("Options:");
    println!("  --config FILE     Runner configuration (TOML)");
    println!("  --levels FILE     Default ranking report path");
    println!("  --stats FILE      Default statistics report path");
    println!("  --summary FILE    Write a JSON summary of the run");
    println!("  --stop-on-error   Stop at the first failed command");
    println!();
    println!("Examples:");
    println!("  chess_runner run season.toml --summary season.json");
    println!("  chess_runner run season.toml --config runner.toml --stop-on-error");
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

/// Load the config file named by `--config`, then apply the other flags on top
fn parse_config(args: &[String]) -> RunnerResult<RunnerConfig> {
    let mut config = match args.iter().position(|arg| arg == "--config") {
        Some(i) if i + 1 < args.len() => RunnerConfig::load(Path::new(&args[i + 1]))?,
        _ => RunnerConfig::default(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--levels" | "-l" => {
                if i + 1 < args.len() {
                    config.levels_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--stats" | "-s" => {
                if i + 1 < args.len() {
                    config.statistics_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--summary" => {
                if i + 1 < args.len() {
                    config.summary_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" => i += 1,
            "--stop-on-error" => config.stop_on_error = true,
            other => eprintln!("Warning: ignoring unknown option {}", other),
        }
        i += 1;
    }
    Ok(config)
}

fn run_scenario(args: &[String]) -> RunnerResult<bool> {
    let Some(scenario_path) = args.first() else {
        eprintln!("Error: run requires a scenario file");
        print_usage();
        return Ok(false);
    };

    let config = parse_config(&args[1..])?;
    init_logging(&config.log_level);

    let scenario = Scenario::load(Path::new(scenario_path))?;
    println!("=== Scenario: {} ({} commands) ===", scenario_path, scenario.len());

    let mut runner = ScenarioRunner::new(config);
    let summary = runner.run(&scenario)?;

    println!();
    for report in &summary.commands {
        match &report.message {
            Some(message) => println!(
                "{:>4} {:<18} {:?}: {}",
                report.index, report.op, report.code, message
            ),
            None => println!("{:>4} {:<18} {:?}", report.index, report.op, report.code),
        }
    }
    println!();
    println!(
        "Succeeded: {}, failed: {}{}",
        summary.succeeded,
        summary.failed,
        if summary.stopped_early { " (stopped early)" } else { "" }
    );
    println!(
        "Tournaments: {}, players: {}",
        summary.tournaments, summary.players
    );
    Ok(true)
}

fn check_scenario(args: &[String]) -> RunnerResult<bool> {
    let Some(scenario_path) = args.first() else {
        eprintln!("Error: check requires a scenario file");
        print_usage();
        return Ok(false);
    };

    let scenario = Scenario::load(Path::new(scenario_path))?;
    for (index, command) in scenario.commands.iter().enumerate() {
        println!("{:>4} {}", index, command.name());
    }
    println!("{} commands", scenario.len());
    Ok(true)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let result = match args[1].as_str() {
        "run" => run_scenario(&args[2..]),
        "check" => check_scenario(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(true)
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            Ok(false)
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
