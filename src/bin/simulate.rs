//! Duel balance simulator CLI.
//!
//! Run Monte Carlo duels between two combatants to analyze matchup balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 1000 mirror warrior duels
//!   cargo run --bin simulate -- -a rogue -b mage      # Class matchup at level 20
//!   cargo run --bin simulate -- -c duel.toml -s 42    # Matchup from a file, seeded

use arena::character::CharacterClass;
use arena::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

struct CliOptions {
    config: SimConfig,
    write_json: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("run with --help for usage");
            return ExitCode::FAILURE;
        }
    };
    let config = options.config;

    init_tracing(config.verbosity);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                 ARENA DUEL SIMULATOR                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Fights:         {}", config.num_fights);
    println!(
        "  Side A:         {} ({}, level {})",
        config.combatant_a.name,
        config.combatant_a.class.name(),
        config.combatant_a.level
    );
    println!(
        "  Side B:         {} ({}, level {})",
        config.combatant_b.name,
        config.combatant_b.class.name(),
        config.combatant_b.level
    );
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!("{}", report.to_text());

    if options.write_json {
        let filename = format!(
            "duel_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(err) = std::fs::write(&filename, report.to_json()) {
            eprintln!("error: failed to write {}: {}", filename, err);
            return ExitCode::FAILURE;
        }
        println!("JSON report saved to: {}", filename);
    }

    ExitCode::SUCCESS
}

/// `RUST_LOG` wins when set; otherwise verbosity picks the level.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    // A config file is the base; every other flag overrides it regardless of order
    let mut config = match flag_value(args, &["-c", "--config"]) {
        Some(path) => SimConfig::load(Path::new(path)).map_err(|e| e.to_string())?,
        None => SimConfig::default(),
    };
    let mut write_json = false;

    let mut class_a = None;
    let mut class_b = None;
    let mut level = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
            }
            "-n" | "--fights" => {
                config.num_fights = parse_value(args, i, "number of fights")?;
                i += 1;
            }
            "-s" | "--seed" => {
                config.seed = Some(parse_value(args, i, "seed")?);
                i += 1;
            }
            "-a" | "--class-a" => {
                class_a = Some(parse_class(value(args, i)?)?);
                i += 1;
            }
            "-b" | "--class-b" => {
                class_b = Some(parse_class(value(args, i)?)?);
                i += 1;
            }
            "-l" | "--level" => {
                level = Some(parse_value::<u32>(args, i, "level")?);
                i += 1;
            }
            "--choices-a" => {
                config.choices_a = split_choices(value(args, i)?);
                i += 1;
            }
            "--choices-b" => {
                config.choices_b = split_choices(value(args, i)?);
                i += 1;
            }
            "--json" => {
                write_json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("unknown option {}", other)),
        }
        i += 1;
    }

    if class_a.is_some() || class_b.is_some() || level.is_some() {
        let level = level.unwrap_or(config.combatant_a.level);
        let class_a = class_a.unwrap_or(config.combatant_a.class);
        let class_b = class_b.unwrap_or(config.combatant_b.class);
        let matchup = SimConfig::class_matchup(class_a, class_b, level);
        config.combatant_a = matchup.combatant_a;
        config.combatant_b = matchup.combatant_b;
        if flag_value(args, &["--choices-a"]).is_none() {
            config.choices_a = matchup.choices_a;
        }
        if flag_value(args, &["--choices-b"]).is_none() {
            config.choices_b = matchup.choices_b;
        }
    }

    Ok(CliOptions { config, write_json })
}

fn flag_value<'a>(args: &'a [String], names: &[&str]) -> Option<&'a str> {
    args.iter()
        .position(|arg| names.contains(&arg.as_str()))
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

fn value(args: &[String], i: usize) -> Result<&str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", args[i]))
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, what: &str) -> Result<T, String> {
    let raw = value(args, i)?;
    raw.parse()
        .map_err(|_| format!("invalid {}: {}", what, raw))
}

fn parse_class(name: &str) -> Result<CharacterClass, String> {
    CharacterClass::all()
        .into_iter()
        .find(|class| class.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| format!("unknown class {} (warrior, rogue, mage, tank)", name))
}

fn split_choices(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_help() {
    println!("Arena Duel Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Load the matchup from a TOML file");
    println!("    -n, --fights <N>       Number of fights (default: 1000)");
    println!("    -s, --seed <S>         Random seed for reproducibility");
    println!("    -a, --class-a <CLASS>  Archetype for side A (warrior, rogue, mage, tank)");
    println!("    -b, --class-b <CLASS>  Archetype for side B");
    println!("    -l, --level <L>        Archetype level (default: 20)");
    println!("    --choices-a <IDS>      Comma-separated ability ids for side A");
    println!("    --choices-b <IDS>      Comma-separated ability ids for side B");
    println!("    --json                 Also write a timestamped JSON report");
    println!("    -v, --verbose          Log every fight");
    println!("    -q, --quiet            Only log warnings");
    println!("    -h, --help             Show this help");
    println!();
    println!("RUST_LOG overrides the log level chosen by -v/-q.");
}
