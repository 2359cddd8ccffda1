//! StreakQL command line front end.
//!
//! `play` is an interactive recording loop, `replay` records a fixed sequence
//! non-interactively, and `check-catalog` validates a catalog file.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use streakql::telemetry::init_tracing;
use streakql::{Catalog, Prediction, PredictionPair, Session};

#[derive(Parser, Debug)]
#[command(name = "streakql", version, about = "Dual-engine pattern tracker")]
struct Args {
    /// Catalog file (TOML). Defaults to the bundled catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record symbols interactively from stdin.
    Play,

    /// Record the given symbols in order and print each step.
    Replay {
        /// Symbol labels, oldest first.
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Write the session log as CSV to this path.
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print log entries as JSON lines.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Validate a catalog and print a summary.
    CheckCatalog,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("load catalog {}", path.display()))?,
        None => Catalog::builtin().context("load bundled catalog")?,
    };
    let catalog = Arc::new(catalog);

    match args.command {
        Command::Play => play(catalog),
        Command::Replay {
            symbols,
            export,
            json,
        } => replay(catalog, &symbols, export, json),
        Command::CheckCatalog => {
            check_catalog(&catalog);
            Ok(())
        }
    }
}

fn play(catalog: Arc<Catalog>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = Session::new(catalog);

    println!("symbols: {}", session.catalog().alphabet());
    println!("commands: next, log, reset, export <path>, help, quit");
    print_next(&session.predict());

    for line in stdin.lock().lines() {
        let line = line.context("read stdin")?;
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            continue;
        };

        match first {
            "quit" | "exit" => break,
            "help" => {
                println!("enter one or more of: {}", session.catalog().alphabet());
                println!("commands: next, log, reset, export <path>, help, quit");
            }
            "next" => print_next(&session.predict()),
            "log" => print_log(&session),
            "reset" => {
                session = session.reset();
                println!("session reset");
                print_next(&session.predict());
            }
            "export" => match words.next() {
                Some(path) => match streakql::export_to_path(session.log(), path) {
                    Ok(()) => println!("exported {} rows to {path}", session.log().len()),
                    Err(e) => eprintln!("error: {e}"),
                },
                None => eprintln!("error: export requires a path"),
            },
            _ => {
                let labels = std::iter::once(first).chain(words);
                for label in labels {
                    let symbol = match session.parse_symbol(label) {
                        Ok(symbol) => symbol,
                        Err(e) => {
                            eprintln!("error: {e}");
                            break;
                        }
                    };
                    let (next, entry) = session.record(symbol);
                    session = next;
                    println!("{}: {}", entry.input, entry.status);
                }
                print_next(&session.predict());
            }
        }
        stdout.flush().context("flush stdout")?;
    }

    Ok(())
}

fn replay(
    catalog: Arc<Catalog>,
    labels: &[String],
    export: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut session = Session::new(catalog);
    for label in labels {
        let symbol = session
            .parse_symbol(label)
            .with_context(|| format!("parse symbol '{label}'"))?;
        let (next, entry) = session.record(symbol);
        session = next;

        if json {
            println!("{}", serde_json::to_string(&entry).context("encode log entry")?);
        } else {
            println!(
                "{:<4} eng1={:<4} eng2={:<4} {}",
                entry.input,
                display_value(entry.tracker.as_ref().map(|v| v.as_str())),
                display_value(entry.structural.as_ref().map(|v| v.as_str())),
                entry.status
            );
        }
    }

    if !json {
        print_next(&session.predict());
        let tally = session.log().tally();
        println!(
            "match={} miss={} no-prediction={}",
            tally.matches, tally.misses, tally.no_predictions
        );
    }

    if let Some(path) = export {
        streakql::export_to_path(session.log(), &path)
            .with_context(|| format!("export to {}", path.display()))?;
    }
    Ok(())
}

fn check_catalog(catalog: &Catalog) {
    println!("alphabet: {}", catalog.alphabet());
    println!("search lengths: {:?}", catalog.search_lengths());
    println!("structural window: {}", catalog.structural_window());
    println!("exact rules:");
    for (key, value) in catalog.exact_rules() {
        println!("  {key} -> {value}");
    }
    println!("cycle rules:");
    for (key, cycle) in catalog.cycle_rules() {
        let steps: Vec<&str> = cycle.as_slice().iter().map(|v| v.as_str()).collect();
        println!("  {key} -> [{}]", steps.join(", "));
    }
    println!("structural rules:");
    for (shape, value) in catalog.structural_rules() {
        println!("  {shape} -> {value}");
    }
    println!("{} rules ok", catalog.rule_count());
}

fn print_next(pair: &PredictionPair) {
    println!(
        "next: engine 1 (tracker) {} | engine 2 (structural) {}",
        describe(pair.tracker.as_ref()),
        describe(pair.structural.as_ref())
    );
}

fn print_log(session: &Session) {
    if session.log().is_empty() {
        println!("(no entries)");
        return;
    }
    println!("{:<9} {:<5} {:<9} {:<9} status", "time", "input", "eng1", "eng2");
    for entry in session.log().recent_first() {
        println!(
            "{:<9} {:<5} {:<9} {:<9} {}",
            entry.clock_time(),
            entry.input,
            display_value(entry.tracker.as_ref().map(|v| v.as_str())),
            display_value(entry.structural.as_ref().map(|v| v.as_str())),
            entry.status
        );
    }
}

fn describe(prediction: Option<&Prediction>) -> String {
    match prediction {
        Some(p) => format!("{} [{}]", p.value, p.reason),
        None => "---".to_string(),
    }
}

fn display_value(value: Option<&str>) -> &str {
    value.unwrap_or(streakql::export::ABSENT)
}
