//! zcalc - keypad calculator for the terminal.
//!
//! Presses the keys given on the command line, or reads one key sequence
//! per line from stdin, and prints the calculator display after each.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::debug;
use zcalc::calculator::Calculator;
use zcalc::config;
use zcalc::keys::{looks_like_key_sequence, parse_keys};
use zcalc::persist;
use zcalc::view::{DisplayView, render_history, render_keypad};

#[derive(Parser)]
#[command(name = "zcalc")]
#[command(version, about = "Keypad calculator with immediate left-to-right evaluation", long_about = None)]
struct Cli {
    /// Keys to press, e.g. `12 + 3 =`. Reads lines from stdin when omitted.
    #[arg(allow_hyphen_values = true)]
    keys: Vec<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Session file to restore at start and save at exit
    #[arg(short, long, value_name = "FILE")]
    session: Option<PathBuf>,

    /// Print the full calculator state as JSON
    #[arg(long)]
    json: bool,

    /// Print the history log after the display
    #[arg(long)]
    history: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// How results are printed.
struct Output {
    json: bool,
    history: bool,
}

impl Output {
    fn print(&self, calculator: &Calculator) -> Result<()> {
        let state = calculator.state();
        if self.json {
            println!("{}", serde_json::to_string_pretty(state)?);
            return Ok(());
        }

        println!("{}", DisplayView::from_state(state).render());
        if self.history {
            println!("{}", render_history(&state.history));
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let config = config::load(cli.config.as_deref())?;
    let session_path = cli.session.clone().or_else(|| config.session_file.clone());

    let initial = match &session_path {
        Some(path) => persist::load_state(path)?.unwrap_or_else(|| config.initial_state()),
        None => config.initial_state(),
    };
    let mut calculator = Calculator::with_state(initial);
    let output = Output {
        json: cli.json,
        history: cli.history || config.show_history,
    };

    if cli.keys.is_empty() {
        run_interactive(&mut calculator, &output)?;
    } else {
        let keys = parse_keys(&cli.keys.join(" "))?;
        calculator.press_all(keys);
        output.print(&calculator)?;
    }

    if let Some(path) = &session_path {
        persist::save_state(path, calculator.state())?;
    }

    Ok(())
}

/// Read key sequences from stdin until EOF or `quit`.
fn run_interactive(calculator: &mut Calculator, output: &Output) -> Result<()> {
    output.print(calculator)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" => break,
            "history" => {
                println!("{}", render_history(&calculator.state().history));
                continue;
            }
            "keys" => {
                println!("{}", render_keypad(calculator.state()));
                continue;
            }
            _ => {}
        }

        if !looks_like_key_sequence(input) {
            debug!("Ignoring input that is not a key sequence: {}", input);
            eprintln!("Not a key sequence: {}", input);
            continue;
        }

        match parse_keys(input) {
            Ok(keys) => {
                debug!("Applying {} keys", keys.len());
                calculator.press_all(keys);
                output.print(calculator)?;
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}

/// Log to stderr so stdout only carries calculator output.
fn setup_logging(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("ZCALC_LOG").unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("zcalc=debug")
        } else {
            EnvFilter::new("zcalc=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
