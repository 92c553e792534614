// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stacklet - a minimal imperative expression language
//!
//! This is the main entry point for the stacklet CLI/REPL.
//!
//! ## Features
//!
//! - Interactive REPL with completion, highlighting and history
//! - File and inline-source execution
//! - Diagnostic dumps of the token stream, bytecode, and execution trace

mod repl;

use clap::Parser;
use owo_colors::OwoColorize;
use stacklet_core::vm::{NullTracer, TraceEvent, Tracer};
use stacklet_core::{Environment, generate, parse, run, tokenize};
use std::path::PathBuf;
use std::process::ExitCode;

/// Compile and execute stacklet programs.
#[derive(Debug, Parser)]
#[command(name = "stacklet", version, about)]
struct Cli {
    /// Source file to execute; omit to start the REPL
    file: Option<PathBuf>,

    /// Evaluate source code given on the command line
    #[arg(short, long, value_name = "CODE", conflicts_with = "file")]
    eval: Option<String>,

    /// Print the token stream before executing
    #[arg(long)]
    tokens: bool,

    /// Print the generated bytecode before executing
    #[arg(long)]
    bytecode: bool,

    /// Print one trace line per executed instruction
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(code) = &cli.eval {
        return run_source(code, &cli);
    }

    if let Some(path) = &cli.file {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!(
                    "{}: cannot read '{}': {}",
                    "Error".red().bold(),
                    path.display().cyan(),
                    e
                );
                return ExitCode::FAILURE;
            }
        };
        return run_source(&source, &cli);
    }

    run_repl()
}

/// A tracer that renders each execution step to stdout.
struct PrintTracer;

impl Tracer for PrintTracer {
    fn record(&mut self, event: TraceEvent) {
        println!("{}", event.to_string().dimmed());
    }
}

/// Run one source text through the full pipeline, honoring the diagnostic
/// flags, and print the final variable environment.
fn run_source(source: &str, cli: &Cli) -> ExitCode {
    if cli.tokens {
        println!("{}", "Tokens:".white().bold());
        for token in tokenize(source) {
            match token {
                Ok(token) => println!("{}", token),
                Err(e) => {
                    eprintln!("{}", e.red());
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    let program = match parse(source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}", e.red());
            return ExitCode::FAILURE;
        }
    };

    let code = match generate(&program) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.red());
            return ExitCode::FAILURE;
        }
    };

    if cli.bytecode {
        println!("{}", "Bytecode:".white().bold());
        for instruction in &code {
            println!("{}", instruction);
        }
    }

    let result = if cli.trace {
        run(&code, &mut PrintTracer)
    } else {
        run(&code, &mut NullTracer)
    };

    match result {
        Ok(env) => {
            print_environment(&env);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.red());
            ExitCode::FAILURE
        }
    }
}

/// Print the final environment, sorted by variable name.
fn print_environment(env: &Environment) {
    if env.is_empty() {
        println!("{}", "(no variables bound)".dimmed());
        return;
    }
    let mut bindings: Vec<_> = env.iter().collect();
    bindings.sort_by_key(|(name, _)| *name);
    for (name, value) in bindings {
        println!("{} = {}", name.cyan(), value.yellow());
    }
}

/// Start the interactive REPL
fn run_repl() -> ExitCode {
    match repl::Repl::new() {
        Ok(mut repl) => {
            if let Err(e) = repl.run() {
                eprintln!("{}: {:?}", "REPL Error".red().bold(), e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!(
                "{}: Failed to initialize REPL: {:?}",
                "Error".red().bold(),
                e
            );
            ExitCode::FAILURE
        }
    }
}
