//! markovgen CLI - Command-line interface for markovgen
//!
//! Commands:
//! - transform: Turn absolute behavior model JSON into a Markov matrix
//! - validate: Check a behavior model for structural problems
//! - print: Pretty-print a behavior model graph

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use markovgen::pipeline::MatrixGenerator;
use markovgen::render::{matrix_to_csv, pretty_matrix, pretty_model};
use markovgen::{BehaviorModelAbsolute, MarkovMatrixHandler, MARKOVGEN_VERSION};

/// markovgen - Turn recorded session behavior graphs into Markov matrices
#[derive(Parser)]
#[command(name = "markovgen")]
#[command(version = MARKOVGEN_VERSION)]
#[command(about = "Transform behavior models into Markov matrices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn an absolute behavior model into a Markov matrix
    Transform {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "auto")]
        format: OutputFormat,

        /// Name of the absorbing final state
        #[arg(long, default_value = "$")]
        final_state: String,
    },

    /// Check a behavior model for structural problems
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pretty-print a behavior model graph
    Print {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// CSV when piped, aligned table on a terminal
    Auto,
    /// Comma-separated values
    Csv,
    /// Aligned table
    Pretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Transform {
            input,
            output,
            format,
            final_state,
        } => cmd_transform(&input, &output, format, &final_state),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Print { input } => cmd_print(&input),
    }
}

fn cmd_transform(
    input: &Path,
    output: &Path,
    format: OutputFormat,
    final_state: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let model = read_model(input)?;

    let handler = MarkovMatrixHandler::new(final_state, "0.0; n(0 0)", "n(0 0)");
    let matrix = MatrixGenerator::with_handler(handler).generate(&model)?;

    let to_stdout = output.to_string_lossy() == "-";
    let pretty = match format {
        OutputFormat::Csv => false,
        OutputFormat::Pretty => true,
        OutputFormat::Auto => to_stdout && atty::is(atty::Stream::Stdout),
    };

    let rendered = if pretty {
        pretty_matrix(&matrix)
    } else {
        matrix_to_csv(&matrix)
    };

    if to_stdout {
        io::stdout().write_all(rendered.as_bytes())?;
    } else {
        fs::write(output, rendered)?;
    }

    Ok(())
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let model = read_model(input)?;
    let findings = model.validate();

    if json {
        let report = serde_json::json!({
            "valid": findings.is_empty(),
            "findings": findings,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if findings.is_empty() {
        println!("model is well-formed ({} vertices)", model.vertices.len());
    } else {
        for finding in &findings {
            println!("{finding}");
        }
    }

    if findings.is_empty() {
        Ok(())
    } else {
        Err(format!("{} validation finding(s)", findings.len()).into())
    }
}

fn cmd_print(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let model = read_model(input)?;
    print!("{}", pretty_model(&model.vertices));
    Ok(())
}

fn read_model(input: &Path) -> Result<BehaviorModelAbsolute, Box<dyn std::error::Error>> {
    let data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    Ok(BehaviorModelAbsolute::from_json(&data)?)
}
