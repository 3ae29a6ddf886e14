//! Symcircuit - symbolic MNA equation assembler
//!
//! Reads a netlist and prints the unknowns, equations and initial
//! conditions of its network system.
//!
//! # Usage
//!
//! ```bash
//! symcircuit divider.cir --time-var t -vv
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use symcircuit::{
    analysis::{analyze_circuit, AnalysisConfig, DEFAULT_TIME_VARIABLE},
    circuit::{validate_circuit, Circuit},
    dsl,
    error::Result,
};

/// Symbolic circuit equation assembler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file
    #[arg(value_name = "NETLIST")]
    netlist: PathBuf,

    /// Name of the independent time variable
    #[arg(long, default_value = DEFAULT_TIME_VARIABLE)]
    time_var: String,

    /// Warn instead of failing when equations and unknowns do not balance
    #[arg(long)]
    lenient: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    // Parse the netlist
    let ast = dsl::parse_file(&args.netlist)?;

    // Build the circuit
    let circuit = Circuit::from_ast(ast)?;

    // Validate
    validate_circuit(&circuit)?;

    // Assemble
    let config = AnalysisConfig::default()
        .with_time_variable(args.time_var)
        .with_strict(!args.lenient);
    let system = analyze_circuit(&circuit, config)?;

    print!("{}", system);

    Ok(())
}
