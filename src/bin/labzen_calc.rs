//! One-shot molarity calculation from the command line
//!
//! Examples:
//!   labzen-calc mass NaCl 150 mM 500 mL
//!   labzen-calc molarity 342.3 5 g 100 mL mM
//!   labzen-calc volume Sucrose 10 g 0.5 M mL --molecular-weight 342.3
//!   labzen-calc reagents

use clap::{Args, Parser, Subcommand};
use labzen::chemistry::{CalculationMode, ReagentChoice};
use labzen::config::Settings;
use labzen::error::CalcResult;
use labzen::tools::molarity::{self, RawQuantity};
use labzen::tools::reagents;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "labzen-calc")]
#[command(about = "Solve one molarity calculation and print the result")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mass needed: <reagent> <concentration> <unit> <volume> <unit> [g|mg|µg]
    Mass(Knowns),
    /// Molarity of a solution: <reagent> <mass> <unit> <volume> <unit> [M|mM|µM|nM]
    #[command(visible_alias = "concentration")]
    Molarity(Knowns),
    /// Volume to dissolve into: <reagent> <mass> <unit> <concentration> <unit> [L|mL|µL]
    Volume(Knowns),
    /// List built-in reagents
    Reagents,
}

/// Two known quantities, in the order the subcommand names them
#[derive(Args)]
#[command(allow_negative_numbers = true)]
struct Knowns {
    /// Built-in reagent name, "Custom", or a bare molecular weight in g/mol
    reagent: String,

    /// First known value
    first_value: f64,

    /// Unit of the first value
    first_unit: String,

    /// Second known value
    second_value: f64,

    /// Unit of the second value
    second_unit: String,

    /// Unit for the answer (defaults to g, M or L)
    output_unit: Option<String>,

    /// Molecular weight in g/mol, for "Custom" or a name not in the table
    #[arg(short, long)]
    molecular_weight: Option<f64>,
}

impl Knowns {
    /// A bare number in the reagent slot is a custom molecular weight
    fn reagent_choice(&self) -> CalcResult<ReagentChoice> {
        match (self.reagent.trim().parse::<f64>(), self.molecular_weight) {
            (Ok(mw), None) => Ok(ReagentChoice::Custom(mw)),
            _ => ReagentChoice::from_parts(Some(&self.reagent), self.molecular_weight),
        }
    }
}

fn solve(settings: &Settings, mode: CalculationMode, knowns: &Knowns) -> CalcResult<String> {
    let request = molarity::build_request(
        mode,
        knowns.reagent_choice()?,
        RawQuantity::new(knowns.first_value, &knowns.first_unit),
        RawQuantity::new(knowns.second_value, &knowns.second_unit),
        knowns.output_unit.as_deref(),
    )?;
    Ok(molarity::calculate(settings, &request)?.display)
}

fn run(cli: &Cli, settings: &Settings) -> CalcResult<String> {
    match &cli.command {
        Command::Mass(knowns) => solve(settings, CalculationMode::ComputeMass, knowns),
        Command::Molarity(knowns) => solve(settings, CalculationMode::ComputeMolarity, knowns),
        Command::Volume(knowns) => solve(settings, CalculationMode::ComputeVolume, knowns),
        Command::Reagents => {
            let lines: Vec<String> = reagents::list_reagents()
                .reagents
                .iter()
                .map(|r| format!("{:<24} {:>8.2} g/mol", r.name, r.molecular_weight))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("labzen=warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli, &Settings::from_env()) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
