use std::io;

use anyhow::Context;
use clap::Parser;

use ac_circuit::shell::Shell;

/// Impedance calculator for AC circuits built from ideal and real R, L, C components
#[derive(Parser)]
#[command(name = "ac-circuit", version)]
struct Cli {
    /// Frequency of the first circuit in Hz (asked interactively when omitted)
    #[arg(long, value_parser = positive_frequency)]
    frequency: Option<f64>,

    /// Maximum number of characters per printed number
    #[arg(long, default_value_t = 8)]
    width: usize,
}

fn positive_frequency(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => Ok(f),
        Ok(_) => Err("frequency must be a positive number".to_owned()),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), Some(cli.width));
    shell.run(cli.frequency).context("console session failed")?;

    let session = shell.into_session();
    tracing::info!(
        components = session.catalogue().len(),
        circuits = session.circuits().len(),
        "session finished"
    );
    Ok(())
}
