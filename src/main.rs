//! Bulb Lab - battery and bulb circuit explorer
//!
//! Prints the electrical readout and diagram geometry for one configuration,
//! optionally with a generated explanation.
//!
//! # Usage
//!
//! ```bash
//! bulb-lab --batteries 3 --connection parallel --closed
//! API_KEY=... bulb-lab -b 2 --closed --explain
//! bulb-lab -b 2 --closed --format json > frame.json
//! ```

use bulb_lab_core::{
    error::Result,
    session::{ExplanationStatus, LabFrame},
    CircuitConfiguration, ConnectionType, Explainer, ExplainerConfig, LabSession,
};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Battery and bulb circuit explorer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of cells
    #[arg(short, long, default_value_t = 1)]
    batteries: u32,

    /// How the cells are wired
    #[arg(short, long, value_enum, default_value_t = ConnectionType::Series)]
    connection: ConnectionType,

    /// Close the switch
    #[arg(long)]
    closed: bool,

    /// Ask the explanation service about the circuit
    #[arg(short, long)]
    explain: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Explanation service credential
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Explanation model name
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature for explanations
    #[arg(long)]
    temperature: Option<f32>,
}

impl Args {
    fn explainer_config(&self) -> ExplainerConfig {
        let mut config = ExplainerConfig::from_env();
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        config
    }
}

fn print_text(frame: &LabFrame) {
    let geometry = &frame.geometry;

    println!("Configuration: {}", frame.configuration);
    println!("Voltage:       {}", frame.voltage_label);
    println!("Current:       {}", frame.current_label);
    println!("Brightness:    {:.2}", frame.electrical.brightness);

    if geometry.bulb.lit {
        println!(
            "Bulb:          lit (filament {}, glow radius {:.0})",
            geometry.bulb.filament.to_hex(),
            geometry.bulb.glow_radius
        );
    } else {
        println!("Bulb:          dark");
    }
    println!(
        "Switch:        {:?} (arm {:.1} deg)",
        geometry.switch.arm, geometry.switch.arm_angle_degrees
    );

    println!("Batteries:");
    for battery in &geometry.batteries {
        println!("  {:>5} at ({})", battery.label, battery.position);
    }

    println!("Wires:");
    for wire in &geometry.wires {
        let flow = match wire.flow_period {
            Some(period) => format!("flow {period:.2}s"),
            None => "idle".to_string(),
        };
        println!("  {:<12} {:<10} {}", wire.role.key(), flow, wire.path.svg_path_data());
    }

    if let ExplanationStatus::Ready(explanation) = &frame.explanation {
        println!();
        println!("Explanation ({:?}):", explanation.source);
        println!("  {}", explanation.text);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Validate the configuration
    let configuration = CircuitConfiguration::new(args.batteries, args.connection, args.closed)?;
    let mut session = LabSession::new(configuration);

    if args.explain {
        let explainer = Explainer::from_config(&args.explainer_config());
        session.explain_with(&explainer);
    }

    match args.format {
        OutputFormat::Text => print_text(&session.frame()),
        OutputFormat::Json => println!("{}", session.frame_json()?),
    }

    Ok(())
}
