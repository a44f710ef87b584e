use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pinmux_rs::driver::DriverSkip;
use pinmux_rs::{
    default_loader, init_logger, log_info, Binding, ChipVariant, DriverLoader, FunctionSlot,
    HeaderTarget, HostConfig, LoadReport, Pin, PinLike, Signal, SystemTopology,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "pinmux-cli")]
#[command(about = "Inspect GPIO pins and board headers")]
struct Cli {
    /// JSON host configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    device_tree: Option<PathBuf>,
    #[arg(long)]
    sysfs: Option<PathBuf>,
    /// Chip variant to populate instead of detecting it, e.g. H616
    #[arg(long)]
    chip: Option<String>,
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the driver load stages without running them
    Plan,
    /// Run the drivers and print the report
    Load,
    /// Print every registered header
    Headers,
    /// Resolve one header position
    Lookup { connector: String, position: usize },
    /// Show the functions and header positions of a pin
    Pin { name: String },
}

#[derive(Serialize)]
struct FailureView {
    driver: String,
    error: String,
}

#[derive(Serialize)]
struct LoadView<'a> {
    variant: Option<&'a ChipVariant>,
    loaded: &'a [String],
    skipped: &'a [DriverSkip],
    failed: Vec<FailureView>,
}

#[derive(Serialize)]
struct PinView {
    name: String,
    number: u16,
    available: bool,
    edge_interrupt: bool,
    functions: Vec<(FunctionSlot, &'static str)>,
    positions: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum TargetView {
    Gpio(PinView),
    Signal(Signal),
}

fn host_config(cli: &Cli) -> Result<HostConfig> {
    let mut config = match &cli.config {
        Some(path) => HostConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => HostConfig::default(),
    };
    if let Some(root) = &cli.device_tree {
        config.device_tree_root = root.clone();
    }
    if let Some(root) = &cli.sysfs {
        config.sysfs_gpio_root = root.clone();
    }
    if let Some(chip) = &cli.chip {
        config.chip = Some(chip.clone());
    }
    Ok(config)
}

fn pin_view(topology: &SystemTopology, pin: &Pin) -> PinView {
    PinView {
        name: pin.name().to_string(),
        number: pin.number(),
        available: pin.available(),
        edge_interrupt: pin.supports_edge_interrupt(),
        functions: pin
            .function_slots()
            .map(|slots| slots.assigned().map(|(s, l)| (s, l.as_str())).collect())
            .unwrap_or_default(),
        positions: topology
            .positions_of(pin.name())
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_report(topology: &SystemTopology, report: &LoadReport, json: bool) -> Result<()> {
    if json {
        return print_json(&LoadView {
            variant: topology.pins().variant(),
            loaded: &report.loaded,
            skipped: &report.skipped,
            failed: report
                .failed
                .iter()
                .map(|f| FailureView {
                    driver: f.driver.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
        });
    }
    match topology.pins().variant() {
        Some(variant) => println!("chip: {variant}"),
        None => println!("chip: not detected"),
    }
    for driver in &report.loaded {
        println!("loaded   {driver}");
    }
    for skip in &report.skipped {
        println!("skipped  {} ({})", skip.driver, skip.reason);
    }
    for failure in &report.failed {
        println!("failed   {} ({})", failure.driver, failure.error);
    }
    Ok(())
}

fn print_headers(topology: &SystemTopology, json: bool) -> Result<()> {
    let connectors: Vec<_> = topology.headers().connectors().collect();
    if json {
        return print_json(&connectors);
    }
    for connector in connectors {
        println!("{} ({} pins)", connector.name(), connector.len());
        for row in connector.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|slot| {
                    let label = match &slot.binding {
                        Binding::Gpio(identity) => identity.to_string(),
                        Binding::Signal(signal) => signal.to_string(),
                    };
                    format!("{:>3} {label:<12}", slot.position)
                })
                .collect();
            println!("  {}", cells.join(""));
        }
    }
    Ok(())
}

fn load(loader: &DriverLoader, config: &HostConfig) -> Result<(SystemTopology, LoadReport)> {
    let mut topology = SystemTopology::from_config(config);
    let report = loader
        .load(&mut topology)
        .context("Failed to order drivers")?;
    Ok((topology, report))
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    let config = host_config(&cli)?;
    let loader = default_loader(&config).context("Invalid chip override")?;

    match &cli.command {
        Commands::Plan => {
            let stages = loader.plan().context("Failed to order drivers")?;
            if cli.json {
                return print_json(&stages);
            }
            for (n, stage) in stages.iter().enumerate() {
                println!("stage {n}: {}", stage.join(", "));
            }
        }
        Commands::Load => {
            let (topology, report) = load(&loader, &config)?;
            print_report(&topology, &report, cli.json)?;
        }
        Commands::Headers => {
            let (topology, _) = load(&loader, &config)?;
            if topology.headers().is_empty() {
                log_info("No headers registered");
            }
            print_headers(&topology, cli.json)?;
        }
        Commands::Lookup {
            connector,
            position,
        } => {
            let (topology, _) = load(&loader, &config)?;
            let Some(target) = topology.header_pin(connector, *position) else {
                bail!("{connector}-{position} is not a registered header position");
            };
            let view = match target {
                HeaderTarget::Gpio(pin) => TargetView::Gpio(pin_view(&topology, pin)),
                HeaderTarget::Signal(signal) => TargetView::Signal(signal),
            };
            if cli.json {
                return print_json(&view);
            }
            match view {
                TargetView::Gpio(pin) => {
                    println!("{connector}-{position}: {} ({})", pin.name, pin.number)
                }
                TargetView::Signal(signal) => println!("{connector}-{position}: {signal}"),
            }
        }
        Commands::Pin { name } => {
            let (topology, _) = load(&loader, &config)?;
            let pin = topology
                .pin(name)
                .with_context(|| format!("{name} is not a pin of this chip family"))?;
            let view = pin_view(&topology, pin);
            if cli.json {
                return print_json(&view);
            }
            println!("{pin}: available={} edge={}", view.available, view.edge_interrupt);
            for (slot, label) in &view.functions {
                println!("  {slot} (mux {}): {label}", slot.mux_value());
            }
            for position in &view.positions {
                println!("  header {position}");
            }
        }
    }

    Ok(())
}
