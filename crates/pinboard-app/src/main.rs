//! Scenario replay entry point (native).

#[cfg(feature = "native")]
use clap::Parser;

#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(
    name = "pinboard-replay",
    version,
    about = "Replay pointer scenarios against a pinboard desktop"
)]
struct Cli {
    /// Scenario file (JSON).
    scenario: std::path::PathBuf,
    /// Pretty-print the report.
    #[arg(long)]
    pretty: bool,
}

#[cfg(feature = "native")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Replaying {}", cli.scenario.display());

    let scenario = pinboard_app::Scenario::from_path(&cli.scenario)?;
    let report = scenario.run()?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
