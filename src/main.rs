use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use tribeland::{ScenarioLoader, TickStats};

#[derive(Debug, Parser)]
#[command(author, version, about = "Grid population simulation runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/island_rivals.yaml")]
    scenario: PathBuf,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Print a per-group report every N ticks (0 = final report only)
    #[arg(long, default_value_t = 0)]
    report_interval: u64,

    /// Emit the final statistics as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let mut engine = scenario.build_engine()?;
    let ticks = scenario.ticks(cli.ticks);
    log::info!(
        "scenario '{}' loaded, running {} ticks at {}s each",
        scenario.name,
        ticks,
        scenario.tick_seconds
    );

    let mut last = TickStats::default();
    for n in 1..=ticks {
        last = engine.run_tick(scenario.tick_seconds);
        if cli.report_interval > 0 && n % cli.report_interval == 0 {
            println!("tick {n}");
            print!("{last}");
        }
    }

    if cli.json {
        let report: BTreeMap<&str, _> = last.iter().map(|(group, stats)| (group.name(), stats)).collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Scenario '{}' completed after {} ticks.", scenario.name, ticks);
        print!("{last}");
    }
    Ok(())
}
