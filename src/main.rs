//! asset-chisel CLI
//!
//! Command-line interface for projecting asset scenarios and managing the
//! scenario store

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use asset_chisel::projection::Projector;
use asset_chisel::scenario::{
    default_export_filename, export_scenario, import_scenario, Scenario, ScenarioData,
    ScenarioStore,
};
use asset_chisel::{Asset, ContributionSchedule, PortfolioProjection, ReturnRateInterval};

#[derive(Parser)]
#[command(name = "asset-chisel", version, about = "Multi-asset financial projection tool")]
struct Cli {
    /// Directory holding the scenario store
    #[arg(long, default_value = "scenarios", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project a scenario and print the combined year table
    Project {
        /// Scenario id to project (defaults to the current scenario)
        #[arg(long)]
        scenario: Option<String>,

        /// Project an exported scenario file instead of the store
        #[arg(long)]
        input: Option<PathBuf>,

        /// Override the scenario's horizon in years
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        years: Option<u32>,

        /// Also write the combined table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List saved scenarios
    List,

    /// Print one scenario as JSON
    Show { id: String },

    /// Save an exported scenario file under a new name
    Save {
        name: String,

        /// Scenario JSON file to read parameters from
        #[arg(long)]
        input: PathBuf,
    },

    /// Delete a scenario from the store
    Delete { id: String },

    /// Export a scenario to a JSON file
    Export {
        id: String,

        /// Output path (defaults to `{name}_{date}.json`)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import an exported scenario file into the store
    Import { path: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store = ScenarioStore::open(&cli.store)?;

    match cli.command {
        Command::Project { scenario, input, years, csv } => {
            let selected = select_scenario(&store, scenario, input)?;
            let horizon = years.unwrap_or(selected.data.simulation_years);

            println!("Scenario: {} ({} assets, {} years)", selected.name, selected.data.assets.len(), horizon);

            let projector = Projector::new(horizon);
            let result = projector.project_portfolio(&selected.data.assets);

            print_combined_table(&result);
            print_asset_summaries(&result);

            if let Some(path) = csv {
                write_combined_csv(&result, &path)?;
                println!("\nCombined table written to: {}", path.display());
            }
        }
        Command::List => {
            let scenarios = store.all()?;
            if scenarios.is_empty() {
                println!("No saved scenarios.");
                return Ok(());
            }
            let current = store.current_id();
            for s in scenarios {
                let marker = if current.as_deref() == Some(s.id.as_str()) { "*" } else { " " };
                println!(
                    "{} {:<20} {:<24} {:>3} assets, {:>3} years  updated {}",
                    marker,
                    s.id,
                    s.name,
                    s.data.assets.len(),
                    s.data.simulation_years,
                    s.updated_at.format("%Y-%m-%d %H:%M"),
                );
            }
        }
        Command::Show { id } => {
            let scenario = store
                .get(&id)?
                .with_context(|| format!("scenario not found: {}", id))?;
            println!("{}", serde_json::to_string_pretty(&scenario)?);
        }
        Command::Save { name, input } => {
            let data = import_scenario(&input)?.data;
            let saved = store.save(Scenario::new(name, data))?;
            println!("Saved scenario {} ({})", saved.id, saved.name);
        }
        Command::Delete { id } => {
            let remaining = store.delete(&id)?;
            println!("Deleted {}. {} scenario(s) remain.", id, remaining.len());
        }
        Command::Export { id, out } => {
            let scenario = store
                .get(&id)?
                .with_context(|| format!("scenario not found: {}", id))?;
            let path = out.unwrap_or_else(|| PathBuf::from(default_export_filename(&scenario)));
            export_scenario(&scenario, &path)?;
            println!("Exported to: {}", path.display());
        }
        Command::Import { path } => {
            let imported = import_scenario(&path)?;
            let saved = store.save(imported)?;
            println!("Imported as {} ({})", saved.id, saved.name);
        }
    }

    Ok(())
}

/// Pick the scenario to project: explicit file, then explicit id, then the
/// store's current scenario, then a built-in example portfolio
fn select_scenario(
    store: &ScenarioStore,
    id: Option<String>,
    input: Option<PathBuf>,
) -> Result<Scenario> {
    if let Some(path) = input {
        return Ok(import_scenario(&path)?);
    }
    if let Some(id) = id {
        return match store.get(&id)? {
            Some(s) => Ok(s),
            None => bail!("scenario not found: {}", id),
        };
    }
    if let Some(current) = store.current()? {
        return Ok(current);
    }
    println!("No saved scenarios; projecting the built-in example portfolio.\n");
    Ok(example_scenario())
}

/// Starter portfolio: a 5% index fund with a 50,000/month contribution
fn example_scenario() -> Scenario {
    let mut fund = Asset::new(1, "Index fund", 0.0);
    fund.return_rates.push(ReturnRateInterval {
        id: 1,
        start_year: 1,
        end_year: 30,
        rate_percent: 5.0,
    });
    fund.contributions.push(ContributionSchedule {
        id: 1,
        start_year: 1,
        end_year: 30,
        monthly_amount: 50_000.0,
    });

    Scenario::new(
        "Example",
        ScenarioData {
            simulation_years: 30,
            assets: vec![fund],
        },
    )
}

fn print_combined_table(result: &PortfolioProjection) {
    println!();
    println!("{:>5} {:>16} {:>16} {:>16}", "Year", "Total", "Principal", "Profit");
    println!("{}", "-".repeat(56));
    for row in &result.combined {
        println!(
            "{:>5} {:>16.0} {:>16.0} {:>16.0}",
            row.year, row.total, row.principal, row.profit
        );
    }
}

fn print_asset_summaries(result: &PortfolioProjection) {
    for projection in &result.per_asset {
        let summary = projection.summary();
        println!(
            "\n{}: final total {:.0}, principal {:.0}, profit {:.0}, contributed {:.0}",
            projection.asset_name,
            summary.final_total,
            summary.final_principal,
            summary.final_profit,
            summary.total_contributed,
        );
    }
}

/// Write the combined series with one `{name}_total` column per asset
fn write_combined_csv(result: &PortfolioProjection, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;

    let breakdown_keys: Vec<String> = result
        .per_asset
        .iter()
        .map(|p| format!("{}_total", p.asset_name))
        .collect();

    let mut header = vec![
        "year".to_string(),
        "total".to_string(),
        "principal".to_string(),
        "profit".to_string(),
    ];
    header.extend(breakdown_keys.iter().cloned());
    writer.write_record(&header)?;

    for row in &result.combined {
        let mut record = vec![
            row.year.to_string(),
            format!("{:.0}", row.total),
            format!("{:.2}", row.principal),
            format!("{:.0}", row.profit),
        ];
        for key in &breakdown_keys {
            let value = row.breakdown.get(key).copied().unwrap_or(0.0);
            record.push(format!("{:.0}", value));
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
