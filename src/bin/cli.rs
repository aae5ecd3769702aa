use chartstudio::analytics::{AnalysisRequest, stats};
use chartstudio::catalog::catalog;
use chartstudio::config::ChartConfig;
use chartstudio::dataset::Dataset;
use chartstudio::options::build_options;
use chartstudio::store::ConfigStore;
use std::env;
use std::fs;
use std::time::Instant;

fn usage(program: &str) {
    eprintln!("Usage: {} <command> [args]", program);
    eprintln!("Commands:");
    eprintln!("  types                               List the chart types");
    eprintln!("  options <config.json>               Print the chart options");
    eprintln!("  preview <config.json> <out.png>     Render a PNG thumbnail");
    eprintln!("  analyze <data.csv> <request.json>   Run an analysis tool");
    eprintln!("  stats <data.csv> <column>           Summarize a numeric column");
    eprintln!("  list <store>                        List saved charts");
    eprintln!("  show <store> <id>                   Print a saved chart");
    eprintln!("  save <store> <name> <config.json>   Save a chart configuration");
    eprintln!("  delete <store> <id>                 Delete a saved chart");
    eprintln!("  xlsx <data.csv> <out.xlsx>          Convert a CSV file to XLSX");
}

fn read_config(path: &str) -> Result<ChartConfig, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn positional(args: &[String], i: usize) -> Result<&str, Box<dyn std::error::Error>> {
    args.get(i)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("'{}' is missing argument {}", args[1], i - 1).into())
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let command = args[1].as_str();
    let arg = |i: usize| positional(args, i);

    match command {
        "types" => {
            for info in catalog() {
                let coordinate = format!("{:?}", info.coordinate).to_lowercase();
                println!("{:<16} {:<10} {}", info.id, coordinate, info.description);
            }
        }
        "options" => {
            let config = read_config(arg(2)?)?;
            let options = build_options(&config)?;
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
        #[cfg(feature = "preview")]
        "preview" => {
            let config = read_config(arg(2)?)?;
            let png = chartstudio::preview::render_preview(&config, &Default::default())?;
            fs::write(arg(3)?, png)?;
            println!("Wrote {}", arg(3)?);
        }
        "analyze" => {
            let dataset = Dataset::from_csv_file(arg(2)?)?;
            let request: AnalysisRequest = serde_json::from_str(&fs::read_to_string(arg(3)?)?)?;
            let output = chartstudio::analytics::run_analysis(&dataset, &request)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        "stats" => {
            let dataset = Dataset::from_csv_file(arg(2)?)?;
            let values = dataset.numeric_column(arg(3)?)?;
            let summary = stats::summarize(&values)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "list" => {
            let store = ConfigStore::open_or_default(arg(2)?)?;
            for chart in store.list() {
                println!(
                    "{}  {:<14} {}  (updated {})",
                    chart.id,
                    chart.config.chart_type.id(),
                    chart.name,
                    chart.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        "show" => {
            let store = ConfigStore::open_or_default(arg(2)?)?;
            println!("{}", store.export_json(arg(3)?)?);
        }
        "save" => {
            let path = arg(2)?;
            let mut store = ConfigStore::open_or_default(path)?;
            let config = read_config(arg(4)?)?;
            let id = store.create(arg(3)?, config)?.id.clone();
            store.save_to_file(path)?;
            println!("Saved as {}", id);
        }
        "delete" => {
            let path = arg(2)?;
            let mut store = ConfigStore::open_or_default(path)?;
            let removed = store.delete(arg(3)?)?;
            store.save_to_file(path)?;
            println!("Deleted '{}'", removed.name);
        }
        #[cfg(feature = "xlsx")]
        "xlsx" => {
            let dataset = Dataset::from_csv_file(arg(2)?)?;
            let buffer = chartstudio::export::dataset_to_xlsx(&dataset)?;
            fs::write(arg(3)?, buffer)?;
            println!("Wrote {}", arg(3)?);
        }
        other => {
            usage(&args[0]);
            return Err(format!("unknown or disabled command '{}'", other).into());
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let s = Instant::now();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
        std::process::exit(2);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    log::debug!("finished in {:.3} seconds", s.elapsed().as_secs_f64());
}
