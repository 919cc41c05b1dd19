use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use orbit_sentinel::catalog::Catalog;
use orbit_sentinel::config::Config;
use orbit_sentinel::conjunction::{
    analyze_conjunction, detect_immediate_threats, next_close_approaches,
    predict_future_collisions,
};
use orbit_sentinel::monitor::Monitor;
use orbit_sentinel::propagation::generate_trajectory;

#[derive(Parser)]
#[command(name = "orbit-sentinel")]
#[command(about = "Debris conjunction screening")]
struct Cli {
    /// Screening and monitor configuration (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a catalog file
    Validate { catalog: PathBuf },
    /// Propagate one object and print its trajectory
    Trajectory {
        catalog: PathBuf,
        object: String,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        steps: Option<usize>,
    },
    /// Screen current positions for close approaches
    Scan {
        catalog: PathBuf,
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Predict conjunctions over the coming hours
    Predict {
        catalog: PathBuf,
        #[arg(long)]
        hours: Option<f64>,
    },
    /// Detailed analysis of one debris/target pair
    Analyze {
        catalog: PathBuf,
        #[arg(long)]
        debris: String,
        #[arg(long)]
        target: String,
        #[arg(long)]
        hours: Option<f64>,
    },
    /// Screen continuously until interrupted
    Monitor { catalog: PathBuf },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Validate { catalog } => validate(&catalog),
        Commands::Trajectory {
            catalog,
            object,
            hours,
            steps,
        } => trajectory(&config, &catalog, &object, hours, steps),
        Commands::Scan { catalog, threshold } => scan(&config, &catalog, threshold),
        Commands::Predict { catalog, hours } => predict(&config, &catalog, hours),
        Commands::Analyze {
            catalog,
            debris,
            target,
            hours,
        } => analyze(&config, &catalog, &debris, &target, hours),
        Commands::Monitor { catalog } => monitor(config, &catalog),
    }
}

fn load_catalog(path: &Path) -> Option<Catalog> {
    match Catalog::load(path) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Error loading {}: {}", path.display(), e);
            None
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn validate(path: &Path) -> ExitCode {
    let Some(catalog) = load_catalog(path) else {
        return ExitCode::FAILURE;
    };

    println!(
        "Catalog is valid ({} debris, {} targets, {} objects total)",
        catalog.debris().len(),
        catalog.targets().len(),
        catalog.len()
    );
    for object in catalog.objects() {
        let elements = if object.elements.is_some() {
            "elements"
        } else {
            "state only"
        };
        println!(
            "  {}: {} @ {:.1} km ({})",
            object.id,
            object.name,
            object.altitude_km(),
            elements
        );
    }
    ExitCode::SUCCESS
}

fn trajectory(
    config: &Config,
    path: &Path,
    id: &str,
    hours: Option<f64>,
    steps: Option<usize>,
) -> ExitCode {
    let Some(catalog) = load_catalog(path) else {
        return ExitCode::FAILURE;
    };
    let object = match catalog.get(id) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let hours = hours.unwrap_or_else(|| config.screening.prediction_hours());
    let steps = steps.unwrap_or(config.screening.trajectory_steps);
    match generate_trajectory(object, hours, steps) {
        Ok(trajectory) => print_json(&trajectory),
        Err(e) => {
            eprintln!("Propagation error for {}: {}", id, e);
            ExitCode::FAILURE
        }
    }
}

fn scan(config: &Config, path: &Path, threshold: Option<f64>) -> ExitCode {
    let Some(catalog) = load_catalog(path) else {
        return ExitCode::FAILURE;
    };

    let threshold = threshold.unwrap_or(config.screening.alert_threshold_km);
    let alerts = detect_immediate_threats(catalog.debris(), catalog.targets(), threshold, Utc::now());
    log::info!("{} immediate alerts within {} km", alerts.len(), threshold);
    print_json(&alerts)
}

fn predict(config: &Config, path: &Path, hours: Option<f64>) -> ExitCode {
    let Some(mut catalog) = load_catalog(path) else {
        return ExitCode::FAILURE;
    };

    let hours = hours.unwrap_or_else(|| config.screening.prediction_hours());
    let alerts = predict_future_collisions(catalog.debris(), catalog.targets(), hours, Utc::now());
    catalog.apply_next_close_approaches(&next_close_approaches(&alerts));

    let debris: Vec<_> = catalog
        .debris()
        .iter()
        .filter(|o| o.next_close_approach.is_some())
        .collect();
    print_json(&serde_json::json!({
        "alerts": alerts,
        "debris": debris,
    }))
}

fn analyze(
    config: &Config,
    path: &Path,
    debris_id: &str,
    target_id: &str,
    hours: Option<f64>,
) -> ExitCode {
    let Some(catalog) = load_catalog(path) else {
        return ExitCode::FAILURE;
    };
    let (debris, target) = match (catalog.get(debris_id), catalog.get(target_id)) {
        (Ok(d), Ok(t)) => (d, t),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let hours = hours.unwrap_or_else(|| config.screening.analysis_hours());
    match analyze_conjunction(debris, target, hours, Utc::now()) {
        Ok(Some(analysis)) => print_json(&analysis),
        Ok(None) => {
            eprintln!("{} has no element set, nothing to analyze", debris_id);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Analysis error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn monitor(config: Config, path: &Path) -> ExitCode {
    let Some(catalog) = load_catalog(path) else {
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async move {
        let mut monitor = Monitor::new(config);
        if let Err(e) = monitor.run(catalog).await {
            eprintln!("Failed to start monitor: {}", e);
            return ExitCode::FAILURE;
        }

        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for ctrl-c: {}", e);
        }

        let result = monitor.stop().await;
        let status = monitor.status();
        println!(
            "Monitor stopped after {} immediate and {} prediction passes, {} alerts retained",
            status.immediate_passes,
            status.prediction_passes,
            status.alerts.len()
        );
        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Monitor error: {}", e);
                ExitCode::FAILURE
            }
        }
    })
}
