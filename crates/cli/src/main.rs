use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use trackfuse_core::pipeline::reconcile_config::ReconcileConfig;
use trackfuse_core::pipeline::reconcile_tracks_use_case::{ReconcileReport, ReconcileTracksUseCase};
use trackfuse_core::reconciliation::domain::chain_merger::CyclePolicy;
use trackfuse_core::reconciliation::infrastructure::log_reconcile_observer::LogReconcileObserver;
use trackfuse_core::scenario::domain::scenario_reader::ScenarioReader;
use trackfuse_core::scenario::infrastructure::json_scenario_reader::JsonScenarioReader;
use trackfuse_core::shared::constants::SCENARIO_EXTENSIONS;
use trackfuse_core::tracking::domain::tracklet::Tracklet;
use trackfuse_core::tracking::domain::tracklet_store::TrackletStore;

/// Reconcile tracklet hypotheses into lineage-annotated tracks.
#[derive(Parser)]
#[command(name = "trackfuse")]
struct Cli {
    /// Scenario file (JSON) with tracklets and their chosen hypotheses.
    input: PathBuf,

    /// What to do when link hypotheses form a cycle: terminate or fail.
    #[arg(long, default_value = "terminate")]
    on_cycle: String,

    /// Log every chain, join and branch.
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    validate(&cli)?;

    let (mut store, hypotheses) = JsonScenarioReader::new().load(&cli.input)?;
    log::info!(
        "Loaded {} tracklets and {} hypotheses from {}",
        store.len(),
        hypotheses.len(),
        cli.input.display()
    );

    let config = ReconcileConfig::default().with_cycle_policy(parse_cycle_policy(&cli.on_cycle));
    let mut use_case =
        ReconcileTracksUseCase::new(config, Some(Box::new(LogReconcileObserver::new())));
    let report = use_case.execute(&mut store, &hypotheses)?;

    print_tracks(&store, &report);
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_scenario(&cli.input) {
        return Err(format!(
            "Input must be one of: {}, got {}",
            SCENARIO_EXTENSIONS.join(", "),
            cli.input.display()
        )
        .into());
    }
    if cli.on_cycle != "terminate" && cli.on_cycle != "fail" {
        return Err(format!(
            "On-cycle must be 'terminate' or 'fail', got '{}'",
            cli.on_cycle
        )
        .into());
    }
    Ok(())
}

fn is_scenario(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SCENARIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn parse_cycle_policy(value: &str) -> CyclePolicy {
    if value == "fail" {
        CyclePolicy::Fail
    } else {
        CyclePolicy::Terminate
    }
}

fn print_tracks(store: &TrackletStore, report: &ReconcileReport) {
    if report.is_noop() {
        println!("Nothing to reconcile ({} tracklets unchanged)", store.len());
    }

    println!(
        "{:>6}  {:>6}  {:<8}  {:>5}  {:>6}  {:>6}  {:>7}  children",
        "id", "parent", "fate", "len", "start", "end", "dummies"
    );
    for root in store.roots() {
        for id in store.lineage(root.id()) {
            if let Some(tracklet) = store.get(id) {
                println!("{}", format_row(tracklet));
            }
        }
    }

    println!("{} tracks, {} dummies", store.len(), store.dummies().len());
}

fn format_row(tracklet: &Tracklet) -> String {
    let opt = |v: Option<u32>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
    let children: Vec<String> = tracklet.children().iter().map(|c| c.to_string()).collect();
    format!(
        "{:>6}  {:>6}  {:<8}  {:>5}  {:>6}  {:>6}  {:>7}  {}",
        tracklet.id(),
        opt(tracklet.parent()),
        tracklet.fate().to_string(),
        tracklet.len(),
        opt(tracklet.start_time()),
        opt(tracklet.end_time()),
        tracklet.dummy_count(),
        if children.is_empty() {
            "-".to_string()
        } else {
            children.join(",")
        }
    )
}
