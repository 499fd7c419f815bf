//! 排队模型仿真
//!
//! 运行单个模型（命令行参数）或一个 JSON 场景（最多 4 个模型并行），
//! 打印仿真值与理论值，并可输出 JSON 报告。

use clap::Parser;
use queuesim::SimError;
use queuesim::compare::{ComparisonReport, ModelSpec, ScenarioSpec, run_scenario};
use queuesim::model::ModelKind;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "queue-sim",
    about = "Simulate M/M/1, M/M/1/K, M/M/s, M/M/s/K and M/M/s/N queues and compare with theory"
)]
struct Args {
    /// Path to a scenario JSON file; overrides the single-model flags
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Model kind: mm1, mm1k, mms, mmsk or mmsn
    #[arg(long)]
    model: Option<ModelKind>,

    /// Arrival rate (customers per time unit)
    #[arg(long)]
    lambda: Option<f64>,

    /// Per-server service rate
    #[arg(long)]
    mu: Option<f64>,

    #[arg(long)]
    servers: Option<usize>,

    /// System capacity K (customers in queue + in service)
    #[arg(long)]
    capacity: Option<usize>,

    /// Population size N for the finite-source model
    #[arg(long)]
    population: Option<usize>,

    /// Simulated time units to run
    #[arg(long, default_value_t = 1000.0)]
    duration: f64,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Record ~100 time-series samples per model in the JSON report
    #[arg(long)]
    time_series: bool,

    /// Output report JSON file
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("either --scenario or --model with --lambda and --mu is required")]
    MissingModel,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode report: {0}")]
    Encode(serde_json::Error),

    #[error(transparent)]
    Sim(#[from] SimError),
}

fn main() -> ExitCode {
    // 初始化 tracing（输出到 stderr，stdout 只保留结果）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "运行失败");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let spec = load_scenario(&args)?;
    let report = run_scenario(&spec)?;
    print_report(&report);

    if let Some(path) = args.out {
        let raw = serde_json::to_string_pretty(&report).map_err(CliError::Encode)?;
        fs::write(&path, raw).map_err(|source| CliError::Io { path, source })?;
    }
    Ok(())
}

fn load_scenario(args: &Args) -> Result<ScenarioSpec, CliError> {
    if let Some(path) = &args.scenario {
        let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        let mut spec: ScenarioSpec =
            serde_json::from_str(&raw).map_err(|source| CliError::Json {
                path: path.clone(),
                source,
            })?;
        if args.seed.is_some() {
            spec.seed = args.seed;
        }
        spec.time_series |= args.time_series;
        return Ok(spec);
    }

    let (Some(kind), Some(lambda), Some(mu)) = (args.model, args.lambda, args.mu) else {
        return Err(CliError::MissingModel);
    };
    Ok(ScenarioSpec {
        duration: args.duration,
        seed: args.seed,
        time_series: args.time_series,
        models: vec![ModelSpec {
            kind,
            label: None,
            lambda,
            mu,
            servers: args.servers,
            capacity: args.capacity,
            population: args.population,
        }],
    })
}

fn print_report(report: &ComparisonReport) {
    println!("duration={} seed={}", report.duration, report.seed);
    for m in &report.models {
        let s = &m.simulated;
        println!(
            "model label={:?} kind={} rho={:.4} L={:.4} Lq={:.4} W={:.4} Wq={:.4} P0={:.4} lambda_eff={:.4} served={} rejected={} max_queue={}",
            m.label,
            m.kind,
            s.rho,
            s.l,
            s.lq,
            s.w,
            s.wq,
            s.p0,
            s.lambda_eff,
            s.served,
            s.rejected,
            s.max_queue
        );
        match &m.theoretical {
            Some(t) => println!(
                "theory label={:?} rho={:.4} L={:.4} Lq={:.4} W={:.4} Wq={:.4} P0={:.4}",
                m.label, t.rho, t.l, t.lq, t.w, t.wq, t.p0
            ),
            None => println!("theory label={:?} unavailable", m.label),
        }
    }
}
