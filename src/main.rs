use clap::{Args, Parser, Subcommand};
use eoq_planner::forecast::accuracy;
use eoq_planner::forecast::methods::{ExponentialSmoothing, SimpleMovingAverage, WeightedMovingAverage};
use eoq_planner::forecast::traits::ForecastMethod;
use eoq_planner::io::{demand, reporting};
use eoq_planner::{EngineConfig, EoqEngine, Field, ForecastError, ParameterSet, ReportError};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "eoq-planner")]
#[command(about = "Inventory control: EOQ, safety stock, reorder point and demand forecasting")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer missing EOQ parameters and compute inventory metrics
    Eoq(EoqArgs),
    /// Forecast next-period demand from a history
    Forecast(ForecastArgs),
    /// Forecast error statistics: bias, MAD and MAPE
    Accuracy(AccuracyArgs),
}

#[derive(Args)]
struct EoqArgs {
    /// Demand in units per day
    #[arg(long)]
    demand_rate: Option<f64>,
    /// Demand in units per week
    #[arg(long)]
    demand_weekly: Option<f64>,
    /// Demand in units per year
    #[arg(long)]
    demand_yearly: Option<f64>,
    /// Unit purchase price
    #[arg(long)]
    purchase_cost: Option<f64>,
    /// Annual holding cost as a fraction of purchase cost
    #[arg(long)]
    holding_cost_rate: Option<f64>,
    /// Annual holding cost per unit (overrides rate * purchase cost)
    #[arg(long)]
    holding_cost: Option<f64>,
    /// Cost per replenishment order
    #[arg(long)]
    ordering_cost: Option<f64>,
    /// Standard deviation of demand per week
    #[arg(long)]
    std_dev: Option<f64>,
    /// Standard deviation of demand per day
    #[arg(long)]
    std_dev_daily: Option<f64>,
    /// Lead time in weeks
    #[arg(long)]
    lead_time: Option<f64>,
    /// Lead time in days
    #[arg(long)]
    lead_time_days: Option<f64>,
    /// Target probability of no stockout during lead time, e.g. 0.95
    #[arg(long)]
    service_level: Option<f64>,
    /// z-score used instead of the service level quantile
    #[arg(long)]
    z_score: Option<f64>,
    #[arg(long)]
    weeks_per_year: Option<f64>,
    #[arg(long)]
    days_per_year: Option<f64>,
    /// A previously known economic order quantity
    #[arg(long)]
    eoq: Option<f64>,
    /// Treat safety stock, its cost and the reorder point as zero
    #[arg(long)]
    no_safety_stock: bool,

    /// Weeks per year when neither calendar constant is given
    #[arg(long, env = "EOQ_DEFAULT_WEEKS", default_value_t = 52.0)]
    default_weeks: f64,
    /// Decimal places in the metrics output
    #[arg(long, env = "EOQ_PRECISION", default_value_t = 1)]
    precision: u32,
    /// Number of samples in the cost curve
    #[arg(long, default_value_t = 500)]
    curve_points: usize,

    /// Write the parameter table to this CSV file
    #[arg(long)]
    parameters_out: Option<PathBuf>,
    /// Write the metrics table to this CSV file
    #[arg(long)]
    metrics_out: Option<PathBuf>,
    /// Write the annual cost curve to this CSV file
    #[arg(long)]
    curve_out: Option<PathBuf>,
}

#[derive(Args)]
struct ForecastArgs {
    /// History as a comma separated list, oldest first
    #[arg(long)]
    data: Option<String>,
    /// CSV file whose last column is the demand history
    #[arg(long)]
    input: Option<PathBuf>,
    /// Generate a synthetic normal history of this many periods
    #[arg(long)]
    synthetic: Option<usize>,
    #[arg(long, default_value_t = 100.0)]
    mean: f64,
    #[arg(long, default_value_t = 10.0)]
    spread: f64,
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simple moving average window
    #[arg(long)]
    window: Option<usize>,
    /// Weighted moving average weights, oldest first, e.g. "0.2,0.3,0.5"
    #[arg(long)]
    weights: Option<String>,
    /// Exponential smoothing factor in [0, 1]
    #[arg(long)]
    alpha: Option<f64>,
    /// Prior forecast that seeds exponential smoothing
    #[arg(long)]
    initial: Option<f64>,
}

#[derive(Args)]
struct AccuracyArgs {
    /// CSV file with period,forecast,demand columns
    #[arg(long)]
    input: PathBuf,
    /// Write the per-period error table to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    let outcome = match cli.command {
        Commands::Eoq(args) => run_eoq(args),
        Commands::Forecast(args) => run_forecast(args),
        Commands::Accuracy(args) => run_accuracy(args),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_eoq(args: EoqArgs) -> Result<(), ReportError> {
    let config = EngineConfig {
        default_weeks_per_year: args.default_weeks,
        output_precision: args.precision,
        cost_curve_points: args.curve_points,
    };
    let engine = EoqEngine::new(config);

    let params = ParameterSet {
        demand_rate: args.demand_rate,
        demand_weekly: args.demand_weekly,
        demand_yearly: args.demand_yearly,
        purchase_cost: args.purchase_cost,
        holding_cost_rate: args.holding_cost_rate,
        holding_cost_per_unit: args.holding_cost,
        ordering_cost: args.ordering_cost,
        standard_deviation: args.std_dev,
        standard_deviation_per_day: args.std_dev_daily,
        lead_time: args.lead_time,
        lead_time_days: args.lead_time_days,
        service_level: args.service_level,
        z_score: args.z_score,
        weeks_per_year: args.weeks_per_year,
        days_per_year: args.days_per_year,
        eoq: args.eoq,
        holding_enabled: !args.no_safety_stock,
    };

    let resolved = engine.resolve(&params);
    for diagnostic in resolved.diagnostics() {
        warn!("{}", diagnostic);
    }

    let parameters = reporting::parameter_rows(&resolved);
    println!("=== Parameters ===");
    for row in &parameters {
        match row.value {
            Some(v) => println!("{:<40} {:>14} {}", row.parameter, v, row.calculation),
            None => println!("{:<40} {:>14} {}", row.parameter, "-", row.calculation),
        }
    }

    let report = engine.compute_metrics(&resolved);
    let metrics = reporting::metric_rows(&report, engine.config().output_precision);
    println!("\n=== Metrics ===");
    for row in &metrics {
        match (&row.value, &row.error) {
            (Some(v), _) => println!("{:<44} {:>12}", row.metric, v),
            (None, Some(e)) => println!("{:<44} {:>12} ({})", row.metric, "-", e),
            (None, None) => println!("{:<44} {:>12}", row.metric, "-"),
        }
    }
    if let Ok(weeks) = report.time_between_orders_weeks(&resolved) {
        let weeks = reporting::round_to(weeks, engine.config().output_precision);
        println!("{:<44} {:>12}", "Time Between Orders (weeks)", weeks);
    }

    if let Some(path) = &args.parameters_out {
        reporting::write_rows(path, &parameters)?;
    }
    if let Some(path) = &args.metrics_out {
        reporting::write_rows(path, &metrics)?;
    }
    if let Some(path) = &args.curve_out {
        let curve = engine.cost_curve(&resolved)?;
        reporting::write_rows(path, &curve)?;
    }

    if resolved.get(Field::Eoq).is_none() {
        info!("EOQ could not be established; supply demand, ordering cost and holding cost");
    }
    Ok(())
}

fn run_forecast(args: ForecastArgs) -> Result<(), ReportError> {
    let history = if let Some(data) = &args.data {
        demand::parse_series(data)?
    } else if let Some(path) = &args.input {
        demand::read_demand_series(path)?
    } else if let Some(periods) = args.synthetic {
        let series = demand::generate_normal_demand(periods, args.mean, args.spread, args.seed)?;
        println!("Synthetic history: {:?}", series);
        series
    } else {
        return Err(ForecastError::EmptyHistory.into());
    };

    let mut methods: Vec<Box<dyn ForecastMethod>> = Vec::new();
    if let Some(window) = args.window {
        methods.push(Box::new(SimpleMovingAverage::new(window)));
    }
    if let Some(weights) = &args.weights {
        methods.push(Box::new(WeightedMovingAverage::new(demand::parse_series(weights)?)));
    }
    if let Some(alpha) = args.alpha {
        methods.push(Box::new(ExponentialSmoothing::new(alpha, args.initial)));
    }
    if methods.is_empty() {
        warn!("no method selected; pass --window, --weights or --alpha");
    }

    println!("=== Forecast for next period ({} periods of history) ===", history.len());
    for method in &methods {
        match method.forecast(&history) {
            Ok(value) => println!("{:<28} {:.2}", method.name(), value),
            Err(e) => println!("{:<28} - ({})", method.name(), e),
        }
    }
    Ok(())
}

fn run_accuracy(args: AccuracyArgs) -> Result<(), ReportError> {
    let observations = demand::read_observations(&args.input)?;
    let rows = accuracy::error_rows(&observations)?;
    let summary = accuracy::summarize(&rows)?;

    println!("=== Forecast Errors ===");
    for row in &rows {
        println!(
            "{:<12} F={:<10} D={:<10} E={:<10.2} |E|={:<10.2} |E|/D={:.2}%",
            row.period,
            row.forecast,
            row.demand,
            row.error,
            row.absolute_error,
            row.percentage_error * 100.0
        );
    }
    println!("\n=== Statistics ===");
    println!("Average Forecast Error: {:.2}", summary.mean_error);
    println!("MAD: {:.2}", summary.mad);
    println!("MAPE: {:.2}%", summary.mape * 100.0);

    if let Some(path) = &args.output {
        reporting::write_rows(path, &rows)?;
    }
    Ok(())
}
