use anyhow::Context;
use clap::Parser;
use knnx::{AttributeStore, KNeighborsRegressor, Schema};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Encode a fitted KNeighborsRegressor as a nearest-neighbor model
#[derive(Parser, Debug)]
#[command(name = "knnx")]
#[command(about = "Encode a fitted KNeighborsRegressor as a portable model", long_about = None)]
struct Args {
    /// JSON object with the estimator attributes (n_neighbors, weights, metric, p, _fit_X, _y)
    #[arg(short, long)]
    attributes: PathBuf,

    /// JSON schema: {"target": "...", "active": ["...", ...]}
    ///
    /// Defaults to target `y` and features `x1..xn`.
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the model JSON
    #[arg(long)]
    pretty: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("knnx v{}", env!("CARGO_PKG_VERSION"));
    info!("Attributes: {:?}", args.attributes);

    let store: AttributeStore = read_json(&args.attributes)?;
    let knn = KNeighborsRegressor::from_attributes(&store)
        .with_context(|| format!("reading estimator from {}", args.attributes.display()))?;

    let schema = match &args.schema {
        Some(path) => read_json(path)?,
        None => Schema::with_default_names(knn.number_of_features()),
    };

    let model = knn.encode_model(&schema).context("encoding model")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&model)?
    } else {
        serde_json::to_string(&model)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!("Model written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
