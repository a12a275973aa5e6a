use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use quarry_agent::extractor::{Extractor, WorkerProcessExtractor};
use quarry_agent::fetch::DiskFetcher;
use quarry_agent::{telemetry, AgentConfig, ExecutorAgent};
use quarry_core::ContentItem;

/// CLI for the quarry executor agent.
#[derive(Parser)]
#[command(name = "quarry-agent", about = "Extraction executor agent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Worker command shared by every subcommand: the argv of the extraction
/// worker (program plus fixed arguments).
#[derive(Args)]
struct WorkerArgs {
    /// Worker command, e.g. --worker-cmd python3 my_extractor.py
    #[arg(long = "worker-cmd", num_args = 1.., required = true, value_name = "CMD")]
    worker_cmd: Vec<String>,

    /// Per-invocation worker timeout in seconds
    #[arg(long, default_value_t = 300)]
    worker_timeout_secs: u64,
}

impl WorkerArgs {
    fn build(&self) -> Result<WorkerProcessExtractor, Box<dyn std::error::Error>> {
        Ok(WorkerProcessExtractor::new(
            &self.worker_cmd,
            Duration::from_secs(self.worker_timeout_secs),
        )?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run one extraction locally against literal input
    Local {
        #[command(flatten)]
        worker: WorkerArgs,

        /// Literal text input
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Read input from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Input media type
        #[arg(long, default_value = "text/plain")]
        mime: String,

        /// JSON input parameters
        #[arg(long, default_value = "{}")]
        params: String,
    },

    /// Print the worker's capability descriptor
    Describe {
        #[command(flatten)]
        worker: WorkerArgs,
    },

    /// Join a coordinator and execute assigned tasks until shutdown
    Join {
        #[command(flatten)]
        worker: WorkerArgs,

        /// Coordinator endpoint URI
        #[arg(
            long,
            default_value = "http://localhost:8950",
            env = "QUARRY_COORDINATOR"
        )]
        coordinator: String,

        /// Heartbeat interval in seconds
        #[arg(long, default_value_t = 5)]
        heartbeat_interval_secs: u64,

        /// Upper bound on concurrently running tasks
        #[arg(long, default_value_t = 8)]
        max_concurrent_tasks: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Local {
            worker,
            text,
            file,
            mime,
            params,
        } => cmd_local(worker, text, file, mime, params).await?,
        Commands::Describe { worker } => cmd_describe(worker).await?,
        Commands::Join {
            worker,
            coordinator,
            heartbeat_interval_secs,
            max_concurrent_tasks,
        } => {
            cmd_join(
                worker,
                coordinator,
                heartbeat_interval_secs,
                max_concurrent_tasks,
            )
            .await?
        }
    }

    Ok(())
}

async fn cmd_local(
    worker: WorkerArgs,
    text: Option<String>,
    file: Option<PathBuf>,
    mime: String,
    params: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = match (text, file) {
        (Some(text), None) => text.into_bytes(),
        (None, Some(path)) => tokio::fs::read(path).await?,
        _ => return Err("pass exactly one of --text or --file".into()),
    };
    let params: serde_json::Value = serde_json::from_str(&params)?;

    let extractor = worker.build()?;
    let content = ContentItem {
        mime,
        data,
        labels: Default::default(),
        features: Vec::new(),
    };
    let items = extractor.extract(content, params).await?;

    println!("{} derived item(s)", items.len());
    for (index, item) in items.iter().enumerate() {
        println!("[{index}] {} ({} bytes)", item.mime, item.data.len());
        for feature in &item.features {
            println!("      {} {}: {}", feature.kind, feature.name, feature.data);
        }
    }
    Ok(())
}

async fn cmd_describe(worker: WorkerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = worker.build()?;
    let descriptor = extractor.describe().await?;
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

async fn cmd_join(
    worker: WorkerArgs,
    coordinator: String,
    heartbeat_interval_secs: u64,
    max_concurrent_tasks: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let worker_timeout = Duration::from_secs(worker.worker_timeout_secs);
    let extractor = Arc::new(worker.build()?);

    // Describe once; the descriptor is immutable for the process lifetime.
    let capability = extractor.describe().await?;

    let config = AgentConfig::new(coordinator)
        .with_heartbeat_interval(Duration::from_secs(heartbeat_interval_secs))
        .with_max_concurrent_tasks(max_concurrent_tasks)
        .with_task_timeout(worker_timeout);

    let agent = ExecutorAgent::new(config, capability, Arc::new(DiskFetcher::new()), extractor)?;
    let shutdown = agent.shutdown_token();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.cancel();
    });

    agent.run().await?;
    Ok(())
}

/// Completes on SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            Ok(signal) => signal,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
