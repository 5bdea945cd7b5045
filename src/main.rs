use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use chunkflow::chance::{ChanceSource, FixedChance, ThreadRngChance};
use chunkflow::config::ReporterConfig;
use chunkflow::consts::{DEFAULT_SUCCESS_THRESHOLD, ENV_HANDLER, ENV_LOG_FORMAT};
use chunkflow::handlers::ChunkReporter;
use chunkflow::invoke::{HandlerKind, invoke, load_event};
use chunkflow::lambda;
use chunkflow::logging::{LogFormat, init_logging};
use chunkflow::orchestrator::Orchestrator;
use chunkflow::orchestrator::dry_run::DryRunOrchestrator;
use chunkflow::orchestrator::sfn::StepFunctionsOrchestrator;

#[derive(Parser)]
#[command(
    name = "chunkflow",
    version,
    about = "Split a document and report chunk completion to Step Functions."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log output format
    #[arg(long, value_enum, env = ENV_LOG_FORMAT, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Command {
    /// Serve one handler under the Lambda runtime
    Lambda {
        /// Handler to serve
        #[arg(value_enum, env = ENV_HANDLER)]
        handler: HandlerKind,
    },
    /// Run a single invocation locally and print the result
    Invoke {
        /// Handler to invoke
        #[arg(value_enum)]
        handler: HandlerKind,

        /// Event as inline JSON (default: `{}`)
        #[arg(short, long, conflicts_with = "event_file")]
        event: Option<String>,

        /// Read the event from a JSON file
        #[arg(short = 'f', long)]
        event_file: Option<PathBuf>,

        /// Force the random draw instead of sampling it, in [0, 1)
        #[arg(long)]
        chance: Option<f64>,

        /// Draws strictly below this value report success
        #[arg(long, default_value_t = DEFAULT_SUCCESS_THRESHOLD)]
        success_threshold: f64,

        /// Log callbacks instead of sending them to Step Functions
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match cli.command {
        Command::Lambda { handler } => {
            info!(?handler, "starting lambda handler");
            let result = match handler {
                HandlerKind::Split => lambda::run_splitter().await,
                HandlerKind::Report => {
                    let orchestrator = Arc::new(StepFunctionsOrchestrator::from_env().await);
                    let reporter = ChunkReporter::new(
                        orchestrator,
                        Arc::new(ThreadRngChance),
                        ReporterConfig::default(),
                    );
                    lambda::run_reporter(reporter).await
                }
            };
            result.map_err(|e| anyhow::anyhow!(e))
        }
        Command::Invoke {
            handler,
            event,
            event_file,
            chance,
            success_threshold,
            dry_run,
        } => {
            let config = ReporterConfig::new(success_threshold)?;
            let chance: Arc<dyn ChanceSource> = match chance {
                Some(value) => Arc::new(FixedChance::new(value)?),
                None => Arc::new(ThreadRngChance),
            };
            let event = load_event(event.as_deref(), event_file.as_deref())?;

            let orchestrator: Arc<dyn Orchestrator> = if dry_run || handler == HandlerKind::Split {
                Arc::new(DryRunOrchestrator)
            } else {
                Arc::new(StepFunctionsOrchestrator::from_env().await)
            };
            let reporter = ChunkReporter::new(orchestrator, chance, config);

            let result = invoke(handler, event, &reporter).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}
