//! HiveMind CLI — run declarative agent workflows from the command line.

use clap::{Parser, Subcommand};

use hivemind_cli::commands;

/// HiveMind — sequential agent workflows
#[derive(Parser)]
#[command(name = "hivemind", version, about = "HiveMind — sequential agent workflows")]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workflow from a YAML or JSON file
    Run {
        /// Path to the workflow file
        #[arg(env = "HIVEMIND_WORKFLOW", default_value = "workflows/refund_workflow.yaml")]
        file: String,
        /// Answer for the next input prompt (repeatable); skips interactive input
        #[arg(long = "answer", short = 'a')]
        answers: Vec<String>,
        /// Print the run result as JSON when done
        #[arg(long)]
        json: bool,
    },
    /// Validate a workflow file without executing it
    Validate {
        /// Path to the workflow file
        file: String,
    },
    /// List the agents declared by a workflow
    Agents {
        /// Path to the workflow file
        file: String,
    },
    /// List the built-in agent actions
    Actions,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "hivemind_core=debug,hivemind_cli=debug"
    } else {
        "hivemind_core=warn,hivemind_cli=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Some(Commands::Run {
            file,
            answers,
            json,
        }) => {
            let opts = commands::workflow::RunOptions {
                file,
                answers,
                json,
                verbose: cli.verbose,
            };
            commands::workflow::run(&opts).await.map(|_| ())
        }
        Some(Commands::Validate { file }) => commands::workflow::validate(&file).await,
        Some(Commands::Agents { file }) => commands::workflow::agents(&file).await,
        Some(Commands::Actions) => commands::workflow::actions().await,
        None => {
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
