use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use llm_tools::{ErrorPayload, ProjectConfig, builtin_registry};

#[derive(Parser)]
#[command(name = "llm-tools", version)]
#[command(about = "Inspect and call LLM function-calling tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available tools
    List,
    /// Print the function-calling schema of one tool, or of all tools
    Schema {
        /// Tool name
        name: Option<String>,
    },
    /// Call a tool with a JSON object of arguments
    Call {
        /// Tool name
        name: String,
        /// Arguments as a JSON object, e.g. '{"filename": "README.md"}'
        arguments: String,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive("info".parse().expect("valid log directive"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ProjectConfig> {
    match path {
        Some(path) => ProjectConfig::load(path),
        None => Ok(ProjectConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let registry = builtin_registry(&config).context("failed to build tool registry")?;

    match cli.command {
        Commands::List => {
            for name in registry.names() {
                println!("{}", name);
            }
        }
        Commands::Schema { name: Some(name) } => {
            let tool = registry
                .get(&name)
                .with_context(|| format!("unknown tool: {}", name))?;
            println!("{}", serde_json::to_string_pretty(tool.schema())?);
        }
        Commands::Schema { name: None } => {
            println!("{}", serde_json::to_string_pretty(&registry.schemas())?);
        }
        Commands::Call { name, arguments } => {
            info!(tool = %name, "calling tool");
            let output = registry.dispatch(&name, &arguments);
            println!("{}", output);
            if let Some(payload) = ErrorPayload::detect(&output) {
                error!(tool = %name, error = %payload.message(), "tool call failed");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
