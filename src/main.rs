//! rbac-check - inspect authorization decisions against a dashboard configuration

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use module_rbac::auth::{PermissionAction, Principal, RoleKind};
use module_rbac::utils::{LogLevel, init_logging};
use module_rbac::{AuthSystem, Config};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "config/rbac.yaml";

#[derive(Parser, Debug)]
#[command(
    name = "rbac-check",
    version,
    about = "Evaluate module access decisions for a dashboard configuration"
)]
struct Cli {
    /// Path to the RBAC configuration document.
    #[arg(long, env = "RBAC_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, env = "RBAC_LOG_LEVEL", default_value = "warn")]
    log_level: LogLevel,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Decide one action on one module.
    Check {
        #[arg(long)]
        role: RoleKind,
        /// Comma-separated assigned module names.
        #[arg(long, value_delimiter = ',')]
        modules: Vec<String>,
        #[arg(long)]
        module: String,
        #[arg(long)]
        action: PermissionAction,
    },
    /// Run the route guard for a route id.
    Route {
        #[arg(long)]
        role: RoleKind,
        /// Comma-separated assigned module names.
        #[arg(long, value_delimiter = ',')]
        modules: Vec<String>,
        #[arg(long)]
        route: String,
    },
    /// Print the route table.
    Routes,
    /// Print the module catalog.
    Modules,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.json_logs);

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    info!(path = %cli.config.display(), "loading configuration");
    let config = Config::from_file(&cli.config).await?;
    let auth = AuthSystem::new(&config)?;

    let output = match cli.command {
        Command::Check {
            role,
            modules,
            module,
            action,
        } => {
            let principal = Principal::new("cli", role).with_modules(modules);
            let decision = auth.guard().authorize(Some(&principal), &module, action)?;
            let reachable = auth.guard().is_reachable(&principal, &module)?;
            json!({
                "module": module,
                "action": action,
                "reachable": reachable,
                "result": decision,
            })
        }
        Command::Route {
            role,
            modules,
            route,
        } => {
            let principal = Principal::new("cli", role).with_modules(modules);
            let outcome = auth.guard().check_route(Some(&principal), &route)?;
            json!({ "route": route, "result": outcome })
        }
        Command::Routes => {
            let routes: Vec<_> = auth
                .guard()
                .routes()
                .entries()
                .into_iter()
                .map(|(route, requirement)| {
                    json!({
                        "route": route,
                        "module": requirement.module,
                        "action": requirement.action,
                        "navigation": requirement.navigation,
                    })
                })
                .collect();
            json!(routes)
        }
        Command::Modules => serde_json::to_value(auth.modules().list())?,
    };

    Ok(serde_json::to_string_pretty(&output)?)
}
