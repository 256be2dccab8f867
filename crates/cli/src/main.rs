use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plm_client::{
    ApiClient, ClientConfig, SessionToken, StatusChangeError, StatusSequencer, TrackedProduct,
};
use plm_core::types::DbId;

mod render;

/// Command-line client for the PLM backend.
#[derive(Parser)]
#[command(name = "plm", version)]
struct Cli {
    /// Backend base URL, overriding `PLM_API_URL`.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Bearer token, overriding `PLM_API_TOKEN`.
    #[arg(long, global = true)]
    token: Option<String>,
    /// Print JSON instead of text where supported.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List statuses.
    Statuses {
        /// Only statuses that can be placed in a workflow.
        #[arg(long)]
        active: bool,
    },
    /// List products.
    Products,
    /// Show a workflow's statuses in order.
    Workflow { id: DbId },
    /// Show where a product is in its workflow.
    Progress { product_id: DbId },
    /// Move a product to another status of its workflow.
    SetStatus { product_id: DbId, status_id: DbId },
    /// Log in and print the bearer token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PLM_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plm_cli=info,plm_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(token) = cli.token {
        config.token = Some(token);
    }
    tracing::debug!(base_url = %config.base_url, "Loaded client configuration");

    run(&config, cli.command, cli.json).await
}

async fn run(config: &ClientConfig, command: Command, json: bool) -> anyhow::Result<()> {
    if let Command::Login { email, password } = &command {
        let session = SessionToken::new();
        let api = ApiClient::new(config, Arc::new(session.clone()))?;
        let token = api.login(email, password, Some(&session)).await?;
        println!("{token}");
        return Ok(());
    }

    let api = ApiClient::new(config, config.credentials())?;
    match command {
        Command::Statuses { active } => {
            let statuses = if active {
                api.list_active_statuses().await?
            } else {
                api.list_statuses().await?
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&statuses)?);
            } else {
                println!("{}", render::status_table(&statuses));
            }
        }
        Command::Products => {
            let products = api.list_products().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&products)?);
            } else {
                for p in &products {
                    println!(
                        "{:>4}  {:<12}  {}",
                        p.id,
                        p.status_name.as_deref().unwrap_or("-"),
                        p.name
                    );
                }
            }
        }
        Command::Workflow { id } => {
            let workflow = api.get_workflow(id).await?;
            workflow.validate_order()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&workflow)?);
            } else {
                println!("{}", workflow.name);
                for ws in workflow.ordered_statuses() {
                    println!("{:>4}  {}", ws.order_index, ws.status.display_name());
                }
            }
        }
        Command::Progress { product_id } => {
            let tracked = TrackedProduct::load(&api, product_id).await?;
            print_progress(&tracked, json);
        }
        Command::SetStatus {
            product_id,
            status_id,
        } => {
            let mut tracked = TrackedProduct::load(&api, product_id).await?;
            let advisory = tracked
                .advisory_missing_fields(status_id)
                .unwrap_or_default();
            if !advisory.is_empty() {
                tracing::warn!(
                    product_id,
                    status_id,
                    missing = ?advisory,
                    "Target status requires fields this product lacks"
                );
            }

            let sequencer = StatusSequencer::new(Arc::new(api));
            let outcome = tracked
                .change_status(&sequencer, status_id)
                .await
                .map(|_| ());
            match outcome {
                Ok(()) => print_progress(&tracked, json),
                Err(err @ StatusChangeError::Rejected { .. }) => {
                    eprintln!("{}", err.message());
                    eprintln!(
                        "Missing required fields: {}",
                        tracked.flagged_fields().join(", ")
                    );
                    return Err(err).context("Status change rejected");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Login { .. } => {}
    }
    Ok(())
}

fn print_progress(tracked: &TrackedProduct, json: bool) {
    let positions = tracked.positions();
    if json {
        println!("{}", render::progress_json(&positions));
    } else {
        println!("{}", tracked.product().name);
        println!("{}", render::progress_line(&positions));
    }
}
