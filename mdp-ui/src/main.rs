//! mdp-ui - MDP performance survey service
//!
//! Collects multi-criteria rotation evaluations, stores them, and serves
//! the dashboard's aggregate, individual, and comparison views.

use anyhow::Result;
use clap::Parser;
use mdp_common::{config, db};
use mdp_ui::{build_router, notify::Notifier, store::EvaluationStore, AppState};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mdp-ui", about = "MDP performance survey service")]
struct Args {
    /// Data root folder (overrides MDP_ROOT_FOLDER and the config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// Bind address
    #[arg(long, env = "MDP_BIND", default_value = "127.0.0.1:5730")]
    bind: String,

    /// Mail relay endpoint for evaluation summaries (unset disables email)
    #[arg(long, env = "MDP_MAIL_ENDPOINT")]
    mail_endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting MDP survey service (mdp-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = db::init_database(&db_path).await?;

    let store = EvaluationStore::new(pool);
    let notifier = Notifier::new(args.mail_endpoint.clone());
    if args.mail_endpoint.is_some() {
        info!("Email notification enabled");
    } else {
        info!("Email notification disabled (no mail relay endpoint configured)");
    }

    let state = AppState::new(store, notifier);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("mdp-ui listening on http://{}", args.bind);
    info!("Health check: http://{}/health", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
