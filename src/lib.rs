pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use tokio::signal;

use anyhow::Context;
pub use config::Config;
use db::{Role, Store};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("serve" | "-d" | "--daemon") => run_server(config, prometheus_handle).await,

        Some("create-admin") => {
            let username = args.get(2).map_or("admin", String::as_str);
            let email = args.get(3).map_or("admin@example.com", String::as_str);
            let password = args.get(4).map_or("admin123", String::as_str);
            cmd_create_admin(&config, username, email, password).await
        }

        Some("help" | "-h" | "--help") => {
            print_help();
            Ok(())
        }

        Some(other) => {
            println!("Unknown command: {other}");
            print_help();
            Ok(())
        }
    }
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Sweetshop v{} starting...", env!("CARGO_PKG_VERSION"));

    if config.auth.jwt_secret == "change-me-in-production" {
        warn!("auth.jwt_secret is the placeholder default; set SWEETSHOP_JWT_SECRET");
    }

    let port = config.server.port;
    let state = api::create_app_state_from_config(config, prometheus_handle).await?;

    let app = api::router(state).await;
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server_handle = tokio::spawn(async move {
        info!("API server running at http://0.0.0.0:{}", port);
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    info!("Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}

async fn cmd_create_admin(
    config: &Config,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if store.user_exists(username, email).await? {
        println!("Admin user already exists!");
        return Ok(());
    }

    let admin = store
        .create_user(username, email, password, Role::Admin, &config.security)
        .await?;

    println!("Admin user created successfully!");
    println!("ID: {}", admin.id);
    println!("Username: {}", admin.username);
    println!("Email: {}", admin.email);

    Ok(())
}

fn print_help() {
    println!("Sweetshop - sweet shop inventory service");
    println!();
    println!("Usage: sweetshop [command]");
    println!();
    println!("Commands:");
    println!("  serve                                    Start the API server (default)");
    println!("  create-admin [username email password]   Create an admin account");
    println!("  help                                     Show this help");
}
