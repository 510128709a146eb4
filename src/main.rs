use clap::Parser;
use tokio::signal;

use satori_client::config::Config;
use satori_client::{Client, Event};

/// Connect to a Satori endpoint and log every event it pushes.
#[derive(Parser)]
#[command(name = "satori-listen", version)]
struct Args {
    /// Endpoint base address, e.g. `http://127.0.0.1:5140` or
    /// `http+unix:///run/satori.sock:`. Overrides SATORI_ENDPOINT.
    #[arg(long)]
    endpoint: Option<String>,

    /// Bearer token. Overrides SATORI_TOKEN.
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "satori_client=debug,satori_listen=debug".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(token) = args.token {
        config.token = token;
    }
    print_banner(&config);

    let client = Client::from_config(&config);
    tokio::select! {
        _ = client.listen(log_event) => {},
        _ = shutdown_signal() => {
            tracing::info!("shutting down");
        }
    }
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");

    eprintln!();
    eprintln!("  \x1b[1;36msatori-listen\x1b[0m \x1b[2mv{version}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2mendpoint\x1b[0m     {}", config.endpoint);
    eprintln!(
        "  \x1b[2mtoken\x1b[0m        {}",
        if config.token.is_empty() { "none" } else { "set" }
    );
    eprintln!(
        "  \x1b[2mheartbeat\x1b[0m    {:?}",
        config.timings.heartbeat_interval
    );
    eprintln!();
}

fn log_event(event: Event) {
    match event.message {
        Some(ref message) => tracing::info!(
            "[{}] #{} {} {}: {}",
            event.platform,
            event.id,
            event.event_type,
            event.user.as_ref().map_or("?", |u| u.id.as_str()),
            message.content
        ),
        None => tracing::info!(
            "[{}] #{} {}",
            event.platform,
            event.id,
            event.event_type
        ),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
