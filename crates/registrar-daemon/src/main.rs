// crates/registrar-daemon/src/main.rs
//
// Binary entrypoint for the Registrar daemon.
//
// Parses CLI arguments, loads configuration, initializes tracing,
// constructs the enrollment registry, and serves it over RPC until
// Ctrl-C is received.

mod config;

use std::sync::Arc;

use clap::Parser;
use config::DaemonConfig;

use registrar_core::EnrollmentRegistry;
use registrar_rpc::RegistrarRpcServer;

/// Registrar daemon: serves the student/course enrollment registry.
#[derive(Parser, Debug)]
#[command(
    name = "registrar-daemon",
    version,
    about = "Registrar enrollment service daemon"
)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.registrar/config.toml")]
    config: String,

    /// Host to bind, overriding the config file.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding both the config file and the PORT variable.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load before tracing so the configured log level can seed the filter;
    // the outcome is logged right after.
    let config_path = expand_tilde(&args.config);
    let loaded = DaemonConfig::load(&config_path);
    let mut daemon_config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => DaemonConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&daemon_config.log_level)),
        )
        .init();

    match loaded {
        Ok(_) => tracing::info!("Loaded configuration from {}", config_path),
        Err(e) => tracing::warn!("{}. Using defaults.", e),
    }

    let port_env = std::env::var("PORT").ok();
    if !daemon_config.apply_port_env(port_env.as_deref()) {
        tracing::warn!(
            "Ignoring invalid PORT value {:?}; using port {}",
            port_env,
            daemon_config.rpc_port
        );
    }
    if let Some(host) = args.host {
        daemon_config.rpc_host = host;
    }
    if let Some(port) = args.port {
        daemon_config.rpc_port = port;
    }

    tracing::info!("Registrar Daemon v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "RPC endpoint: {}:{}",
        daemon_config.rpc_host,
        daemon_config.rpc_port
    );

    let registry = Arc::new(EnrollmentRegistry::new());
    let rpc_server = RegistrarRpcServer::new(daemon_config.rpc_config(), registry)
        .with_started_at(chrono::Utc::now());

    rpc_server
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Shutdown signal received"),
                Err(e) => {
                    tracing::error!("Failed to listen for shutdown signal: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    tracing::info!("Registrar daemon shut down gracefully");
    Ok(())
}

/// Expand a leading `~/` to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/etc/registrar.toml"), "/etc/registrar.toml");
        assert_eq!(expand_tilde("relative/config.toml"), "relative/config.toml");
    }

    #[test]
    fn test_expand_tilde_uses_home() {
        if let Some(home) = dirs::home_dir() {
            let expanded = expand_tilde("~/.registrar/config.toml");
            assert_eq!(expanded, format!("{}/.registrar/config.toml", home.display()));
        }
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::try_parse_from(["registrar-daemon", "--port", "6001", "--host", "127.0.0.1"])
            .unwrap();
        assert_eq!(args.port, Some(6001));
        assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(args.config, "~/.registrar/config.toml");
    }
}
