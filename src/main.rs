use anyhow::{Context, Result};
use clap::Parser;
use lxcdash::{ApiClient, AppState, DashConfig, GuestService};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// lxcdash: dashboard API for the LXC containers and VMs of a Proxmox VE cluster
#[derive(Parser, Debug)]
#[command(name = "lxcdash", version, about)]
struct Cli {
    /// Configuration file (default: ./config.json, then /opt/lxcdash/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overrides `bind` from the configuration
    #[arg(short, long)]
    bind: Option<String>,

    /// Listen port, overrides `listen_port` from the configuration
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Directory with the web front end, overrides `web_dir`
    #[arg(long)]
    web_dir: Option<PathBuf>,

    /// Log every upstream call
    #[arg(long, env = "DEBUG")]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "lxcdash=debug" } else { "lxcdash=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .compact()
        .init();

    let (mut config, config_path) = DashConfig::load(cli.config.as_deref())
        .await
        .context("loading configuration")?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(port) = cli.port {
        config.listen_port = port;
    }
    if let Some(web_dir) = cli.web_dir {
        config.web_dir = Some(web_dir);
    }
    config.validate().context("validating configuration")?;

    let web_dir = config.web_dir.clone().or_else(|| {
        let default = Path::new("web");
        default.is_dir().then(|| default.to_path_buf())
    });

    let client = ApiClient::new(config.connection()?, config.timeout())?;
    info!(
        config = %config_path.display(),
        upstream = %client.connection().proxmox_url(),
        verify_tls = config.verify_tls,
        mode = ?config.mode,
        node = config.default_node().unwrap_or("<auto>"),
        "lxcdash configured"
    );
    if !config.verify_tls {
        warn!("TLS certificate verification of the Proxmox API is disabled");
    }

    let guests = GuestService::new(Arc::new(client), &config);
    let app = lxcdash::router(AppState::new(guests), web_dir.clone());

    let bind_addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;
    info!(
        %bind_addr,
        web_dir = %web_dir.as_deref().map(|d| d.display().to_string()).unwrap_or_default(),
        "lxcdash API listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
