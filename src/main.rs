use anyhow::Context;
use clap::Parser;
use plod_api::{HttpServer, PlodGraph, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plod-api", version, about = "P-LOD linked open data API")]
struct Args {
    /// YAML configuration file
    #[arg(long, short, env = "PLOD_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long, env = "PLOD_ADDRESS")]
    address: Option<String>,

    /// Listen port
    #[arg(long, short, env = "PLOD_PORT")]
    port: Option<u16>,

    /// RDF data file (repeatable); replaces `data_paths` from the config
    #[arg(long = "data", short)]
    data: Vec<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(address) = self.address {
            config.address = address;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if !self.data.is_empty() {
            config.data_paths = self.data;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config()?;
    info!("P-LOD API v{}", plod_api::version());

    let graph = PlodGraph::load(&config.data_paths).context("loading P-LOD data")?;

    let server = HttpServer::new(Arc::new(graph), config);
    server.start().await.context("HTTP server failed")?;
    Ok(())
}
