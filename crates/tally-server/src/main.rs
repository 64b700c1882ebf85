// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tally server binary.

use std::path::PathBuf;

use clap::Parser;
use tally_server::{create_app_state, create_router};
use tally_server_config::LogFormat;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Tally server - HTTP API for the Tally financial platform.
#[derive(Parser, Debug)]
#[command(name = "tally-server", about = "Tally financial platform server", version)]
struct Args {
	/// Path to a TOML config file (defaults to the system config file)
	#[arg(long, env = "TALLY_SERVER_CONFIG")]
	config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => tally_server_config::load_config_with_file(path)?,
		None => tally_server_config::load_config()?,
	};

	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| config.logging.level.clone().into());
	match config.logging.format {
		LogFormat::Json => tracing_subscriber::registry()
			.with(filter)
			.with(tracing_subscriber::fmt::layer().json())
			.init(),
		LogFormat::Pretty => tracing_subscriber::registry()
			.with(filter)
			.with(tracing_subscriber::fmt::layer())
			.init(),
	}

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		environment = %config.auth.environment,
		"starting tally-server"
	);

	let addr = config.socket_addr();
	let state = create_app_state(config).await?;

	let cors = CorsLayer::new()
		.allow_origin(Any)
		.allow_methods(Any)
		.allow_headers(Any);
	let app = create_router(state).layer(cors);

	let listener = tokio::net::TcpListener::bind(&addr).await?;
	tracing::info!(%addr, "listening");

	// Run server with graceful shutdown
	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
