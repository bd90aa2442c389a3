//!  Nomad Rental Search
//!
//!  Copyright (C) 2026  Nomad Camper Hire
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! # Submission Server Entry Point
//!
//! Serves the token and submit endpoints over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use nomad_rental_search::server::{AppState, ServerConfig, router};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "nomad-search-server")]
#[command(author, version, about = "Submission endpoint for the rental search form")]
struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(long, default_value = "8080")]
    port: u16,

    /// Booking-engine search page the redirect URL points at
    #[arg(
        long,
        default_value = "https://nomadcamperhire.com/search-your-van/index.php"
    )]
    base_url: String,

    /// Menu item identifier forwarded to the booking engine
    #[arg(long, default_value = "613")]
    itemid: String,

    /// Longest bookable stay in nights; zero disables the cap
    #[arg(long, default_value = "120")]
    max_nights: i64,

    /// Anti-forgery token lifetime in seconds
    #[arg(long, default_value = "43200")]
    token_ttl_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".to_string().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse();
    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid host:port")?;

    let config = ServerConfig {
        base_url: args.base_url,
        item_id: args.itemid,
        max_nights: args.max_nights,
        token_ttl: Duration::from_secs(args.token_ttl_secs),
    };
    let state = Arc::new(AppState::new(config));
    let app = router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
