use std::net::SocketAddr;
use std::sync::Arc;

use astra::Server;
use clap::Parser;

use crate::db::connection::{init_db, Database};
use crate::db::leads::SqliteLeadStore;
use crate::events::bus::LeadBus;
use crate::responses::error_to_response;
use crate::router::handle;

mod db;
mod domain;
mod errors;
mod events;
mod leads;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "lead_desk", version, about = "Brokerage site and lead back office")]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Path to the SQLite database file
    #[arg(long, default_value = "lead_desk.sqlite3")]
    db: String,

    /// Schema file applied at boot
    #[arg(long, default_value = "sql/schema.sql")]
    schema: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let db = Database::new(cli.db.clone());
    if let Err(e) = init_db(&db, &cli.schema) {
        tracing::error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    let store = SqliteLeadStore::new(db);

    let bus = Arc::new(LeadBus::new());
    bus.subscribe(|signal| {
        tracing::info!(lead = signal.lead_id(), ?signal, "lead signal");
    });

    tracing::info!("starting server at http://{}", cli.addr);

    let server = Server::bind(cli.addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &store, &bus) {
        Ok(resp) => resp,
        Err(err) => {
            tracing::warn!("request failed: {err}");
            error_to_response(err)
        }
    });

    if let Err(e) = result {
        tracing::error!("server ended with error: {e}");
    }
}
