use crate::accounts;
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: SecretString,
    pub max_connections: u32,
}

/// Run the HTTP server.
/// # Errors
/// Returns an error if the database is unreachable or the listener fails.
pub async fn execute(args: Args) -> Result<()> {
    debug!(port = args.port, max_connections = args.max_connections, "Starting server");

    accounts::new(args.port, args.dsn.expose_secret(), args.max_connections).await
}
