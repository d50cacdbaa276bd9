use crate::{accounts, users::UserManager};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub dsn: SecretString,
    pub max_connections: u32,
    pub email: String,
    pub password: SecretString,
}

/// Create a superuser directly in the database.
/// # Errors
/// Returns an error if the database is unreachable or the user can't be created.
pub async fn execute(args: Args) -> Result<()> {
    let store = accounts::connect(args.dsn.expose_secret(), args.max_connections).await?;
    let manager = UserManager::new(Arc::new(store));

    let user = manager
        .create_superuser(&args.email, args.password.expose_secret())
        .await
        .context("Failed to create superuser")?;

    info!(user_id = user.id, email = %user.email, "Superuser created successfully");
    println!("Superuser {} created successfully.", user.email);

    Ok(())
}
