use crate::cli::{
    actions::{createsuperuser, server, Action},
    commands::{superuser, ARG_DSN, ARG_MAX_CONNECTIONS, ARG_PORT},
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use url::Url;

/// Accept only Postgres URLs.
fn parse_dsn(matches: &clap::ArgMatches) -> Result<SecretString> {
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;

    let url = Url::parse(&dsn).context("invalid ACCOUNTS_DSN")?;

    if !matches!(url.scheme(), "postgres" | "postgresql") {
        return Err(anyhow!(
            "invalid ACCOUNTS_DSN: unsupported scheme '{}', expected postgres://",
            url.scheme()
        ));
    }

    Ok(SecretString::from(dsn))
}

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((superuser::CMD_CREATE_SUPERUSER, sub_m)) => {
            let email = sub_m
                .get_one::<String>(superuser::ARG_EMAIL)
                .cloned()
                .context("missing required argument: --email")?;
            let password = sub_m
                .get_one::<String>(superuser::ARG_PASSWORD)
                .cloned()
                .map(SecretString::from)
                .context("missing required argument: --password")?;

            Ok(Action::CreateSuperuser(createsuperuser::Args {
                dsn: parse_dsn(sub_m)?,
                max_connections: sub_m
                    .get_one::<u32>(ARG_MAX_CONNECTIONS)
                    .copied()
                    .unwrap_or(5),
                email,
                password,
            }))
        }
        _ => Ok(Action::Server(server::Args {
            port: matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080),
            dsn: parse_dsn(matches)?,
            max_connections: matches
                .get_one::<u32>(ARG_MAX_CONNECTIONS)
                .copied()
                .unwrap_or(5),
        })),
    }
}
