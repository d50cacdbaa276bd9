use clap::{Arg, Command};

pub const CMD_CREATE_SUPERUSER: &str = "createsuperuser";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_CREATE_SUPERUSER)
        .about("Create a staff user with superuser status")
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long("email")
                .help("Email address of the superuser")
                .env("ACCOUNTS_SUPERUSER_EMAIL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long("password")
                .help("Password of the superuser")
                .env("ACCOUNTS_SUPERUSER_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.subcommand(subcommand())
}
