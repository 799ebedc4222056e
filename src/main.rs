//! actctl - admin console for activation codes and the account QR code

use clap::Parser;
use log::LevelFilter;

mod auth;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod session;
mod storage;

use cli::args::GlobalOptions;
use cli::{ActivationCommands, Cli, Commands, QrCommands, UserCommands};
use client::models::StatusAction;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::new();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder
            .filter_level(LevelFilter::Warn)
            .parse_env(env_logger::Env::default());
    }
    builder.format_timestamp(None).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Login { email, password } => cli::login::login(&opts, email, password).await,
        Commands::Logout => cli::login::logout(&opts),
        Commands::Whoami => cli::login::whoami(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("actctl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Activation(cmd) => match cmd {
            ActivationCommands::List { status, limit } => {
                cli::activation::list(&opts, status, limit).await
            }
            ActivationCommands::Generate { duration, qr_out } => {
                cli::activation::generate(&opts, duration, qr_out.as_deref()).await
            }
            ActivationCommands::Suspend { id } => {
                cli::activation::change_status(&opts, &id, StatusAction::Suspend).await
            }
            ActivationCommands::Reactivate { id } => {
                cli::activation::change_status(&opts, &id, StatusAction::Reactivate).await
            }
            ActivationCommands::Extend {
                id,
                duration,
                yes,
                dry_run,
            } => cli::activation::extend(&opts, &id, duration, yes, dry_run).await,
        },
        Commands::User(UserCommands::List { limit }) => cli::user::list(&opts, limit).await,
        Commands::Qr(cmd) => match cmd {
            QrCommands::Show => cli::qr::show(&opts).await,
            QrCommands::Upload { file } => cli::qr::upload(&opts, &file).await,
            QrCommands::Download { output } => cli::qr::download(&opts, output.as_deref()).await,
            QrCommands::Delete { yes } => cli::qr::delete(&opts, yes).await,
        },
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
