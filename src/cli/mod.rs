//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::models::{ActivationStatus, ExpiryOffset};

pub mod activation;
pub mod args;
pub mod completions;
pub mod context;
pub mod init;
pub mod login;
pub mod qr;
pub mod status;
pub mod user;

pub use args::OutputFormat;
pub use context::CommandContext;

/// actctl - admin console for activation codes and the account QR code
#[derive(Parser, Debug)]
#[command(name = "actctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "ACTCTL_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "ACTCTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true, env = "ACTCTL_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ACTCTL_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize actctl configuration
    Init,

    /// Sign in with email and password
    Login {
        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Account password (prompted when omitted)
        #[arg(long, env = "ACTCTL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and remove the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show configuration and session status
    Status,

    /// Display version information
    Version,

    /// Manage activation codes
    #[command(subcommand)]
    Activation(ActivationCommands),

    /// List accounts that own activation codes
    #[command(subcommand)]
    User(UserCommands),

    /// Manage the account QR code
    #[command(subcommand)]
    Qr(QrCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   actctl completion bash > /etc/bash_completion.d/actctl
  zsh:    actctl completion zsh > \"${fpath[1]}/_actctl\"
  fish:   actctl completion fish > ~/.config/fish/completions/actctl.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Activation code subcommands
#[derive(Subcommand, Debug)]
pub enum ActivationCommands {
    /// List activation codes
    #[command(alias = "ls")]
    List {
        /// Only show codes in this status (lapsed codes count as expired)
        #[arg(long, short = 's', value_enum, ignore_case = true)]
        status: Option<ActivationStatus>,

        /// Maximum results to return
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// Generate a new activation code
    Generate {
        /// Subscription length: 1m, 3m, 9m, 1y or e.g. "3 months"
        #[arg(long, short = 'd')]
        duration: Option<ExpiryOffset>,

        /// Write the code's QR image to this file
        #[arg(long)]
        qr_out: Option<PathBuf>,
    },

    /// Suspend an active code
    Suspend {
        /// Activation ID or code
        id: String,
    },

    /// Make a suspended, closed or deactivated code active again
    #[command(alias = "resume")]
    Reactivate {
        /// Activation ID or code
        id: String,
    },

    /// Push a code's expiry date out
    Extend {
        /// Activation ID or code
        id: String,

        /// How far to extend: 1m, 3m, 9m, 1y (prompted when omitted)
        #[arg(long, short = 'd')]
        duration: Option<ExpiryOffset>,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Show what would change without extending
        #[arg(long)]
        dry_run: bool,
    },
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List accounts derived from activation code owners
    #[command(alias = "ls")]
    List {
        /// Maximum results to return
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
}

/// QR code subcommands
#[derive(Subcommand, Debug)]
pub enum QrCommands {
    /// Show whether a QR code is stored and where it lives
    Show,

    /// Upload a PNG or JPEG image (max 5 MiB), replacing the stored one
    Upload {
        /// Image file
        file: PathBuf,
    },

    /// Save the stored QR image to a file
    Download {
        /// Output file (defaults to qr.<ext> in the current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Delete the stored QR code
    Delete {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
