//! CLI Module
//!
//! Command-line interface for the prompt wizard using Clap v4.

mod commands;
mod ui;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::logging::{self, LogTarget};
use crate::session::{Navigation, Session};

/// Prompt Wizard - compose AI content prompts for your Webflow collections
#[derive(Parser, Debug)]
#[command(name = "prompt-wizard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file path (replaces the default config files)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive wizard (default)
    Wizard,

    /// Submit a prompt without the TUI
    Submit(SubmitArgs),

    /// List websites
    Sites,

    /// List a website's collections
    Collections {
        /// Website id
        site_id: String,

        /// Only show collections whose name contains this (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// List model deployments that can be used
    Models,

    /// Show the preset prompt templates
    Presets,

    /// Store the auth token handed out by the sign-in flow
    Login {
        #[arg(short, long)]
        token: String,
    },

    /// Forget the stored auth token
    Logout,

    /// Write a default configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration
    Config {
        /// Show the API token instead of a masked preview
        #[arg(short, long)]
        show_secrets: bool,
    },
}

/// Fields for a headless submission
#[derive(Args, Debug, Clone, Default)]
pub struct SubmitArgs {
    /// Website id
    #[arg(long)]
    pub website: String,

    /// Website display name (defaults to the id)
    #[arg(long)]
    pub website_name: Option<String>,

    /// Collection id
    #[arg(long)]
    pub collection: String,

    /// Collection display name (defaults to the id)
    #[arg(long)]
    pub collection_name: Option<String>,

    /// Prompt text
    #[arg(short, long, default_value = "")]
    pub prompt: String,

    /// Use the collection's preset template when no prompt is given
    #[arg(long)]
    pub use_preset: bool,

    /// AI model (deployment id)
    #[arg(short, long, default_value = "")]
    pub model: String,

    /// Comma separated keywords
    #[arg(short, long, default_value = "")]
    pub keywords: String,

    /// Other details for the writer
    #[arg(long, default_value = "")]
    pub details: String,

    /// Blog category (required for the blog collection)
    #[arg(long)]
    pub category: Option<String>,
}

/// Main CLI entry point
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = commands::load_config(cli.config.as_deref())?;

    let target = match cli.command {
        None | Some(Commands::Wizard) => LogTarget::File,
        Some(_) => LogTarget::Stderr,
    };
    let _log_guard = logging::init(&config.logging, cli.debug, target)?;
    if cli.debug {
        tracing::info!("Debug mode enabled");
    }

    config.validate()?;

    let session_path = Session::default_path();
    let session = Session::load(&session_path)?;

    let navigation = match cli.command {
        None | Some(Commands::Wizard) => ui::cmd_wizard(&config, session).await?,
        Some(Commands::Submit(args)) => commands::cmd_submit(&config, &session, args).await?,
        Some(Commands::Sites) => {
            commands::cmd_sites(&config, &session).await?;
            None
        }
        Some(Commands::Collections { site_id, filter }) => {
            commands::cmd_collections(&config, &session, &site_id, filter.as_deref()).await?;
            None
        }
        Some(Commands::Models) => {
            commands::cmd_models(&config, &session).await?;
            None
        }
        Some(Commands::Presets) => {
            commands::cmd_presets();
            None
        }
        Some(Commands::Login { token }) => {
            commands::cmd_login(session, token)?;
            None
        }
        Some(Commands::Logout) => {
            commands::cmd_logout(session)?;
            None
        }
        Some(Commands::Init { force }) => {
            commands::cmd_init(&Config::system_config_path(), force)?;
            None
        }
        Some(Commands::Config { show_secrets }) => {
            commands::cmd_config(&config, show_secrets)?;
            None
        }
    };

    if let Some(Navigation::Redirect(url)) = navigation {
        println!("Sign in to continue: {}", url);
        println!("Then run `prompt-wizard login --token <token>`.");
    }
    Ok(())
}
