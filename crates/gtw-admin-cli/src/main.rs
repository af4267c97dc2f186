//! GTW admin console
//!
//! A command-line client for the GTW backend. Every subcommand is one view
//! of the console; all views except sign-in and password reset need a
//! stored admin session.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

mod app;
mod commands;
mod render;

use app::App;
use clap::{Args, Parser, Subcommand};
use gtw_admin_core::{AdminConfig, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Command line interface for the GTW admin console
#[derive(Parser)]
#[command(
    name = "gtw-admin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Administrative console for the GTW backend",
    long_about = "Sign in as a GTW admin and browse form submissions, newsletter subscriptions and framework PDF requests, or edit case studies and success stories."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long, global = true)]
    json: bool,

    /// Backend base URL (overrides configuration)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Sign in as an admin
    Login {
        /// Admin username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long, env = "GTW_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in admin
    Whoami,

    /// Reset a forgotten password
    Password {
        /// Reset step
        #[command(subcommand)]
        action: PasswordCommands,
    },

    /// Submission totals and recent activity
    Dashboard,

    /// Get-started form submissions
    Forms {
        /// Action
        #[command(subcommand)]
        action: SubmissionCommands,
    },

    /// Join-team applications
    Applications {
        /// Action
        #[command(subcommand)]
        action: SubmissionCommands,
    },

    /// Agency partnership requests
    Partnerships {
        /// Action
        #[command(subcommand)]
        action: SubmissionCommands,
    },

    /// Newsletter subscriptions
    Subscriptions {
        /// Action
        #[command(subcommand)]
        action: SubscriptionCommands,
    },

    /// Framework PDF download requests
    FrameworkPdf {
        /// Action
        #[command(subcommand)]
        action: FrameworkPdfCommands,
    },

    /// Case studies
    CaseStudies {
        /// Action
        #[command(subcommand)]
        action: CaseStudyCommands,
    },

    /// Success stories
    SuccessStories {
        /// Action
        #[command(subcommand)]
        action: SuccessStoryCommands,
    },

    /// Show the resolved configuration
    Config,
}

/// Password reset steps
#[derive(Subcommand)]
enum PasswordCommands {
    /// Mail a one-time code
    Forgot {
        /// Account email
        #[arg(short, long)]
        email: String,
    },

    /// Check a one-time code
    Verify {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Code from the email
        #[arg(long)]
        otp: String,
    },

    /// Set the new password
    Reset {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Code from the email
        #[arg(long)]
        otp: String,

        /// New password
        #[arg(long, env = "GTW_ADMIN_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,

        /// New password again
        #[arg(long)]
        confirm_password: String,
    },
}

/// Actions on a submission collection
#[derive(Subcommand)]
enum SubmissionCommands {
    /// List submissions
    List {
        /// all, completed or incomplete
        #[arg(short, long, default_value = "all")]
        filter: String,
    },

    /// Show one submission
    Show {
        /// Submission id
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// Page selection shared by subscription listing and export
#[derive(Args)]
struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    limit: Option<u32>,

    /// all, active or inactive
    #[arg(short, long, default_value = "all")]
    status: String,
}

/// Subscription actions
#[derive(Subcommand)]
enum SubscriptionCommands {
    /// List one page of subscriptions
    List {
        /// Page selection
        #[command(flatten)]
        page: PageArgs,
    },

    /// Mark a subscription inactive
    Unsubscribe {
        /// Subscriber email
        #[arg(value_name = "EMAIL")]
        email: String,
    },

    /// Delete a subscription
    Delete {
        /// Subscriber email
        #[arg(value_name = "EMAIL")]
        email: String,
    },

    /// Export one page as CSV
    Export {
        /// Page selection
        #[command(flatten)]
        page: PageArgs,

        /// Output file (defaults to subscriptions-YYYY-MM-DD.csv)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Framework PDF actions
#[derive(Subcommand)]
enum FrameworkPdfCommands {
    /// List requests
    List,

    /// Delete a request
    Delete {
        /// Request id
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// Case study actions
#[derive(Subcommand)]
enum CaseStudyCommands {
    /// List case studies
    List,

    /// Show one case study with its sections
    Show {
        /// Case study id
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Print an editable draft, empty or prefilled from an existing case study
    Template {
        /// Prefill from this case study
        #[arg(long, value_name = "ID")]
        from: Option<String>,

        /// Section types to include (text, image, list, list2, testimonial)
        #[arg(long = "section", value_name = "TYPE")]
        sections: Vec<String>,
    },

    /// Create a case study from a JSON draft
    Create {
        /// Draft file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
    },

    /// Replace a case study with a JSON draft
    Update {
        /// Case study id
        #[arg(value_name = "ID")]
        id: String,

        /// Draft file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
    },

    /// Delete a case study
    Delete {
        /// Case study id
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// Success story fields
#[derive(Args)]
struct StoryArgs {
    /// Founder name
    #[arg(long)]
    founder_name: String,

    /// Founder position
    #[arg(long, default_value = "")]
    founder_post: String,

    /// Story text
    #[arg(long, default_value = "")]
    description: String,

    /// Founder photo to upload
    #[arg(long, value_name = "FILE")]
    photo: Option<PathBuf>,

    /// Company logo to upload
    #[arg(long, value_name = "FILE")]
    logo: Option<PathBuf>,
}

/// Success story actions
#[derive(Subcommand)]
enum SuccessStoryCommands {
    /// List success stories
    List,

    /// Add a success story
    Create {
        /// Story fields
        #[command(flatten)]
        story: StoryArgs,
    },

    /// Edit a success story; images not given are kept
    Update {
        /// Story id
        #[arg(value_name = "ID")]
        id: String,

        /// Story fields
        #[command(flatten)]
        story: StoryArgs,
    },

    /// Delete a success story
    Delete {
        /// Story id
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// Main entry point for the console
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Warning: {e}");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "GTW admin console starting"
    );

    let app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match commands::run(&app, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            app.report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Load configuration and apply command line overrides
fn load_config(cli: &Cli) -> gtw_admin_core::Result<AdminConfig> {
    let mut config = AdminConfig::load(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    if cli.json {
        config.logging.format = "json".to_string();
    }
    if let Some(url) = &cli.api_url {
        config.api.base_url.clone_from(url);
        config.validate()?;
    }
    Ok(config)
}
