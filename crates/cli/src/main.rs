//! ComplaintHub CLI - register, track and resolve complaints.
//!
//! # Usage
//!
//! ```bash
//! # Register a complaint
//! ch-cli register -n "Alice" -e a@x.com -c "Billing Problem" -d "Overcharged"
//!
//! # List every complaint
//! ch-cli list
//!
//! # Mark a complaint resolved (admin)
//! COMPLAINTS_ADMIN_PASSWORD=... ch-cli set-status COMP-AB12CD34 resolved
//!
//! # Show the accepted categories
//! ch-cli categories
//! ```
//!
//! # Environment Variables
//!
//! - `COMPLAINTS_API_URL` - Complaints collection URL
//! - `COMPLAINTS_ADMIN_SECRET` - Shared admin secret (for `set-status`)
//! - `COMPLAINTS_ADMIN_PASSWORD` - Admin password for `set-status`, instead
//!   of `--password`
//! - `COMPLAINTS_HTTP_TIMEOUT_SECS` - Request timeout
//! - `RUST_LOG` - Log filter (default: `info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use complaint_hub_core::ComplaintDraft;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "ch-cli")]
#[command(author, version, about = "ComplaintHub CLI tools")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Output format for complaint listings
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new complaint
    Register {
        /// Your full name
        #[arg(short, long)]
        name: String,

        /// Contact email address
        #[arg(short, long)]
        email: String,

        /// Contact phone number
        #[arg(short, long)]
        phone: Option<String>,

        /// Complaint category (see `categories`)
        #[arg(short, long)]
        category: String,

        /// What went wrong
        #[arg(short, long)]
        description: String,
    },
    /// List all complaints
    List,
    /// Set a complaint's status (admin only)
    SetStatus {
        /// Complaint ID (e.g. COMP-ABC12345)
        complaint_id: String,

        /// New status (`pending` or `resolved`)
        status: String,

        /// Admin password
        #[arg(long, env = "COMPLAINTS_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List the accepted complaint categories
    Categories,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Register {
            name,
            email,
            phone,
            category,
            description,
        } => {
            let draft = ComplaintDraft {
                name,
                email,
                phone,
                category,
                description,
            };
            commands::complaints::register(&draft, cli.format).await?;
        }
        Commands::List => commands::complaints::list(cli.format).await?,
        Commands::SetStatus {
            complaint_id,
            status,
            password,
        } => {
            commands::complaints::set_status(&complaint_id, &status, password, cli.format).await?;
        }
        Commands::Categories => commands::complaints::categories(),
    }
    Ok(())
}
