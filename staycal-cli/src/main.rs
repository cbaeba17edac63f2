mod commands;
mod remote;
mod render;
mod session;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};

use staycal_core::Decision;

#[derive(Parser)]
#[command(name = "staycal")]
#[command(about = "Propose, review and view visits on the shared property calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account (confirmation link arrives by email)
    Signup {
        email: String,

        /// Display name shown on the calendar
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign in and store a session
    Login { email: String },
    /// Sign out and forget the stored session
    Logout,
    /// Show who is currently signed in
    Whoami,
    /// Render the month calendar with all visits
    Calendar {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Propose a visit for review
    Propose {
        /// Arrival date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Departure date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Arrival time, e.g. flight landing (HH:MM)
        #[arg(long)]
        arrive: Option<String>,

        /// Departure time (HH:MM)
        #[arg(long)]
        depart: Option<String>,

        /// Extra details for the reviewers
        #[arg(long)]
        notes: Option<String>,
    },
    /// List your own proposals and their review status
    Visits,
    /// Withdraw a pending proposal
    Cancel {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List proposals awaiting review (admins)
    Pending,
    /// Confirm a pending proposal (admins)
    Approve { id: String },
    /// Deny a pending proposal (admins)
    Deny { id: String },
    /// Show the visitor color legend
    Visitors,
    /// Show owner presence for all admins
    Owners,
    /// Update your own owner presence (admins)
    OwnerSet {
        /// Mark yourself as in town
        #[arg(long, conflicts_with = "away")]
        in_town: bool,

        /// Mark yourself as away
        #[arg(long)]
        away: bool,

        /// In town only until this date (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
    },
    /// Show or update your profile
    Profile {
        /// New display name
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Signup { email, name } => commands::auth::signup(&email, name.as_deref()).await,
        Commands::Login { email } => commands::auth::login(&email).await,
        Commands::Logout => commands::auth::logout().await,
        Commands::Whoami => commands::auth::whoami().await,
        Commands::Calendar { month } => commands::calendar::run(month.as_deref()).await,
        Commands::Propose {
            start,
            end,
            arrive,
            depart,
            notes,
        } => {
            commands::propose::run(
                &start,
                &end,
                arrive.as_deref(),
                depart.as_deref(),
                notes,
            )
            .await
        }
        Commands::Visits => commands::visits::run().await,
        Commands::Cancel { id, yes } => commands::cancel::run(&id, yes).await,
        Commands::Pending => commands::review::pending().await,
        Commands::Approve { id } => commands::review::decide(&id, Decision::Approve).await,
        Commands::Deny { id } => commands::review::decide(&id, Decision::Deny).await,
        Commands::Visitors => commands::visitors::run().await,
        Commands::Owners => commands::owners::show().await,
        Commands::OwnerSet {
            in_town,
            away,
            until,
        } => commands::owners::set(in_town, away, until.as_deref()).await,
        Commands::Profile { name } => commands::profile::run(name.as_deref()).await,
    }
}
