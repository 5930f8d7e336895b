mod commands;
mod render;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rolodir_core::config::RolodirConfig;
use rolodir_core::{CalendarView, ContactStore, EventDuration, MemoryStore};

#[derive(Parser)]
#[command(name = "rolodir")]
#[command(about = "Manage your contacts and the events you schedule with them")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as a user id (identity comes from your auth provider)
    Login {
        user_id: String,
    },
    /// Sign out
    Logout,
    /// Add a contact
    Add {
        first_name: String,
        last_name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        phone: String,

        /// Avatar URL
        #[arg(long)]
        avatar: Option<String>,
    },
    /// List contacts
    List {
        /// Filter by name, email, or phone substring
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Update fields of a contact
    Update {
        /// Contact id, or a search query matching exactly one contact
        contact: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        avatar: Option<String>,
    },
    /// Toggle a contact's favorite star
    Favorite {
        /// Contact id, or a search query matching exactly one contact
        contact: String,
    },
    /// Remove a contact and every event scheduled with them
    Remove {
        /// Contact id, or a search query matching exactly one contact
        contact: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Schedule an event with a contact
    Schedule {
        /// Contact id, or a search query matching exactly one contact
        contact: String,

        /// When the event starts (e.g., "tomorrow 3pm", "2026-08-20 14:30")
        #[arg(long)]
        at: String,

        /// One of: 15min, 30min, 1hr, 2hr, allday
        #[arg(short, long, default_value = "30min")]
        duration: EventDuration,

        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Cancel (delete) a single event
    Cancel {
        event_id: String,
    },
    /// Show the calendar grid
    Agenda {
        /// First day of the window (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// One of: day, 3day, week, month
        #[arg(short, long, default_value = "day")]
        view: CalendarView,
    },
    /// Show resolved paths and the signed-in user
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { user_id } => commands::login::run(&user_id),
        Commands::Logout => commands::login::run_logout(),
        Commands::Add {
            first_name,
            last_name,
            email,
            phone,
            avatar,
        } => {
            let store = open_store()?;
            commands::add::run(&store, first_name, last_name, email, phone, avatar).await
        }
        Commands::List { query } => {
            let store = open_store()?;
            commands::list::run(&store, query.as_deref().unwrap_or("")).await
        }
        Commands::Update {
            contact,
            first_name,
            last_name,
            email,
            phone,
            avatar,
        } => {
            let store = open_store()?;
            commands::update::run(&store, &contact, first_name, last_name, email, phone, avatar)
                .await
        }
        Commands::Favorite { contact } => {
            let store = open_store()?;
            commands::favorite::run(&store, &contact).await
        }
        Commands::Remove { contact, force } => {
            let store = open_store()?;
            commands::remove::run(&store, &contact, force).await
        }
        Commands::Schedule {
            contact,
            at,
            duration,
            note,
        } => {
            let store = open_store()?;
            commands::schedule::run(&store, &contact, &at, duration, note).await
        }
        Commands::Cancel { event_id } => {
            let store = open_store()?;
            commands::cancel::run(&store, &event_id).await
        }
        Commands::Agenda { date, view } => {
            let store = open_store()?;
            commands::agenda::run(&store, date.as_deref(), view).await
        }
        Commands::Config => commands::config::run(),
    }
}

/// Open the store as the configured user. Commands that mutate fail with an
/// authentication error until `rolodir login` has been run.
fn open_store() -> Result<ContactStore<MemoryStore>> {
    let config = RolodirConfig::load()?;

    if config.user.is_none() {
        anyhow::bail!(
            "Not signed in.\n\n\
            Sign in first with:\n  \
            rolodir login <user-id>"
        );
    }

    let backend = MemoryStore::open(config.records_path())?;
    Ok(ContactStore::new(Arc::new(backend), config.user))
}
