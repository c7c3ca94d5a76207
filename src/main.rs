//! EventHub CLI
//!
//! Command-line front end for the events API:
//! - Browse and filter the catalog
//! - Register for events and cancel registrations
//! - Sign in and out

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventhub::config::{generate_default_config, Config, LoggingConfig};
use eventhub::views::present::{
    format_date_long, format_date_short, local_time, nav_items, seats_label, EventCardModel,
};
use eventhub::views::{
    DashboardView, EventDetailsView, EventsAction, EventsView, LoadState, NavTarget, Notice,
    RegistrationOutcome,
};
use eventhub::{
    EventId, EventService, HttpEventService, RegisteredEvent, Route, Session, SessionContext,
    SessionStore, User,
};

#[derive(Parser)]
#[command(name = "eventhub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Discover events and manage your registrations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Events API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table, global = true)]
    pub format: Format,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List events, optionally filtered
    Events {
        /// Match against name or description (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Exact category
        #[arg(short, long)]
        category: Option<String>,
        /// Location substring (case-insensitive)
        #[arg(short, long)]
        location: Option<String>,
    },

    /// List event categories
    Categories,

    /// Show one event
    Show {
        id: String,
    },

    /// Register for an event
    Register {
        id: String,
    },

    /// Cancel a registration
    Cancel {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show your registrations
    Dashboard,

    /// Store a session for subsequent commands
    Login {
        #[arg(long)]
        name: String,
        #[arg(long)]
        token: String,
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_default(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    init_tracing(&config.logging);

    let store = SessionStore::new(config.session.path());
    let mut session = SessionContext::restored(match store.load() {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Ignoring stored session: {}", e);
            None
        }
    });

    let service = || {
        HttpEventService::new(config.api.http_config())
            .context("Failed to build HTTP client")
    };

    match cli.command {
        Commands::Events {
            search,
            category,
            location,
        } => {
            let service = service()?;
            let mut view = EventsView::new();
            view.load(&service).await;

            if let LoadState::Failed(message) = view.state() {
                bail!("{}", message);
            }

            for action in [
                search.map(EventsAction::SetSearch),
                category.map(EventsAction::SetCategory),
                location.map(EventsAction::SetLocation),
            ]
            .into_iter()
            .flatten()
            {
                view.dispatch(action);
            }

            match cli.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&view.visible())?),
                Format::Table => print_events(&view),
            }
        }

        Commands::Categories => {
            let categories = service()?.list_categories().await?;

            match cli.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&categories)?),
                Format::Table => {
                    for category in categories {
                        println!("{}", category);
                    }
                }
            }
        }

        Commands::Show { id } => {
            let service = service()?;
            let mut view = EventDetailsView::new(EventId::from(id));
            view.load(&service).await;

            match (view.state(), cli.format) {
                (LoadState::Failed(message), _) => bail!("{}", message),
                (LoadState::Ready(event), Format::Json) => {
                    println!("{}", serde_json::to_string_pretty(event)?)
                }
                (LoadState::Ready(_), Format::Table) => print_details(&view, session.current()),
                _ => bail!("Event not found"),
            }
        }

        Commands::Register { id } => {
            let service = service()?;
            let mut view = EventDetailsView::new(EventId::from(id));
            view.load(&service).await;
            if let LoadState::Failed(message) = view.state() {
                bail!("{}", message);
            }

            match view.register(&service, session.current()).await? {
                RegistrationOutcome::RedirectToLogin(route) => bail!(login_hint(&route)),
                RegistrationOutcome::Failed => {
                    bail!("{}", view.error().unwrap_or("Registration failed"))
                }
                RegistrationOutcome::Registered(navigation) => {
                    if let Some(message) = view.message() {
                        println!("{}", message);
                    }
                    if let Some(event) = view.event() {
                        println!("{}", seats_label(event));
                    }

                    tokio::time::sleep(config.display.redirect_delay()).await;
                    tracing::debug!(to = %navigation.to, "Redirecting");

                    if let Some(current) = session.current() {
                        let mut dashboard = DashboardView::new();
                        dashboard.load(&service, current).await;
                        print_dashboard(&dashboard, current, cli.format)?;
                    }
                }
            }
        }

        Commands::Cancel { id, yes } => {
            let current = require_session(&session)?;
            let service = service()?;
            let mut view = DashboardView::new();

            let notice = view
                .cancel(&service, current, &EventId::from(id), |prompt| yes || confirm(prompt))
                .await;

            match notice {
                None => println!("Nothing cancelled."),
                Some(Notice::Success(message)) => {
                    println!("{}", message);
                    print_dashboard(&view, current, cli.format)?;
                }
                Some(Notice::Failure(message)) => {
                    print_dashboard(&view, current, cli.format)?;
                    bail!("{}", message);
                }
            }
        }

        Commands::Dashboard => {
            if let Some(route) = DashboardView::guard(session.current()) {
                bail!(login_hint(&route));
            }
            let current = require_session(&session)?;
            let service = service()?;
            let mut view = DashboardView::new();
            view.load(&service, current).await;

            if let LoadState::Failed(message) = view.state() {
                bail!("{}", message);
            }
            print_dashboard(&view, current, cli.format)?;
        }

        Commands::Login {
            name,
            token,
            user_id,
        } => {
            let user = match user_id {
                Some(id) => User::new(name).with_id(id),
                None => User::new(name),
            };
            session.login(Session::new(user, token));

            if let Some(current) = session.current() {
                store.save(current)?;
                println!("Signed in as {}", current.user.name);
            }
        }

        Commands::Logout => {
            let route = eventhub::views::present::logout(&mut session);
            store.clear()?;
            tracing::debug!(to = %route, "Signed out");
            println!("Signed out.");
        }

        Commands::Whoami => {
            let greeting = nav_items(&session)
                .into_iter()
                .find(|item| item.target == NavTarget::Greeting);

            match greeting {
                Some(item) => println!("{}", item.label),
                None => println!("Not signed in."),
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so command output stays pipeable
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("eventhub={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn require_session(session: &SessionContext) -> Result<&Session> {
    match session.current() {
        Some(current) => Ok(current),
        None => bail!(login_hint(&Route::Login)),
    }
}

fn login_hint(route: &Route) -> String {
    format!(
        "Please log in first ({}): eventhub login --name <NAME> --token <TOKEN>",
        route
    )
}

/// Ask on stdin; anything but y/yes declines
fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if std::io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn print_events(view: &EventsView) {
    let visible = view.visible();

    if visible.is_empty() {
        println!("No events found matching your criteria");
    } else {
        println!(
            "{:<8} {:<30} {:<12} {:<28} {:<20} {}",
            "ID", "Name", "Category", "Date", "Location", "Seats"
        );
        println!("{}", "-".repeat(120));

        for event in visible {
            let card = EventCardModel::new(event);
            println!(
                "{:<8} {:<30} {:<12} {:<28} {:<20} {}",
                event.id,
                truncate(&card.name, 30),
                card.category,
                card.date,
                truncate(&card.location, 20),
                card.seats
            );
        }
    }

    println!();
    println!("{}", view.summary());
}

fn print_details(view: &EventDetailsView, session: Option<&Session>) {
    let Some(event) = view.event() else {
        return;
    };

    println!("{}", event.name);
    if !event.category.is_empty() {
        println!("[{}]", event.category);
    }
    println!();
    println!("Date:       {}", format_date_long(&local_time(&event.date)));
    println!("Location:   {}", event.location);
    println!("Organizer:  {}", event.organizer);
    println!("Capacity:   {}", event.capacity);
    println!("Available:  {}", seats_label(event));

    if let Some(description) = &event.description {
        println!();
        println!("{}", description);
    }

    if let Some(action) = view.action(session) {
        println!();
        if action.is_enabled() {
            println!("-> {} (eventhub register {})", action.label(), event.id);
        } else {
            println!("-> {}", action.label());
        }
    }
}

fn print_dashboard(view: &DashboardView, session: &Session, format: Format) -> Result<()> {
    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&view.registrations())?);
        return Ok(());
    }

    println!("Welcome back, {}!", session.user.name);
    if let Some(error) = view.error() {
        println!("! {}", error);
    }

    let stats = view.stats();
    println!(
        "Total Registrations: {}  Upcoming Events: {}  Past Events: {}",
        stats.total, stats.upcoming, stats.past
    );

    if view.is_empty() {
        println!();
        println!("No Event Registrations Yet");
        println!("Start exploring and register for exciting events: eventhub events");
        return Ok(());
    }

    print_section("Upcoming Events", view.upcoming());
    print_section("Past Events", view.past());
    Ok(())
}

fn print_section(title: &str, registrations: &[RegisteredEvent]) {
    if registrations.is_empty() {
        return;
    }

    println!();
    println!("{}", title);
    println!("{}", "-".repeat(title.len()));
    for registered in registrations {
        let event = &registered.event;
        println!(
            "{:<8} {:<30} {:<28} registered {}",
            event.id,
            truncate(&event.name, 30),
            format_date_short(&local_time(&event.date)),
            format_date_short(&local_time(&registered.registered_at))
        );
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
