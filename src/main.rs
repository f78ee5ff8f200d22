//! EventDesk
//!
//! Terminal front end for the event management dashboard

use std::process::ExitCode;
use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use eventdesk::{
    config::Settings,
    filters::{CategoryField, DateBucket, FilterSpec},
    handlers::{attendance, dashboard, events, feedback, profile, venues, Loadable, Outcome},
    middleware::RouteGate,
    models::{CreateEventRequest, CreateVenueRequest, UpdateProfileRequest},
    services::Route,
    state::{AppContext, CredentialStore, SessionContext},
    utils::{helpers::format_timestamp, logging},
};

/// Exit code used when the gate redirects a navigation
const REDIRECT_EXIT: u8 = 2;

#[derive(Parser)]
#[command(name = "eventdesk")]
#[command(version, about = "EventDesk - event management dashboard client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (extension optional)
    #[arg(short, long, global = true, default_value = "config")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a bearer credential
    Login {
        #[arg(long, env = "EVENTDESK_TOKEN")]
        token: String,
    },

    /// Forget the stored credential
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Navigate to any dashboard path
    Open { path: String },

    /// Overview with upcoming events
    Dashboard,

    /// List events
    Events {
        #[arg(short, long, default_value = "")]
        search: String,

        /// Event type, or "all"
        #[arg(long = "type", default_value = "all")]
        event_type: String,

        /// Location, or "all"
        #[arg(long, default_value = "all")]
        location: String,

        /// any, upcoming, past, today, week or month
        #[arg(long, default_value = "any")]
        when: DateBucket,
    },

    /// Show one event
    Event { id: String },

    /// Register for an event
    Register { id: String },

    /// Delete an event
    DeleteEvent { id: String },

    /// Create an event
    CreateEvent {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,

        #[arg(long)]
        time: String,

        #[arg(long)]
        location: String,

        #[arg(long = "type")]
        event_type: String,

        #[arg(long)]
        capacity: u32,
    },

    /// List venues
    Venues {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show one venue and its events
    Venue { id: String },

    /// Delete a venue
    DeleteVenue { id: String },

    /// Add a venue
    CreateVenue {
        #[arg(long)]
        name: String,

        #[arg(long)]
        address: String,

        #[arg(long)]
        capacity: u32,

        #[arg(long)]
        description: String,

        #[arg(long)]
        contact: String,

        /// Repeat for each facility
        #[arg(long = "facility")]
        facilities: Vec<String>,
    },

    /// Registered events and their attendance state
    Attendance {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Mark attendance with the event code
    MarkAttendance {
        id: String,

        #[arg(long)]
        code: String,
    },

    /// Attended events and their feedback state
    Feedback {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Give feedback for an attended event
    GiveFeedback {
        id: String,

        /// 1 to 5
        #[arg(long)]
        rating: u8,

        #[arg(long)]
        comment: String,
    },

    /// Show the profile
    Profile,

    /// Update profile fields; omitted fields keep their value
    UpdateProfile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        bio: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Change the password
    ChangePassword {
        #[arg(long)]
        current: String,

        #[arg(long)]
        new: String,

        #[arg(long)]
        confirm: String,
    },
}

impl Commands {
    /// Dashboard route a navigating command lands on
    fn route(&self) -> Option<Route> {
        let route = match self {
            Commands::Login { .. } | Commands::Logout | Commands::Whoami => return None,
            Commands::Open { path } => return Route::parse(path),
            Commands::Dashboard => Route::Dashboard,
            Commands::Events { .. } => Route::Events,
            Commands::Event { id } | Commands::Register { id } | Commands::DeleteEvent { id } => {
                Route::EventDetail(id.clone())
            }
            Commands::CreateEvent { .. } => Route::EventCreate,
            Commands::Venues { .. } => Route::Venues,
            Commands::Venue { id } | Commands::DeleteVenue { id } => Route::VenueDetail(id.clone()),
            Commands::CreateVenue { .. } => Route::VenueCreate,
            Commands::Attendance { .. } => Route::Attendance,
            Commands::MarkAttendance { id, .. } => Route::AttendanceMark(id.clone()),
            Commands::Feedback { .. } => Route::Feedback,
            Commands::GiveFeedback { id, .. } => Route::FeedbackDetail(id.clone()),
            Commands::Profile | Commands::UpdateProfile { .. } | Commands::ChangePassword { .. } => Route::Profile,
        };
        Some(route)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = Settings::from_file(&cli.config).context("failed to load configuration")?;
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    }
    settings.validate()?;

    let _log_guard = logging::init_logging(&settings.logging)?;
    debug!(version = eventdesk::VERSION, "Starting {}", eventdesk::info());

    let store = CredentialStore::new(&settings.session.credential_path);

    match &cli.command {
        Commands::Login { token } => {
            let session = SessionContext::login(&store, token).await.context("credential rejected")?;
            let identity = session.identity();
            println!("Signed in as {} ({})", identity.name, identity.role);
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Logout => {
            match SessionContext::init(&store).await? {
                Some(session) => session.logout(&store).await?,
                None => store.clear().await?,
            }
            println!("Signed out");
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Whoami => {
            match SessionContext::init(&store).await? {
                Some(session) => {
                    let identity = session.identity();
                    println!("{} ({}) id {}", identity.name, identity.role, identity.id);
                    if let Some(expires_at) = session.expires_at() {
                        println!("credential expires {}", format_timestamp(expires_at));
                    }
                }
                None => println!("Not signed in"),
            }
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let Some(route) = cli.command.route() else {
        if let Commands::Open { path } = &cli.command {
            println!("{} is not a dashboard page", path);
        }
        return Ok(ExitCode::SUCCESS);
    };

    let credential = store.load().await?;
    let decision = RouteGate::new().evaluate_route(&route, credential.as_deref());
    if let Some(target) = decision.redirect() {
        eprintln!("Redirecting to {}", target);
        return Ok(ExitCode::from(REDIRECT_EXIT));
    }

    let Some(session) = decision.into_session() else {
        println!("{}", route.path());
        return Ok(ExitCode::SUCCESS);
    };

    let ctx = AppContext::new(settings, session)?;
    info!(path = %route.path(), user_id = ctx.user_id(), "Navigated");
    Ok(execute(&ctx, cli.command, route).await)
}

async fn execute(ctx: &AppContext, command: Commands, route: Route) -> ExitCode {
    let now = Utc::now();
    let local_now = Local::now();

    match command {
        Commands::Events { search, event_type, location, when } => {
            let filter = FilterSpec::new()
                .with_query(search)
                .with_category(CategoryField::Type, event_type)
                .with_category(CategoryField::Location, location)
                .with_bucket(when);
            show(events::list_events(ctx, filter).await, |view| view.render(&local_now))
        }
        Commands::Register { id } => {
            let mut view = match events::event_detail(ctx, &id).await {
                Loadable::Ready(view) => view,
                Loadable::Failed(message) => return fail(&message),
            };
            report(events::register(ctx, &mut view, now).await)
        }
        Commands::DeleteEvent { id } => report(events::delete_event(ctx, &id).await),
        Commands::CreateEvent { title, description, date, time, location, event_type, capacity } => {
            let request = CreateEventRequest { title, description, date, time, location, event_type, capacity };
            report(events::create_event(ctx, &request).await)
        }
        Commands::Venues { search } => {
            let filter = FilterSpec::new().with_query(search);
            show(venues::list_venues(ctx, filter).await, |view| view.render(&local_now))
        }
        Commands::DeleteVenue { id } => report(venues::delete_venue(ctx, &id).await),
        Commands::CreateVenue { name, address, capacity, description, contact, facilities } => {
            let mut request = CreateVenueRequest {
                name,
                address,
                capacity,
                description,
                contact_info: contact,
                facilities: Vec::new(),
            };
            for facility in &facilities {
                request.add_facility(facility);
            }
            report(venues::create_venue(ctx, &request).await)
        }
        Commands::Attendance { search } => {
            show(attendance::list_attendance(ctx, &search).await, |view| view.render(&local_now))
        }
        Commands::MarkAttendance { id, code } => {
            let mut view = match events::event_detail(ctx, &id).await {
                Loadable::Ready(view) => view,
                Loadable::Failed(message) => return fail(&message),
            };
            report(attendance::mark_attendance(ctx, &mut view.event, &code, now).await)
        }
        Commands::Feedback { search } => {
            show(feedback::list_feedback(ctx, &search).await, |view| view.render(&local_now))
        }
        Commands::GiveFeedback { id, rating, comment } => {
            let mut view = match feedback::feedback_detail(ctx, &id).await {
                Loadable::Ready(view) => view,
                Loadable::Failed(message) => return fail(&message),
            };
            report(feedback::submit_feedback(ctx, &mut view, rating, &comment, now).await)
        }
        Commands::UpdateProfile { name, bio, phone } => {
            let current = match profile::load_profile(ctx).await {
                Loadable::Ready(current) => current,
                Loadable::Failed(message) => return fail(&message),
            };
            let mut request = UpdateProfileRequest::from_profile(&current);
            if let Some(name) = name {
                request.name = name;
            }
            if let Some(bio) = bio {
                request.bio = bio;
            }
            if let Some(phone) = phone {
                request.phone = phone;
            }
            report(profile::update_profile(ctx, &request).await)
        }
        Commands::ChangePassword { current, new, confirm } => {
            report(profile::change_password(ctx, &current, &new, &confirm).await)
        }
        _ => open(ctx, &route, now, &local_now).await,
    }
}

/// Render the view behind a route
async fn open(ctx: &AppContext, route: &Route, now: DateTime<Utc>, local_now: &DateTime<Local>) -> ExitCode {
    match route {
        Route::Dashboard => show(dashboard::dashboard(ctx, now).await, |view| view.render()),
        Route::Events => show(events::list_events(ctx, FilterSpec::new()).await, |view| view.render(local_now)),
        Route::EventDetail(id) => show(events::event_detail(ctx, id).await, |view| view.render(now)),
        Route::Venues => show(venues::list_venues(ctx, FilterSpec::new()).await, |view| view.render(local_now)),
        Route::VenueDetail(id) => show(venues::venue_detail(ctx, id).await, |view| view.render()),
        Route::Attendance => show(attendance::list_attendance(ctx, "").await, |view| view.render(local_now)),
        Route::AttendanceMark(id) => show(events::event_detail(ctx, id).await, |view| {
            let state = eventdesk::actions::AttendanceState::of(&view.event, now);
            format!("{}\n[{}]", view.event.title, state.label())
        }),
        Route::Feedback => show(feedback::list_feedback(ctx, "").await, |view| view.render(local_now)),
        Route::FeedbackDetail(id) => show(feedback::feedback_detail(ctx, id).await, |view| view.render(now)),
        Route::Profile => show(profile::load_profile(ctx).await, profile::render_profile),
        other => {
            println!("{}", other.path());
            ExitCode::SUCCESS
        }
    }
}

fn show<T>(view: Loadable<T>, render: impl FnOnce(&T) -> String) -> ExitCode {
    match view {
        Loadable::Ready(data) => {
            print!("{}", render(&data));
            ExitCode::SUCCESS
        }
        Loadable::Failed(message) => fail(&message),
    }
}

fn fail(message: &str) -> ExitCode {
    eprintln!("{}", message);
    ExitCode::FAILURE
}

fn report(outcome: Outcome) -> ExitCode {
    match &outcome {
        Outcome::Done { redirect, .. } => {
            println!("{}", outcome);
            if let Some(target) = redirect {
                println!("-> {}", target);
            }
            ExitCode::SUCCESS
        }
        Outcome::Redirect(_) => {
            eprintln!("{}", outcome);
            ExitCode::from(REDIRECT_EXIT)
        }
        Outcome::Failed(_) | Outcome::Invalid(_) | Outcome::Busy => fail(&outcome.to_string()),
    }
}
