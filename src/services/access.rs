//! Access policy
//!
//! Maps dashboard routes and roles onto allow/deny decisions, and roles onto
//! the capability set used to decide which controls a view offers. Every
//! privileged route carries an explicit role list; roles do not inherit from
//! each other. Entity ownership (an organizer editing their own event) is
//! checked against the entity through [`AccessContext::can_manage_event`] and
//! [`AccessContext::can_delete_event`].

use std::collections::BTreeSet;
use tracing::debug;
use crate::models::{Event, Identity, Role};
use crate::utils::errors::{EventDeskError, Result};

const EVENT_EDITORS: &[Role] = &[Role::Admin, Role::Manager, Role::Organizer];
const VENUE_EDITORS: &[Role] = &[Role::Admin, Role::Manager];
const ATTENDANCE_MANAGERS: &[Role] = &[Role::Admin, Role::Manager, Role::Organizer];
const FEEDBACK_REVIEWERS: &[Role] = &[Role::Admin, Role::Manager, Role::Organizer];
const ADMINS: &[Role] = &[Role::Admin];

/// Named permission derived from a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    CreateEvent,
    /// Edit or delete any event
    EditAnyEvent,
    /// Edit or delete events the user organizes
    EditOwnEvent,
    DeleteEvent,
    CreateVenue,
    EditVenue,
    DeleteVenue,
    ManageAttendance,
    ViewAllFeedback,
    AccessAdminPanel,
    RegisterForEvent,
    MarkAttendance,
    SubmitFeedback,
}

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Roles(&'static [Role]),
}

/// Every dashboard route the policy knows about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Unauthorized,
    Dashboard,
    Events,
    EventCreate,
    EventEdit(Option<String>),
    EventDetail(String),
    Venues,
    VenueCreate,
    VenueEdit(Option<String>),
    VenueDetail(String),
    Attendance,
    AttendanceManage,
    AttendanceGenerate(Option<String>),
    AttendanceList(Option<String>),
    AttendanceMark(String),
    Feedback,
    FeedbackManage,
    FeedbackView(String),
    FeedbackDetail(String),
    Profile,
    Admin,
}

impl Route {
    /// Resolve a path. `None` means the route is not part of the dashboard.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let id = |s: &&str| s.to_string();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["login", ..] => Route::Login,
            ["register", ..] => Route::Register,
            ["unauthorized", ..] => Route::Unauthorized,
            ["dashboard", ..] => Route::Dashboard,
            ["profile", ..] => Route::Profile,
            ["admin", ..] => Route::Admin,

            ["events"] => Route::Events,
            ["events", "create", ..] => Route::EventCreate,
            ["events", "edit", rest @ ..] => Route::EventEdit(rest.first().map(id)),
            ["events", event_id] => Route::EventDetail(id(event_id)),
            ["events", event_id, "edit", ..] => Route::EventEdit(Some(id(event_id))),

            ["venues"] => Route::Venues,
            ["venues", "create", ..] => Route::VenueCreate,
            ["venues", "edit", rest @ ..] => Route::VenueEdit(rest.first().map(id)),
            ["venues", venue_id] => Route::VenueDetail(id(venue_id)),
            ["venues", venue_id, "edit", ..] => Route::VenueEdit(Some(id(venue_id))),

            ["attendance"] => Route::Attendance,
            ["attendance", "manage", ..] => Route::AttendanceManage,
            ["attendance", "generate", ..] => Route::AttendanceGenerate(None),
            ["attendance", "list", ..] => Route::AttendanceList(None),
            ["attendance", event_id] => Route::AttendanceMark(id(event_id)),
            ["attendance", event_id, "generate", ..] => Route::AttendanceGenerate(Some(id(event_id))),
            ["attendance", event_id, "list", ..] => Route::AttendanceList(Some(id(event_id))),

            ["feedback"] => Route::Feedback,
            ["feedback", "manage", ..] => Route::FeedbackManage,
            ["feedback", event_id] => Route::FeedbackDetail(id(event_id)),
            ["feedback", event_id, "view", ..] => Route::FeedbackView(id(event_id)),

            _ => return None,
        };

        Some(route)
    }

    /// Canonical path of this route
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Unauthorized => "/unauthorized".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Events => "/events".to_string(),
            Route::EventCreate => "/events/create".to_string(),
            Route::EventEdit(Some(id)) => format!("/events/{}/edit", id),
            Route::EventEdit(None) => "/events/edit".to_string(),
            Route::EventDetail(id) => format!("/events/{}", id),
            Route::Venues => "/venues".to_string(),
            Route::VenueCreate => "/venues/create".to_string(),
            Route::VenueEdit(Some(id)) => format!("/venues/{}/edit", id),
            Route::VenueEdit(None) => "/venues/edit".to_string(),
            Route::VenueDetail(id) => format!("/venues/{}", id),
            Route::Attendance => "/attendance".to_string(),
            Route::AttendanceManage => "/attendance/manage".to_string(),
            Route::AttendanceGenerate(Some(id)) => format!("/attendance/{}/generate", id),
            Route::AttendanceGenerate(None) => "/attendance/generate".to_string(),
            Route::AttendanceList(Some(id)) => format!("/attendance/{}/list", id),
            Route::AttendanceList(None) => "/attendance/list".to_string(),
            Route::AttendanceMark(id) => format!("/attendance/{}", id),
            Route::Feedback => "/feedback".to_string(),
            Route::FeedbackManage => "/feedback/manage".to_string(),
            Route::FeedbackView(id) => format!("/feedback/{}/view", id),
            Route::FeedbackDetail(id) => format!("/feedback/{}", id),
            Route::Profile => "/profile".to_string(),
            Route::Admin => "/admin".to_string(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Home | Route::Login | Route::Register | Route::Unauthorized => Access::Public,

            Route::EventCreate | Route::EventEdit(_) => Access::Roles(EVENT_EDITORS),
            Route::VenueCreate | Route::VenueEdit(_) => Access::Roles(VENUE_EDITORS),
            Route::AttendanceManage | Route::AttendanceGenerate(_) | Route::AttendanceList(_) => {
                Access::Roles(ATTENDANCE_MANAGERS)
            }
            Route::FeedbackManage | Route::FeedbackView(_) => Access::Roles(FEEDBACK_REVIEWERS),
            Route::Admin => Access::Roles(ADMINS),

            Route::Dashboard
            | Route::Events
            | Route::EventDetail(_)
            | Route::Venues
            | Route::VenueDetail(_)
            | Route::Attendance
            | Route::AttendanceMark(_)
            | Route::Feedback
            | Route::FeedbackDetail(_)
            | Route::Profile => Access::Authenticated,
        }
    }
}

/// Access level of an arbitrary path; unknown paths are public
pub fn access_for_path(path: &str) -> Access {
    Route::parse(path).map(|route| route.access()).unwrap_or(Access::Public)
}

/// Whether an authenticated user with `role` may open `path`
pub fn can_access(path: &str, role: Role) -> bool {
    match access_for_path(path) {
        Access::Public | Access::Authenticated => true,
        Access::Roles(allowed) => allowed.contains(&role),
    }
}

/// Capability set of a role
pub fn capabilities(role: Role) -> BTreeSet<Capability> {
    use Capability::*;

    let granted: &[Capability] = match role {
        Role::Admin => &[
            CreateEvent, EditAnyEvent, DeleteEvent, CreateVenue, EditVenue, DeleteVenue,
            ManageAttendance, ViewAllFeedback, AccessAdminPanel,
            RegisterForEvent, MarkAttendance, SubmitFeedback,
        ],
        Role::Manager => &[
            CreateEvent, EditAnyEvent, DeleteEvent, CreateVenue, EditVenue, DeleteVenue,
            ManageAttendance, ViewAllFeedback,
            RegisterForEvent, MarkAttendance, SubmitFeedback,
        ],
        Role::Organizer => &[
            CreateEvent, EditOwnEvent, ManageAttendance, ViewAllFeedback,
            RegisterForEvent, MarkAttendance, SubmitFeedback,
        ],
        Role::Attendee => &[RegisterForEvent, MarkAttendance, SubmitFeedback],
    };

    granted.iter().copied().collect()
}

/// Capabilities of the current user, resolved once per view
#[derive(Debug, Clone)]
pub struct AccessContext {
    pub identity: Identity,
    pub capabilities: BTreeSet<Capability>,
}

impl AccessContext {
    pub fn new(identity: Identity) -> Self {
        let capabilities = capabilities(identity.role);
        debug!(user_id = %identity.id, role = %identity.role, capabilities = ?capabilities, "Access context created");
        Self { identity, capabilities }
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Require a capability or return a permission error
    pub fn require(&self, capability: Capability) -> Result<()> {
        if self.has(capability) {
            Ok(())
        } else {
            Err(EventDeskError::PermissionDenied(format!(
                "{} role lacks {:?}",
                self.identity.role, capability
            )))
        }
    }

    /// Edit/delete rights on a specific event
    pub fn can_manage_event(&self, event: &Event) -> bool {
        self.has(Capability::EditAnyEvent)
            || (self.has(Capability::EditOwnEvent) && event.organizer_id() == Some(self.identity.id.as_str()))
    }

    /// Delete rights on a specific event: `DeleteEvent` for any event, or
    /// `EditOwnEvent` for events the user organizes
    pub fn can_delete_event(&self, event: &Event) -> bool {
        self.has(Capability::DeleteEvent)
            || (self.has(Capability::EditOwnEvent) && event.organizer_id() == Some(self.identity.id.as_str()))
    }

    pub fn can_manage_venues(&self) -> bool {
        self.has(Capability::EditVenue)
    }
}
