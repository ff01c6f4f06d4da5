//! Screen table and the protected-route guard.

use std::fmt;

use tokio::sync::watch;
use tracing::info;

use crate::models::ResourceId;
use crate::session::{Session, SessionEvent};
use crate::views::admin_dashboard::AdminTab;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    ResetPassword { token: Option<String> },
    Profile,
    Jobs,
    JobDetails(ResourceId),
    Admin(AdminTab),
}

impl Route {
    /// Map a path (with optional query string) to a route. Anything not in
    /// the table is `Home`.
    pub fn parse(path: &str) -> Route {
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let query_param = |name: &str| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty())
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["signup"] => Route::Signup,
            ["reset-password"] => Route::ResetPassword {
                token: query_param("token"),
            },
            ["profile"] => Route::Profile,
            ["jobs"] => Route::Jobs,
            ["jobs", id] => Route::JobDetails(ResourceId::from(*id)),
            ["admin"] => Route::Admin(
                query_param("tab")
                    .and_then(|t| t.parse().ok())
                    .unwrap_or_default(),
            ),
            ["admin", tab] => tab.parse().map(Route::Admin).unwrap_or(Route::Home),
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::ResetPassword { token: Some(token) } => {
                let query: String = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("token", token)
                    .finish();
                format!("/reset-password?{}", query)
            }
            Route::ResetPassword { token: None } => "/reset-password".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Jobs => "/jobs".to_string(),
            Route::JobDetails(id) => format!("/jobs/{}", id),
            Route::Admin(tab) => format!("/admin/{}", tab),
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::Profile | Route::Jobs | Route::JobDetails(_) | Route::Admin(_)
        )
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Admin(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where a request for `route` actually lands given the current session.
pub fn resolve(route: Route, session: &Session) -> Route {
    if route.requires_session() && !session.is_authenticated() {
        return Route::Login;
    }
    if route.requires_admin() && !session.user().is_some_and(|u| u.is_admin()) {
        return Route::Home;
    }
    if let Route::ResetPassword { token: None } = route {
        return Route::Login;
    }
    route
}

/// Tracks the current screen and follows session changes: when the session
/// ends, for any reason, the user lands on the login screen.
pub struct Navigator {
    session: Session,
    events: watch::Receiver<SessionEvent>,
    current: Route,
}

impl Navigator {
    pub fn new(session: Session, start: Route) -> Self {
        let events = session.subscribe();
        let current = resolve(start, &session);
        Self {
            session,
            events,
            current,
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn navigate(&mut self, route: Route) -> &Route {
        self.current = resolve(route, &self.session);
        &self.current
    }

    /// Apply a pending session event, if any, without waiting.
    pub fn sync(&mut self) -> bool {
        match self.events.has_changed() {
            Ok(true) => {
                let event = *self.events.borrow_and_update();
                self.apply(event);
                true
            }
            _ => false,
        }
    }

    /// Wait for the next session event and apply it. `None` once the
    /// session is gone.
    pub async fn changed(&mut self) -> Option<&Route> {
        self.events.changed().await.ok()?;
        let event = *self.events.borrow_and_update();
        self.apply(event);
        Some(&self.current)
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Expired | SessionEvent::SignedOut => {
                info!(?event, from = %self.current, "Session ended, routing to login");
                self.current = Route::Login;
            }
            SessionEvent::SignedIn(_) | SessionEvent::Anonymous => {
                self.current = resolve(self.current.clone(), &self.session);
            }
        }
    }
}
