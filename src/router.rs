use std::fmt;

use crate::api::models::Role;
use crate::session::Session;

/// The pages the window can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Dashboard(Role),
    Chat,
}

/// Outcome of asking whether a path may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Render(Route),
    Redirect(Route),
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" => Some(Route::Landing),
            "/login" => Some(Route::Login),
            "/chat" => Some(Route::Chat),
            _ => path
                .strip_prefix("/dashboard/")
                .and_then(Role::from_slug)
                .map(Route::Dashboard),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Chat => "/chat".to_string(),
            Route::Dashboard(role) => format!("/dashboard/{}", role),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Decide what to do with a navigation request. No side effects.
pub fn decide(session: &Session, path: &str) -> Decision {
    let Some(route) = Route::parse(path) else {
        return Decision::Redirect(Route::Landing);
    };
    match (route, session.role()) {
        (Route::Login, Some(role)) => Decision::Redirect(Route::Dashboard(role)),
        (Route::Dashboard(_), None) => Decision::Redirect(Route::Login),
        // A mismatched role goes back to login, not to the user's own dashboard.
        (Route::Dashboard(wanted), Some(role)) if wanted != role => Decision::Redirect(Route::Login),
        (route, _) => Decision::Render(route),
    }
}

/// Follow redirects until something renders. Gives up after a few hops and
/// falls back to the landing page.
pub fn resolve(session: &Session, path: &str) -> Route {
    const MAX_HOPS: usize = 4;
    let mut current = path.to_string();
    for _ in 0..MAX_HOPS {
        match decide(session, &current) {
            Decision::Render(route) => return route,
            Decision::Redirect(route) => current = route.path(),
        }
    }
    Route::Landing
}

/// Whether showing `target` needs a fresh page. The page already on screen
/// is kept, state included, when the guard lands on it again.
pub fn needs_remount(mounted: Option<Route>, target: Route) -> bool {
    mounted != Some(target)
}
