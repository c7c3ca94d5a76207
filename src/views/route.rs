//! Client-side routes

use std::fmt;

use crate::catalog::EventId;

/// A client-side location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Events,
    EventDetails(EventId),
    Dashboard,
    Login,
    Register,
}

impl Route {
    /// Parse a path such as `/event/42`; unknown paths yield `None`
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Some(Route::Home),
            "/events" => Some(Route::Events),
            "/dashboard" => Some(Route::Dashboard),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            _ => {
                let id = trimmed.strip_prefix("/event/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                let id = urlencoding::decode(id).ok()?;
                Some(Route::EventDetails(EventId::new(id.into_owned())))
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Events => "/events".to_string(),
            Route::EventDetails(id) => format!("/event/{}", urlencoding::encode(id.as_str())),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
        }
    }

    /// Routes that need a signed-in user
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/events"), Some(Route::Events));
        assert_eq!(Route::parse("/events/"), Some(Route::Events));
        assert_eq!(Route::parse("/dashboard?tab=past"), Some(Route::Dashboard));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/register"), Some(Route::Register));
        assert_eq!(
            Route::parse("/event/64f1"),
            Some(Route::EventDetails(EventId::from("64f1")))
        );
    }

    #[test]
    fn test_parse_unknown_routes() {
        assert_eq!(Route::parse("/event/"), None);
        assert_eq!(Route::parse("/event/1/extra"), None);
        assert_eq!(Route::parse("/admin"), None);
    }

    #[test]
    fn test_path_parses_back() {
        let routes = [
            Route::Home,
            Route::Events,
            Route::EventDetails(EventId::from("a b")),
            Route::Dashboard,
            Route::Login,
            Route::Register,
        ];

        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route.clone()));
        }
    }

    #[test]
    fn test_dashboard_requires_session() {
        assert!(Route::Dashboard.requires_session());
        assert!(!Route::Events.requires_session());
    }
}
