//! URL Routing
//!
//! Only the group page route is handled here; the path is the source of the
//! group id.

use leptos::ev;
use leptos::prelude::*;
use percent_encoding::percent_decode_str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// `/groups/<id>`
    Group(String),
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["groups", id] => match percent_decode_str(id).decode_utf8() {
                Ok(id) => Route::Group(id.into_owned()),
                Err(_) => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }

    pub fn group_id(&self) -> Option<String> {
        match self {
            Route::Group(id) => Some(id.clone()),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Route::Group(_))
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

/// Current route, updated on history navigation
pub fn use_route() -> ReadSignal<Route> {
    let (route, set_route) = signal(Route::parse(&current_path()));
    let _ = window_event_listener(ev::popstate, move |_| {
        set_route.set(Route::parse(&current_path()));
    });
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group() {
        assert_eq!(Route::parse("/groups/g1"), Route::Group("g1".into()));
        assert_eq!(Route::parse("/groups/g1/"), Route::Group("g1".into()));
        assert_eq!(Route::parse("/groups/a%20b"), Route::Group("a b".into()));
    }

    #[test]
    fn test_parse_other() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/groups"), Route::NotFound);
        assert_eq!(Route::parse("/lists/l1"), Route::NotFound);
        assert_eq!(Route::parse("/groups/%FF"), Route::NotFound);
    }

    #[test]
    fn test_group_id() {
        assert_eq!(Route::Group("g1".into()).group_id().as_deref(), Some("g1"));
        assert_eq!(Route::Home.group_id(), None);
    }
}
