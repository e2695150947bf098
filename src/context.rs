//! Application Context
//!
//! Shared state provided via Leptos Context API. Navigation is hash based
//! (`#/projects/<id>`) so the static bundle needs no server rewrites.

use leptos::prelude::*;

use crate::api::encode_component;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Projects,
    Project(String),
}

impl Route {
    /// Parse `location.hash`; unknown paths go home
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_matches('/');
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next(), segments.next()) {
            (Some("projects"), None, _) => Route::Projects,
            (Some("projects"), Some(id), None) => Route::Project(decode_segment(id)),
            _ => Route::Home,
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::Projects => "#/projects".to_string(),
            Route::Project(id) => format!("#/projects/{}", encode_component(id)),
        }
    }
}

fn decode_segment(segment: &str) -> String {
    percent_encoding::percent_decode_str(segment)
        .decode_utf8_lossy()
        .into_owned()
}

fn current_hash() -> String {
    window().location().hash().unwrap_or_default()
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current page - read
    pub route: ReadSignal<Route>,
    /// Current page - write
    set_route: WriteSignal<Route>,
    /// Trigger to reload projects from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload projects from backend - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        route: (ReadSignal<Route>, WriteSignal<Route>),
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            route: route.0,
            set_route: route.1,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    /// Route for the hash the page was opened with
    pub fn initial_route() -> Route {
        Route::from_hash(&current_hash())
    }

    /// Switch page and record it in the address bar
    pub fn navigate(&self, route: Route) {
        let hash = route.to_hash();
        if current_hash() != hash {
            if let Err(e) = window().location().set_hash(&hash) {
                log::warn!("Failed to set location hash: {:?}", e);
            }
        }
        self.set_route.set(route);
    }

    /// Follow a `hashchange` (back/forward buttons)
    pub fn sync_from_location(&self) {
        let route = Route::from_hash(&current_hash());
        if self.route.get_untracked() != route {
            self.set_route.set(route);
        }
    }

    /// Trigger a reload of projects
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_from_hash() {
        assert_eq!(Route::from_hash(""), Route::Home);
        assert_eq!(Route::from_hash("#/"), Route::Home);
        assert_eq!(Route::from_hash("#/projects"), Route::Projects);
        assert_eq!(Route::from_hash("#/projects/"), Route::Projects);
        assert_eq!(Route::from_hash("#/projects/abc"), Route::Project("abc".to_string()));
        assert_eq!(Route::from_hash("#/projects/a/b"), Route::Home);
        assert_eq!(Route::from_hash("#/settings"), Route::Home);
    }

    #[test]
    fn test_route_hash_round_trip_encodes_id() {
        let route = Route::Project("shelf 1".to_string());
        assert_eq!(route.to_hash(), "#/projects/shelf%201");
        assert_eq!(Route::from_hash(&route.to_hash()), route);
    }
}
