//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The state is
//! only changed by applying an `Action`, so every transition can be tested
//! without a reactive runtime.

use chrono::Utc;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::ApiError;
use crate::listing::{ProjectQuery, ProjectStats, SortOrder, StatusFilter};
use crate::models::Project;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Projects as last fetched, newest additions first
    pub projects: Vec<Project>,
    /// Current filter, sort and search of the list view
    pub query: ProjectQuery,
    /// A list fetch is in flight
    pub loading: bool,
    /// Banner message for the list view
    pub error: Option<String>,
    /// Create-project modal is open
    pub show_create: bool,
}

/// Every way the global state can change
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    FetchStarted,
    FetchSucceeded(Vec<Project>),
    FetchFailed(String),
    SetStatusFilter(StatusFilter),
    SetSort(SortOrder),
    SetSearch(String),
    OpenCreate,
    CloseCreate,
    ProjectCreated(Project),
    ProjectDeleted(String),
    DismissError,
}

impl AppState {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::FetchStarted => {
                self.loading = true;
                self.error = None;
            }
            Action::FetchSucceeded(projects) => {
                self.loading = false;
                self.projects = projects;
            }
            Action::FetchFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            Action::SetStatusFilter(status) => self.query.status = status,
            Action::SetSort(sort) => self.query.sort = sort,
            Action::SetSearch(search) => self.query.search = search,
            Action::OpenCreate => self.show_create = true,
            Action::CloseCreate => self.show_create = false,
            Action::ProjectCreated(mut project) => {
                // Stamp a local date when the server sends none
                if project.created_date.is_none() {
                    project.created_date = Some(Utc::now());
                }
                self.projects.retain(|p| p.id != project.id);
                self.projects.insert(0, project);
                self.show_create = false;
                self.error = None;
            }
            Action::ProjectDeleted(id) => self.projects.retain(|p| p.id != id),
            Action::DismissError => self.error = None,
        }
    }

    /// Projects after the current filter, search and sort
    pub fn visible(&self) -> Vec<Project> {
        self.query.apply(&self.projects)
    }

    pub fn stats(&self) -> ProjectStats {
        ProjectStats::of(&self.projects)
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Apply an action to the store
pub fn dispatch(store: &AppStore, action: Action) {
    log::debug!("dispatch {}", action_name(&action));
    store.update(|state| state.apply(action));
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::FetchStarted => "FetchStarted",
        Action::FetchSucceeded(_) => "FetchSucceeded",
        Action::FetchFailed(_) => "FetchFailed",
        Action::SetStatusFilter(_) => "SetStatusFilter",
        Action::SetSort(_) => "SetSort",
        Action::SetSearch(_) => "SetSearch",
        Action::OpenCreate => "OpenCreate",
        Action::CloseCreate => "CloseCreate",
        Action::ProjectCreated(_) => "ProjectCreated",
        Action::ProjectDeleted(_) => "ProjectDeleted",
        Action::DismissError => "DismissError",
    }
}

// ========================
// Project detail view
// ========================

/// Load state of the project detail view
#[derive(Clone, Debug, PartialEq)]
pub enum DetailLoad {
    Loading,
    Loaded(Project),
    NotFound,
    Failed(String),
}

impl DetailLoad {
    /// A `null` body and a 404 both mean the project does not exist
    pub fn from_result(result: Result<Option<Project>, ApiError>) -> Self {
        match result {
            Ok(Some(project)) => DetailLoad::Loaded(project),
            Ok(None) => DetailLoad::NotFound,
            Err(err) if err.is_not_found() => DetailLoad::NotFound,
            Err(err) => DetailLoad::Failed(err.message),
        }
    }

    pub fn project(&self) -> Option<&Project> {
        match self {
            DetailLoad::Loaded(project) => Some(project),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DetailTab {
    #[default]
    Pictures,
    Tasks,
    Videos,
    Materials,
    References,
}

impl DetailTab {
    pub const ALL: [DetailTab; 5] = [
        DetailTab::Pictures,
        DetailTab::Tasks,
        DetailTab::Videos,
        DetailTab::Materials,
        DetailTab::References,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Pictures => "Pictures",
            DetailTab::Tasks => "Tasks",
            DetailTab::Videos => "Videos",
            DetailTab::Materials => "Materials & Tools",
            DetailTab::References => "References",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DetailTab::Pictures => "📸",
            DetailTab::Tasks => "✅",
            DetailTab::Videos => "🎥",
            DetailTab::Materials => "🧰",
            DetailTab::References => "🔗",
        }
    }

    /// Item count shown next to the tab label
    pub fn count(&self, project: &Project) -> usize {
        match self {
            DetailTab::Pictures => project.pictures.len(),
            DetailTab::Tasks => project.tasks.len(),
            DetailTab::Videos => project.videos.len(),
            DetailTab::Materials => project.materials.len() + project.tools.len(),
            DetailTab::References => project.references.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use chrono::TimeZone;
    use serde_json::json;

    fn project(id: &str, title: &str, status: Status, day: u32) -> Project {
        Project {
            id: id.to_string(),
            title: title.to_string(),
            status,
            created_date: Some(Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.apply(Action::FetchStarted);
        state.apply(Action::FetchSucceeded(vec![
            project("1", "Bench", Status::Planning, 2),
            project("2", "Arbor", Status::Completed, 1),
        ]));
        state
    }

    #[test]
    fn test_fetch_cycle() {
        let mut state = AppState::default();
        state.apply(Action::FetchStarted);
        assert!(state.loading);

        state.apply(Action::FetchFailed("offline".to_string()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("offline"));

        state.apply(Action::FetchStarted);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_query_actions_shape_visible() {
        let mut state = loaded_state();
        state.apply(Action::SetStatusFilter(StatusFilter::from("Completed")));
        assert_eq!(state.visible().len(), 1);

        state.apply(Action::SetStatusFilter(StatusFilter::All));
        state.apply(Action::SetSort(SortOrder::Alphabetical));
        assert_eq!(state.visible()[0].title, "Arbor");

        state.apply(Action::SetSearch("ben".to_string()));
        assert_eq!(state.visible()[0].id, "1");
        assert_eq!(state.visible().len(), 1);
        assert_eq!(state.stats().total, 2);
    }

    #[test]
    fn test_created_project_is_listed_first() {
        let mut state = loaded_state();
        state.apply(Action::OpenCreate);

        let created: Project = serde_json::from_value(json!({ "id": "42", "title": "Shelf" })).unwrap();
        state.apply(Action::ProjectCreated(created));

        assert!(!state.show_create);
        assert_eq!(state.projects[0].id, "42");
        assert_eq!(state.visible()[0].title, "Shelf");
        assert_eq!(state.projects.len(), 3);
    }

    #[test]
    fn test_project_deleted() {
        let mut state = loaded_state();
        state.apply(Action::ProjectDeleted("1".to_string()));
        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.projects[0].id, "2");
    }

    #[test]
    fn test_detail_load_from_result() {
        let found = DetailLoad::from_result(Ok(Some(project("1", "Bench", Status::Planning, 1))));
        assert_eq!(found.project().map(|p| p.id.as_str()), Some("1"));

        assert_eq!(DetailLoad::from_result(Ok(None)), DetailLoad::NotFound);
        assert_eq!(
            DetailLoad::from_result(Err(ApiError::from_status(404, json!({})))),
            DetailLoad::NotFound
        );
        assert_eq!(
            DetailLoad::from_result(Err(ApiError::from_status(500, json!({ "message": "boom" })))),
            DetailLoad::Failed("boom".to_string())
        );
    }

    #[test]
    fn test_detail_tab_counts() {
        let project: Project = serde_json::from_value(json!({
            "materials": [{ "id": "m1" }],
            "tools": [{ "id": "t1" }, { "id": "t2" }]
        }))
        .unwrap();
        assert_eq!(DetailTab::Materials.count(&project), 3);
        assert_eq!(DetailTab::Pictures.count(&project), 0);
        assert_eq!(DetailTab::ALL[0], DetailTab::default());
    }
}
