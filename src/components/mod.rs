//! UI Components
//!
//! Reusable Leptos components.

mod navigation;
mod dashboard;
mod error_banner;
mod log_panel;
mod delete_confirm_button;
pub(crate) mod project_card;
mod create_project;
mod projects_list;
pub(crate) mod project_details;
mod detail_tab_bar;
mod project_pictures;
mod project_tasks;
mod project_videos;
mod project_materials;
mod project_references;

pub use navigation::Navigation;
pub use dashboard::Dashboard;
pub use error_banner::ErrorBanner;
pub use log_panel::LogPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use project_card::ProjectCard;
pub use create_project::CreateProject;
pub use projects_list::ProjectsList;
pub use project_details::ProjectDetails;
pub use detail_tab_bar::DetailTabBar;
pub use project_pictures::ProjectPictures;
pub use project_tasks::ProjectTasks;
pub use project_videos::ProjectVideos;
pub use project_materials::ProjectMaterials;
pub use project_references::ProjectReferences;
