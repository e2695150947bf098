//! Project Card Component

use leptos::prelude::*;

use crate::context::{use_app_context, Route};
use crate::listing::format_date;
use crate::models::Project;

/// Shown when a project has no image or it fails to load
pub const FALLBACK_IMAGE: &str =
    "https://images.unsplash.com/photo-1581833971358-2c8b550f87b3?w=400&h=300&fit=crop";

#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
    let ctx = use_app_context();
    let (image_failed, set_image_failed) = signal(false);

    let image = project.image.clone().filter(|url| !url.trim().is_empty());
    let src = move || match (&image, image_failed.get()) {
        (Some(url), false) => url.clone(),
        _ => FALLBACK_IMAGE.to_string(),
    };
    let id = project.id.clone();
    let status_class = format!("project-status {}", project.status.css_class());

    view! {
        <div class="project-card" on:click=move |_| ctx.navigate(Route::Project(id.clone()))>
            <div class="project-card-image">
                <img
                    src=src
                    alt=project.title.clone()
                    on:error=move |_| set_image_failed.set(true)
                />
                <div class=status_class>{project.status.to_string()}</div>
            </div>
            <div class="project-card-content">
                <h3 class="project-title">{project.title.clone()}</h3>
                <p class="project-description">{project.description.clone()}</p>
                <div class="project-meta">
                    <span class="project-date">"Started: " {format_date(project.created_date)}</span>
                </div>
            </div>
        </div>
    }
}
