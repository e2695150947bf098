//! Project Details Page
//!
//! Loads one project and shows its header, status controls and the tabbed
//! sub-collection views. Tabs report mutations through `on_change`, which
//! re-fetches the project.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use crate::api::{self, ApiError};
use crate::components::{
    DeleteConfirmButton, DetailTabBar, ErrorBanner, ProjectMaterials, ProjectPictures,
    ProjectReferences, ProjectTasks, ProjectVideos,
};
use crate::context::{use_app_context, Route};
use crate::models::{Project, Status};
use crate::store::{dispatch, use_app_store, Action, DetailLoad, DetailTab};

/// Run an API mutation; reload on success, show the message on failure
pub(crate) fn spawn_mutation<F>(
    label: &'static str,
    request: F,
    on_change: Callback<()>,
    set_error: WriteSignal<Option<String>>,
) where
    F: Future<Output = Result<Value, ApiError>> + 'static,
{
    spawn_local(async move {
        match request.await {
            Ok(_) => {
                log::debug!("{} succeeded", label);
                set_error.set(None);
                on_change.run(());
            }
            Err(err) => {
                log::warn!("{} failed: {}", label, err);
                set_error.set(Some(err.message));
            }
        }
    });
}

#[component]
pub fn ProjectDetails(#[prop(into)] project_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (load, set_load) = signal(DetailLoad::Loading);
    let (tab, set_tab) = signal(DetailTab::default());
    let (version, set_version) = signal(0u32);
    let (action_error, set_action_error) = signal::<Option<String>>(None);

    let id = StoredValue::new(project_id);

    Effect::new(move |_| {
        let _ = version.get();
        let id = id.get_value();
        spawn_local(async move {
            let result = api::client().get_project(&id).await;
            if let Err(err) = &result {
                log::error!("Failed to load project {}: {}", id, err);
            }
            set_load.set(DetailLoad::from_result(result));
        });
    });

    let project = Memo::new(move |_| load.with(|l| l.project().cloned().unwrap_or_default()));
    let is_loaded = Memo::new(move |_| load.with(|l| l.project().is_some()));
    let on_change = Callback::new(move |_: ()| set_version.update(|v| *v += 1));
    let back = move |_: web_sys::MouseEvent| ctx.navigate(Route::Projects);

    let change_status = move |ev: web_sys::Event| {
        let status = Status::from(event_target_value(&ev));
        let id = id.get_value();
        spawn_mutation(
            "update status",
            async move { api::client().update_project_status(&id, status).await },
            on_change,
            set_action_error,
        );
    };

    let delete = move |_: ()| {
        let id = id.get_value();
        spawn_local(async move {
            match api::client().delete_project(&id).await {
                Ok(_) => {
                    log::info!("Deleted project {}", id);
                    dispatch(&store, Action::ProjectDeleted(id));
                    ctx.navigate(Route::Projects);
                }
                Err(err) => set_action_error.set(Some(err.message)),
            }
        });
    };

    let fallback = move || match load.get() {
        DetailLoad::Loading => view! {
            <div class="loading-container">
                <div class="loading-spinner"></div>
                <p>"Loading project details..."</p>
            </div>
        }
        .into_any(),
        DetailLoad::NotFound => view! {
            <div class="error-container">
                <h2>"Project not found"</h2>
                <p>"The project you're looking for doesn't exist."</p>
                <button class="back-button" on:click=back>"← Back to Projects"</button>
            </div>
        }
        .into_any(),
        DetailLoad::Failed(message) => view! {
            <div class="error-container">
                <h2>"Oops! Something went wrong"</h2>
                <p>{message}</p>
                <button class="back-button" on:click=back>"← Back to Projects"</button>
            </div>
        }
        .into_any(),
        DetailLoad::Loaded(_) => ().into_any(),
    };

    view! {
        <div class="project-details">
            <Show when=move || is_loaded.get() fallback=fallback>
                <div class="project-header">
                    <button class="back-button" on:click=back>"← Back to Projects"</button>
                    <div class="project-title-section">
                        <h1 class="project-title">{move || project.with(|p| p.title.clone())}</h1>
                        <ProjectMeta project=project />
                    </div>
                    <p class="project-description">{move || project.with(|p| p.description.clone())}</p>
                    <div class="project-actions">
                        <select class="status-select" on:change=change_status>
                            {Status::KNOWN.iter().map(|option| {
                                let value = option.to_string();
                                let current = option.clone();
                                view! {
                                    <option
                                        value=value.clone()
                                        selected=move || project.with(|p| p.status == current)
                                    >
                                        {value.clone()}
                                    </option>
                                }
                            }).collect_view()}
                        </select>
                        <DeleteConfirmButton
                            button_class="btn btn-danger"
                            label="Delete Project"
                            on_confirm=delete
                        />
                    </div>
                    <ErrorBanner
                        message=action_error
                        on_dismiss=move |_| set_action_error.set(None)
                    />
                </div>

                <div class="project-content">
                    <DetailTabBar project=project active=tab set_active=set_tab />
                    <div class="tab-content">
                        {move || match tab.get() {
                            DetailTab::Pictures => view! {
                                <ProjectPictures project=project on_change=on_change />
                            }.into_any(),
                            DetailTab::Tasks => view! {
                                <ProjectTasks project=project on_change=on_change />
                            }.into_any(),
                            DetailTab::Videos => view! {
                                <ProjectVideos project=project on_change=on_change />
                            }.into_any(),
                            DetailTab::Materials => view! {
                                <ProjectMaterials project=project on_change=on_change />
                            }.into_any(),
                            DetailTab::References => view! {
                                <ProjectReferences project=project on_change=on_change />
                            }.into_any(),
                        }}
                    </div>
                </div>
            </Show>
        </div>
    }
}

/// Status, difficulty and time badges
#[component]
fn ProjectMeta(project: Memo<Project>) -> impl IntoView {
    let status_class = move || project.with(|p| format!("status-badge {}", p.status.css_class()));
    let difficulty = move || project.with(|p| p.difficulty.clone().filter(|d| !d.is_empty()));
    let estimated_time = move || project.with(|p| p.estimated_time.clone().filter(|t| !t.is_empty()));

    view! {
        <div class="project-meta">
            <span class=status_class>{move || project.with(|p| p.status.to_string())}</span>
            {move || difficulty().map(|d| {
                let class = format!("difficulty-badge difficulty-{}", d.to_lowercase());
                view! { <span class=class>{d}</span> }
            })}
            {move || estimated_time().map(|t| view! { <span class="estimated-time">"⏱️ " {t}</span> })}
        </div>
    }
}
