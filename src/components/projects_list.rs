//! Projects List Page
//!
//! Hero statistics, filter/sort/search controls and the project grid.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{CreateProject, ErrorBanner, ProjectCard};
use crate::context::use_app_context;
use crate::listing::{results_label, status_options, ProjectStats, SortOrder, StatusFilter};
use crate::store::{dispatch, use_app_store, Action, AppStateStoreFields};

#[component]
pub fn ProjectsList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // Load projects on mount and on every reload
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        dispatch(&store, Action::FetchStarted);
        spawn_local(async move {
            match api::client().get_projects(None).await {
                Ok(projects) => {
                    log::info!("Loaded {} projects", projects.len());
                    dispatch(&store, Action::FetchSucceeded(projects));
                }
                Err(err) => dispatch(&store, Action::FetchFailed(err.message)),
            }
        });
    });

    let visible = Memo::new(move |_| {
        let query = store.query().get();
        store.projects().with(|projects| query.apply(projects))
    });
    let stats = Memo::new(move |_| store.projects().with(|projects| ProjectStats::of(projects)));
    let statuses = Memo::new(move |_| store.projects().with(|projects| status_options(projects)));
    let status_filter = move || store.query().get().status;

    let stat_cards = move || {
        let stats = stats.get();
        [
            (stats.total, "Total Projects"),
            (stats.completed, "Completed"),
            (stats.in_progress, "In Progress"),
            (stats.planning, "Planning"),
        ]
        .into_iter()
        .map(|(count, label)| view! {
            <div class="stat-card">
                <div class="stat-number">{count}</div>
                <div class="stat-label">{label}</div>
            </div>
        })
        .collect_view()
    };

    view! {
        <div class="projects-list">
            <div class="hero-section">
                <div class="hero-content">
                    <div class="hero-text">
                        <h1 class="hero-title">
                            <span class="hero-emoji">"🛠️"</span>
                            "My DIY Projects "
                            <span class="hero-accent">"Collection"</span>
                        </h1>
                        <p class="hero-subtitle">"Crafting dreams into reality, one project at a time"</p>
                        <button class="btn btn-primary" on:click=move |_| dispatch(&store, Action::OpenCreate)>
                            "+ New Project"
                        </button>
                    </div>
                    <div class="stats-grid">{stat_cards}</div>
                </div>
            </div>

            <ErrorBanner
                message=Signal::derive(move || store.error().get())
                on_dismiss=move |_| dispatch(&store, Action::DismissError)
            />
            <Show when=move || store.error().with(Option::is_some)>
                <button class="btn btn-secondary retry-button" on:click=move |_| ctx.reload()>
                    "↻ Retry"
                </button>
            </Show>

            <div class="controls-section">
                <div class="controls-wrapper">
                    <div class="results-info">
                        <span class="results-count">{move || results_label(visible.get().len())}</span>
                        {move || {
                            let filter = status_filter();
                            (!filter.is_all()).then(|| view! { <span class="filter-badge">{filter.to_string()}</span> })
                        }}
                    </div>

                    <div class="controls-group">
                        <div class="control-item">
                            <div class="control-icon">"🔎"</div>
                            <input
                                type="search"
                                class="modern-input"
                                placeholder="Search projects..."
                                prop:value=move || store.query().get().search
                                on:input=move |ev| dispatch(&store, Action::SetSearch(event_target_value(&ev)))
                            />
                        </div>
                        <div class="control-item">
                            <div class="control-icon">"🔍"</div>
                            <select
                                id="status-filter"
                                class="modern-select"
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    dispatch(&store, Action::SetStatusFilter(StatusFilter::from(value.as_str())));
                                }
                            >
                                <For
                                    each=move || statuses.get()
                                    key=|option| option.to_string()
                                    children=move |option| {
                                        let value = option.to_string();
                                        let selected = move || status_filter() == option;
                                        view! { <option value=value.clone() selected=selected>{value.clone()}</option> }
                                    }
                                />
                            </select>
                        </div>
                        <div class="control-item">
                            <div class="control-icon">"📊"</div>
                            <select
                                id="sort-select"
                                class="modern-select"
                                on:change=move |ev| {
                                    if let Some(order) = SortOrder::parse(&event_target_value(&ev)) {
                                        dispatch(&store, Action::SetSort(order));
                                    }
                                }
                            >
                                {SortOrder::ALL.into_iter().map(|order| view! {
                                    <option
                                        value=order.as_str()
                                        selected=move || store.query().get().sort == order
                                    >
                                        {order.label()}
                                    </option>
                                }).collect_view()}
                            </select>
                        </div>
                    </div>
                </div>
            </div>

            <div class="projects-section">
                <Show when=move || store.loading().get() && store.projects().with(|p| p.is_empty())>
                    <div class="loading-state">"Loading projects..."</div>
                </Show>
                <Show when=move || !store.loading().get() && visible.with(|v| v.is_empty())>
                    <div class="empty-state">
                        <div class="empty-state-icon">"🔍"</div>
                        <h3 class="empty-state-title">"No projects found"</h3>
                        <p class="empty-state-text">
                            {move || {
                                let filter = status_filter();
                                if filter.is_all() {
                                    "Ready to start your first DIY adventure? Every great maker starts with a single project!".to_string()
                                } else {
                                    format!("No projects with status \"{}\" found. Try adjusting your filters.", filter)
                                }
                            }}
                        </p>
                        <Show when=move || !status_filter().is_all()>
                            <button
                                class="btn btn-primary"
                                on:click=move |_| dispatch(&store, Action::SetStatusFilter(StatusFilter::All))
                            >
                                "Show All Projects"
                            </button>
                        </Show>
                    </div>
                </Show>
                <div class="projects-grid">
                    <For
                        each=move || visible.get()
                        key=|project| (project.id.clone(), project.title.clone(), project.status.to_string())
                        children=move |project| view! {
                            <div class="project-item">
                                <ProjectCard project=project />
                            </div>
                        }
                    />
                </div>
            </div>

            <Show when=move || store.show_create().get()>
                <CreateProject />
            </Show>
        </div>
    }
}
