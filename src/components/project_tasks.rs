//! Project Tasks Tab

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, NewTask};
use crate::components::project_details::spawn_mutation;
use crate::components::ErrorBanner;
use crate::details::{category_icon, filter_tasks, group_tasks, task_categories, TaskProgress, ALL_CATEGORIES};
use crate::models::{Project, Task};
use crate::validation::require_title;

#[component]
pub fn ProjectTasks(project: Memo<Project>, on_change: Callback<()>) -> impl IntoView {
    let (category, set_category) = signal(ALL_CATEGORIES.to_string());
    let (error, set_error) = signal::<Option<String>>(None);

    let categories = Memo::new(move |_| project.with(|p| task_categories(&p.tasks)));
    let filtered = Memo::new(move |_| {
        let category = category.get();
        project.with(|p| filter_tasks(&p.tasks, &category))
    });
    let progress = Memo::new(move |_| project.with(|p| TaskProgress::of(&p.tasks)));

    let toggle = Callback::new(move |task_id: String| {
        let id = project.with_untracked(|p| p.id.clone());
        spawn_mutation(
            "toggle task",
            async move { api::client().toggle_task(&id, &task_id).await },
            on_change,
            set_error,
        );
    });

    let task_list = move |tasks: Vec<Task>| {
        view! {
            <div class="category-tasks">
                {tasks.into_iter().map(|task| view! { <TaskRow task=task on_toggle=toggle /> }).collect_view()}
            </div>
        }
    };

    view! {
        <div class="project-tasks">
            <div class="tasks-header">
                <h3>"Project Tasks"</h3>
                <p>"Track your progress through each step of the project"</p>
            </div>

            <div class="progress-overview">
                <div class="progress-stats">
                    <div class="stat">
                        <span class="stat-number">{move || progress.get().completed}</span>
                        <span class="stat-label">"Completed"</span>
                    </div>
                    <div class="stat">
                        <span class="stat-number">{move || progress.get().total}</span>
                        <span class="stat-label">"Total Tasks"</span>
                    </div>
                    <div class="stat">
                        <span class="stat-number">{move || format!("{}%", progress.get().percent())}</span>
                        <span class="stat-label">"Progress"</span>
                    </div>
                </div>
                <div class="progress-bar-container">
                    <div class="progress-bar">
                        <div
                            class="progress-fill"
                            style:width=move || format!("{}%", progress.get().percent())
                        ></div>
                    </div>
                    <span class="progress-text">{move || format!("{}% Complete", progress.get().percent())}</span>
                </div>
            </div>

            <ErrorBanner message=error on_dismiss=move |_| set_error.set(None) />

            <div class="category-filter">
                <label for="category-select">"Filter by category:"</label>
                <select
                    id="category-select"
                    class="category-select"
                    on:change=move |ev| set_category.set(event_target_value(&ev))
                >
                    <For
                        each=move || categories.get()
                        key=|c| c.clone()
                        children=move |c| {
                            let label = if c == ALL_CATEGORIES {
                                "All Categories".to_string()
                            } else {
                                format!("{} {}", category_icon(&c), c)
                            };
                            let value = c.clone();
                            view! {
                                <option value=value selected=move || category.get() == c>{label}</option>
                            }
                        }
                    />
                </select>
            </div>

            <div class="tasks-list">
                {move || {
                    let tasks = filtered.get();
                    if tasks.is_empty() {
                        view! {
                            <div class="empty-state">
                                <span class="empty-icon">"✅"</span>
                                <h3>"No Tasks Yet"</h3>
                                <p>"Tasks will be added as the project plan develops."</p>
                            </div>
                        }.into_any()
                    } else if category.get() == ALL_CATEGORIES {
                        group_tasks(&tasks).into_iter().map(|(name, members)| view! {
                            <div class="category-group">
                                <h4 class="category-title">
                                    <span class="category-icon">{category_icon(&name)}</span>
                                    {name.clone()}
                                    <span class="category-count">{format!("({})", members.len())}</span>
                                </h4>
                                {task_list(members)}
                            </div>
                        }).collect_view().into_any()
                    } else {
                        task_list(tasks).into_any()
                    }
                }}
            </div>

            <AddTaskForm project=project on_added=on_change />
        </div>
    }
}

#[component]
fn TaskRow(task: Task, on_toggle: Callback<String>) -> impl IntoView {
    let id = task.id.clone();
    let class = if task.completed { "task-item completed" } else { "task-item" };

    view! {
        <div class=class>
            <label class="task-checkbox">
                <input
                    type="checkbox"
                    prop:checked=task.completed
                    on:change=move |_| on_toggle.run(id.clone())
                />
                <span class="checkmark"></span>
            </label>
            <div class="task-content">
                <h5 class="task-title">{task.title.clone()}</h5>
                {(!task.description.is_empty()).then(|| view! {
                    <p class="task-description">{task.description.clone()}</p>
                })}
                <div class="task-meta">
                    {(!task.difficulty.is_empty()).then(|| view! {
                        <span class=format!("difficulty-badge difficulty-{}", task.difficulty.to_lowercase())>
                            {task.difficulty.clone()}
                        </span>
                    })}
                    {(!task.estimated_time.is_empty()).then(|| view! {
                        <span class="estimated-time">"⏱️ " {task.estimated_time.clone()}</span>
                    })}
                </div>
            </div>
        </div>
    }
}

#[component]
fn AddTaskForm(project: Memo<Project>, on_added: Callback<()>) -> impl IntoView {
    let (title, set_title) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title_text = match require_title(&title.get()) {
            Ok(t) => t,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        let (id, order) = project.with_untracked(|p| {
            let next = p.tasks.iter().filter_map(|t| t.order).max().unwrap_or(0) + 1;
            (p.id.clone(), next)
        });
        let task = NewTask {
            title: title_text,
            category: Some(category.get().trim().to_string()),
            order: Some(order),
            ..Default::default()
        };

        spawn_local(async move {
            match api::client().add_task(&id, &task).await {
                Ok(_) => {
                    set_title.set(String::new());
                    set_error.set(None);
                    on_added.run(());
                }
                Err(err) => set_error.set(Some(err.message)),
            }
        });
    };

    view! {
        <form class="add-form add-task-form" on:submit=on_submit>
            <input
                type="text"
                class="form-input"
                placeholder="New task..."
                prop:value=move || title.get()
                on:input=move |ev| {
                    set_error.set(None);
                    set_title.set(event_target_value(&ev));
                }
            />
            <input
                type="text"
                class="form-input"
                placeholder="Category (Planning)"
                prop:value=move || category.get()
                on:input=move |ev| set_category.set(event_target_value(&ev))
            />
            <button type="submit" class="btn btn-primary">"Add Task"</button>
            {move || error.get().map(|message| view! { <span class="error-message">{message}</span> })}
        </form>
    }
}
