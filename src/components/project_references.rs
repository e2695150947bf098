//! Project References Tab

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::project_details::spawn_mutation;
use crate::components::{DeleteConfirmButton, ErrorBanner};
use crate::details::{filter_references, reference_sources, source_icon};
use crate::listing::format_date;
use crate::models::{Project, Reference, SourceType};
use crate::validation::ReferenceForm;

const ALL_SOURCES: &str = "all";

#[component]
pub fn ProjectReferences(project: Memo<Project>, on_change: Callback<()>) -> impl IntoView {
    let (filter, set_filter) = signal(ALL_SOURCES.to_string());
    let (form_open, set_form_open) = signal(false);
    let (editing, set_editing) = signal::<Option<Reference>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let sources = Memo::new(move |_| project.with(|p| reference_sources(&p.references)));
    let filtered = Memo::new(move |_| {
        let value = filter.get();
        let source = (value != ALL_SOURCES).then(|| SourceType::from(value));
        project.with(|p| filter_references(&p.references, source.as_ref()))
    });

    let open_add = move |_: web_sys::MouseEvent| {
        set_editing.set(None);
        set_form_open.set(true);
    };
    let close_form = Callback::new(move |_: ()| {
        set_form_open.set(false);
        set_editing.set(None);
    });
    let on_saved = Callback::new(move |_: ()| {
        close_form.run(());
        on_change.run(());
    });

    let delete = move |reference_id: String| {
        let id = project.with_untracked(|p| p.id.clone());
        spawn_mutation(
            "delete reference",
            async move { api::client().delete_reference(&id, &reference_id).await },
            on_change,
            set_error,
        );
    };

    view! {
        <div class="project-references">
            <div class="references-header">
                <div>
                    <h3>"References & Links"</h3>
                    <p>"Save useful links, tutorials, and inspiration from social media and websites"</p>
                </div>
                <button class="add-reference-button" on:click=open_add>"+ Add Reference"</button>
            </div>

            <ErrorBanner message=error on_dismiss=move |_| set_error.set(None) />

            <Show
                when=move || project.with(|p| !p.references.is_empty())
                fallback=move || view! {
                    <div class="references-empty">
                        <div class="empty-state">
                            <span class="empty-icon">"🔗"</span>
                            <h3>"No References Yet"</h3>
                            <p>"Save useful links, tutorials, and inspiration from social media and websites."</p>
                            <button class="add-first-button" on:click=open_add>"Add Your First Reference"</button>
                        </div>
                    </div>
                }
            >
                <div class="type-filter">
                    <label for="source-select">"Filter by source:"</label>
                    <select id="source-select" class="type-select" on:change=move |ev| set_filter.set(event_target_value(&ev))>
                        <option value=ALL_SOURCES selected=move || filter.get() == ALL_SOURCES>"All Sources"</option>
                        <For
                            each=move || sources.get()
                            key=|source| source.to_string()
                            children=move |source| {
                                let value = source.to_string();
                                let label = format!("{} {}", source_icon(&source), source.label());
                                let is_selected = {
                                    let value = value.clone();
                                    move || filter.get() == value
                                };
                                view! { <option value=value selected=is_selected>{label}</option> }
                            }
                        />
                    </select>
                </div>

                <div class="references-list">
                    <Show
                        when=move || !filtered.with(Vec::is_empty)
                        fallback=|| view! {
                            <div class="empty-filtered">
                                <p>"No references match the current filter."</p>
                            </div>
                        }
                    >
                        <For
                            each=move || filtered.get()
                            key=|reference| (reference.id.clone(), reference.title.clone(), reference.url.clone())
                            children=move |reference| {
                                let for_edit = reference.clone();
                                let reference_id = reference.id.clone();
                                view! {
                                    <div class="reference-card">
                                        <div class="reference-header">
                                            <div class="reference-source">
                                                <span class="source-icon">{source_icon(&reference.source_type)}</span>
                                                <span class="source-label">{reference.source_type.label()}</span>
                                            </div>
                                            <div class="reference-actions">
                                                <button
                                                    class="edit-button"
                                                    title="Edit reference"
                                                    on:click=move |_| {
                                                        set_editing.set(Some(for_edit.clone()));
                                                        set_form_open.set(true);
                                                    }
                                                >
                                                    "✏️"
                                                </button>
                                                <DeleteConfirmButton
                                                    button_class="delete-button"
                                                    label="🗑️"
                                                    on_confirm=move |_| delete(reference_id.clone())
                                                />
                                            </div>
                                        </div>
                                        <h4 class="reference-title">{reference.title.clone()}</h4>
                                        {(!reference.description.is_empty()).then(|| view! {
                                            <p class="reference-description">{reference.description.clone()}</p>
                                        })}
                                        <a
                                            class="reference-link"
                                            href=reference.url.clone()
                                            target="_blank"
                                            rel="noopener noreferrer"
                                        >
                                            {reference.url.clone()}
                                            <span class="external-icon">"↗"</span>
                                        </a>
                                        {reference.added_date.map(|date| view! {
                                            <p class="reference-date">"Added " {format_date(Some(date))}</p>
                                        })}
                                    </div>
                                }
                            }
                        />
                    </Show>
                </div>
            </Show>

            {move || form_open.get().then(|| view! {
                <ReferenceFormModal
                    project=project
                    editing=editing.get_untracked()
                    on_saved=on_saved
                    on_cancel=close_form
                />
            })}
        </div>
    }
}

#[component]
fn ReferenceFormModal(
    project: Memo<Project>,
    editing: Option<Reference>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let initial = editing.as_ref().map(ReferenceForm::from_reference).unwrap_or_default();
    let is_edit = editing.is_some();
    let editing = StoredValue::new(editing);

    let (title, set_title) = signal(initial.title);
    let (url, set_url) = signal(initial.url);
    let (description, set_description) = signal(initial.description);
    let (source_type, set_source_type) = signal(initial.source_type);
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = ReferenceForm {
            title: title.get(),
            url: url.get(),
            description: description.get(),
            source_type: source_type.get(),
        };
        let reference = match editing.with_value(|e| form.build(e.as_ref(), Utc::now())) {
            Ok(reference) => reference,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        let id = project.with_untracked(|p| p.id.clone());

        set_submitting.set(true);
        spawn_local(async move {
            let result = api::client().save_reference(&id, reference).await;
            set_submitting.set(false);
            match result {
                Ok(_) => on_saved.run(()),
                Err(err) => {
                    log::error!("Failed to save reference: {}", err);
                    set_error.set(Some(err.message));
                }
            }
        });
    };

    view! {
        <div class="form-modal-overlay" on:click=move |_| on_cancel.run(())>
            <div class="form-modal" on:click=|ev| ev.stop_propagation()>
                <div class="form-header">
                    <h3>{if is_edit { "Edit Reference" } else { "Add Reference" }}</h3>
                    <button class="close-button" on:click=move |_| on_cancel.run(())>"✕"</button>
                </div>
                <form class="reference-form" on:submit=on_submit>
                    {move || error.get().map(|message| view! { <div class="form-error">{message}</div> })}
                    <div class="form-group">
                        <label for="reference-title">"Title *"</label>
                        <input
                            id="reference-title"
                            type="text"
                            placeholder="e.g., Coffee Table Inspiration"
                            prop:value=move || title.get()
                            on:input=move |ev| set_title.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="reference-url">"URL *"</label>
                        <input
                            id="reference-url"
                            type="text"
                            placeholder="https://example.com or example.com"
                            prop:value=move || url.get()
                            on:input=move |ev| set_url.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="reference-source">"Source Type"</label>
                        <select
                            id="reference-source"
                            on:change=move |ev| set_source_type.set(SourceType::from(event_target_value(&ev)))
                        >
                            {SourceType::KNOWN.iter().map(|option| {
                                let option = option.clone();
                                let label = format!("{} {}", source_icon(&option), option.label());
                                let value = option.to_string();
                                let is_selected = source_type.get_untracked() == option;
                                view! { <option value=value selected=is_selected>{label}</option> }
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="reference-description">"Description"</label>
                        <textarea
                            id="reference-description"
                            rows="3"
                            placeholder="Add notes about this reference..."
                            prop:value=move || description.get()
                            on:input=move |ev| set_description.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="form-actions">
                        <button type="button" class="cancel-button" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="submit-button" disabled=move || submitting.get()>
                            {move || match (submitting.get(), is_edit) {
                                (true, _) => "Saving...",
                                (false, true) => "Update Reference",
                                (false, false) => "Add Reference",
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
