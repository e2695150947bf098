//! Create Project Modal
//!
//! Title, description, status and an image given either as a URL or as an
//! uploaded file. Uploaded files are sent as base64 with the create call.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::project_card::FALLBACK_IMAGE;
use crate::error::AppError;
use crate::models::{Project, Status};
use crate::store::{dispatch, use_app_store, Action};
use crate::upload::{self, EncodedFile};
use crate::validation::ProjectForm;

async fn submit(form: ProjectForm) -> Result<Project, AppError> {
    let new_project = form.build()?;
    Ok(api::client().create_project(&new_project).await?)
}

#[component]
pub fn CreateProject() -> impl IntoView {
    let store = use_app_store();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (status, set_status) = signal(Status::Planning.to_string());
    let (image_url, set_image_url) = signal(String::new());
    let (upload, set_upload) = signal::<Option<EncodedFile>>(None);
    let (title_error, set_title_error) = signal::<Option<String>>(None);
    let (submit_error, set_submit_error) = signal::<Option<String>>(None);
    let (creating, set_creating) = signal(false);

    let preview = move || {
        upload
            .get()
            .map(|file| file.to_data_url())
            .or_else(|| Some(image_url.get()).filter(|url| !url.trim().is_empty()))
            .unwrap_or_else(|| FALLBACK_IMAGE.to_string())
    };

    let close = move || dispatch(&store, Action::CloseCreate);

    let on_file = move |ev: web_sys::Event| {
        let file = match upload::selected_file(&ev) {
            Ok(file) => file,
            Err(_) => return,
        };
        spawn_local(async move {
            match upload::read_file(&file).await {
                Ok(encoded) => {
                    log::debug!("Picked image of {} bytes", encoded.decoded_len());
                    set_upload.set(Some(encoded));
                }
                Err(e) => set_submit_error.set(Some(AppError::from(e).to_string())),
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = ProjectForm {
            title: title.get(),
            description: description.get(),
            status: Status::from(status.get()),
            image_url: image_url.get(),
            upload: upload.get(),
        };

        set_submit_error.set(None);
        set_creating.set(true);
        spawn_local(async move {
            let result = submit(form).await;
            set_creating.set(false);
            match result {
                Ok(project) => {
                    log::info!("Created project {}", project.id);
                    dispatch(&store, Action::ProjectCreated(project));
                }
                Err(AppError::Validation(e)) => set_title_error.set(Some(e.to_string())),
                Err(e) => {
                    if !e.is_local() {
                        log::error!("Failed to create project: {}", e);
                    }
                    set_submit_error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="create-project-overlay" on:click=move |_| close()>
            <div class="create-project-modal" on:click=|ev| ev.stop_propagation()>
                <div class="create-project-header">
                    <h2>"Create New Project"</h2>
                    <button class="create-project-close" aria-label="Close" on:click=move |_| close()>
                        "×"
                    </button>
                </div>

                <form class="create-project-form" on:submit=on_submit>
                    {move || submit_error.get().map(|message| view! {
                        <div class="form-error-banner">
                            <span class="error-icon">"⚠️"</span>
                            <span>{message}</span>
                        </div>
                    })}

                    <div class="form-section">
                        <label class="form-label">"Project Image"</label>
                        <div class="image-preview-container">
                            <img class="image-preview" src=preview alt="Project preview" />
                            <label for="image-upload" class="image-change-button">"Change Image"</label>
                            <input
                                type="file"
                                id="image-upload"
                                accept="image/*"
                                class="image-upload-input"
                                on:change=on_file
                            />
                        </div>
                        <input
                            type="url"
                            class="form-input"
                            placeholder="...or paste an image URL"
                            prop:value=move || image_url.get()
                            on:input=move |ev| {
                                set_upload.set(None);
                                set_image_url.set(event_target_value(&ev));
                            }
                        />
                    </div>

                    <div class="form-section">
                        <label for="title" class="form-label">
                            "Project Title " <span class="required">"*"</span>
                        </label>
                        <input
                            type="text"
                            id="title"
                            placeholder="e.g., Wooden Coffee Table"
                            class=move || if title_error.get().is_some() { "form-input input-error" } else { "form-input" }
                            prop:value=move || title.get()
                            on:input=move |ev| {
                                set_title_error.set(None);
                                set_title.set(event_target_value(&ev));
                            }
                        />
                        {move || title_error.get().map(|message| view! {
                            <span class="error-message">{message}</span>
                        })}
                    </div>

                    <div class="form-section">
                        <label for="description" class="form-label">"Description"</label>
                        <textarea
                            id="description"
                            rows="4"
                            class="form-textarea"
                            placeholder="Describe your project..."
                            prop:value=move || description.get()
                            on:input=move |ev| set_description.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-section">
                        <label for="status" class="form-label">"Status"</label>
                        <select
                            id="status"
                            class="form-select"
                            on:change=move |ev| set_status.set(event_target_value(&ev))
                        >
                            {Status::KNOWN.iter().map(|option| {
                                let value = option.to_string();
                                let selected = {
                                    let value = value.clone();
                                    move || status.get() == value
                                };
                                view! {
                                    <option value=value.clone() selected=selected>{value.clone()}</option>
                                }
                            }).collect_view()}
                        </select>
                    </div>

                    <div class="form-actions">
                        <button type="button" class="btn btn-secondary" on:click=move |_| close()>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || creating.get()>
                            {move || if creating.get() { "Creating..." } else { "Create Project" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
