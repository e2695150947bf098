//! Project Pictures Tab
//!
//! Gallery ordered by `order`, a lightbox, and a form that adds a picture
//! from an uploaded file or an existing URL.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, NewPicture, PictureSource};
use crate::components::project_details::spawn_mutation;
use crate::components::{DeleteConfirmButton, ErrorBanner};
use crate::details::{next_picture_order, picture_icon, sorted_pictures};
use crate::models::{Picture, PictureKind, Project};
use crate::upload::{self, EncodedFile};
use crate::validation::normalize_url;

#[component]
pub fn ProjectPictures(project: Memo<Project>, on_change: Callback<()>) -> impl IntoView {
    let (selected, set_selected) = signal::<Option<Picture>>(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (adding, set_adding) = signal(false);

    let pictures = Memo::new(move |_| project.with(|p| sorted_pictures(&p.pictures)));
    let project_id = move || project.with_untracked(|p| p.id.clone());

    let delete = move |picture_id: String| {
        let id = project_id();
        spawn_mutation(
            "delete picture",
            async move { api::client().delete_picture(&id, &picture_id).await },
            on_change,
            set_error,
        );
    };

    view! {
        <div class="project-pictures">
            <div class="pictures-header">
                <h3>"Project Gallery"</h3>
                <p>"View progress photos and reference images for this project"</p>
                <button class="btn btn-secondary" on:click=move |_| set_adding.update(|a| *a = !*a)>
                    {move || if adding.get() { "Cancel" } else { "+ Add Picture" }}
                </button>
            </div>

            <ErrorBanner message=error on_dismiss=move |_| set_error.set(None) />

            <Show when=move || adding.get()>
                <AddPictureForm
                    project=project
                    on_added=Callback::new(move |_: ()| {
                        set_adding.set(false);
                        on_change.run(());
                    })
                />
            </Show>

            <Show
                when=move || !pictures.with(Vec::is_empty)
                fallback=|| view! {
                    <div class="pictures-empty">
                        <div class="empty-state">
                            <span class="empty-icon">"📸"</span>
                            <h3>"No Pictures Yet"</h3>
                            <p>"Pictures will appear here as the project progresses."</p>
                        </div>
                    </div>
                }
            >
                <div class="pictures-grid">
                    <For
                        each=move || pictures.get()
                        key=|picture| picture.id.clone()
                        children=move |picture| {
                            let (failed, set_failed) = signal(false);
                            let for_lightbox = picture.clone();
                            let picture_id = picture.id.clone();
                            view! {
                                <div class="picture-card">
                                    <div class="picture-container">
                                        {move || if failed.get() {
                                            view! {
                                                <div class="image-error">
                                                    <span class="error-icon">"🖼️"</span>
                                                    <p>"Image not available"</p>
                                                </div>
                                            }.into_any()
                                        } else {
                                            let for_click = for_lightbox.clone();
                                            view! {
                                                <img
                                                    class="picture-image"
                                                    src=for_lightbox.url.clone().unwrap_or_default()
                                                    alt=for_lightbox.caption.clone()
                                                    on:click=move |_| set_selected.set(Some(for_click.clone()))
                                                    on:error=move |_| set_failed.set(true)
                                                />
                                            }.into_any()
                                        }}
                                    </div>
                                    <div class="picture-info">
                                        <div class="picture-type">
                                            <span class="type-icon">{picture_icon(&picture.kind)}</span>
                                            <span class="type-label">{picture.kind.label()}</span>
                                        </div>
                                        <p class="picture-caption">{picture.caption.clone()}</p>
                                        <DeleteConfirmButton
                                            button_class="delete-btn"
                                            on_confirm=move |_| delete(picture_id.clone())
                                        />
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>

            {move || selected.get().map(|picture| view! {
                <div class="lightbox-modal" on:click=move |_| set_selected.set(None)>
                    <div class="lightbox-content" on:click=|ev| ev.stop_propagation()>
                        <button class="close-button" on:click=move |_| set_selected.set(None)>"✕"</button>
                        <div class="lightbox-image-container">
                            <img
                                class="lightbox-image"
                                src=picture.url.clone().unwrap_or_default()
                                alt=picture.caption.clone()
                            />
                        </div>
                        <div class="lightbox-info">
                            <div class="lightbox-type">
                                <span class="type-icon">{picture_icon(&picture.kind)}</span>
                                <span class="type-label">{picture.kind.label()}</span>
                            </div>
                            <h4 class="lightbox-caption">{picture.caption.clone()}</h4>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}

#[component]
fn AddPictureForm(project: Memo<Project>, on_added: Callback<()>) -> impl IntoView {
    let (url, set_url) = signal(String::new());
    let (file, set_file) = signal::<Option<EncodedFile>>(None);
    let (caption, set_caption) = signal(String::new());
    let (kind, set_kind) = signal(PictureKind::default().to_string());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let on_file = move |ev: web_sys::Event| {
        let Ok(picked) = upload::selected_file(&ev) else {
            return;
        };
        spawn_local(async move {
            match upload::read_file(&picked).await {
                Ok(encoded) => set_file.set(Some(encoded)),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let source = match file.get() {
            Some(encoded) => PictureSource::Upload(encoded),
            None => match normalize_url(&url.get()) {
                Ok(url) => PictureSource::Url(url),
                Err(e) => {
                    set_error.set(Some(e.to_string()));
                    return;
                }
            },
        };
        let (id, order) = project.with_untracked(|p| (p.id.clone(), next_picture_order(&p.pictures)));
        let picture = NewPicture {
            id: None,
            source,
            caption: Some(caption.get()),
            kind: Some(PictureKind::from(kind.get())),
            order: Some(order),
        };

        set_saving.set(true);
        spawn_local(async move {
            let result = api::client().add_picture(&id, &picture).await;
            set_saving.set(false);
            match result {
                Ok(_) => on_added.run(()),
                Err(err) => set_error.set(Some(err.message)),
            }
        });
    };

    view! {
        <form class="add-form add-picture-form" on:submit=on_submit>
            {move || error.get().map(|message| view! { <span class="error-message">{message}</span> })}
            <label class="form-label">"Upload a photo"</label>
            <input type="file" accept="image/*" on:change=on_file />
            <label class="form-label">"...or image URL"</label>
            <input
                type="text"
                class="form-input"
                placeholder="https://"
                disabled=move || file.with(Option::is_some)
                prop:value=move || url.get()
                on:input=move |ev| set_url.set(event_target_value(&ev))
            />
            <input
                type="text"
                class="form-input"
                placeholder="Caption"
                prop:value=move || caption.get()
                on:input=move |ev| set_caption.set(event_target_value(&ev))
            />
            <select class="form-select" on:change=move |ev| set_kind.set(event_target_value(&ev))>
                {PictureKind::KNOWN.iter().map(|option| {
                    let value = option.to_string();
                    let is_default = *option == PictureKind::default();
                    view! { <option value=value selected=is_default>{option.label()}</option> }
                }).collect_view()}
            </select>
            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Add Picture" }}
            </button>
        </form>
    }
}
