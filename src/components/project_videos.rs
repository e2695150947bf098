//! Project Videos Tab
//!
//! Videos grouped by type, an embedded player for the selected one, and a
//! form that adds a video by link or by file upload.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, NewVideo, VideoSource};
use crate::components::ErrorBanner;
use crate::details::{embed_url, filter_videos, group_videos, video_icon, video_kinds, ALL_CATEGORIES};
use crate::models::{Project, Video, VideoKind};
use crate::upload::{self, EncodedFile};
use crate::validation::normalize_url;

#[component]
pub fn ProjectVideos(project: Memo<Project>, on_change: Callback<()>) -> impl IntoView {
    let (filter, set_filter) = signal(ALL_CATEGORIES.to_string());
    let (selected, set_selected) = signal::<Option<Video>>(None);
    let (adding, set_adding) = signal(false);

    let selected_kind = move || {
        let value = filter.get();
        (value != ALL_CATEGORIES).then(|| VideoKind::from(value))
    };
    let kinds = Memo::new(move |_| project.with(|p| video_kinds(&p.videos)));
    let filtered = Memo::new(move |_| {
        let kind = selected_kind();
        project.with(|p| filter_videos(&p.videos, kind.as_ref()))
    });

    let on_play = Callback::new(move |video: Video| set_selected.set(Some(video)));
    let card_list = move |videos: Vec<Video>| {
        view! {
            <div class="type-videos">
                {videos.into_iter().map(|video| view! { <VideoCard video=video on_play=on_play /> }).collect_view()}
            </div>
        }
    };

    view! {
        <div class="project-videos">
            <div class="videos-header">
                <h3>"Videos & References"</h3>
                <p>"Watch tutorials, progress updates, and reference materials"</p>
                <button class="btn btn-secondary" on:click=move |_| set_adding.update(|a| *a = !*a)>
                    {move || if adding.get() { "Cancel" } else { "+ Add Video" }}
                </button>
            </div>

            <Show when=move || adding.get()>
                <AddVideoForm
                    project=project
                    on_added=Callback::new(move |_: ()| {
                        set_adding.set(false);
                        on_change.run(());
                    })
                />
            </Show>

            <div class="type-filter">
                <label for="type-select">"Filter by type:"</label>
                <select id="type-select" class="type-select" on:change=move |ev| set_filter.set(event_target_value(&ev))>
                    <option value=ALL_CATEGORIES selected=move || filter.get() == ALL_CATEGORIES>"All Types"</option>
                    <For
                        each=move || kinds.get()
                        key=|kind| kind.to_string()
                        children=move |kind| {
                            let value = kind.to_string();
                            let label = format!("{} {}", video_icon(&kind), kind.label());
                            let is_selected = {
                                let value = value.clone();
                                move || filter.get() == value
                            };
                            view! { <option value=value selected=is_selected>{label}</option> }
                        }
                    />
                </select>
            </div>

            <div class="videos-list">
                {move || {
                    let videos = filtered.get();
                    if videos.is_empty() {
                        view! {
                            <div class="empty-state">
                                <span class="empty-icon">"🎥"</span>
                                <h3>"No Videos Yet"</h3>
                                <p>"Tutorial videos and progress updates will appear here."</p>
                            </div>
                        }.into_any()
                    } else if selected_kind().is_none() {
                        group_videos(&videos).into_iter().map(|(kind, members)| view! {
                            <div class="type-group">
                                <h4 class="type-title">
                                    <span class="type-icon">{video_icon(&kind)}</span>
                                    {kind.label()}
                                    <span class="type-count">{format!("({})", members.len())}</span>
                                </h4>
                                {card_list(members)}
                            </div>
                        }).collect_view().into_any()
                    } else {
                        card_list(videos).into_any()
                    }
                }}
            </div>

            {move || selected.get().map(|video| {
                let src = embed_url(video.url.as_deref().unwrap_or_default());
                view! {
                    <div class="video-modal" on:click=move |_| set_selected.set(None)>
                        <div class="video-modal-content" on:click=|ev| ev.stop_propagation()>
                            <button class="close-button" on:click=move |_| set_selected.set(None)>"✕"</button>
                            <div class="video-container">
                                <iframe
                                    class="video-iframe"
                                    src=src
                                    title=video.title.clone()
                                    allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                                    allowfullscreen=true
                                ></iframe>
                            </div>
                            <div class="video-info">
                                <div class="video-type">
                                    <span class="type-icon">{video_icon(&video.kind)}</span>
                                    <span class="type-label">{video.kind.label()}</span>
                                    <span class="video-duration">"⏱️ " {video.duration.clone()}</span>
                                </div>
                                <h4 class="video-title">{video.title.clone()}</h4>
                                <p class="video-description">{video.description.clone()}</p>
                            </div>
                        </div>
                    </div>
                }
            })}
        </div>
    }
}

#[component]
fn VideoCard(video: Video, on_play: Callback<Video>) -> impl IntoView {
    let (thumbnail_failed, set_thumbnail_failed) = signal(false);
    let has_thumbnail = !video.thumbnail.is_empty();
    let thumbnail = video.thumbnail.clone();
    let title = video.title.clone();
    let for_play = video.clone();

    view! {
        <div class="video-card">
            <div class="video-thumbnail-container">
                {move || if has_thumbnail && !thumbnail_failed.get() {
                    view! {
                        <img
                            class="video-thumbnail"
                            src=thumbnail.clone()
                            alt=title.clone()
                            on:error=move |_| set_thumbnail_failed.set(true)
                        />
                    }.into_any()
                } else {
                    view! {
                        <div class="thumbnail-error">
                            <span class="error-icon">"🎥"</span>
                            <p>"Thumbnail not available"</p>
                        </div>
                    }.into_any()
                }}
                <div class="video-overlay">
                    <button class="play-button" on:click=move |_| on_play.run(for_play.clone())>
                        "▶️ Play"
                    </button>
                </div>
                <div class="video-duration-badge">{video.duration.clone()}</div>
            </div>
            <div class="video-card-info">
                <div class="video-card-type">
                    <span class="type-icon">{video_icon(&video.kind)}</span>
                    <span class="type-label">{video.kind.label()}</span>
                </div>
                <h5 class="video-card-title">{video.title.clone()}</h5>
                <p class="video-card-description">{video.description.clone()}</p>
            </div>
        </div>
    }
}

#[component]
fn AddVideoForm(project: Memo<Project>, on_added: Callback<()>) -> impl IntoView {
    let (url, set_url) = signal(String::new());
    let (file, set_file) = signal::<Option<EncodedFile>>(None);
    let (title, set_title) = signal(String::new());
    let (kind, set_kind) = signal(VideoKind::default().to_string());
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
            Some(encoded) => VideoSource::Upload(encoded),
            None => match normalize_url(&url.get()) {
                Ok(url) => VideoSource::Url(url),
                Err(e) => {
                    set_error.set(Some(e.to_string()));
                    return;
                }
            },
        };
        let video = NewVideo {
            id: None,
            source,
            title: Some(title.get().trim().to_string()),
            description: None,
            kind: Some(VideoKind::from(kind.get())),
            duration: None,
            thumbnail: None,
        };
        let id = project.with_untracked(|p| p.id.clone());

        set_saving.set(true);
        spawn_local(async move {
            let result = api::client().add_video(&id, &video).await;
            set_saving.set(false);
            match result {
                Ok(_) => on_added.run(()),
                Err(err) => set_error.set(Some(err.message)),
            }
        });
    };

    view! {
        <form class="add-form add-video-form" on:submit=on_submit>
            <ErrorBanner message=error on_dismiss=move |_| set_error.set(None) />
            <input
                type="text"
                class="form-input"
                placeholder="YouTube, Vimeo or video URL"
                disabled=move || file.with(Option::is_some)
                prop:value=move || url.get()
                on:input=move |ev| set_url.set(event_target_value(&ev))
            />
            <label class="form-label">"...or upload a video file"</label>
            <input type="file" accept="video/*" on:change=on_file />
            <input
                type="text"
                class="form-input"
                placeholder="Title"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <select class="form-select" on:change=move |ev| set_kind.set(event_target_value(&ev))>
                {VideoKind::KNOWN.iter().map(|option| {
                    let is_default = *option == VideoKind::default();
                    view! { <option value=option.to_string() selected=is_default>{option.label()}</option> }
                }).collect_view()}
            </select>
            <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Add Video" }}
            </button>
        </form>
    }
}
