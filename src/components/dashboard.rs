//! Dashboard Landing Page

use leptos::prelude::*;

use crate::context::{use_app_context, Route};

const FEATURES: &[(&str, &str, &str)] = &[
    ("📋", "Plan Projects", "Break every build into ordered tasks and track progress as you go."),
    ("📸", "Document Progress", "Keep progress shots, final photos and tutorial videos in one place."),
    ("🧰", "Manage Supplies", "List materials and tools, estimate costs and check off purchases."),
    ("🔗", "Save Inspiration", "Collect reference links from Pinterest, YouTube, Instagram and more."),
];

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="dashboard">
            <section class="dashboard-hero">
                <h1>"Welcome to DIYDash"</h1>
                <p>"Your workshop notebook for do-it-yourself projects."</p>
                <button class="btn btn-primary" on:click=move |_| ctx.navigate(Route::Projects)>
                    "View My Projects"
                </button>
            </section>
            <section class="feature-grid">
                {FEATURES.iter().map(|(icon, title, text)| view! {
                    <div class="feature-card">
                        <div class="feature-icon">{*icon}</div>
                        <h3>{*title}</h3>
                        <p>{*text}</p>
                    </div>
                }).collect_view()}
            </section>
        </div>
    }
}
