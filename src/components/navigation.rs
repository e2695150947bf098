//! Navigation Bar Component

use leptos::prelude::*;

use crate::components::LogPanel;
use crate::context::{use_app_context, Route};

#[component]
pub fn Navigation() -> impl IntoView {
    let ctx = use_app_context();

    let home_class = move || {
        if ctx.route.get() == Route::Home { "nav-link active" } else { "nav-link" }
    };
    let projects_class = move || {
        if ctx.route.get() == Route::Home { "nav-link" } else { "nav-link active" }
    };

    view! {
        <nav class="navigation">
            <div class="nav-container">
                <button class="nav-brand" on:click=move |_| ctx.navigate(Route::Home)>
                    <span class="nav-logo">"🔨"</span>
                    "DIYDash"
                </button>
                <div class="nav-links">
                    <button
                        class=home_class
                        on:click=move |_| ctx.navigate(Route::Home)
                    >
                        "Home"
                    </button>
                    <button
                        class=projects_class
                        on:click=move |_| ctx.navigate(Route::Projects)
                    >
                        "Projects"
                    </button>
                    <LogPanel />
                </div>
            </div>
        </nav>
    }
}
