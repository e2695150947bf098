//! DIYDash Frontend App
//!
//! Root component: provides the global store and context, follows the
//! location hash, and renders the page for the current route.

use leptos::ev;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{Dashboard, Navigation, ProjectDetails, ProjectsList};
use crate::context::{AppContext, Route};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    // State
    let store = Store::new(AppState::default());
    let (route, set_route) = signal(AppContext::initial_route());
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    // Provide context to all children
    provide_context(store);
    let ctx = AppContext::new((route, set_route), (reload_trigger, set_reload_trigger));
    provide_context(ctx);

    // Back/forward buttons and hand-edited URLs
    let handle = window_event_listener(ev::hashchange, move |_| ctx.sync_from_location());
    on_cleanup(move || handle.remove());

    view! {
        <div class="app">
            <Navigation />
            <main class="main-content">
                {move || match route.get() {
                    Route::Home => view! { <Dashboard /> }.into_any(),
                    Route::Projects => view! { <ProjectsList /> }.into_any(),
                    Route::Project(id) => view! { <ProjectDetails project_id=id /> }.into_any(),
                }}
            </main>
        </div>
    }
}
