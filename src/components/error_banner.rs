//! Error Banner Component

use leptos::prelude::*;

/// Dismissible error message; renders nothing while `message` is `None`
#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(into)] on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="error-banner" role="alert">
                <span class="error-icon">"⚠️"</span>
                <span class="error-text">{move || message.get().unwrap_or_default()}</span>
                <button class="error-dismiss" on:click=move |_| on_dismiss.run(())>"×"</button>
            </div>
        </Show>
    }
}
