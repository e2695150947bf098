//! Delete Confirm Button Component

use leptos::prelude::*;

/// Button that asks "Delete?" inline and only runs `on_confirm` after ✓
///
/// Clicks never bubble, so the button is safe inside clickable cards.
#[component]
pub fn DeleteConfirmButton(
    /// CSS class of the idle button
    #[prop(into)]
    button_class: String,
    #[prop(into, default = "×".to_string())] label: String,
    #[prop(into, default = "Delete?".to_string())] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (armed, set_armed) = signal(false);
    let button_class = StoredValue::new(button_class);
    let label = StoredValue::new(label);
    let prompt = StoredValue::new(prompt);

    let arm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        set_armed.set(true);
    };
    let disarm = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        set_armed.set(false);
    };
    let confirm = move |ev: web_sys::MouseEvent| {
        disarm(ev);
        on_confirm.run(());
    };

    move || {
        if armed.get() {
            view! {
                <span class="delete-confirm" role="group">
                    <span class="delete-confirm-text">{prompt.get_value()}</span>
                    <button class="confirm-btn" aria-label="Confirm delete" on:click=confirm>"✓"</button>
                    <button class="cancel-btn" aria-label="Cancel delete" on:click=disarm>"✗"</button>
                </span>
            }
            .into_any()
        } else {
            view! {
                <button class=button_class.get_value() title="Delete" on:click=arm>
                    {label.get_value()}
                </button>
            }
            .into_any()
        }
    }
}
