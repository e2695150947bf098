//! Log Panel Component

use leptos::prelude::*;

/// Recent log lines, newest first; empty when no logger was installed
pub(crate) fn recent_lines() -> Vec<String> {
    let mut lines = console_logger::installed()
        .map(|logger| logger.recent())
        .unwrap_or_default();
    lines.reverse();
    lines
}

/// Toggle that shows the in-memory log history
///
/// The history is read when the panel opens and on Refresh.
#[component]
pub fn LogPanel() -> impl IntoView {
    let (open, set_open) = signal(false);
    let lines = RwSignal::new(Vec::<String>::new());

    let toggle = move |_| {
        if !open.get_untracked() {
            lines.set(recent_lines());
        }
        set_open.update(|open| *open = !*open);
    };

    view! {
        <div class="log-panel">
            <button class="nav-link" class:active=move || open.get() on:click=toggle>
                "Logs"
            </button>
            <Show when=move || open.get()>
                <div class="log-panel-body">
                    <div class="log-panel-header">
                        <span>{move || format!("{} recent lines", lines.with(Vec::len))}</span>
                        <button class="btn-secondary" on:click=move |_| lines.set(recent_lines())>
                            "Refresh"
                        </button>
                    </div>
                    <pre class="log-lines">
                        {move || lines.get().join("\n")}
                    </pre>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_lines_newest_first() {
        assert!(recent_lines().is_empty());

        console_logger::init(log::LevelFilter::Info).unwrap();
        log::info!("panel first");
        log::warn!("panel second");

        let lines = recent_lines();
        let position = |msg: &str| lines.iter().position(|line| line.ends_with(msg)).unwrap();
        assert!(position("panel second") < position("panel first"));
    }
}
