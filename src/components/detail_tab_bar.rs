//! Detail Tab Bar Component
//!
//! Tab bar for switching between a project's sub-collection views.

use leptos::prelude::*;

use crate::models::Project;
use crate::store::DetailTab;

#[component]
pub fn DetailTabBar(
    project: Memo<Project>,
    active: ReadSignal<DetailTab>,
    set_active: WriteSignal<DetailTab>,
) -> impl IntoView {
    view! {
        <nav class="project-tabs">
            {DetailTab::ALL.into_iter().map(|tab| {
                let tab_class = move || {
                    if active.get() == tab { "tab-button active" } else { "tab-button" }
                };
                let count = move || project.with(|p| tab.count(p));

                view! {
                    <button class=tab_class on:click=move |_| set_active.set(tab)>
                        {tab.icon()} " " {tab.label()}
                        <span class="tab-count">{count}</span>
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
