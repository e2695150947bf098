//! Project Materials & Tools Tab
//!
//! The shopping checklists here are ephemeral and reset with the page;
//! only a material's `purchased` flag is saved to the backend.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::project_details::spawn_mutation;
use crate::components::ErrorBanner;
use crate::details::{
    filter_materials, filter_tools, format_cost, group_materials, group_tools, material_categories,
    supply_icon, tool_categories, total_cost, Checklist, ALL_CATEGORIES,
};
use crate::models::{Material, Project, Tool};
use crate::validation::{new_local_id, require_title};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SupplyTab {
    Materials,
    Tools,
}

#[component]
pub fn ProjectMaterials(project: Memo<Project>, on_change: Callback<()>) -> impl IntoView {
    let (tab, set_tab) = signal(SupplyTab::Materials);
    let (category, set_category) = signal(ALL_CATEGORIES.to_string());
    let (essential_only, set_essential_only) = signal(false);
    let material_checks = RwSignal::new(Checklist::default());
    let tool_checks = RwSignal::new(Checklist::default());
    let (error, set_error) = signal::<Option<String>>(None);

    let cost = Memo::new(move |_| project.with(|p| total_cost(&p.materials)));
    let categories = Memo::new(move |_| {
        project.with(|p| match tab.get() {
            SupplyTab::Materials => material_categories(&p.materials),
            SupplyTab::Tools => tool_categories(&p.tools),
        })
    });
    let is_empty = move || project.with(|p| p.materials.is_empty() && p.tools.is_empty());

    let material_progress = move || {
        let ids = project.with(|p| p.materials.iter().map(|m| m.id.clone()).collect::<Vec<_>>());
        let checked = material_checks.with(|c| ids.iter().filter(|id| c.is_checked(id)).count());
        let percent = material_checks.with(|c| c.progress(ids.iter().map(String::as_str)));
        (checked, ids.len(), percent)
    };
    let tool_progress = move || {
        let ids = project.with(|p| p.tools.iter().map(|t| t.id.clone()).collect::<Vec<_>>());
        let checked = tool_checks.with(|c| ids.iter().filter(|id| c.is_checked(id)).count());
        let percent = tool_checks.with(|c| c.progress(ids.iter().map(String::as_str)));
        (checked, ids.len(), percent)
    };

    let switch_tab = move |next: SupplyTab| {
        set_tab.set(next);
        set_category.set(ALL_CATEGORIES.to_string());
    };
    let tab_class = move |which: SupplyTab| {
        if tab.get() == which {
            "tab-button active"
        } else {
            "tab-button"
        }
    };

    let toggle_purchased = Callback::new(move |material_id: String| {
        let id = project.with_untracked(|p| p.id.clone());
        spawn_mutation(
            "toggle purchased",
            async move { api::client().toggle_material_purchased(&id, &material_id).await },
            on_change,
            set_error,
        );
    });

    view! {
        <div class="project-materials">
            <div class="materials-header">
                <h3>"Materials & Tools"</h3>
                <p>"Everything you need to complete this project"</p>
            </div>

            <ErrorBanner message=error on_dismiss=move |_| set_error.set(None) />

            <Show
                when=move || !is_empty()
                fallback=|| view! {
                    <div class="materials-empty">
                        <div class="empty-state">
                            <span class="empty-icon">"🛠️"</span>
                            <h3>"No Materials or Tools Listed"</h3>
                            <p>"Material and tool requirements will appear here when available."</p>
                        </div>
                    </div>
                }
            >
                <Show when=move || { cost.get() > 0.0 }>
                    <div class="cost-overview">
                        <div class="cost-card">
                            <h4>"Estimated Total Cost"</h4>
                            <div class="cost-amount">{move || format_cost(cost.get())}</div>
                            <p class="cost-note">"Prices may vary by location and supplier"</p>
                        </div>
                    </div>
                </Show>

                <div class="progress-overview">
                    <div class="progress-item">
                        <div class="progress-label">
                            <span>"📦 Materials"</span>
                            <span>{move || { let (done, total, _) = material_progress(); format!("{}/{}", done, total) }}</span>
                        </div>
                        <div class="progress-bar">
                            <div class="progress-fill materials" style:width=move || format!("{}%", material_progress().2)></div>
                        </div>
                    </div>
                    <div class="progress-item">
                        <div class="progress-label">
                            <span>"🔨 Tools"</span>
                            <span>{move || { let (done, total, _) = tool_progress(); format!("{}/{}", done, total) }}</span>
                        </div>
                        <div class="progress-bar">
                            <div class="progress-fill tools" style:width=move || format!("{}%", tool_progress().2)></div>
                        </div>
                    </div>
                </div>

                <div class="materials-tabs">
                    <button class=move || tab_class(SupplyTab::Materials) on:click=move |_| switch_tab(SupplyTab::Materials)>
                        {move || format!("📦 Materials ({})", project.with(|p| p.materials.len()))}
                    </button>
                    <button class=move || tab_class(SupplyTab::Tools) on:click=move |_| switch_tab(SupplyTab::Tools)>
                        {move || format!("🔨 Tools ({})", project.with(|p| p.tools.len()))}
                    </button>
                </div>

                <div class="materials-filters">
                    <div class="filter-group">
                        <label for="category-filter">"Category:"</label>
                        <select
                            id="category-filter"
                            class="filter-select"
                            on:change=move |ev| set_category.set(event_target_value(&ev))
                        >
                            {move || categories.get().into_iter().map(|c| {
                                let label = if c == ALL_CATEGORIES {
                                    "All Categories".to_string()
                                } else {
                                    format!("{} {}", supply_icon(&c), c)
                                };
                                let is_selected = category.get_untracked() == c;
                                view! { <option value=c selected=is_selected>{label}</option> }
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="filter-group">
                        <label class="checkbox-filter">
                            <input
                                type="checkbox"
                                prop:checked=move || essential_only.get()
                                on:change=move |ev| set_essential_only.set(event_target_checked(&ev))
                            />
                            <span class="checkmark"></span>
                            "Essential items only"
                        </label>
                    </div>
                </div>

                <div class="tab-content">
                    {move || match tab.get() {
                        SupplyTab::Materials => {
                            let materials = project.with(|p| {
                                filter_materials(&p.materials, &category.get(), essential_only.get())
                            });
                            view! {
                                <MaterialsList
                                    materials=materials
                                    checklist=material_checks
                                    on_purchased=toggle_purchased
                                />
                            }.into_any()
                        }
                        SupplyTab::Tools => {
                            let tools = project.with(|p| {
                                filter_tools(&p.tools, &category.get(), essential_only.get())
                            });
                            view! { <ToolsList tools=tools checklist=tool_checks /> }.into_any()
                        }
                    }}
                </div>
            </Show>

            <AddMaterialForm project=project on_added=on_change />
        </div>
    }
}

#[component]
fn MaterialsList(
    materials: Vec<Material>,
    checklist: RwSignal<Checklist>,
    on_purchased: Callback<String>,
) -> impl IntoView {
    if materials.is_empty() {
        return view! {
            <div class="empty-filtered">
                <p>"No materials match the current filters."</p>
            </div>
        }
        .into_any();
    }

    view! {
        <div class="materials-list">
            {group_materials(&materials).into_iter().map(|(category, members)| view! {
                <div class="category-section">
                    <h5 class="category-header">
                        <span class="category-icon">{supply_icon(&category)}</span>
                        {category.clone()}
                        <span class="category-count">{format!("({})", members.len())}</span>
                    </h5>
                    <div class="items-grid">
                        {members.into_iter().map(|material| {
                            let id = material.id.clone();
                            let check_id = id.clone();
                            let purchase_id = id.clone();
                            let is_checked = checked_state(checklist, id);
                            let purchased_class = if material.purchased { "purchase-btn purchased" } else { "purchase-btn" };
                            view! {
                                <div class="material-item" class:checked=is_checked>
                                    <div class="item-checkbox">
                                        <input
                                            type="checkbox"
                                            prop:checked=is_checked
                                            on:change=move |_| checklist.update(|c| c.toggle(&check_id))
                                        />
                                        <span class="checkmark">"✓"</span>
                                    </div>
                                    <div class="item-content">
                                        <div class="item-header">
                                            <h6 class="item-name">{material.name.clone()}</h6>
                                            {material.essential.then(|| view! { <span class="essential-badge">"Essential"</span> })}
                                        </div>
                                        <div class="item-details">
                                            <p class="item-quantity">"Quantity: " {material.quantity.clone()}</p>
                                            <p class="item-specification">{material.specification.clone()}</p>
                                            {material.estimated_cost.map(|cost| view! {
                                                <p class="item-cost">"Est. cost: " {format_cost(cost)}</p>
                                            })}
                                            {(!material.supplier.is_empty()).then(|| view! {
                                                <p class="item-supplier">"Supplier: " {material.supplier.clone()}</p>
                                            })}
                                        </div>
                                        <button class=purchased_class on:click=move |_| on_purchased.run(purchase_id.clone())>
                                            {if material.purchased { "🛒 Purchased" } else { "Mark purchased" }}
                                        </button>
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                </div>
            }).collect_view()}
        </div>
    }
    .into_any()
}

/// Copyable view of one row's checked state, shared by its class and checkbox
fn checked_state(checklist: RwSignal<Checklist>, id: String) -> Memo<bool> {
    Memo::new(move |_| checklist.with(|c| c.is_checked(&id)))
}

#[component]
fn ToolsList(tools: Vec<Tool>, checklist: RwSignal<Checklist>) -> impl IntoView {
    if tools.is_empty() {
        return view! {
            <div class="empty-filtered">
                <p>"No tools match the current filters."</p>
            </div>
        }
        .into_any();
    }

    view! {
        <div class="tools-list">
            {group_tools(&tools).into_iter().map(|(category, members)| view! {
                <div class="category-section">
                    <h5 class="category-header">
                        <span class="category-icon">{supply_icon(&category)}</span>
                        {category.clone()}
                        <span class="category-count">{format!("({})", members.len())}</span>
                    </h5>
                    <div class="items-grid">
                        {members.into_iter().map(|tool| {
                            let id = tool.id.clone();
                            let check_id = id.clone();
                            let is_checked = checked_state(checklist, id);
                            let alternatives = tool.alternatives.join(", ");
                            view! {
                                <div class="tool-item" class:checked=is_checked>
                                    <div class="item-checkbox">
                                        <input
                                            type="checkbox"
                                            prop:checked=is_checked
                                            on:change=move |_| checklist.update(|c| c.toggle(&check_id))
                                        />
                                        <span class="checkmark">"✓"</span>
                                    </div>
                                    <div class="item-content">
                                        <div class="item-header">
                                            <h6 class="item-name">{tool.name.clone()}</h6>
                                            {tool.essential.then(|| view! { <span class="essential-badge">"Essential"</span> })}
                                        </div>
                                        <p class="item-description">{tool.description.clone()}</p>
                                        {(!alternatives.is_empty()).then(|| view! {
                                            <p class="item-alternatives">"Alternatives: " {alternatives}</p>
                                        })}
                                    </div>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                </div>
            }).collect_view()}
        </div>
    }
    .into_any()
}

#[component]
fn AddMaterialForm(project: Memo<Project>, on_added: Callback<()>) -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (quantity, set_quantity) = signal(String::new());
    let (cost, set_cost) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (essential, set_essential) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name_text = match require_title(&name.get()) {
            Ok(n) => n,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        let material = Material {
            id: new_local_id("mat"),
            name: name_text,
            quantity: quantity.get().trim().to_string(),
            estimated_cost: cost.get().trim().parse::<f64>().ok(),
            category: category.get().trim().to_string(),
            essential: essential.get(),
            ..Default::default()
        };
        let id = project.with_untracked(|p| p.id.clone());

        spawn_local(async move {
            match api::client().add_material(&id, material).await {
                Ok(_) => {
                    set_name.set(String::new());
                    set_quantity.set(String::new());
                    set_cost.set(String::new());
                    set_error.set(None);
                    on_added.run(());
                }
                Err(err) => set_error.set(Some(err.message)),
            }
        });
    };

    view! {
        <form class="add-form add-material-form" on:submit=on_submit>
            <input
                type="text"
                class="form-input"
                placeholder="Material name"
                prop:value=move || name.get()
                on:input=move |ev| {
                    set_error.set(None);
                    set_name.set(event_target_value(&ev));
                }
            />
            <input
                type="text"
                class="form-input"
                placeholder="Quantity"
                prop:value=move || quantity.get()
                on:input=move |ev| set_quantity.set(event_target_value(&ev))
            />
            <input
                type="number"
                step="0.01"
                min="0"
                class="form-input"
                placeholder="Est. cost"
                prop:value=move || cost.get()
                on:input=move |ev| set_cost.set(event_target_value(&ev))
            />
            <input
                type="text"
                class="form-input"
                placeholder="Category (Hardware)"
                prop:value=move || category.get()
                on:input=move |ev| set_category.set(event_target_value(&ev))
            />
            <label class="checkbox-filter">
                <input
                    type="checkbox"
                    prop:checked=move || essential.get()
                    on:change=move |ev| set_essential.set(event_target_checked(&ev))
                />
                "Essential"
            </label>
            <button type="submit" class="btn btn-primary">"Add Material"</button>
            {move || error.get().map(|message| view! { <span class="error-message">{message}</span> })}
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_state_follows_checklist() {
        let owner = Owner::new();
        owner.set();

        let checklist = RwSignal::new(Checklist::default());
        let oak = checked_state(checklist, "m1".to_string());
        let glue = checked_state(checklist, "m2".to_string());
        assert!(!oak.get_untracked());

        checklist.update(|c| c.toggle("m1"));
        assert!(oak.get_untracked());
        assert!(!glue.get_untracked());

        checklist.update(|c| c.toggle("m1"));
        assert!(!oak.get_untracked());
    }
}
