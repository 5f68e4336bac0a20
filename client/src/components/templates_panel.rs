//! Built-in starter dashboards, filterable by category.

use leptos::prelude::*;

use crate::state::templates::{DashboardTemplate, TemplateCategory, templates_in};

#[component]
pub fn TemplatesPanel(on_apply: Callback<&'static DashboardTemplate>) -> impl IntoView {
    let category = RwSignal::new(None::<TemplateCategory>);

    let category_button = move |value: Option<TemplateCategory>| {
        let label = value.map_or("All", TemplateCategory::label);
        view! {
            <button
                class="templates-panel__category"
                class:templates-panel__category--active=move || category.get() == value
                on:click=move |_| category.set(value)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="templates-panel">
            <div class="templates-panel__categories">
                {category_button(None)}
                {TemplateCategory::ALL.into_iter().map(|c| category_button(Some(c))).collect_view()}
            </div>
            <div class="templates-panel__list">
                {move || {
                    templates_in(category.get())
                        .into_iter()
                        .map(|template| {
                            view! {
                                <button class="templates-panel__item" on:click=move |_| on_apply.run(template)>
                                    <span class="templates-panel__name">{template.name}</span>
                                    <span class="templates-panel__tag">{template.category.label()}</span>
                                    <span class="templates-panel__description">{template.description}</span>
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
