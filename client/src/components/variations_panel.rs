//! Launcher for design variations of the focused artifact.

use leptos::prelude::*;

use crate::net::prompts::VARIATION_DIRECTIONS;

#[component]
pub fn VariationsPanel(#[prop(into)] busy: Signal<bool>, on_generate: Callback<()>) -> impl IntoView {
    view! {
        <div class="variations-panel">
            <p class="variations-panel__hint">
                "Two new designs are added to this session, each reworking the current one in a different direction."
            </p>
            <ol class="variations-panel__directions">
                {VARIATION_DIRECTIONS
                    .into_iter()
                    .map(|direction| {
                        let title = direction.split('(').next().unwrap_or(direction).trim();
                        view! { <li>{title.to_owned()}</li> }
                    })
                    .collect_view()}
            </ol>
            <button
                class="variations-panel__generate"
                disabled=move || busy.get()
                on:click=move |_| on_generate.run(())
            >
                "Generate variations"
            </button>
        </div>
    }
}
