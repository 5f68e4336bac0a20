//! Layout picker with live thumbnails of the focused artifact.

use leptos::prelude::*;

use crate::util::layout::{LAYOUTS, Layout, thumbnail_document};
use crate::util::preview::THUMBNAIL_SANDBOX;

/// `base_html` is the artifact's pre-layout html; without it thumbnails show
/// each layout's own skeleton.
#[component]
pub fn LayoutsPanel(base_html: Option<String>, on_apply: Callback<&'static Layout>) -> impl IntoView {
    view! {
        <div class="layouts-panel">
            {LAYOUTS
                .iter()
                .map(|layout| {
                    let doc = thumbnail_document(base_html.as_deref(), layout);
                    view! {
                        <button class="layouts-panel__option" on:click=move |_| on_apply.run(layout)>
                            <iframe
                                class="layouts-panel__thumbnail"
                                title=layout.name
                                sandbox=THUMBNAIL_SANDBOX
                                srcdoc=doc
                                tabindex="-1"
                            ></iframe>
                            <span class="layouts-panel__name">{layout.name}</span>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
