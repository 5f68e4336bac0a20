//! Direct html editing for the focused artifact.
//!
//! The element last picked in inspect mode is shown beside the editor so
//! the user can find it in the source.

use leptos::prelude::*;

#[component]
pub fn CodeEditorPanel(
    html: String,
    #[prop(into)] selected: Signal<Option<String>>,
    on_save: Callback<String>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let draft = RwSignal::new(html.clone());
    let dirty = move || draft.with(|d| *d != html);

    view! {
        <div class="code-editor">
            {move || {
                selected
                    .get()
                    .map(|snippet| {
                        view! {
                            <div class="code-editor__selection">
                                <span class="code-editor__selection-label">"Selected element"</span>
                                <pre class="code-editor__snippet">{snippet}</pre>
                            </div>
                        }
                    })
            }}
            <textarea
                class="code-editor__input"
                spellcheck="false"
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            ></textarea>
            <div class="code-editor__actions">
                <button on:click=move |_| on_cancel.run(())>"Cancel"</button>
                <button
                    class="code-editor__save"
                    disabled=move || !dirty()
                    on:click=move |_| on_save.run(draft.get_untracked())
                >
                    "Save"
                </button>
            </div>
        </div>
    }
}
