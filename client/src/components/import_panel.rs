//! Import an `.html` file as a new session, or restore exported sessions.

use leptos::prelude::*;

/// Which import a file input feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ImportTarget {
    Html,
    Sessions,
}

#[component]
pub fn ImportPanel(on_import_html: Callback<(String, String)>, on_import_sessions: Callback<String>) -> impl IntoView {
    let pick = move |target: ImportTarget| {
        move |ev: leptos::ev::Event| {
            #[cfg(feature = "csr")]
            {
                let Some(file) = crate::net::attachment::picked_file(&ev) else {
                    return;
                };
                leptos::task::spawn_local(async move {
                    let name = file.name();
                    match crate::net::attachment::read_text(&file).await {
                        Ok(text) => match target {
                            ImportTarget::Html => on_import_html.run((text, name)),
                            ImportTarget::Sessions => on_import_sessions.run(text),
                        },
                        Err(e) => log::warn!("failed to read import file: name={name} error={e}"),
                    }
                });
            }
            #[cfg(not(feature = "csr"))]
            let _ = (ev, target, on_import_html, on_import_sessions);
        }
    };

    view! {
        <div class="import-panel">
            <label class="import-panel__option">
                <span class="import-panel__label">"HTML file"</span>
                <span class="import-panel__description">"Open an existing dashboard as a new session."</span>
                <input type="file" accept=".html,text/html" hidden on:change=pick(ImportTarget::Html)/>
            </label>
            <label class="import-panel__option">
                <span class="import-panel__label">"Session backup"</span>
                <span class="import-panel__description">"Restore sessions from an exported JSON file."</span>
                <input type="file" accept=".json,application/json" hidden on:change=pick(ImportTarget::Sessions)/>
            </label>
        </div>
    }
}
