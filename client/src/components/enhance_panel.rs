//! AI enhancement picker for the focused artifact.

#[cfg(test)]
#[path = "enhance_panel_test.rs"]
mod enhance_panel_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::net::attachment::Attachment;
use crate::net::prompts::EnhanceKind;

/// Enhancement kinds grouped under their section headings, in panel order.
fn sections() -> Vec<(&'static str, Vec<EnhanceKind>)> {
    let mut out: Vec<(&'static str, Vec<EnhanceKind>)> = Vec::new();
    for kind in EnhanceKind::ALL {
        match out.last_mut() {
            Some((section, kinds)) if *section == kind.section() => kinds.push(kind),
            _ => out.push((kind.section(), vec![kind])),
        }
    }
    out
}

#[component]
pub fn EnhancePanel(
    #[prop(into)] busy: Signal<bool>,
    on_enhance: Callback<(EnhanceKind, Option<Attachment>)>,
) -> impl IntoView {
    let on_file = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            use crate::net::attachment::AttachmentKind;

            let Some(file) = crate::net::attachment::picked_file(&ev) else {
                return;
            };
            leptos::task::spawn_local(async move {
                match Attachment::read(&file, AttachmentKind::Data).await {
                    Ok(read) => on_enhance.run((EnhanceKind::FilePopulate, Some(read))),
                    Err(e) => log::warn!("failed to read data file: name={} error={e}", file.name()),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = ev;
    };

    let option = move |kind: EnhanceKind| {
        if kind == EnhanceKind::FilePopulate {
            view! {
                <label class="enhance-panel__option" class:enhance-panel__option--disabled=move || busy.get()>
                    <span class="enhance-panel__label">{kind.label()}</span>
                    <span class="enhance-panel__description">{kind.description()}</span>
                    <input
                        type="file"
                        accept=".txt,.pdf,.csv,.json,.md"
                        hidden
                        disabled=move || busy.get()
                        on:change=on_file
                    />
                </label>
            }
            .into_any()
        } else {
            view! {
                <button
                    class="enhance-panel__option"
                    disabled=move || busy.get()
                    on:click=move |_| on_enhance.run((kind, None))
                >
                    <span class="enhance-panel__label">{kind.label()}</span>
                    <span class="enhance-panel__description">{kind.description()}</span>
                </button>
            }
            .into_any()
        }
    };

    view! {
        <div class="enhance-panel">
            {sections()
                .into_iter()
                .map(|(title, kinds)| {
                    view! {
                        <section class="enhance-panel__section">
                            <h3 class="enhance-panel__heading">{title}</h3>
                            {kinds.into_iter().map(option).collect_view()}
                        </section>
                    }
                })
                .collect_view()}
        </div>
    }
}
