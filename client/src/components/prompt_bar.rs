//! Bottom prompt input: new generations in grid mode, iteration requests
//! while an artifact is focused.

use leptos::prelude::*;

use crate::app::{spawn_operation, use_app_state, use_operations};
use crate::net::attachment::{Attachment, AttachmentKind};
use crate::net::prompts::PROMPT_SUGGESTIONS;

#[component]
pub fn PromptBar() -> impl IntoView {
    let state = use_app_state();
    let ops = use_operations();

    let input = RwSignal::new(String::new());
    let attachment = RwSignal::new(None::<Attachment>);

    let focused = move || state.with(|s| s.ui.focused_artifact.is_some());
    let is_loading = move || state.with(|s| s.is_loading);
    let show_suggestions =
        move || !focused() && input.with(String::is_empty) && state.with(|s| s.sessions().is_empty());

    let submit = move || {
        if state.with_untracked(|s| s.is_loading) {
            return;
        }
        let text = input.get_untracked();
        if state.with_untracked(|s| s.ui.focused_artifact.is_some()) {
            if text.trim().is_empty() {
                return;
            }
            input.set(String::new());
            spawn_operation(state, "iterate", async move { ops.iterate(&text).await });
        } else {
            let picked = attachment.get_untracked();
            if text.trim().is_empty() && picked.is_none() {
                return;
            }
            input.set(String::new());
            attachment.set(None);
            spawn_operation(state, "generate", async move { ops.generate(&text, picked).await });
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            submit();
        }
    };

    let on_pick = move |kind: AttachmentKind| {
        move |ev: leptos::ev::Event| {
            #[cfg(feature = "csr")]
            {
                let Some(file) = crate::net::attachment::picked_file(&ev) else {
                    return;
                };
                leptos::task::spawn_local(async move {
                    match Attachment::read(&file, kind).await {
                        Ok(read) => {
                            log::info!("attachment ready: name={} mime={}", read.name, read.mime_type);
                            attachment.set(Some(read));
                        }
                        Err(e) => {
                            log::warn!("failed to read attachment: name={} error={e}", file.name());
                            state.update(|s| s.notice = Some(format!("Could not read {}", file.name())));
                        }
                    }
                });
            }
            #[cfg(not(feature = "csr"))]
            let _ = (ev, kind);
        }
    };

    let placeholder = move || {
        if focused() { "Describe a change to this design…" } else { "Describe the dashboard you need…" }
    };
    let submit_label = move || if focused() { "Refine" } else { "Generate" };
    let attachment_label = move || {
        attachment.with(|a| {
            a.as_ref().map(|a| match a.kind {
                AttachmentKind::Image => format!("Image: {}", a.name),
                AttachmentKind::Data => format!("Data: {}", a.name),
            })
        })
    };

    view! {
        <div class="prompt-bar">
            <Show when=show_suggestions>
                <div class="prompt-bar__suggestions">
                    {PROMPT_SUGGESTIONS
                        .into_iter()
                        .map(|text| {
                            view! {
                                <button class="prompt-bar__suggestion" on:click=move |_| input.set(text.to_owned())>
                                    {text}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
            {move || {
                attachment_label()
                    .filter(|_| !focused())
                    .map(|label| {
                        view! {
                            <div class="prompt-bar__attachment">
                                <span>{label}</span>
                                <button on:click=move |_| attachment.set(None) title="Remove attachment">
                                    "×"
                                </button>
                            </div>
                        }
                    })
            }}
            <div class="prompt-bar__row">
                <Show when=move || !focused()>
                    <label class="prompt-bar__attach" title="Clone a screenshot">
                        "Image"
                        <input type="file" accept="image/*" hidden on:change=on_pick(AttachmentKind::Image)/>
                    </label>
                    <label class="prompt-bar__attach" title="Visualize a data file">
                        "Data"
                        <input
                            type="file"
                            accept=".csv,.json,.md,.txt,.pdf"
                            hidden
                            on:change=on_pick(AttachmentKind::Data)
                        />
                    </label>
                </Show>
                <textarea
                    class="prompt-bar__input"
                    rows="2"
                    placeholder=placeholder
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                ></textarea>
                <button class="prompt-bar__submit" disabled=is_loading on:click=move |_| submit()>
                    {submit_label}
                </button>
            </div>
        </div>
    }
}
