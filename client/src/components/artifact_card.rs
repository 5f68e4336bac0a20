//! One generated design: header, status and sandboxed live preview.
//!
//! SYSTEM CONTEXT
//! ==============
//! The iframe document comes from [`preview::compose`]. The iframe is
//! rebuilt only when [`preview_key`] changes (another artifact, or the diff
//! side flips); inspect toggles are posted into the running document over
//! the bridge so scroll position and script state survive.

#[cfg(test)]
#[path = "artifact_card_test.rs"]
mod artifact_card_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::app::{spawn_operation, use_app_state, use_operations};
use crate::state::session::{Artifact, ArtifactStatus};
use crate::util::preview::{self, PREVIEW_SANDBOX, PreviewMode, preview_key};

/// What the card body shows. Changes remount the body; chunk updates to
/// an already shown preview do not.
#[derive(Clone, Debug, PartialEq, Eq)]
enum CardBody {
    Loading,
    Preview { key: String },
}

/// Failed artifacts carry their own error document, so they render through
/// the sandboxed preview like any other html.
fn card_body(artifact: Option<&Artifact>, key: String) -> CardBody {
    match artifact {
        Some(a) if a.status == ArtifactStatus::Error || !a.html.trim().is_empty() => CardBody::Preview { key },
        _ => CardBody::Loading,
    }
}

fn status_label(status: ArtifactStatus) -> &'static str {
    match status {
        ArtifactStatus::Streaming => "Generating",
        ArtifactStatus::Complete => "Ready",
        ArtifactStatus::Error => "Failed",
    }
}

fn status_class(status: ArtifactStatus) -> &'static str {
    match status {
        ArtifactStatus::Streaming => "artifact-card__status artifact-card__status--streaming",
        ArtifactStatus::Complete => "artifact-card__status artifact-card__status--complete",
        ArtifactStatus::Error => "artifact-card__status artifact-card__status--error",
    }
}

/// Card for the artifact at `index` in the current session.
#[component]
pub fn ArtifactCard(index: usize) -> impl IntoView {
    let state = use_app_state();
    let ops = use_operations();

    let artifact = Memo::new(move |_| {
        state.with(|s| s.current_session().and_then(|session| session.artifacts.get(index).cloned()))
    });
    let focused = Memo::new(move |_| state.with(|s| s.ui.focused_artifact == Some(index)));
    let show_original = Memo::new(move |_| focused.get() && state.with(|s| s.ui.showing_original()));
    let inspect = Memo::new(move |_| focused.get() && state.with(|s| s.ui.inspect_mode));

    let frame_key = Memo::new(move |_| {
        artifact.with(|a| a.as_ref().map(|a| preview_key(&a.id, show_original.get())).unwrap_or_default())
    });
    // The inspect flag is read untracked: it only seeds a fresh document.
    let srcdoc = Memo::new(move |_| {
        artifact.with(|a| {
            a.as_ref().map_or_else(String::new, |a| {
                let mode = PreviewMode {
                    inspect_enabled: inspect.get_untracked(),
                    diff_show_original: show_original.get(),
                    layout: None,
                };
                preview::compose(&a.html, a.original_html.as_deref(), &mode)
            })
        })
    });

    let frame_ref = NodeRef::<leptos::html::Iframe>::new();
    Effect::new(move |previous: Option<bool>| {
        let enabled = inspect.get();
        if previous.is_some_and(|p| p != enabled) {
            #[cfg(feature = "csr")]
            {
                if let Some(frame) = frame_ref.get_untracked() {
                    crate::net::bridge_host::post_to_frame(&frame, &bridge::Message::ToggleInspect { value: enabled });
                }
            }
        }
        enabled
    });

    let status = move || artifact.with(|a| a.as_ref().map_or(ArtifactStatus::Streaming, |a| a.status));
    let style_name = move || artifact.with(|a| a.as_ref().map(|a| a.style_name.clone()).unwrap_or_default());
    let body = Memo::new(move |_| artifact.with(|a| card_body(a.as_ref(), frame_key.get())));
    let busy = move || state.with(|s| s.is_loading) || status() == ArtifactStatus::Streaming;

    let card_class = move || {
        if focused.get() { "artifact-card artifact-card--focused" } else { "artifact-card" }
    };

    let on_focus = move |_| {
        if !focused.get_untracked() {
            state.update(|s| s.focus_artifact(index));
        }
    };
    let on_refresh = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        let target = state.with_untracked(|s| {
            let session = s.current_session()?;
            let artifact: &Artifact = session.artifacts.get(index)?;
            Some((session.id.clone(), artifact.id.clone()))
        });
        if let Some((session_id, artifact_id)) = target {
            spawn_operation(state, "refresh", async move { ops.refresh(&session_id, &artifact_id).await });
        }
    };

    view! {
        <article class=card_class>
            <header class="artifact-card__header" on:click=on_focus title="Open">
                <span class="artifact-card__style">{style_name}</span>
                <span class=move || status_class(status())>{move || status_label(status())}</span>
                <button class="artifact-card__refresh" disabled=busy on:click=on_refresh title="Regenerate">
                    "↻"
                </button>
            </header>
            <div class="artifact-card__body">
                {move || match body.get() {
                    CardBody::Loading => view! { <div class="artifact-card__loading">"Designing…"</div> }.into_any(),
                    CardBody::Preview { key } => {
                        view! {
                            <iframe
                                node_ref=frame_ref
                                data-preview-key=key
                                class="artifact-card__frame"
                                title=style_name
                                sandbox=PREVIEW_SANDBOX
                                srcdoc=move || srcdoc.get()
                            ></iframe>
                        }
                            .into_any()
                    }
                }}
            </div>
        </article>
    }
}
