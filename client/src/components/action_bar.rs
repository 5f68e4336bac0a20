//! Toolbar for the focused artifact: navigation, diff, inspect, revert,
//! drawer launchers and export.

use leptos::prelude::*;

use crate::app::use_app_state;
use crate::state::drawer::DrawerMode;
use crate::util::export;

#[component]
pub fn ActionBar() -> impl IntoView {
    let state = use_app_state();

    let has_snapshot = move || state.with(|s| s.focused_artifact().is_some_and(|(_, a)| a.original_html.is_some()));
    let editable = move || {
        state.with(|s| !s.is_loading && s.focused_artifact().is_some_and(|(_, a)| !a.is_streaming()))
    };
    let diff_mode = move || state.with(|s| s.ui.diff_mode);
    let showing_original = move || state.with(|s| s.ui.showing_original());
    let inspect_mode = move || state.with(|s| s.ui.inspect_mode);

    let open = move |mode: DrawerMode| move |_: leptos::ev::MouseEvent| state.update(|s| s.open_drawer(mode));

    let on_inspect = move |_| {
        state.update(|s| {
            let enabled = !s.ui.inspect_mode;
            if s.set_inspect(enabled).is_some() {
                log::debug!("inspect mode: enabled={enabled}");
            }
        });
    };
    let on_revert = move |_| {
        state.update(|s| {
            s.revert_focused();
        });
    };
    let on_export_html = move |_| {
        let file = state.with_untracked(|s| {
            s.focused_artifact()
                .map(|(session, artifact)| (export::html_file_name(&session.prompt), artifact.html.clone()))
        });
        if let Some((name, html)) = file {
            export::download(&name, "text/html", &html);
        }
    };
    let on_export_react = move |_| {
        let file = state.with_untracked(|s| {
            s.focused_artifact()
                .map(|(session, artifact)| (export::jsx_file_name(&session.prompt), export::react_component(&artifact.html)))
        });
        if let Some((name, jsx)) = file {
            export::download(&name, "text/javascript", &jsx);
        }
    };
    let on_export_config = move |_| {
        let config = state.with_untracked(|s| s.focused_artifact().map(|(session, artifact)| export::config_json(session, artifact)));
        match config {
            Some(Ok(json)) => export::download("dashboard-config.json", "application/json", &json),
            Some(Err(e)) => log::warn!("config export failed: {e}"),
            None => {}
        }
    };

    view! {
        <nav class="action-bar">
            <button class="action-bar__button" on:click=move |_| state.update(|s| s.unfocus())>
                "← Grid"
            </button>
            <span class="action-bar__divider"></span>
            <button
                class="action-bar__button"
                class:action-bar__button--active=diff_mode
                disabled=move || !has_snapshot()
                on:click=move |_| state.update(|s| s.ui.toggle_diff())
                title="Compare with the version before the last change"
            >
                "Diff"
            </button>
            <Show when=diff_mode>
                <button
                    class="action-bar__button"
                    class:action-bar__button--active=showing_original
                    on:click=move |_| state.update(|s| s.ui.toggle_show_original())
                >
                    {move || if showing_original() { "Showing before" } else { "Showing after" }}
                </button>
            </Show>
            <button
                class="action-bar__button"
                class:action-bar__button--active=inspect_mode
                on:click=on_inspect
                title="Click an element in the preview to select it"
            >
                "Inspect"
            </button>
            <button
                class="action-bar__button"
                disabled=move || !has_snapshot() || !editable()
                on:click=on_revert
            >
                "Revert"
            </button>
            <span class="action-bar__divider"></span>
            <button class="action-bar__button" disabled=move || !editable() on:click=open(DrawerMode::Enhance)>
                "Enhance"
            </button>
            <button class="action-bar__button" disabled=move || !editable() on:click=open(DrawerMode::Layouts)>
                "Layouts"
            </button>
            <button class="action-bar__button" disabled=move || !editable() on:click=open(DrawerMode::CodeEditor)>
                "Code"
            </button>
            <button class="action-bar__button" disabled=move || !editable() on:click=open(DrawerMode::Variations)>
                "Variations"
            </button>
            <span class="action-bar__divider"></span>
            <button class="action-bar__button" on:click=on_export_html>
                "Export HTML"
            </button>
            <button class="action-bar__button" on:click=on_export_react>
                "Export React"
            </button>
            <button class="action-bar__button" on:click=on_export_config>
                "Export config"
            </button>
        </nav>
    }
}
