//! Header with drawer launchers and undo/redo.

use leptos::prelude::*;

use crate::app::use_app_state;
use crate::state::app::AppState;
use crate::state::drawer::DrawerMode;

#[component]
pub fn TopBar() -> impl IntoView {
    let state = use_app_state();

    let can_undo = move || state.with(AppState::can_undo);
    let can_redo = move || state.with(AppState::can_redo);
    let is_loading = move || state.with(|s| s.is_loading);
    let open = move |mode: DrawerMode| move |_: leptos::ev::MouseEvent| state.update(|s| s.open_drawer(mode));
    let active = move |mode: DrawerMode| move || state.with(|s| s.drawer.is_showing(mode));

    view! {
        <header class="top-bar">
            <button
                class="top-bar__button"
                class:top-bar__button--active=active(DrawerMode::History)
                on:click=open(DrawerMode::History)
                title="Session history"
            >
                "History"
            </button>
            <span class="top-bar__brand">"Dashboard Generator"</span>
            <Show when=is_loading>
                <span class="top-bar__busy">"Generating…"</span>
            </Show>
            <div class="top-bar__spacer"></div>
            <button
                class="top-bar__button"
                disabled=move || !can_undo()
                on:click=move |_| {
                    state.update(|s| {
                        s.undo();
                    });
                }
                title="Undo (Ctrl+Z)"
            >
                "Undo"
            </button>
            <button
                class="top-bar__button"
                disabled=move || !can_redo()
                on:click=move |_| {
                    state.update(|s| {
                        s.redo();
                    });
                }
                title="Redo (Ctrl+Shift+Z)"
            >
                "Redo"
            </button>
            <button
                class="top-bar__button"
                class:top-bar__button--active=active(DrawerMode::Templates)
                on:click=open(DrawerMode::Templates)
            >
                "Templates"
            </button>
            <button
                class="top-bar__button"
                class:top-bar__button--active=active(DrawerMode::Import)
                on:click=open(DrawerMode::Import)
            >
                "Import"
            </button>
            <button
                class="top-bar__button"
                class:top-bar__button--active=active(DrawerMode::Settings)
                on:click=open(DrawerMode::Settings)
            >
                "Settings"
            </button>
        </header>
    }
}
