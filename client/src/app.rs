//! Root component: state wiring, persistence and window listeners.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the single [`AppState`] signal from stored sessions and
//! settings, provides it (plus the operation runner and the debounced
//! session saver) as context, and keeps durable storage in step with it.
//! Everything below it reads that context; drawer panels get narrow props
//! from [`SideDrawer`] instead.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::future::Future;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::action_bar::ActionBar;
use crate::components::prompt_bar::PromptBar;
use crate::components::side_drawer::SideDrawer;
use crate::components::stage::Stage;
use crate::components::top_bar::TopBar;
use crate::net::gemini::GeminiGenerator;
use crate::net::generator::GenerateError;
use crate::net::operations::{BrowserTimer, Operations};
use crate::state::app::AppState;
use crate::state::settings::GenerationSettings;
use crate::util::persistence::{self, SessionSaver, SessionStore};

/// Operation runner bound to the app state and the Gemini backend.
pub type AppOperations = Operations<RwSignal<AppState>, GeminiGenerator, BrowserTimer>;

/// Debounced session writer, kept on the UI thread.
pub type Saver = StoredValue<SessionSaver, LocalStorage>;

/// Keyboard commands handled at window level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    /// Close the drawer, or leave focus mode when no drawer is open.
    Dismiss,
}

/// Map a key press to a shortcut. `editing` is true while a text field has
/// focus, where the browser's own undo applies.
#[must_use]
pub fn shortcut(key: &str, modifier: bool, shift: bool, editing: bool) -> Option<Shortcut> {
    match key {
        "Escape" => Some(Shortcut::Dismiss),
        _ if editing || !modifier => None,
        "z" | "Z" if shift => Some(Shortcut::Redo),
        "z" | "Z" => Some(Shortcut::Undo),
        "y" | "Y" => Some(Shortcut::Redo),
        _ => None,
    }
}

/// Apply a shortcut. Returns whether anything changed.
pub fn apply_shortcut(state: &mut AppState, shortcut: Shortcut) -> bool {
    match shortcut {
        Shortcut::Undo => state.undo(),
        Shortcut::Redo => state.redo(),
        Shortcut::Dismiss if state.drawer.is_open => {
            state.close_drawer();
            true
        }
        Shortcut::Dismiss if state.ui.focused_artifact.is_some() => {
            state.unfocus();
            true
        }
        Shortcut::Dismiss => false,
    }
}

/// Run an AI operation in the background. Refusals other than a missing
/// key (which the operation reports itself) become the visible notice.
pub fn spawn_operation<R: 'static>(
    state: RwSignal<AppState>,
    name: &'static str,
    operation: impl Future<Output = Result<R, GenerateError>> + 'static,
) {
    leptos::task::spawn_local(async move {
        match operation.await {
            Ok(_) => {}
            Err(GenerateError::MissingApiKey { .. }) => {}
            Err(err) => {
                log::warn!("{name} refused: {err}");
                state.update(|s| s.notice = Some(err.to_string()));
            }
        }
    });
}

pub fn use_app_state() -> RwSignal<AppState> {
    expect_context::<RwSignal<AppState>>()
}

pub fn use_operations() -> AppOperations {
    expect_context::<AppOperations>()
}

pub fn use_saver() -> Saver {
    expect_context::<Saver>()
}

/// Application root.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = SessionStore::browser();
    let sessions = store.load();
    let settings = GenerationSettings::load(store.backend());
    log::info!("app starting: stored_sessions={}", sessions.len());

    let state = RwSignal::new(AppState::new(sessions, settings));
    let saver: Saver = StoredValue::new_local(SessionSaver::new(store));
    provide_context(state);
    provide_context(AppOperations::new(state, GeminiGenerator, BrowserTimer));
    provide_context(saver);

    // Sessions: debounced write after every change except the initial load.
    let session_list = Memo::new(move |_| state.with(|s| s.sessions().to_vec()));
    Effect::new(move |loaded: Option<()>| {
        let list = session_list.get();
        if loaded.is_some() {
            saver.with_value(|s| s.schedule(list));
        }
    });

    // Settings: written through on every change.
    let settings = Memo::new(move |_| state.with(|s| s.settings.clone()));
    Effect::new(move |loaded: Option<()>| {
        let current = settings.get();
        if loaded.is_some() {
            if let Err(e) = current.save(&persistence::LocalStorage) {
                log::warn!("failed to save settings: {e}");
            }
        }
    });

    #[cfg(feature = "csr")]
    {
        let _ = crate::net::bridge_host::install_listener(state);
        let _ = window_event_listener(leptos::ev::pagehide, move |_| {
            saver.with_value(|s| {
                s.flush();
            });
        });
        let _ = window_event_listener(leptos::ev::keydown, move |ev: leptos::ev::KeyboardEvent| {
            use wasm_bindgen::JsCast;

            let editing = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                .is_some_and(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA"));
            let Some(action) = shortcut(&ev.key(), ev.ctrl_key() || ev.meta_key(), ev.shift_key(), editing) else {
                return;
            };
            if state.try_update(|s| apply_shortcut(s, action)).unwrap_or(false) {
                ev.prevent_default();
            }
        });
    }

    let notice = move || state.with(|s| s.notice.clone());
    let dismiss_notice = move |_| state.update(|s| s.notice = None);
    let is_focused = move || state.with(|s| s.ui.focused_artifact.is_some());

    view! {
        <Title text="Dashboard Generator"/>
        <div class="app">
            <TopBar/>
            <main class="app__main">
                <Stage/>
            </main>
            <Show when=is_focused>
                <ActionBar/>
            </Show>
            <PromptBar/>
            <SideDrawer/>
            {move || {
                notice()
                    .map(|text| {
                        view! {
                            <div class="notice" role="status">
                                <span class="notice__text">{text}</span>
                                <button class="notice__close" on:click=dismiss_notice title="Dismiss">
                                    "×"
                                </button>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
