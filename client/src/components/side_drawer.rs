//! Slide-over drawer hosting one panel at a time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The drawer descriptor in [`AppState`] decides which panel is mounted.
//! This component is the only place that turns the shared state into panel
//! props and panel callbacks into state changes; panels themselves never
//! touch context.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::app::{spawn_operation, use_app_state, use_operations, use_saver};
use crate::components::code_editor_panel::CodeEditorPanel;
use crate::components::enhance_panel::EnhancePanel;
use crate::components::history_panel::{HistoryPanel, MetaEdit};
use crate::components::import_panel::ImportPanel;
use crate::components::layouts_panel::LayoutsPanel;
use crate::components::settings_panel::SettingsPanel;
use crate::components::templates_panel::TemplatesPanel;
use crate::components::variations_panel::VariationsPanel;
use crate::net::attachment::Attachment;
use crate::net::prompts::EnhanceKind;
use crate::state::app::AppState;
use crate::state::drawer::{DrawerData, DrawerMode};
use crate::state::settings::GenerationSettings;
use crate::state::templates::DashboardTemplate;
use crate::util::export;
use crate::util::layout::Layout;
use crate::util::persistence::SessionSaver;
use crate::util::time::now_ms;

#[component]
pub fn SideDrawer() -> impl IntoView {
    let state = use_app_state();
    let ops = use_operations();
    let saver = use_saver();

    let active = Memo::new(move |_| state.with(|s| s.drawer.active()));
    let title = move || state.with(|s| s.drawer.title.clone());
    let drawer_class = move || {
        let side = if active.get().is_some_and(DrawerMode::slides_from_left) {
            "side-drawer side-drawer--left"
        } else {
            "side-drawer side-drawer--right"
        };
        if active.get().is_some() { format!("{side} side-drawer--open") } else { side.to_owned() }
    };
    let close = Callback::new(move |()| state.update(AppState::close_drawer));

    // Narrow state slices handed to panels.
    let sessions = Signal::derive(move || state.with(|s| s.sessions().to_vec()));
    let current_id = Signal::derive(move || state.with(|s| s.current_session().map(|x| x.id.clone())));
    let settings = Signal::derive(move || state.with(|s| s.settings.clone()));
    let busy = Signal::derive(move || state.with(|s| s.is_loading));
    let selected = Signal::derive(move || {
        state.with(|s| match &s.drawer.data {
            DrawerData::Code { selected, .. } => selected.clone(),
            _ => None,
        })
    });

    // Panel callbacks.
    let on_select_session = Callback::new(move |id: String| state.update(|s| s.jump_to_session(&id)));
    let on_delete_session = Callback::new(move |id: String| {
        state.update(|s| {
            s.delete_session(&id);
        });
    });
    let on_save_meta = Callback::new(move |edit: MetaEdit| {
        state.update(|s| {
            s.update_session_meta(&edit.session_id, edit.name, edit.tags);
        });
    });
    let on_clear_all = Callback::new(move |()| {
        state.update(AppState::clear_all);
        saver.with_value(SessionSaver::clear);
    });
    let on_export_sessions = Callback::new(move |()| match state.with_untracked(AppState::export_sessions) {
        Ok(json) => export::download("dashboard-sessions.json", "application/json", &json),
        Err(e) => log::warn!("session export failed: {e}"),
    });
    let on_settings = Callback::new(move |next: GenerationSettings| {
        state.update(|s| s.update_settings(|current| *current = next));
    });
    let on_enhance = Callback::new(move |(kind, attachment): (EnhanceKind, Option<Attachment>)| {
        spawn_operation(state, "enhance", async move { ops.enhance(kind, attachment).await });
    });
    let on_layout = Callback::new(move |layout: &'static Layout| {
        state.update(|s| {
            s.apply_layout_to_focused(layout);
        });
    });
    let on_save_code = Callback::new(move |html: String| {
        state.update(|s| {
            s.edit_focused_html(html);
            s.close_drawer();
        });
    });
    let on_import_html = Callback::new(move |(html, file_name): (String, String)| {
        state.update(|s| {
            if let Err(e) = s.import_html(html, &file_name, now_ms()) {
                log::warn!("html import rejected: file={file_name} error={e}");
                s.notice = Some(e.to_string());
            }
        });
    });
    let on_import_sessions = Callback::new(move |json: String| {
        state.update(|s| {
            if let Err(e) = s.import_sessions(&json) {
                log::warn!("session import rejected: {e}");
                s.notice = Some(format!("Import failed: {e}"));
            }
        });
    });
    let on_template = Callback::new(move |template: &'static DashboardTemplate| {
        state.update(|s| {
            s.apply_template(template, now_ms());
        });
    });
    let on_variations = Callback::new(move |()| {
        state.update(AppState::close_drawer);
        spawn_operation(state, "variations", async move { ops.generate_variations().await });
    });

    let panel = move || {
        let Some(mode) = active.get() else {
            return ().into_any();
        };
        match mode {
            DrawerMode::History => view! {
                <HistoryPanel
                    sessions=sessions
                    current_id=current_id
                    on_select=on_select_session
                    on_delete=on_delete_session
                    on_save_meta=on_save_meta
                    on_clear_all=on_clear_all
                    on_export=on_export_sessions
                />
            }
            .into_any(),
            DrawerMode::Settings => view! { <SettingsPanel settings=settings on_change=on_settings/> }.into_any(),
            DrawerMode::Enhance => view! { <EnhancePanel busy=busy on_enhance=on_enhance/> }.into_any(),
            DrawerMode::Layouts => {
                let base_html = state.with_untracked(|s| match &s.drawer.data {
                    DrawerData::Artifact { html } => Some(html.clone()),
                    _ => None,
                });
                view! { <LayoutsPanel base_html=base_html on_apply=on_layout/> }.into_any()
            }
            DrawerMode::CodeEditor => {
                let html = state.with_untracked(|s| match &s.drawer.data {
                    DrawerData::Code { html, .. } => html.clone(),
                    _ => String::new(),
                });
                view! { <CodeEditorPanel html=html selected=selected on_save=on_save_code on_cancel=close/> }.into_any()
            }
            DrawerMode::Import => view! {
                <ImportPanel on_import_html=on_import_html on_import_sessions=on_import_sessions/>
            }
            .into_any(),
            DrawerMode::Templates => view! { <TemplatesPanel on_apply=on_template/> }.into_any(),
            DrawerMode::Variations => view! { <VariationsPanel busy=busy on_generate=on_variations/> }.into_any(),
        }
    };

    view! {
        <Show when=move || active.get().is_some()>
            <div class="side-drawer__backdrop" on:click=move |_| close.run(())></div>
        </Show>
        <aside class=drawer_class aria-hidden=move || active.get().is_none().to_string()>
            <header class="side-drawer__header">
                <h2 class="side-drawer__title">{title}</h2>
                <button class="side-drawer__close" on:click=move |_| close.run(()) title="Close">
                    "×"
                </button>
            </header>
            <div class="side-drawer__body">{panel}</div>
        </aside>
    }
}
