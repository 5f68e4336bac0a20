//! Session history: search, tag filter, rename/retag, delete, clear all and
//! session export.

#[cfg(test)]
#[path = "history_panel_test.rs"]
mod history_panel_test;

use std::collections::BTreeSet;

use leptos::prelude::*;

use crate::state::catalog::{self, SessionFilter};
use crate::state::session::Session;
use crate::util::time::now_ms;

/// Name and tag changes for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaEdit {
    pub session_id: String,
    pub name: Option<String>,
    pub tags: BTreeSet<String>,
}

impl MetaEdit {
    /// Build from the raw edit inputs. A blank name clears the custom name.
    #[must_use]
    pub fn from_inputs(session_id: &str, name: &str, tags: &str) -> Self {
        let name = name.trim();
        Self {
            session_id: session_id.to_owned(),
            name: (!name.is_empty()).then(|| name.to_owned()),
            tags: catalog::parse_tags(tags),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Row {
    id: String,
    title: String,
    prompt: String,
    when: String,
    tags: Vec<String>,
    artifacts: usize,
}

fn rows(sessions: &[Session], filter: &SessionFilter, now: i64) -> Vec<Row> {
    catalog::filter_sessions(sessions, filter)
        .into_iter()
        .map(|(_, s)| Row {
            id: s.id.clone(),
            title: s.display_name().to_owned(),
            prompt: s.prompt.clone(),
            when: catalog::relative_time(s.timestamp, now),
            tags: s.tags.iter().cloned().collect(),
            artifacts: s.artifacts.len(),
        })
        .collect()
}

#[component]
pub fn HistoryPanel(
    #[prop(into)] sessions: Signal<Vec<Session>>,
    #[prop(into)] current_id: Signal<Option<String>>,
    on_select: Callback<String>,
    on_delete: Callback<String>,
    on_save_meta: Callback<MetaEdit>,
    on_clear_all: Callback<()>,
    on_export: Callback<()>,
) -> impl IntoView {
    let query = RwSignal::new(String::new());
    let tag = RwSignal::new(None::<String>);
    let editing = RwSignal::new(None::<String>);
    let edit_name = RwSignal::new(String::new());
    let edit_tags = RwSignal::new(String::new());
    let confirm_clear = RwSignal::new(false);

    let tags = move || sessions.with(|list| catalog::all_tags(list));
    let visible = move || {
        let filter = SessionFilter { query: query.get(), tag: tag.get() };
        sessions.with(|list| rows(list, &filter, now_ms()))
    };
    let is_empty = move || sessions.with(Vec::is_empty);

    let start_edit = move |id: String| {
        let current = sessions.with_untracked(|list| {
            list.iter()
                .find(|s| s.id == id)
                .map(|s| (s.name.clone().unwrap_or_default(), catalog::format_tags(&s.tags)))
        });
        if let Some((name, tags)) = current {
            edit_name.set(name);
            edit_tags.set(tags);
            editing.set(Some(id));
        }
    };
    let save_edit = move || {
        if let Some(id) = editing.get_untracked() {
            on_save_meta.run(MetaEdit::from_inputs(&id, &edit_name.get_untracked(), &edit_tags.get_untracked()));
        }
        editing.set(None);
    };

    view! {
        <div class="history-panel">
            <input
                class="history-panel__search"
                type="search"
                placeholder="Search prompts and names"
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <div class="history-panel__tags">
                <button
                    class="history-panel__tag"
                    class:history-panel__tag--active=move || tag.with(Option::is_none)
                    on:click=move |_| tag.set(None)
                >
                    "All"
                </button>
                {move || {
                    tags()
                        .into_iter()
                        .map(|name| {
                            let value = name.clone();
                            let active = name.clone();
                            view! {
                                <button
                                    class="history-panel__tag"
                                    class:history-panel__tag--active=move || tag.with(|t| t.as_deref() == Some(active.as_str()))
                                    on:click=move |_| tag.set(Some(value.clone()))
                                >
                                    {name}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <Show when=is_empty>
                <p class="history-panel__empty">"No sessions yet."</p>
            </Show>
            <ul class="history-panel__list">
                {move || {
                    visible()
                        .into_iter()
                        .map(|row| {
                            let id = row.id.clone();
                            let is_current = {
                                let id = id.clone();
                                move || current_id.with(|c| c.as_deref() == Some(id.as_str()))
                            };
                            let is_editing = {
                                let id = id.clone();
                                move || editing.with(|e| e.as_deref() == Some(id.as_str()))
                            };
                            let select_id = id.clone();
                            let edit_id = id.clone();
                            let delete_id = id;
                            view! {
                                <li class="history-panel__item" class:history-panel__item--current=is_current>
                                    <Show
                                        when=is_editing
                                        fallback=move || {
                                            let select_id = select_id.clone();
                                            let edit_id = edit_id.clone();
                                            let delete_id = delete_id.clone();
                                            let row = row.clone();
                                            view! {
                                                <button
                                                    class="history-panel__open"
                                                    on:click=move |_| on_select.run(select_id.clone())
                                                    title=row.prompt.clone()
                                                >
                                                    <span class="history-panel__title">{row.title.clone()}</span>
                                                    <span class="history-panel__meta">
                                                        {format!("{} · {} designs", row.when, row.artifacts)}
                                                    </span>
                                                </button>
                                                <div class="history-panel__item-tags">
                                                    {row
                                                        .tags
                                                        .iter()
                                                        .map(|t| view! { <span class="history-panel__chip">{t.clone()}</span> })
                                                        .collect_view()}
                                                </div>
                                                <div class="history-panel__actions">
                                                    <button on:click=move |_| start_edit(edit_id.clone())>"Edit"</button>
                                                    <button on:click=move |_| on_delete.run(delete_id.clone())>
                                                        "Delete"
                                                    </button>
                                                </div>
                                            }
                                        }
                                    >
                                        <input
                                            class="history-panel__edit-name"
                                            placeholder="Name"
                                            prop:value=move || edit_name.get()
                                            on:input=move |ev| edit_name.set(event_target_value(&ev))
                                        />
                                        <input
                                            class="history-panel__edit-tags"
                                            placeholder="tags, comma separated"
                                            prop:value=move || edit_tags.get()
                                            on:input=move |ev| edit_tags.set(event_target_value(&ev))
                                        />
                                        <div class="history-panel__actions">
                                            <button on:click=move |_| save_edit()>"Save"</button>
                                            <button on:click=move |_| editing.set(None)>"Cancel"</button>
                                        </div>
                                    </Show>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <footer class="history-panel__footer">
                <button on:click=move |_| on_export.run(())>"Export sessions"</button>
                <Show
                    when=move || confirm_clear.get()
                    fallback=move || {
                        view! {
                            <button class="history-panel__danger" on:click=move |_| confirm_clear.set(true)>
                                "Clear all"
                            </button>
                        }
                    }
                >
                    <span>"Delete every session?"</span>
                    <button
                        class="history-panel__danger"
                        on:click=move |_| {
                            confirm_clear.set(false);
                            on_clear_all.run(());
                        }
                    >
                        "Yes, clear"
                    </button>
                    <button on:click=move |_| confirm_clear.set(false)>"Keep"</button>
                </Show>
            </footer>
        </div>
    }
}
