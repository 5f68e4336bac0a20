//! Artifact grid for the current session, or the empty-state welcome.
//!
//! SYSTEM CONTEXT
//! ==============
//! Focus mode does not unmount the other cards; it only changes classes, so
//! previews keep their documents when the user goes back to the grid.

use leptos::prelude::*;

use crate::app::use_app_state;
use crate::components::artifact_card::ArtifactCard;
use crate::state::catalog::relative_time;
use crate::state::ui::StageMode;
use crate::util::time::now_ms;

#[component]
pub fn Stage() -> impl IntoView {
    let state = use_app_state();

    let has_session = move || state.with(|s| s.current_session().is_some());
    let title = move || {
        state.with(|s| {
            s.current_session()
                .map(|session| (session.display_name().to_owned(), relative_time(session.timestamp, now_ms())))
        })
    };
    let cards = Memo::new(move |_| {
        state.with(|s| {
            s.current_session()
                .map(|session| session.artifacts.iter().map(|a| a.id.clone()).enumerate().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });
    let stage_class = move || match state.with(|s| s.ui.stage_mode()) {
        StageMode::Grid => "stage stage--grid",
        StageMode::Focus => "stage stage--focus",
    };

    view! {
        <Show when=has_session fallback=|| view! { <EmptyStage/> }>
            <section class=stage_class>
                <header class="stage__header">
                    {move || {
                        title()
                            .map(|(name, when)| {
                                view! {
                                    <h1 class="stage__title">{name}</h1>
                                    <span class="stage__time">{when}</span>
                                }
                            })
                    }}
                </header>
                <div class="stage__cards">
                    <For
                        each=move || cards.get()
                        key=|(_, id)| id.clone()
                        children=move |(index, _)| view! { <ArtifactCard index=index/> }
                    />
                </div>
            </section>
        </Show>
    }
}

#[component]
fn EmptyStage() -> impl IntoView {
    view! {
        <section class="stage stage--empty">
            <h1 class="stage__welcome">"Describe a dashboard"</h1>
            <p class="stage__hint">
                "Three design concepts are generated side by side. Attach a screenshot to clone it, or a data file to visualize it."
            </p>
        </section>
    }
}
