//! Generation settings editor.

use leptos::prelude::*;

use crate::state::settings::{Framework, GenerationSettings, SettingToggle};

#[component]
pub fn SettingsPanel(
    #[prop(into)] settings: Signal<GenerationSettings>,
    on_change: Callback<GenerationSettings>,
) -> impl IntoView {
    let edit = move |f: &dyn Fn(&mut GenerationSettings)| {
        let mut next = settings.get_untracked();
        f(&mut next);
        on_change.run(next);
    };
    let toggle = move |which: SettingToggle| {
        move |_: leptos::ev::Event| edit(&|s: &mut GenerationSettings| s.toggle(which))
    };
    let checked = move |which: SettingToggle| {
        move || {
            settings.with(|s| match which {
                SettingToggle::A11y => s.auto_a11y,
                SettingToggle::Charts => s.auto_charts,
                SettingToggle::Personas => s.auto_personas,
            })
        }
    };

    view! {
        <div class="settings-panel">
            <label class="settings-panel__field">
                <span>"Framework"</span>
                <select on:change=move |ev| {
                    if let Some(framework) = Framework::from_id(&event_target_value(&ev)) {
                        edit(&|s: &mut GenerationSettings| s.framework = framework);
                    }
                }>
                    {Framework::ALL
                        .into_iter()
                        .map(|f| {
                            view! {
                                <option value=f.id() selected=move || settings.with(|s| s.framework == f)>
                                    {f.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <label class="settings-panel__field">
                <span>"Data context"</span>
                <textarea
                    rows="4"
                    placeholder="Describe the data your dashboard should show"
                    prop:value=move || settings.with(|s| s.data_context.clone())
                    on:change=move |ev| {
                        let text = event_target_value(&ev);
                        edit(&|s: &mut GenerationSettings| s.data_context.clone_from(&text));
                    }
                ></textarea>
            </label>
            <fieldset class="settings-panel__toggles">
                <legend>"Automatic enhancements"</legend>
                <label>
                    <input type="checkbox" prop:checked=checked(SettingToggle::A11y) on:change=toggle(SettingToggle::A11y)/>
                    "Accessibility (WCAG 2.1 AA)"
                </label>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=checked(SettingToggle::Charts)
                        on:change=toggle(SettingToggle::Charts)
                    />
                    "Interactive charts"
                </label>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=checked(SettingToggle::Personas)
                        on:change=toggle(SettingToggle::Personas)
                    />
                    "Realistic personas"
                </label>
            </fieldset>
            <label class="settings-panel__field">
                <span>"API key override"</span>
                <input
                    type="password"
                    autocomplete="off"
                    placeholder="Uses the built-in key when empty"
                    prop:value=move || settings.with(|s| s.api_key.clone().unwrap_or_default())
                    on:change=move |ev| {
                        let key = event_target_value(&ev);
                        let key = key.trim();
                        edit(&|s: &mut GenerationSettings| s.api_key = (!key.is_empty()).then(|| key.to_owned()));
                    }
                />
            </label>
        </div>
    }
}
