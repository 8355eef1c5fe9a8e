// "Paramètres" sidebar: language, workbook, sheet, discount rate and the evaluate button
#![allow(non_snake_case)]
use dioxus::prelude::*;
use shared::models::Language;

use crate::config::theme::ThemePalette;
use crate::config::AppConfig;
use crate::services::actions;
use crate::state::app_state::AppState;

const ACCEPTED_FILES: &str = ".xlsx,.xls,.xlsb,.ods,.csv";

#[component]
pub fn Sidebar(state: Signal<AppState>) -> Element {
    let mut state = state;
    let config = use_context::<AppConfig>();
    let palette = ThemePalette::default();
    let snapshot = state.read().clone();
    let step = config.app.discount_rate_step;
    let rate = snapshot.discount_rate_percent;
    let selected_sheet = snapshot.selected_sheet.clone().unwrap_or_default();
    let file_label = snapshot.file_path.clone().unwrap_or_else(|| "Aucun fichier".to_string());
    let endpoint_for_load = config.engine.endpoint();
    let endpoint_for_sheet = config.engine.endpoint();
    let endpoint_for_eval = config.engine.endpoint();

    rsx! {
        aside {
            style: "width:280px; padding:20px; background:{palette.sidebar}; color:{palette.foreground}; display:flex; flex-direction:column; gap:12px;",
            h2 { "Paramètres" }

            label { "Langue / Language" }
            select {
                onchange: move |evt: FormEvent| {
                    match evt.value().parse::<Language>() {
                        Ok(language) => state.write().set_language(language),
                        Err(e) => tracing::warn!(error = %e, "Ignoring language selection"),
                    }
                },
                for language in Language::ALL {
                    option { value: "{language}", selected: language == snapshot.language, "{language}" }
                }
            }

            label { "Fichier de données" }
            input {
                r#type: "file",
                accept: ACCEPTED_FILES,
                onchange: move |evt: FormEvent| {
                    let Some(file_engine) = evt.files() else { return; };
                    if let Some(path) = file_engine.files().into_iter().next() {
                        spawn(actions::load_workbook(state, endpoint_for_load.clone(), path));
                    }
                }
            }
            small { style: "color:{palette.muted}; word-break:break-all;", "{file_label}" }

            if !snapshot.sheet_names.is_empty() {
                label { "Feuille" }
                select {
                    onchange: move |evt: FormEvent| {
                        spawn(actions::select_sheet(state, endpoint_for_sheet.clone(), evt.value()));
                    },
                    for sheet in snapshot.sheet_names.iter() {
                        option { value: "{sheet}", selected: *sheet == selected_sheet, "{sheet}" }
                    }
                }
            }

            label { "Taux d'actualisation (%)" }
            input {
                r#type: "number",
                min: "0",
                max: "100",
                step: "{step}",
                value: "{rate}",
                oninput: move |evt: FormEvent| {
                    if !state.write().set_discount_rate(&evt.value()) {
                        tracing::debug!(input = %evt.value(), "Discount rate rejected");
                    }
                }
            }

            button {
                style: "padding:8px; background:{palette.primary}; color:white; border:none; border-radius:4px;",
                disabled: !snapshot.can_evaluate(),
                onclick: move |_| {
                    spawn(actions::evaluate(state, endpoint_for_eval.clone()));
                },
                "Générer l'évaluation"
            }
        }
    }
}
