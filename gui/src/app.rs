#![allow(non_snake_case)]
use dioxus::prelude::*;

use crate::components::{BarChart, DataTable, ResultsTable, Sidebar};
use crate::config::theme::ThemePalette;
use crate::config::AppConfig;
use crate::state::app_state::{AppState, Banner};

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let state = use_signal(|| AppState::new(&config));
    let palette = ThemePalette::default();
    let snapshot = state.read().clone();
    let decimals = config.app.decimals;

    let banner = match &snapshot.banner {
        Some(Banner::Success(text)) => rsx! {
            div { style: "padding:10px; border-radius:4px; background:{palette.success_bg}; color:{palette.success_fg};", "{text}" }
        },
        Some(Banner::Error(text)) => rsx! {
            div { style: "padding:10px; border-radius:4px; background:{palette.error_bg}; color:{palette.error_fg};", "{text}" }
        },
        None => None,
    };

    let preview = match &snapshot.preview {
        Some(table) => rsx! {
            h3 { "Aperçu des données" }
            DataTable { table: table.clone(), max_rows: config.preview.max_rows }
        },
        None => None,
    };

    let results = match &snapshot.result_set {
        Some(result_set) => {
            let failures = snapshot.failure_messages();
            rsx! {
                h3 { "Résultats de l'analyse" }
                for message in failures.iter() {
                    div { style: "padding:10px; border-radius:4px; background:{palette.error_bg}; color:{palette.error_fg};", "{message}" }
                }
                ResultsTable { result_set: result_set.clone(), decimals }
                BarChart { result_set: result_set.clone(), chart: config.chart.clone(), decimals }
            }
        }
        None => None,
    };

    rsx! {
        div {
            style: "display:flex; min-height:100vh; font-family:{palette.font_family}; background:{palette.background}; color:{palette.foreground};",
            Sidebar { state }
            main { style: "flex:1; padding:24px; display:flex; flex-direction:column; gap:16px; overflow:auto;",
                h1 { "📊 Évaluation Financière et Économique" }
                {banner}
                {preview}
                {results}
            }
        }
    }
}
