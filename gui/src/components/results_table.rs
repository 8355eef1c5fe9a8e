// Indicator results: one row per computed indicator, in engine order
#![allow(non_snake_case)]
use dioxus::prelude::*;
use shared::models::ResultSet;
use shared::utils::format_value;

/// (Indicateur, Valeur) cells; missing values read "N/C".
pub fn result_rows(result_set: &ResultSet, decimals: usize) -> Vec<(String, String)> {
    result_set
        .indicators
        .iter()
        .map(|ind| (ind.label.clone(), format_value(ind.value, decimals)))
        .collect()
}

#[component]
pub fn ResultsTable(result_set: ResultSet, decimals: usize) -> Element {
    let rows = result_rows(&result_set, decimals);

    rsx! {
        table { class: "results-table", style: "border-collapse:collapse; min-width:480px; font-size:14px;",
            thead {
                tr {
                    th { style: "text-align:left; padding:6px 10px; border-bottom:2px solid #d9d9d9;", "Indicateur" }
                    th { style: "text-align:right; padding:6px 10px; border-bottom:2px solid #d9d9d9;", "Valeur" }
                }
            }
            tbody {
                for (label, value) in rows.iter() {
                    tr {
                        td { style: "padding:6px 10px; border-bottom:1px solid #eeeeee;", "{label}" }
                        td { style: "padding:6px 10px; text-align:right; border-bottom:1px solid #eeeeee;", "{value}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{IndicatorCode, IndicatorResult, Language};

    #[test]
    fn test_rows_show_label_only() {
        let result_set = ResultSet {
            indicators: vec![
                IndicatorResult::new(IndicatorCode::Vanf, Some(46.570644), Language::Fr),
                IndicatorResult::new(IndicatorCode::Trif, None, Language::Fr),
            ],
            failures: vec![],
        };
        assert_eq!(
            result_rows(&result_set, 2),
            vec![
                ("Valeur Actuelle Nette Financière".to_string(), "46.57".to_string()),
                ("Taux de Rendement Interne Financier".to_string(), "N/C".to_string()),
            ]
        );
    }
}
