// Preview of the selected sheet
#![allow(non_snake_case)]
use dioxus::prelude::*;
use shared::models::ProjectTable;

#[component]
pub fn DataTable(table: ProjectTable, max_rows: usize) -> Element {
    let shown = table.len().min(max_rows);
    let hidden = table.len() - shown;
    let rows: Vec<Vec<String>> = table.rows[..shown]
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    rsx! {
        div { class: "data-table", style: "overflow:auto; max-height:320px; border:1px solid #d9d9d9;",
            table { style: "border-collapse:collapse; width:100%; font-size:13px;",
                thead {
                    tr {
                        for column in table.columns.iter() {
                            th { style: "text-align:left; padding:4px 8px; background:#f0f2f6;", "{column}" }
                        }
                    }
                }
                tbody {
                    for row in rows.iter() {
                        tr {
                            for cell in row.iter() {
                                td { style: "padding:4px 8px; border-top:1px solid #eeeeee;", "{cell}" }
                            }
                        }
                    }
                }
            }
        }
        if hidden > 0 {
            p { style: "color:#6c757d; font-size:12px;", "… {hidden} ligne(s) supplémentaire(s) non affichée(s)" }
        }
    }
}
