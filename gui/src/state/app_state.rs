// Dashboard state. Held in a Dioxus signal at the root of the app and mutated
// by the sidebar actions once the engine answers.

use crate::config::AppConfig;
use crate::services::engine_client::LoadedWorkbook;
use shared::models::{IndicatorGroup, Language, ProjectTable, ResultSet};

pub const LOAD_SUCCESS: &str = "Fichier chargé avec succès !";
pub const LOAD_ERROR_PREFIX: &str = "Erreur lors du chargement du fichier : ";

#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub language: Language,
    pub discount_rate_percent: f64,

    // Workbook held by the engine
    pub file_path: Option<String>,
    pub session_id: String,
    pub sheet_names: Vec<String>,
    pub selected_sheet: Option<String>,
    pub preview: Option<ProjectTable>,

    pub result_set: Option<ResultSet>,
    pub banner: Option<Banner>,
    pub busy: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            language: Language::default(),
            discount_rate_percent: 8.0,
            file_path: None,
            session_id: String::new(),
            sheet_names: Vec::new(),
            selected_sheet: None,
            preview: None,
            result_set: None,
            banner: None,
            busy: false,
        }
    }
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            language: config.language().unwrap_or_default(),
            discount_rate_percent: config.app.default_discount_rate,
            ..Self::default()
        }
    }

    /// Switches the language. Results already computed are relabelled, not recomputed.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if let Some(result_set) = self.result_set.as_mut() {
            result_set.relabel(language);
        }
    }

    /// Accepts a typed rate when it parses and lies within 0..=100.
    pub fn set_discount_rate(&mut self, input: &str) -> bool {
        match input.trim().parse::<f64>() {
            Ok(rate) if (0.0..=100.0).contains(&rate) => {
                self.discount_rate_percent = rate;
                true
            }
            _ => false,
        }
    }

    pub fn workbook_loaded(&mut self, file_path: String, loaded: LoadedWorkbook) {
        self.file_path = Some(file_path);
        self.session_id = loaded.session_id;
        self.selected_sheet = loaded.sheet_names.first().cloned();
        self.sheet_names = loaded.sheet_names;
        self.preview = None;
        self.result_set = None;
        tracing::debug!(message = %loaded.message, "Engine load message");
        self.banner = Some(Banner::Success(LOAD_SUCCESS.to_string()));
    }

    /// A failed load leaves nothing to evaluate.
    pub fn load_failed(&mut self, message: String) {
        self.sheet_names.clear();
        self.selected_sheet = None;
        self.preview = None;
        self.result_set = None;
        self.banner = Some(Banner::Error(format!("{}{}", LOAD_ERROR_PREFIX, message)));
    }

    pub fn select_sheet(&mut self, sheet: String) {
        if self.sheet_names.contains(&sheet) && self.selected_sheet.as_ref() != Some(&sheet) {
            self.selected_sheet = Some(sheet);
            self.preview = None;
            self.result_set = None;
        }
    }

    pub fn can_evaluate(&self) -> bool {
        !self.busy && !self.session_id.is_empty() && self.selected_sheet.is_some()
    }

    pub fn evaluation_done(&mut self, result_set: ResultSet) {
        self.result_set = Some(result_set);
    }

    pub fn request_failed(&mut self, message: String) {
        self.banner = Some(Banner::Error(message));
    }

    /// Banner text for each failed indicator group, in group order.
    pub fn failure_messages(&self) -> Vec<String> {
        let Some(result_set) = &self.result_set else {
            return Vec::new();
        };
        result_set
            .failures
            .iter()
            .map(|failure| match failure.group {
                IndicatorGroup::Financial => format!("Erreur dans l'évaluation financière : {}", failure.message),
                IndicatorGroup::Economic => format!("Erreur dans l'évaluation économique : {}", failure.message),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{EvaluationFailure, IndicatorCode, IndicatorResult};

    fn loaded() -> LoadedWorkbook {
        LoadedWorkbook {
            session_id: "s1".into(),
            sheet_names: vec!["Flux".into(), "Notes".into()],
            message: "Loaded 2 sheet(s) from project.xlsx".into(),
        }
    }

    fn results(language: Language) -> ResultSet {
        ResultSet {
            indicators: vec![
                IndicatorResult::new(IndicatorCode::Vanf, Some(46.57), language),
                IndicatorResult::new(IndicatorCode::Trif, None, language),
            ],
            failures: vec![EvaluationFailure { group: IndicatorGroup::Economic, message: "Corrected_Costs sum to zero".into() }],
        }
    }

    #[test]
    fn test_new_uses_config_defaults() {
        let config = AppConfig::load_default().unwrap();
        let state = AppState::new(&config);
        assert_eq!(state.language, Language::Fr);
        assert_eq!(state.discount_rate_percent, 8.0);
        assert!(!state.can_evaluate());
    }

    #[test]
    fn test_load_selects_first_sheet() {
        let mut state = AppState::default();
        state.workbook_loaded("project.xlsx".into(), loaded());
        assert_eq!(state.selected_sheet.as_deref(), Some("Flux"));
        assert_eq!(state.banner, Some(Banner::Success("Fichier chargé avec succès !".into())));
        assert!(state.can_evaluate());
    }

    #[test]
    fn test_failed_load_clears_sheets() {
        let mut state = AppState::default();
        state.workbook_loaded("project.xlsx".into(), loaded());
        state.load_failed("Unsupported file type 'pdf'".into());
        assert!(state.sheet_names.is_empty());
        assert!(!state.can_evaluate());
        assert_eq!(
            state.banner,
            Some(Banner::Error("Erreur lors du chargement du fichier : Unsupported file type 'pdf'".into()))
        );
    }

    #[test]
    fn test_language_switch_relabels_results() {
        let mut state = AppState::default();
        state.evaluation_done(results(Language::Fr));
        state.set_language(Language::En);
        let result_set = state.result_set.as_ref().unwrap();
        assert_eq!(result_set.indicators[0].label, "Financial Net Present Value");
        assert_eq!(result_set.indicators[0].value, Some(46.57));
    }

    #[test]
    fn test_discount_rate_bounds() {
        let mut state = AppState::default();
        assert!(state.set_discount_rate("12.5"));
        assert_eq!(state.discount_rate_percent, 12.5);
        assert!(!state.set_discount_rate("101"));
        assert!(!state.set_discount_rate("-1"));
        assert!(!state.set_discount_rate("abc"));
        assert_eq!(state.discount_rate_percent, 12.5);
    }

    #[test]
    fn test_selecting_another_sheet_drops_results() {
        let mut state = AppState::default();
        state.workbook_loaded("project.xlsx".into(), loaded());
        state.evaluation_done(results(Language::Fr));
        state.select_sheet("Notes".into());
        assert!(state.result_set.is_none());
        state.select_sheet("Unknown".into());
        assert_eq!(state.selected_sheet.as_deref(), Some("Notes"));
    }

    #[test]
    fn test_failure_messages_are_prefixed() {
        let mut state = AppState::default();
        state.evaluation_done(results(Language::Fr));
        assert_eq!(
            state.failure_messages(),
            vec!["Erreur dans l'évaluation économique : Corrected_Costs sum to zero".to_string()]
        );
    }
}
