// Bilingual indicator labels. Language only changes these strings, never a value.
use crate::models::{IndicatorCode, Language};

pub struct Labels {
    pub fr: &'static str,
    pub en: &'static str,
}

impl Labels {
    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::Fr => self.fr,
            Language::En => self.en,
        }
    }
}

pub static TRANSLATIONS: [(IndicatorCode, Labels); 6] = [
    (
        IndicatorCode::Vanf,
        Labels { fr: "Valeur Actuelle Nette Financière", en: "Financial Net Present Value" },
    ),
    (
        IndicatorCode::Trif,
        Labels { fr: "Taux de Rendement Interne Financier", en: "Financial Internal Rate of Return" },
    ),
    (
        IndicatorCode::Drc,
        Labels { fr: "Délai de Récupération du Capital", en: "Capital Recovery Period" },
    ),
    (
        IndicatorCode::Vane,
        Labels { fr: "Valeur Actuelle Nette Économique", en: "Economic Net Present Value" },
    ),
    (
        IndicatorCode::Trie,
        Labels { fr: "Taux de Rendement Interne Économique", en: "Economic Internal Rate of Return" },
    ),
    (
        IndicatorCode::Rca,
        Labels { fr: "Rendement du Capital Ajusté", en: "Adjusted Capital Yield" },
    ),
];

pub fn label(code: IndicatorCode, language: Language) -> &'static str {
    // Entries follow IndicatorCode::ALL order.
    TRANSLATIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, labels)| labels.get(language))
        .unwrap_or_else(|| code.as_str())
}
