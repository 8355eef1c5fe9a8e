// Appraisal indicators: cash-flow math, the two evaluation groups and the
// column-driven selection of which groups run.
pub mod economic;
pub mod finance;
pub mod financial;

pub use economic::{EconomicEvaluation, EconomicIndicators};
pub use financial::{FinancialEvaluation, FinancialIndicators};

use crate::error::EvaluationError;
use crate::models::DiscountRate;
use shared::models::{
    EvaluationFailure, IndicatorCode, IndicatorGroup, IndicatorResult, Language, ProjectTable,
    ResultSet,
};

/// One computed indicator. `None` means the indicator could not be determined
/// even though its group succeeded.
pub type IndicatorValue = (IndicatorCode, Option<f64>);

// Common trait for both evaluation groups
pub trait IndicatorEvaluator: Send + Sync {
    fn group(&self) -> IndicatorGroup;

    /// Columns that must all be present for the group to run.
    fn required_columns(&self) -> &'static [&'static str];

    /// Computes the group's indicators in display order. A failure drops the whole group.
    fn evaluate(&self, table: &ProjectTable, rate: DiscountRate) -> Result<Vec<IndicatorValue>, EvaluationError>;

    fn is_applicable(&self, table: &ProjectTable) -> bool {
        table.has_columns(self.required_columns())
    }
}

/// Outcome of one group for one table.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupOutcome {
    /// Required columns are absent; the group is skipped silently.
    NotApplicable,
    Computed(Vec<IndicatorValue>),
    Failed(EvaluationError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appraisal {
    pub financial: GroupOutcome,
    pub economic: GroupOutcome,
}

/// Runs every applicable group on `table`. Financial before economic.
pub fn appraise(table: &ProjectTable, rate: DiscountRate) -> Appraisal {
    Appraisal {
        financial: run_group(&FinancialEvaluation, table, rate),
        economic: run_group(&EconomicEvaluation, table, rate),
    }
}

fn run_group(evaluator: &dyn IndicatorEvaluator, table: &ProjectTable, rate: DiscountRate) -> GroupOutcome {
    let group = evaluator.group();
    if !evaluator.is_applicable(table) {
        tracing::debug!(%group, required = ?evaluator.required_columns(), "Skipping indicator group, columns missing");
        return GroupOutcome::NotApplicable;
    }
    match evaluator.evaluate(table, rate) {
        Ok(values) => {
            tracing::debug!(%group, count = values.len(), "Indicator group computed");
            GroupOutcome::Computed(values)
        }
        Err(e) => {
            tracing::warn!(%group, error = %e, "Indicator group failed");
            GroupOutcome::Failed(e)
        }
    }
}

impl Appraisal {
    pub fn outcomes(&self) -> [(IndicatorGroup, &GroupOutcome); 2] {
        [
            (IndicatorGroup::Financial, &self.financial),
            (IndicatorGroup::Economic, &self.economic),
        ]
    }

    /// Labels the computed indicators in `language` and collects the failures.
    pub fn into_result_set(self, language: Language) -> ResultSet {
        let mut result_set = ResultSet::default();
        for (group, outcome) in self.outcomes() {
            match outcome {
                GroupOutcome::NotApplicable => {}
                GroupOutcome::Computed(values) => {
                    result_set.indicators.extend(
                        values.iter().map(|(code, value)| IndicatorResult::new(*code, *value, language)),
                    );
                }
                GroupOutcome::Failed(e) => result_set.failures.push(EvaluationFailure {
                    group,
                    message: e.to_string(),
                }),
            }
        }
        result_set
    }
}
