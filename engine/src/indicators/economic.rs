// Economic view: net flow = Corrected_Revenues - Corrected_Costs + Externalities.
use super::finance::{irr, npv};
use super::{IndicatorEvaluator, IndicatorValue};
use crate::error::EvaluationError;
use crate::models::DiscountRate;
use shared::models::{IndicatorCode, IndicatorGroup, ProjectTable};

pub const ECONOMIC_COLUMNS: [&str; 3] = ["Corrected_Costs", "Corrected_Revenues", "Externalities"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomicIndicators {
    pub npv: f64,
    pub irr: Option<f64>,
    /// npv / total corrected costs
    pub adjusted_yield: f64,
}

pub struct EconomicEvaluation;

impl EconomicEvaluation {
    pub fn cash_flows(table: &ProjectTable) -> Result<Vec<f64>, EvaluationError> {
        let revenues = table.numeric_column("Corrected_Revenues")?;
        let costs = table.numeric_column("Corrected_Costs")?;
        let externalities = table.numeric_column("Externalities")?;
        Ok(revenues
            .iter()
            .zip(costs.iter())
            .zip(externalities.iter())
            .map(|((r, c), e)| r - c + e)
            .collect())
    }

    pub fn compute(table: &ProjectTable, rate: DiscountRate) -> Result<EconomicIndicators, EvaluationError> {
        let flows = Self::cash_flows(table)?;
        let total_costs: f64 = table.numeric_column("Corrected_Costs")?.iter().sum();
        if total_costs == 0.0 {
            return Err(EvaluationError::ZeroCorrectedCosts);
        }
        let npv = npv(rate.value(), &flows);
        let adjusted_yield = npv / total_costs;
        if !adjusted_yield.is_finite() {
            return Err(EvaluationError::NonFinite { group: IndicatorGroup::Economic, what: "adjusted capital yield" });
        }
        Ok(EconomicIndicators {
            npv,
            irr: irr(&flows),
            adjusted_yield,
        })
    }
}

impl IndicatorEvaluator for EconomicEvaluation {
    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Economic
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &ECONOMIC_COLUMNS
    }

    fn evaluate(&self, table: &ProjectTable, rate: DiscountRate) -> Result<Vec<IndicatorValue>, EvaluationError> {
        let ind = Self::compute(table, rate)?;
        Ok(vec![
            (IndicatorCode::Vane, Some(ind.npv)),
            (IndicatorCode::Trie, ind.irr),
            (IndicatorCode::Rca, Some(ind.adjusted_yield)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CellValue;

    fn economic_table(rows: &[[f64; 3]]) -> ProjectTable {
        ProjectTable::new(
            vec!["Corrected_Revenues".into(), "Corrected_Costs".into(), "Externalities".into()],
            rows.iter()
                .map(|row| row.iter().copied().map(CellValue::Number).collect())
                .collect(),
        )
    }

    #[test]
    fn test_cash_flows_add_externalities() {
        let table = economic_table(&[[0.0, 100.0, -5.0], [80.0, 10.0, 5.0], [80.0, 10.0, 5.0]]);
        assert_eq!(EconomicEvaluation::cash_flows(&table).unwrap(), vec![-105.0, 75.0, 75.0]);
    }

    #[test]
    fn test_adjusted_yield() {
        let table = economic_table(&[[0.0, 100.0, -5.0], [80.0, 10.0, 5.0], [80.0, 10.0, 5.0]]);
        let rate = DiscountRate::from_percent(8.0).unwrap();
        let ind = EconomicEvaluation::compute(&table, rate).unwrap();
        let expected_npv = -105.0 + 75.0 / 1.08 + 75.0 / 1.08f64.powi(2);
        assert!((ind.npv - expected_npv).abs() < 1e-9);
        assert!((ind.adjusted_yield - expected_npv / 120.0).abs() < 1e-12);
        let irr = ind.irr.unwrap();
        assert!(npv(irr, &[-105.0, 75.0, 75.0]).abs() < 1e-7);
    }

    #[test]
    fn test_zero_corrected_costs_is_an_error() {
        let table = economic_table(&[[10.0, 0.0, 1.0], [10.0, 0.0, 1.0]]);
        let err = EconomicEvaluation::compute(&table, DiscountRate::from_percent(8.0).unwrap()).unwrap_err();
        assert_eq!(err, EvaluationError::ZeroCorrectedCosts);
        assert!(EconomicEvaluation
            .evaluate(&table, DiscountRate::from_percent(8.0).unwrap())
            .is_err());
    }

    #[test]
    fn test_costs_cancelling_out_is_still_zero() {
        let table = economic_table(&[[10.0, 50.0, 0.0], [10.0, -50.0, 0.0]]);
        let err = EconomicEvaluation::compute(&table, DiscountRate::from_percent(8.0).unwrap()).unwrap_err();
        assert_eq!(err, EvaluationError::ZeroCorrectedCosts);
    }

    #[test]
    fn test_values_in_display_order() {
        let table = economic_table(&[[10.0, 5.0, 1.0]]);
        let values = EconomicEvaluation.evaluate(&table, DiscountRate::from_percent(0.0).unwrap()).unwrap();
        let codes: Vec<_> = values.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes, vec![IndicatorCode::Vane, IndicatorCode::Trie, IndicatorCode::Rca]);
        assert_eq!(values[0].1, Some(6.0));
        assert_eq!(values[1].1, None);
        assert_eq!(values[2].1, Some(6.0 / 5.0));
    }
}
