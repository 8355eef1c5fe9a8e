// Financial view: net flow = Revenues - Total_Costs.
use super::finance::{irr, negative_periods, npv};
use super::{IndicatorEvaluator, IndicatorValue};
use crate::error::EvaluationError;
use crate::models::DiscountRate;
use shared::models::{IndicatorCode, IndicatorGroup, ProjectTable};

/// `Year` and `Residual_Value` gate the group but are not read by the formulas.
pub const FINANCIAL_COLUMNS: [&str; 4] = ["Year", "Total_Costs", "Revenues", "Residual_Value"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialIndicators {
    pub npv: f64,
    pub irr: Option<f64>,
    pub recovery_period: usize,
}

pub struct FinancialEvaluation;

impl FinancialEvaluation {
    pub fn cash_flows(table: &ProjectTable) -> Result<Vec<f64>, EvaluationError> {
        let revenues = table.numeric_column("Revenues")?;
        let costs = table.numeric_column("Total_Costs")?;
        Ok(revenues.iter().zip(costs.iter()).map(|(r, c)| r - c).collect())
    }

    pub fn compute(table: &ProjectTable, rate: DiscountRate) -> Result<FinancialIndicators, EvaluationError> {
        let flows = Self::cash_flows(table)?;
        let npv = npv(rate.value(), &flows);
        if !npv.is_finite() {
            return Err(EvaluationError::NonFinite { group: IndicatorGroup::Financial, what: "net present value" });
        }
        Ok(FinancialIndicators {
            npv,
            irr: irr(&flows),
            recovery_period: negative_periods(&flows),
        })
    }
}

impl IndicatorEvaluator for FinancialEvaluation {
    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Financial
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &FINANCIAL_COLUMNS
    }

    fn evaluate(&self, table: &ProjectTable, rate: DiscountRate) -> Result<Vec<IndicatorValue>, EvaluationError> {
        let ind = Self::compute(table, rate)?;
        Ok(vec![
            (IndicatorCode::Vanf, Some(ind.npv)),
            (IndicatorCode::Trif, ind.irr),
            (IndicatorCode::Drc, Some(ind.recovery_period as f64)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CellValue;

    fn financial_table(revenues: &[f64], costs: &[f64]) -> ProjectTable {
        let rows = revenues
            .iter()
            .zip(costs.iter())
            .enumerate()
            .map(|(i, (r, c))| {
                vec![
                    CellValue::Number(2024.0 + i as f64),
                    CellValue::Number(*r),
                    CellValue::Number(*c),
                    CellValue::Number(0.0),
                ]
            })
            .collect();
        ProjectTable::new(
            vec!["Year".into(), "Revenues".into(), "Total_Costs".into(), "Residual_Value".into()],
            rows,
        )
    }

    #[test]
    fn test_reference_example() {
        let table = financial_table(&[100.0, 100.0, 100.0], &[50.0, 150.0, 50.0]);
        assert_eq!(FinancialEvaluation::cash_flows(&table).unwrap(), vec![50.0, -50.0, 50.0]);

        let ind = FinancialEvaluation::compute(&table, DiscountRate::from_fraction(0.08).unwrap()).unwrap();
        let expected = 50.0 - 50.0 / 1.08 + 50.0 / 1.08f64.powi(2);
        assert!((ind.npv - expected).abs() < 1e-9);
        assert_eq!(ind.recovery_period, 1);
        assert_eq!(ind.irr, None);
    }

    #[test]
    fn test_all_positive_series_has_no_irr_but_succeeds() {
        let table = financial_table(&[100.0, 100.0], &[10.0, 20.0]);
        let values = FinancialEvaluation.evaluate(&table, DiscountRate::from_percent(5.0).unwrap()).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[1], (IndicatorCode::Trif, None));
        assert_eq!(values[2], (IndicatorCode::Drc, Some(0.0)));
    }

    #[test]
    fn test_investment_profile() {
        let table = financial_table(&[0.0, 60.0, 60.0], &[100.0, 0.0, 0.0]);
        let ind = FinancialEvaluation::compute(&table, DiscountRate::from_percent(10.0).unwrap()).unwrap();
        let irr = ind.irr.unwrap();
        assert!((irr - 0.1306623862918075).abs() < 1e-6);
        assert_eq!(ind.recovery_period, 1);
    }

    #[test]
    fn test_all_zero_columns() {
        let table = financial_table(&[0.0, 0.0, 0.0], &[0.0, 0.0, 0.0]);
        let ind = FinancialEvaluation::compute(&table, DiscountRate::from_percent(8.0).unwrap()).unwrap();
        assert_eq!(ind.npv, 0.0);
        assert_eq!(ind.irr, None);
        assert_eq!(ind.recovery_period, 0);
    }

    #[test]
    fn test_text_in_costs_is_an_error() {
        let mut table = financial_table(&[100.0, 100.0], &[10.0, 20.0]);
        table.rows[0][2] = CellValue::Text("abc".into());
        let err = FinancialEvaluation::compute(&table, DiscountRate::from_percent(8.0).unwrap()).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::NonNumeric { column: "Total_Costs".into(), row: 1, value: "abc".into() }
        );
    }
}
