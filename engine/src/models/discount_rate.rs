use crate::error::EngineError;

/// A constant discount rate applied to every period, as a fraction in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountRate(f64);

impl DiscountRate {
    /// Builds a rate from the percentage typed in the dashboard (0 to 100).
    pub fn from_percent(percent: f64) -> Result<Self, EngineError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(EngineError::ConfigError(format!(
                "Discount rate must be between 0 and 100 percent, got {}",
                percent
            )));
        }
        Ok(Self(percent / 100.0))
    }

    pub fn from_fraction(rate: f64) -> Result<Self, EngineError> {
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(EngineError::ConfigError(format!(
                "Discount rate must be between 0 and 1, got {}",
                rate
            )));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}
