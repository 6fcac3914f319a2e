use serde::{Deserialize, Serialize};

use audience_runtime::BudgetField;

/// Raw budget text as typed into the details page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub linear: String,
    pub ctv: String,
    pub ooh: String,
    pub overall: String,
}

impl BudgetBreakdown {
    pub fn set(&mut self, field: BudgetField, raw: impl Into<String>) {
        let slot = match field {
            BudgetField::Linear => &mut self.linear,
            BudgetField::Ctv => &mut self.ctv,
            BudgetField::Ooh => &mut self.ooh,
            BudgetField::Overall => &mut self.overall,
        };
        *slot = raw.into();
    }

    /// Sum of the per-channel budgets. `overall` is informational only.
    pub fn total(&self) -> f64 {
        coerce_amount(&self.linear) + coerce_amount(&self.ctv) + coerce_amount(&self.ooh)
    }
}

/// Parse a budget field; anything that is not a finite number counts as 0.
pub fn coerce_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_text_is_zero() {
        assert_eq!(coerce_amount(""), 0.0);
        assert_eq!(coerce_amount("lots"), 0.0);
        assert_eq!(coerce_amount("12 000"), 0.0);
        assert_eq!(coerce_amount("inf"), 0.0);
        assert_eq!(coerce_amount("NaN"), 0.0);
        assert_eq!(coerce_amount(" 2500.5 "), 2500.5);
    }

    #[test]
    fn total_sums_channels() {
        let mut budget = BudgetBreakdown::default();
        budget.set(BudgetField::Linear, "1000");
        budget.set(BudgetField::Ctv, "abc");
        budget.set(BudgetField::Ooh, "250");
        budget.set(BudgetField::Overall, "99999");
        assert_eq!(budget.total(), 1250.0);
    }
}
