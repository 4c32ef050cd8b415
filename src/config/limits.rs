//! Intake limits configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::ValidationError;

/// Intake limits: the per-traveler turn quota and the budget ceiling the
/// extraction collaborator validates against.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum turns a traveler may spend before an administrative reset
    #[serde(default = "default_turn_quota")]
    pub turn_quota: u32,

    /// Upper bound for the per-person budget, in euros
    #[serde(default = "default_budget_ceiling")]
    pub budget_ceiling: Decimal,
}

impl LimitsConfig {
    /// Validate limits configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.turn_quota == 0 {
            return Err(ValidationError::InvalidTurnQuota);
        }
        if self.budget_ceiling <= Decimal::ZERO {
            return Err(ValidationError::InvalidBudgetCeiling);
        }
        Ok(())
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            turn_quota: default_turn_quota(),
            budget_ceiling: default_budget_ceiling(),
        }
    }
}

fn default_turn_quota() -> u32 {
    15
}

fn default_budget_ceiling() -> Decimal {
    Decimal::new(50_000, 0)
}
