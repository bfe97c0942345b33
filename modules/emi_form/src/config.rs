//! Display settings for formatted amounts.

use serde::{Deserialize, Serialize};

use crate::format::Grouping;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Printed before every amount, followed by a space
    pub currency_symbol: String,
    pub grouping: Grouping,
    /// Shown in place of missing values
    pub placeholder: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "\u{20b9}".to_owned(),
            grouping: Grouping::Indian,
            placeholder: "-".to_owned(),
        }
    }
}
