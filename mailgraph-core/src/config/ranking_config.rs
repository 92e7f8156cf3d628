use serde::{Deserialize, Serialize};

use super::defaults;

/// Graph-enhanced ranking knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Graph-score contribution per distinct ABOUT-linked product.
    pub product_weight: f64,
    /// Recency boost at age zero; decays linearly per day.
    pub recency_max_boost: f64,
    pub recency_decay_per_day: f64,
    /// Flat boost applied when the document date cannot be parsed.
    pub unparsed_date_boost: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            product_weight: defaults::DEFAULT_PRODUCT_WEIGHT,
            recency_max_boost: defaults::DEFAULT_RECENCY_MAX_BOOST,
            recency_decay_per_day: defaults::DEFAULT_RECENCY_DECAY_PER_DAY,
            unparsed_date_boost: defaults::DEFAULT_UNPARSED_DATE_BOOST,
        }
    }
}
