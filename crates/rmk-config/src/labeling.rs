//! Labeling policy configuration.

use serde::{Deserialize, Serialize};

fn default_unsure_budget() -> usize {
    20
}

fn default_label_column() -> String {
    String::from("RA_AI_Labels")
}

/// Knobs for the labeling session itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LabelingConfig {
    /// How many `unsure` labels a reviewer may spend per dataset before the
    /// option is withdrawn.
    #[serde(default = "default_unsure_budget")]
    pub unsure_budget: usize,

    /// Name of the label column written into each dataset. One shared
    /// column per dataset; last writer wins.
    #[serde(default = "default_label_column")]
    pub label_column: String,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            unsure_budget: default_unsure_budget(),
            label_column: default_label_column(),
        }
    }
}
