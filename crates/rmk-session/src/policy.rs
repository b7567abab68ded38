//! The bounded-unsure budget policy.

use rmk_core::LabelValue;

/// Default per-dataset cap on `unsure` labels.
pub const DEFAULT_UNSURE_BUDGET: usize = 20;

/// Pure function of the current unsure count — no hidden state.
///
/// While the count is under the budget all three labels are offered; at the
/// budget, `unsure` is withdrawn from the offered set and submissions of it
/// are rejected outright (never silently clamped to something else).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetPolicy {
    budget: usize,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            budget: DEFAULT_UNSURE_BUDGET,
        }
    }
}

impl BudgetPolicy {
    #[must_use]
    pub const fn new(budget: usize) -> Self {
        Self { budget }
    }

    #[must_use]
    pub const fn budget(&self) -> usize {
        self.budget
    }

    /// The label set offered for the next submission.
    #[must_use]
    pub fn allowed_labels(&self, unsure_count: usize) -> Vec<LabelValue> {
        if unsure_count < self.budget {
            vec![LabelValue::Reject, LabelValue::Accept, LabelValue::Unsure]
        } else {
            vec![LabelValue::Reject, LabelValue::Accept]
        }
    }

    /// Whether `label` may be submitted at the given unsure count.
    #[must_use]
    pub fn permits(&self, label: LabelValue, unsure_count: usize) -> bool {
        label != LabelValue::Unsure || unsure_count < self.budget
    }
}
