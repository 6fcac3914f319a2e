use audience_runtime::WizardStep;
use serde::{Deserialize, Serialize};

/// Linear cursor over the wizard pages. Moves one step at a time and is a
/// no-op at either end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardCursor {
    step: WizardStep,
}

impl WizardCursor {
    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_first(&self) -> bool {
        self.step.index() == 0
    }

    pub fn is_last(&self) -> bool {
        self.step.index() + 1 == WizardStep::ALL.len()
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        match WizardStep::from_index(self.step.index() + 1) {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    /// Returns whether the cursor moved.
    pub fn back(&mut self) -> bool {
        match self.step.index().checked_sub(1).and_then(WizardStep::from_index) {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }
}
