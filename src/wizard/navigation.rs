use super::state::PromptWizard;
use super::types::*;

impl PromptWizard {
    /// Validate the current step and move forward.
    ///
    /// Returns false when validation failed (errors are populated) or when
    /// already on the last step, where submit is the only way out.
    pub fn advance(&mut self) -> bool {
        if !self.validate_step(self.step) {
            tracing::debug!("[advance] step {} invalid: {:?}", self.step.number(), self.errors);
            return false;
        }
        match self.step.next() {
            Some(next) => {
                tracing::debug!("[advance] {:?} → {:?}", self.step, next);
                self.step = next;
                true
            }
            None => false,
        }
    }

    /// Go back one step without validating.
    /// Returns true on step 1, meaning the user wants out.
    pub fn retreat(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                false
            }
            None => true,
        }
    }
}
