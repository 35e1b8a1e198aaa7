use super::state::PromptWizard;
use super::types::*;
use crate::api::SubmissionGateway;
use crate::error::ApiResult;

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Your prompt was submitted successfully!";
pub const SUBMIT_FAILURE_MESSAGE: &str = "Failed to submit prompt. Please try again.";

impl PromptWizard {
    /// Validate step 3 and mark the wizard busy.
    ///
    /// Returns the payload to post, or why nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<FormData, SubmitOutcome> {
        if self.is_submitting {
            return Err(SubmitOutcome::Busy);
        }
        if !self.validate_step(WizardStep::Compose) {
            return Err(SubmitOutcome::Invalid);
        }
        self.is_submitting = true;
        let mut payload = self.form.clone();
        payload.normalize();
        Ok(payload)
    }

    /// Apply the gateway result
    pub fn finish_submit(&mut self, result: ApiResult<()>) -> SubmitOutcome {
        self.is_submitting = false;
        match result {
            Ok(()) => {
                tracing::info!("Prompt submitted, resetting wizard");
                self.reset();
                self.notify(NotificationKind::Success, SUBMIT_SUCCESS_MESSAGE);
                SubmitOutcome::Submitted
            }
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("Submission rejected: session no longer authorized");
                SubmitOutcome::Unauthorized
            }
            Err(e) => {
                tracing::error!(code = e.code().as_str(), "Submission failed: {}", e);
                self.notify(NotificationKind::Error, SUBMIT_FAILURE_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }

    /// Validate, post and apply the result in one go
    pub async fn submit(&mut self, gateway: &dyn SubmissionGateway) -> SubmitOutcome {
        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };
        let result = gateway.submit(&payload).await;
        self.finish_submit(result)
    }
}
