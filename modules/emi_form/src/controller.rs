//! Async driver for the form reducer.

use std::sync::Arc;

use emi_calculator_sdk::EmiCalculatorClient;
use tracing::debug;

use crate::state::{Effect, FormAction, FormState};

/// Owns the [`FormState`] and runs the calculations the reducer requests,
/// one at a time.
pub struct FormController<C: EmiCalculatorClient + ?Sized> {
    client: Arc<C>,
    state: FormState,
}

impl<C: EmiCalculatorClient + ?Sized> FormController<C> {
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            state: FormState::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Feed one action to the reducer and return the effect it produced,
    /// without running it.
    pub fn dispatch(&mut self, action: FormAction) -> Option<Effect> {
        let (next, effect) = std::mem::take(&mut self.state).reduce(action);
        self.state = next;
        effect
    }

    pub fn set_amount(&mut self, amount: Option<f64>) {
        self.dispatch(FormAction::SetAmount(amount));
    }

    pub fn set_rate(&mut self, rate: Option<f64>) {
        self.dispatch(FormAction::SetRate(rate));
    }

    pub fn set_term(&mut self, term: Option<f64>) {
        self.dispatch(FormAction::SetTerm(term));
    }

    pub fn reset(&mut self) {
        self.dispatch(FormAction::Reset);
    }

    /// Validate and, when the input is valid, call the client once and
    /// record its outcome.
    pub async fn submit(&mut self) -> &FormState {
        if let Some(effect) = self.dispatch(FormAction::Submit) {
            self.run(effect).await;
        } else if let Some(message) = self.state.error() {
            debug!(reason = message, "submission not sent");
        }
        &self.state
    }

    /// Execute an effect and dispatch its completion.
    pub async fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Calculate { id, input } => {
                debug!(submission = id.get(), ?input, "calculating emi");
                let outcome = self.client.calculate(&input).await;
                debug!(submission = id.get(), ok = outcome.is_ok(), "calculation finished");
                self.dispatch(FormAction::Completed { id, outcome });
            }
        }
    }
}
