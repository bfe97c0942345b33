//! Form state and its reducer.
//!
//! [`FormState::reduce`] is pure: it consumes the current state and an
//! action and returns the next state plus, for a valid submission, the
//! calculation the caller has to run.

use emi_calculator_sdk::{CalculationResult, CalculatorError, LoanInput};

use crate::validation::validate_input;

/// Identifies one submission so late completions can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(u64);

impl SubmissionId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Installment plus the totals derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanSummary {
    pub monthly_installment: f64,
    pub total_months: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

impl LoanSummary {
    #[must_use]
    pub fn derive(input: &LoanInput, result: &CalculationResult) -> Self {
        let total_months = input.term_years * 12.0;
        let total_payment = result.monthly_installment * total_months;
        Self {
            monthly_installment: result.monthly_installment,
            total_months,
            total_payment,
            total_interest: total_payment - input.amount,
        }
    }
}

/// What the result panel shows; a summary and an error never coexist.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Summary(LoanSummary),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetAmount(Option<f64>),
    SetRate(Option<f64>),
    SetTerm(Option<f64>),
    Submit,
    Completed {
        id: SubmissionId,
        outcome: Result<CalculationResult, CalculatorError>,
    },
    Reset,
}

/// Work requested by the reducer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Calculate { id: SubmissionId, input: LoanInput },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub amount: Option<f64>,
    pub rate: Option<f64>,
    pub term: Option<f64>,
    outcome: Option<FormOutcome>,
    pending: Option<(SubmissionId, LoanInput)>,
    // Survives reset so ids are never reused
    next_id: u64,
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&FormOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&LoanSummary> {
        match &self.outcome {
            Some(FormOutcome::Summary(summary)) => Some(summary),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(FormOutcome::Error(message)) => Some(message),
            _ => None,
        }
    }

    /// Id of the submission awaiting completion, if any.
    #[must_use]
    pub fn pending_submission(&self) -> Option<SubmissionId> {
        self.pending.map(|(id, _)| id)
    }

    /// Apply one action.
    #[must_use]
    pub fn reduce(self, action: FormAction) -> (Self, Option<Effect>) {
        match action {
            FormAction::SetAmount(amount) => (Self { amount, ..self }, None),
            FormAction::SetRate(rate) => (Self { rate, ..self }, None),
            FormAction::SetTerm(term) => (Self { term, ..self }, None),
            FormAction::Submit => self.submit(),
            FormAction::Completed { id, outcome } => (self.complete(id, outcome), None),
            FormAction::Reset => (
                Self {
                    next_id: self.next_id,
                    ..Self::default()
                },
                None,
            ),
        }
    }

    fn submit(self) -> (Self, Option<Effect>) {
        if self.is_loading() {
            return (self, None);
        }
        match validate_input(self.amount, self.rate, self.term) {
            Err(err) => (
                Self {
                    outcome: Some(FormOutcome::Error(err.to_string())),
                    ..self
                },
                None,
            ),
            Ok(input) => {
                let id = SubmissionId(self.next_id);
                let next = Self {
                    outcome: None,
                    pending: Some((id, input)),
                    next_id: self.next_id + 1,
                    ..self
                };
                (next, Some(Effect::Calculate { id, input }))
            }
        }
    }

    fn complete(
        self,
        id: SubmissionId,
        outcome: Result<CalculationResult, CalculatorError>,
    ) -> Self {
        let Some((pending_id, input)) = self.pending else {
            return self;
        };
        if pending_id != id {
            return self;
        }
        let outcome = match outcome {
            Ok(result) => FormOutcome::Summary(LoanSummary::derive(&input, &result)),
            Err(err) => FormOutcome::Error(err.message().to_owned()),
        };
        Self {
            outcome: Some(outcome),
            pending: None,
            ..self
        }
    }
}
