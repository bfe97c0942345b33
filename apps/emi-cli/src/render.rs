//! Terminal rendering of the form.

use emi_form::{CurrencyFormatter, FormOutcome, FormState};

/// Result block or error line for the last submission; empty when there is
/// nothing to show yet.
pub fn outcome(state: &FormState, formatter: &CurrencyFormatter) -> String {
    match state.outcome() {
        None if state.is_loading() => "Calculating...".to_owned(),
        None => String::new(),
        Some(FormOutcome::Error(message)) => format!("Error: {message}"),
        Some(FormOutcome::Summary(summary)) => [
            format!(
                "Monthly EMI:     {}",
                formatter.format(Some(summary.monthly_installment))
            ),
            format!("Total months:    {}", summary.total_months),
            format!(
                "Total payment:   {}",
                formatter.format(Some(summary.total_payment))
            ),
            format!(
                "Total interest:  {}",
                formatter.format(Some(summary.total_interest))
            ),
        ]
        .join("\n"),
    }
}

/// Current field values followed by the outcome.
pub fn form(state: &FormState, formatter: &CurrencyFormatter) -> String {
    let field = |value: Option<f64>| {
        value.map_or_else(|| formatter.placeholder().to_owned(), |v| v.to_string())
    };

    let mut out = format!(
        "Loan amount:     {}\nInterest rate:   {}\nTerm (years):    {}",
        field(state.amount),
        field(state.rate),
        field(state.term)
    );
    let outcome = outcome(state, formatter);
    if !outcome.is_empty() {
        out.push_str("\n\n");
        out.push_str(&outcome);
    }
    out
}
