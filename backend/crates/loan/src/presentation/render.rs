//! HTML fragments for validation results

use platform::html::{error_fragment, escape};

use crate::domain::record::{LoanOutcome, LoanRecord};

pub const NOT_FOUND_MESSAGE: &str = "User details not found in the government portal database.";

pub fn render_outcome(outcome: &LoanOutcome) -> String {
    match outcome {
        LoanOutcome::Found(record) => render_record(record),
        LoanOutcome::NotFound => error_fragment(NOT_FOUND_MESSAGE),
    }
}

pub fn render_record(record: &LoanRecord) -> String {
    format!(
        r#"<div class="space-y-3">
    <div class="info-row">
        <span class="info-label">First Name:</span>
        <span class="info-value">{first_name}</span>
    </div>
    <div class="info-row">
        <span class="info-label">Last Name:</span>
        <span class="info-value">{last_name}</span>
    </div>
    <div class="info-row">
        <span class="info-label">Date of Birth:</span>
        <span class="info-value">{date_of_birth}</span>
    </div>
    <div class="info-row">
        <span class="info-label">Loan Amount Requested:</span>
        <span class="info-value">${amount:.2}</span>
    </div>
    <div class="info-row">
        <span class="info-label">Loan Status:</span>
        <span class="info-value status-{status_class}">{status}</span>
    </div>
</div>"#,
        first_name = escape(&record.first_name),
        last_name = escape(&record.last_name),
        date_of_birth = escape(&record.date_of_birth),
        amount = record.loan_amount_requested,
        status_class = status_class(&record.loan_status),
        status = escape(&record.loan_status),
    )
}

/// `Under Review` -> `Under-Review`
fn status_class(status: &str) -> String {
    let joined: String = status
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    escape(&joined)
}
