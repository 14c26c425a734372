use chrono::Utc;
use uuid::Uuid;

use crate::builders::records::{Payment, PaymentMethod, PaymentOutcome, PaymentReceipt};
use crate::builders::validator;
use crate::core::error::ClinicError;
use crate::core::store::Store;

/// Fixed test card number that the mock card authorizer approves. Every
/// other Luhn-valid number is declined.
const TEST_CARD: &str = "4242424242424242";

/// Parses a raw amount string into minor currency units (cents).
///
/// The amount must parse as a positive decimal; it is multiplied by 100 and
/// rounded to the nearest integer. Zero, negative, and unparsable amounts are
/// validation failures — nothing is persisted for them.
pub fn parse_amount_cents(raw: &str) -> Result<i64, ClinicError> {
    let cents = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| (v * 100.0).round() as i64)
        .ok_or_else(|| ClinicError::validation("Invalid amount."))?;

    if cents <= 0 {
        return Err(ClinicError::validation("Invalid amount."));
    }
    Ok(cents)
}

/// Routes a payment request to the matching mock authorization strategy and
/// records the outcome.
///
/// Per attempt this is a straight state machine with terminal states only:
/// method-specific validation either rejects the request (no row written) or
/// produces exactly one of approved / declined / pending, and exactly one
/// payment row is persisted before the caller sees the receipt. A declined
/// card is a successful call with a `Declined` outcome, not an error.
pub fn process(
    store: &Store,
    patient_name: &str,
    amount_cents: i64,
    method: &PaymentMethod,
) -> Result<PaymentReceipt, ClinicError> {
    let patient_name = patient_name.trim();
    if patient_name.is_empty() {
        return Err(ClinicError::validation("Complete name and amount."));
    }

    let (outcome, reference) = authorize(method)?;

    let payment = Payment {
        id: Uuid::new_v4().to_string(),
        patient_name: patient_name.to_string(),
        amount_cents,
        method: method.kind(),
        result: outcome,
        reference: reference.clone(),
        created_at: Utc::now().to_rfc3339(),
    };
    store.insert_payment(&payment)?;

    Ok(PaymentReceipt { outcome, reference })
}

/// Runs the method-specific validation and produces the terminal outcome and
/// its method-prefixed reference. No side effects; persistence is the
/// caller's job.
fn authorize(method: &PaymentMethod) -> Result<(PaymentOutcome, String), ClinicError> {
    match method {
        PaymentMethod::Card {
            number,
            exp_month: _,
            exp_year: _,
            cvc,
        } => {
            // Expiry month/year are captured from the form but deliberately
            // not range-validated: the business rule does not gate approval
            // on expiry.
            if !validator::luhn_valid(number) {
                return Err(ClinicError::validation("Invalid card (Luhn)."));
            }
            let cvc = cvc.trim();
            if cvc.len() < 3 || !cvc.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ClinicError::validation("Invalid CVC."));
            }

            let stamp = utc_stamp();
            if validator::card_digits(number) == TEST_CARD {
                Ok((PaymentOutcome::Approved, format!("CC-SUCC-{stamp}")))
            } else {
                Ok((PaymentOutcome::Declined, format!("CC-DECL-{stamp}")))
            }
        }
        PaymentMethod::PayPal { email } => {
            if !validator::valid_email_shape(email.trim()) {
                return Err(ClinicError::validation("Invalid PayPal email."));
            }
            Ok((PaymentOutcome::Approved, format!("PP-{}", utc_stamp())))
        }
        PaymentMethod::Transfer { reference } => {
            let reference = reference.trim();
            if reference.len() < 5 {
                return Err(ClinicError::validation("Bank reference is too short."));
            }
            // Transfers are never auto-approved; they stay pending until a
            // human reconciles the bank statement.
            Ok((PaymentOutcome::Pending, format!("TRANSF-{reference}")))
        }
    }
}

/// UTC timestamp in the `YYYYMMDDHHMMSS` form used by payment references.
fn utc_stamp() -> String {
    Utc::now().format("%Y%m%d%H%M%S").to_string()
}
