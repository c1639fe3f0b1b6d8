//! Field validation for candidate client records.
//!
//! Checks run in a fixed order and stop at the first failure:
//! data present, bags present and in range, name, flight code.

use serde_json::Number;

use crate::error::ValidationError;
use crate::schema::{BAGS_MAX, BAGS_MIN};
use crate::types::{ClientDraft, ClientFields};

/// Validate a draft and return its writable fields.
///
/// `id` is not looked at here; update checks it separately, after this.
pub fn validate(draft: Option<&ClientDraft>) -> Result<ClientFields, ValidationError> {
    let draft = draft.ok_or(ValidationError::DataRequired)?;

    let bags = draft.bags.as_ref().ok_or(ValidationError::BagsOutOfRange)?;
    let bags = whole_number(bags)
        .filter(|bags| (BAGS_MIN..=BAGS_MAX).contains(bags))
        .ok_or(ValidationError::BagsOutOfRange)?;

    let name = required_text(draft.name.as_deref()).ok_or(ValidationError::NameRequired)?;
    let flight_code =
        required_text(draft.flight_code.as_deref()).ok_or(ValidationError::FlightCodeRequired)?;

    Ok(ClientFields {
        name: name.to_string(),
        bags,
        flight_code: flight_code.to_string(),
    })
}

/// Integral value of a JSON number, if it fits an `i64`. `2.0` counts as 2.
fn whole_number(n: &Number) -> Option<i64> {
    if let Some(n) = n.as_i64() {
        return Some(n);
    }
    let f = n.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    let fits = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && fits).then_some(f as i64)
}

fn required_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
