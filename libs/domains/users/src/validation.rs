//! Request validation shared by create and update.

use chrono::NaiveDate;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dates::{DateError, parse_date};
use crate::error::{UserError, UserResult};
use crate::models::UserRequest;

/// A request that passed validation, with the date of birth already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUser {
    pub name: String,
    pub dob: NaiveDate,
}

/// Check every rule on `request` and report all failures at once.
///
/// `name` must be 1..=255 characters (no trimming). `dob` must be present,
/// parse as `YYYY-MM-DD` and not lie after `today`.
pub fn validate_user(request: &UserRequest, today: NaiveDate) -> UserResult<ValidUser> {
    let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);

    let dob = match check_dob(&request.dob, today) {
        Ok(dob) => Some(dob),
        Err(error) => {
            errors.add("dob", error);
            None
        }
    };

    match dob {
        Some(dob) if errors.is_empty() => Ok(ValidUser {
            name: request.name.clone(),
            dob,
        }),
        _ => Err(UserError::Validation(errors)),
    }
}

fn check_dob(text: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::new("required").with_message("dob is required".into()));
    }

    let dob = parse_date(text).map_err(|err| {
        let code = match err {
            DateError::InvalidFormat(_) => "invalid_format",
            DateError::InvalidDate(_) => "invalid_date",
        };
        ValidationError::new(code).with_message(err.to_string().into())
    })?;

    if dob > today {
        return Err(ValidationError::new("future_date")
            .with_message("dob cannot be in the future".into()));
    }

    Ok(dob)
}
