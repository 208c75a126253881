//! Field validation run before the composer may leave the compose step.
//!
//! Intrinsic field rules live on [`PostForm`] as `validator` attributes; the
//! rules that depend on other fields, the compose mode or the session are
//! added here under the name of the field they are reported against.

use std::borrow::Cow;

use chrono_tz::Tz;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::domain::{ComposeMode, GarageSchedule, PostForm, PriceMode, Session};
use crate::mapping::combine_local;

pub const PRICE_FIELD: &str = "price";
pub const GARAGE_DATE_FIELD: &str = "garageDate";
pub const START_TIME_FIELD: &str = "startTimeOfDay";
pub const END_TIME_FIELD: &str = "endTimeOfDay";
pub const EMAIL_FIELD: &str = "email";
pub const TERMS_FIELD: &str = "terms";

/// Check every field of `form`. Returns all failures at once so the input
/// layer can mark each field and show one banner.
///
/// Garage-sale times are checked against `zone`, the zone the form is
/// materialized in.
pub fn validate_form(
    form: &PostForm,
    mode: &ComposeMode,
    session: &Session,
    zone: Tz,
) -> Result<(), ValidationErrors> {
    let mut errors = form.validate().err().unwrap_or_else(ValidationErrors::new);

    check_price(form, zone, &mut errors);

    if !mode.is_edit() {
        if !session.is_logged_in() && !form.email.validate_email() {
            errors.add(
                EMAIL_FIELD,
                field_error("email", "Enter a valid email address"),
            );
        }
        if !form.terms {
            errors.add(
                TERMS_FIELD,
                field_error("terms", "You must accept the terms to post"),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_price(form: &PostForm, zone: Tz, errors: &mut ValidationErrors) {
    match &form.price {
        None => errors.add(PRICE_FIELD, price_missing()),
        Some(PriceMode::Amount { text }) if text.trim().is_empty() => {
            errors.add(PRICE_FIELD, price_missing())
        }
        Some(PriceMode::GarageSale(schedule)) => {
            if schedule.date.is_none() {
                errors.add(
                    GARAGE_DATE_FIELD,
                    field_error("required", "Pick the date of the sale"),
                );
            }
            if schedule.start_time_of_day.is_none() {
                errors.add(
                    START_TIME_FIELD,
                    field_error("required", "Enter a start time"),
                );
            }
            if schedule.end_time_of_day.is_none() {
                errors.add(END_TIME_FIELD, field_error("required", "Enter an end time"));
            }
            if schedule.is_complete() {
                check_local_times(schedule, zone, errors);
            }
        }
        Some(_) => {}
    }
}

/// Both times must exist on the sale date; a clock change can skip them.
fn check_local_times(schedule: &GarageSchedule, zone: Tz, errors: &mut ValidationErrors) {
    let Some(date) = schedule.date else {
        return;
    };

    let fields = [
        (START_TIME_FIELD, schedule.start_time_of_day),
        (END_TIME_FIELD, schedule.end_time_of_day),
    ];
    for (field, time) in fields {
        if time.is_some_and(|time| combine_local(zone, date, time).is_none()) {
            errors.add(
                field,
                field_error("nonexistent_time", "That time is skipped by a clock change"),
            );
        }
    }
}

fn price_missing() -> ValidationError {
    field_error("price_required", "Enter a price or select an option")
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}
