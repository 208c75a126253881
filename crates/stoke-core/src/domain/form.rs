use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::post::MediaRef;

/// Editable, UI-facing shape of a post.
///
/// Carries fields that never reach the server (`terms`) and splits composite
/// post fields into the pieces the input layer edits separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PostForm {
    #[validate(length(min = 1, message = "Enter a title"))]
    pub title: String,
    #[validate(length(min = 1, message = "Enter a description"))]
    pub description: String,
    /// `None` until the user picks a price option or types an amount.
    pub price: Option<PriceMode>,
    pub location: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub email: String,
    pub media: Vec<MediaRef>,
    pub terms: bool,
}

impl PostForm {
    /// Select a price option, discarding any previous amount or schedule.
    pub fn select_price(&mut self, mode: PriceMode) {
        self.price = Some(mode);
    }

    /// Type a free-text amount. Deselects any price option.
    pub fn set_price_amount(&mut self, text: impl Into<String>) {
        self.price = Some(PriceMode::Amount { text: text.into() });
    }

    /// Schedule of the garage sale, when that mode is selected.
    pub fn garage_schedule(&self) -> Option<&GarageSchedule> {
        match &self.price {
            Some(PriceMode::GarageSale(schedule)) => Some(schedule),
            _ => None,
        }
    }
}

/// Which branch of the price input is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum PriceMode {
    /// Free-text amount typed by the user.
    Amount { text: String },
    Free,
    NotApplicable,
    /// Price is irrelevant; a sale window is required instead.
    GarageSale(GarageSchedule),
}

/// Sale window as entered: one calendar date and two times of day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GarageSchedule {
    pub date: Option<NaiveDate>,
    pub start_time_of_day: Option<NaiveTime>,
    pub end_time_of_day: Option<NaiveTime>,
}

impl GarageSchedule {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            date: Some(date),
            start_time_of_day: Some(start),
            end_time_of_day: Some(end),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.start_time_of_day.is_some() && self.end_time_of_day.is_some()
    }
}
