//! Display-ready summary of a post, as shown in the preview and listings.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::domain::{Post, Price};

/// Label shown when a post has no applicable price.
pub const NOT_APPLICABLE_LABEL: &str = "Not Applicable";

/// Everything the detail view needs, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCard {
    pub title: String,
    /// Price label, or the sale window for garage sales.
    pub headline: String,
    pub location: String,
    /// Raw markdown; rendering belongs to the host.
    pub description: String,
    pub thumbnail_url: String,
    /// Only set once the post exists on the server.
    pub posted_on: Option<String>,
}

impl PreviewCard {
    /// Build the card. `submitted` is false while the post is still a preview.
    pub fn from_post(post: &Post, zone: Tz, media_base_url: &str, submitted: bool) -> Self {
        Self {
            title: post.title.clone(),
            headline: headline(post, zone),
            location: post.location.clone(),
            description: post.description.clone(),
            thumbnail_url: thumbnail_url(post, media_base_url),
            posted_on: post
                .created_at
                .filter(|_| submitted)
                .map(|created| pretty_date(created, zone)),
        }
    }
}

/// Sale window for garage sales, price label otherwise.
pub fn headline(post: &Post, zone: Tz) -> String {
    match post.sale_window() {
        Some((start, end)) if post.is_garage_sale => date_range(start, end, zone),
        _ => price_label(post.price.as_ref()),
    }
}

pub fn price_label(price: Option<&Price>) -> String {
    match price {
        None => NOT_APPLICABLE_LABEL.to_string(),
        Some(Price::Free) => "Free".to_string(),
        Some(Price::Amount(text)) if text.starts_with('$') => text.clone(),
        Some(Price::Amount(text)) => format!("${text}"),
    }
}

/// e.g. `Sat, Jun 1, 8:00 AM - 2:30 PM`. The end repeats its date only when
/// it falls on a different local day.
pub fn date_range(start: DateTime<Utc>, end: DateTime<Utc>, zone: Tz) -> String {
    let start = start.with_timezone(&zone);
    let end = end.with_timezone(&zone);

    let end_fmt = if start.date_naive() == end.date_naive() {
        "%-I:%M %p"
    } else {
        "%a, %b %-d, %-I:%M %p"
    };

    format!(
        "{} - {}",
        start.format("%a, %b %-d, %-I:%M %p"),
        end.format(end_fmt)
    )
}

/// e.g. `June 1, 2024`.
pub fn pretty_date(instant: DateTime<Utc>, zone: Tz) -> String {
    instant.with_timezone(&zone).format("%B %-d, %Y").to_string()
}

/// Stored thumbnail when the server has a photo, placeholder otherwise.
pub fn thumbnail_url(post: &Post, media_base_url: &str) -> String {
    let base = media_base_url.trim_end_matches('/');
    match &post.id {
        Some(id) if post.has_photo() => format!("{base}/photos/{id}/thumb.jpg"),
        _ => format!("{base}/images/placeholder.png"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ZONE: Tz = chrono_tz::America::Halifax;
    const BASE: &str = "https://list.example.org/";

    #[test]
    fn test_price_labels() {
        assert_eq!(price_label(None), NOT_APPLICABLE_LABEL);
        assert_eq!(price_label(Some(&Price::Free)), "Free");
        assert_eq!(price_label(Some(&Price::Amount("20".to_string()))), "$20");
        assert_eq!(price_label(Some(&Price::Amount("$20".to_string()))), "$20");
    }

    #[test]
    fn test_garage_sale_headline_is_window() {
        let mut post = Post::new("Yard sale", "Lots");
        post.is_garage_sale = true;
        post.start_time = Some(Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap());
        post.end_time = Some(Utc.with_ymd_and_hms(2024, 6, 1, 17, 30, 0).unwrap());

        assert_eq!(headline(&post, ZONE), "Sat, Jun 1, 8:00 AM - 2:30 PM");
    }

    #[test]
    fn test_window_across_days_repeats_date() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 2, 15, 0, 0).unwrap();
        assert_eq!(
            date_range(start, end, ZONE),
            "Sat, Jun 1, 8:00 AM - Sun, Jun 2, 12:00 PM"
        );
    }

    #[test]
    fn test_thumbnail_requires_id_and_photo() {
        let mut post = Post::new("Chair", "Wood");
        assert_eq!(
            thumbnail_url(&post, BASE),
            "https://list.example.org/images/placeholder.png"
        );

        post.id = Some("abc".to_string());
        post.photo_file_size = Some(5120);
        assert_eq!(
            thumbnail_url(&post, BASE),
            "https://list.example.org/photos/abc/thumb.jpg"
        );
    }

    #[test]
    fn test_preview_hides_created_date() {
        let mut post = Post::new("Chair", "Wood");
        post.created_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 15, 0, 0).unwrap());

        let preview = PreviewCard::from_post(&post, ZONE, BASE, false);
        assert_eq!(preview.posted_on, None);
        assert_eq!(preview.headline, NOT_APPLICABLE_LABEL);

        let submitted = PreviewCard::from_post(&post, ZONE, BASE, true);
        assert_eq!(submitted.posted_on.as_deref(), Some("June 1, 2024"));
    }
}
