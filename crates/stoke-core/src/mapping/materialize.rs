use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::domain::{GarageSchedule, GeoPoint, Post, PostForm, Price, PriceMode, Session};

use super::combine_local;

/// Collapse a form into the post shape sent to the backend.
///
/// The contact email comes from `session` when logged in, otherwise from the
/// form. Server-assigned fields are left empty. No consistency checks happen
/// here; run [`validate_form`](crate::validation::validate_form) first.
pub fn materialize(form: &PostForm, session: &Session, zone: Tz) -> Post {
    let (start_time, end_time) = form
        .garage_schedule()
        .map(|schedule| sale_window(schedule, zone))
        .unwrap_or((None, None));

    let email = match session.email() {
        Some(email) => Some(email.to_string()),
        None if form.email.is_empty() => None,
        None => Some(form.email.clone()),
    };

    Post {
        id: None,
        title: form.title.clone(),
        description: form.description.clone(),
        price: price(form.price.as_ref()),
        location: form.location.clone(),
        exact_location: form.lng.zip(form.lat).map(|(lng, lat)| GeoPoint::new(lng, lat)),
        email,
        is_garage_sale: matches!(form.price, Some(PriceMode::GarageSale(_))),
        start_time,
        end_time,
        media: form.media.clone(),
        created_at: None,
        photo_file_size: None,
    }
}

fn price(mode: Option<&PriceMode>) -> Option<Price> {
    match mode? {
        PriceMode::Free => Some(Price::Free),
        PriceMode::NotApplicable | PriceMode::GarageSale(_) => None,
        PriceMode::Amount { text } => Some(Price::Amount(text.clone())),
    }
}

fn sale_window(
    schedule: &GarageSchedule,
    zone: Tz,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let Some(date) = schedule.date else {
        return (None, None);
    };

    let start = schedule
        .start_time_of_day
        .and_then(|time| combine_local(zone, date, time));
    // The end shares the start's calendar date and needs a valid start.
    let end = start
        .and(schedule.end_time_of_day)
        .and_then(|time| combine_local(zone, date, time));

    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::project;
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use serde_json::json;

    const ZONE: Tz = chrono_tz::America::Halifax;

    fn form(price: Option<PriceMode>) -> PostForm {
        PostForm {
            title: "Bike".to_string(),
            description: "Red, barely used".to_string(),
            price,
            location: "Dartmouth".to_string(),
            ..PostForm::default()
        }
    }

    fn time_of_day(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn schedule() -> GarageSchedule {
        GarageSchedule::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time_of_day(8, 0),
            time_of_day(14, 30),
        )
    }

    #[test]
    fn test_free_materializes_to_literal() {
        let post = materialize(&form(Some(PriceMode::Free)), &Session::Anonymous, ZONE);
        assert_eq!(post.price, Some(Price::Free));
        assert!(!post.is_garage_sale);
    }

    #[test]
    fn test_not_applicable_is_null_price() {
        let post = materialize(
            &form(Some(PriceMode::NotApplicable)),
            &Session::Anonymous,
            ZONE,
        );
        assert_eq!(post.price, None);
        assert_eq!(post.sale_window(), None);
    }

    #[test]
    fn test_amount_is_verbatim() {
        let post = materialize(
            &form(Some(PriceMode::Amount {
                text: "$40 firm".to_string(),
            })),
            &Session::Anonymous,
            ZONE,
        );
        assert_eq!(post.price, Some(Price::Amount("$40 firm".to_string())));
    }

    #[test]
    fn test_garage_sale_builds_window_and_drops_price() {
        let post = materialize(
            &form(Some(PriceMode::GarageSale(schedule()))),
            &Session::Anonymous,
            ZONE,
        );

        assert!(post.is_garage_sale);
        assert_eq!(post.price, None);
        assert_eq!(
            post.start_time,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap())
        );
        assert_eq!(
            post.end_time,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 17, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_garage_sale_without_date_has_no_window() {
        let mut schedule = schedule();
        schedule.date = None;

        let post = materialize(
            &form(Some(PriceMode::GarageSale(schedule))),
            &Session::Anonymous,
            ZONE,
        );
        assert!(post.is_garage_sale);
        assert_eq!(post.start_time, None);
        assert_eq!(post.end_time, None);
    }

    #[test]
    fn test_end_requires_start() {
        let mut schedule = schedule();
        schedule.start_time_of_day = None;

        let post = materialize(
            &form(Some(PriceMode::GarageSale(schedule))),
            &Session::Anonymous,
            ZONE,
        );
        assert_eq!(post.start_time, None);
        assert_eq!(post.end_time, None);
    }

    #[test]
    fn test_no_mode_combination_yields_price_and_garage_sale() {
        let modes = [
            None,
            Some(PriceMode::Free),
            Some(PriceMode::NotApplicable),
            Some(PriceMode::Amount {
                text: "5".to_string(),
            }),
            Some(PriceMode::GarageSale(schedule())),
        ];

        for mode in modes {
            let post = materialize(&form(mode), &Session::Anonymous, ZONE);
            assert!(!(post.price.is_some() && post.is_garage_sale));
            if !post.is_garage_sale {
                assert_eq!(post.sale_window(), None);
            }
        }
    }

    #[test]
    fn test_point_requires_both_coordinates() {
        let mut only_lat = form(Some(PriceMode::Free));
        only_lat.lat = Some(44.65);
        assert_eq!(
            materialize(&only_lat, &Session::Anonymous, ZONE).exact_location,
            None
        );

        let mut only_lng = form(Some(PriceMode::Free));
        only_lng.lng = Some(-63.57);
        assert_eq!(
            materialize(&only_lng, &Session::Anonymous, ZONE).exact_location,
            None
        );

        let mut both = only_lng;
        both.lat = Some(44.65);
        assert_eq!(
            materialize(&both, &Session::Anonymous, ZONE).exact_location,
            Some(GeoPoint::new(-63.57, 44.65))
        );
    }

    #[test]
    fn test_email_prefers_session_identity() {
        let mut anonymous = form(Some(PriceMode::Free));
        anonymous.email = "typed@example.com".to_string();

        let post = materialize(&anonymous, &Session::Anonymous, ZONE);
        assert_eq!(post.email.as_deref(), Some("typed@example.com"));

        let session = Session::authenticated("member@example.com", "token");
        let post = materialize(&anonymous, &session, ZONE);
        assert_eq!(post.email.as_deref(), Some("member@example.com"));
    }

    #[test]
    fn test_media_is_copied() {
        let mut with_media = form(Some(PriceMode::Free));
        with_media.media = vec![crate::domain::MediaRef(json!({"key": "abc.jpg"}))];

        let post = materialize(&with_media, &Session::Anonymous, ZONE);
        assert_eq!(post.media, with_media.media);
    }

    fn assert_round_trip(post: &Post) {
        let back = materialize(&project(Some(post), ZONE), &Session::Anonymous, ZONE);
        assert_eq!(back.title, post.title);
        assert_eq!(back.description, post.description);
        assert_eq!(back.price, post.price);
        assert_eq!(back.location, post.location);
        assert_eq!(back.exact_location, post.exact_location);
        assert_eq!(back.is_garage_sale, post.is_garage_sale);
        assert_eq!(back.start_time, post.start_time);
        assert_eq!(back.end_time, post.end_time);
        assert_eq!(back.media, post.media);
    }

    #[test]
    fn test_round_trip_free() {
        let mut post = Post::new("Kittens", "Free to a good home");
        post.price = Some(Price::Free);
        assert_round_trip(&post);
    }

    #[test]
    fn test_round_trip_amount_and_point() {
        let mut post = Post::new("Canoe", "Green, 16ft");
        post.price = Some(Price::Amount("650".to_string()));
        post.location = "Halifax".to_string();
        post.exact_location = Some(GeoPoint::new(-63.57, 44.65));
        post.media = vec![crate::domain::MediaRef(json!("photo-1"))];
        assert_round_trip(&post);
    }

    #[test]
    fn test_round_trip_not_applicable() {
        assert_round_trip(&Post::new("Found keys", "Near the library"));
    }

    #[test]
    fn test_round_trip_garage_sale() {
        let mut post = Post::new("Yard sale", "Tools and toys");
        post.is_garage_sale = true;
        post.start_time = Some(Utc.with_ymd_and_hms(2024, 8, 17, 12, 0, 0).unwrap());
        post.end_time = Some(Utc.with_ymd_and_hms(2024, 8, 17, 19, 45, 0).unwrap());
        assert_round_trip(&post);
    }
}
