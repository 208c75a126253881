use chrono_tz::Tz;

use crate::domain::{GarageSchedule, Post, PostForm, Price, PriceMode};

use super::split_local;

/// Expand a post into the form the input layer edits.
///
/// `None` yields the blank form used for a new post.
pub fn project(post: Option<&Post>, zone: Tz) -> PostForm {
    let Some(post) = post else {
        return PostForm::default();
    };

    PostForm {
        title: post.title.clone(),
        description: post.description.clone(),
        price: Some(price_mode(post, zone)),
        location: post.location.clone(),
        lat: post.exact_location.map(|point| point.lat),
        lng: post.exact_location.map(|point| point.lng),
        email: post.email.clone().unwrap_or_default(),
        media: post.media.clone(),
        terms: false,
    }
}

fn price_mode(post: &Post, zone: Tz) -> PriceMode {
    if post.price == Some(Price::Free) {
        return PriceMode::Free;
    }

    // A null price only means "not applicable" when there is no sale window.
    if let Some((start, end)) = post.sale_window() {
        let (date, start_time) = split_local(zone, start);
        let (_, end_time) = split_local(zone, end);
        return PriceMode::GarageSale(GarageSchedule::new(date, start_time, end_time));
    }

    match &post.price {
        None => PriceMode::NotApplicable,
        Some(price) => PriceMode::Amount {
            text: price.as_str().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    const ZONE: Tz = chrono_tz::America::Halifax;

    #[test]
    fn test_project_none_is_blank_form() {
        assert_eq!(project(None, ZONE), PostForm::default());
    }

    #[test]
    fn test_project_free_price() {
        let mut post = Post::new("Kittens", "Free to a good home");
        post.price = Some(Price::Free);

        let form = project(Some(&post), ZONE);
        assert_eq!(form.price, Some(PriceMode::Free));
    }

    #[test]
    fn test_project_amount() {
        let mut post = Post::new("Desk", "Oak");
        post.price = Some(Price::Amount("120 OBO".to_string()));

        let form = project(Some(&post), ZONE);
        assert_eq!(
            form.price,
            Some(PriceMode::Amount {
                text: "120 OBO".to_string()
            })
        );
    }

    #[test]
    fn test_project_null_price_without_window_is_not_applicable() {
        let post = Post::new("Lost cat", "Grey tabby");
        let form = project(Some(&post), ZONE);
        assert_eq!(form.price, Some(PriceMode::NotApplicable));
    }

    #[test]
    fn test_project_garage_sale_splits_window() {
        let mut post = Post::new("Moving sale", "Everything must go");
        post.is_garage_sale = true;
        post.start_time = Some(Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap());
        post.end_time = Some(Utc.with_ymd_and_hms(2024, 6, 1, 17, 30, 0).unwrap());

        let form = project(Some(&post), ZONE);
        let schedule = form.garage_schedule().unwrap();
        assert_eq!(schedule.date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(schedule.start_time_of_day, NaiveTime::from_hms_opt(8, 0, 0));
        assert_eq!(schedule.end_time_of_day, NaiveTime::from_hms_opt(14, 30, 0));
    }

    #[test]
    fn test_project_exact_location() {
        let mut post = Post::new("Canoe", "Green");
        post.exact_location = Some(GeoPoint::new(-63.57, 44.65));

        let form = project(Some(&post), ZONE);
        assert_eq!(form.lng, Some(-63.57));
        assert_eq!(form.lat, Some(44.65));
    }

    #[test]
    fn test_project_never_consents() {
        let mut post = Post::new("Canoe", "Green");
        post.email = Some("owner@example.com".to_string());

        let form = project(Some(&post), ZONE);
        assert!(!form.terms);
        assert_eq!(form.email, "owner@example.com");
    }
}
