use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Literal the backend uses for a free listing.
pub const FREE_PRICE: &str = "Free";

/// Post entity - a classified listing as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned identifier, absent until the post is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// Markdown text.
    pub description: String,
    /// `None` means "not applicable".
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub exact_location: Option<GeoPoint>,
    /// Owner contact. Omitted entirely when absent (edit mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_garage_sale: bool,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(
        rename = "created_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_file_size: Option<u64>,
}

impl Post {
    /// Create a new, unsaved post with no price and no schedule.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            price: None,
            location: String::new(),
            exact_location: None,
            email: None,
            is_garage_sale: false,
            start_time: None,
            end_time: None,
            media: Vec::new(),
            created_at: None,
            photo_file_size: None,
        }
    }

    /// Both ends of the sale window, when the post carries a complete one.
    pub fn sale_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.start_time.zip(self.end_time)
    }

    /// Whether the server has stored a photo for this post.
    pub fn has_photo(&self) -> bool {
        self.photo_file_size.is_some_and(|size| size > 0)
    }
}

/// Price of a listing as stored by the backend.
///
/// On the wire this is a bare string: either the `"Free"` literal or a
/// free-text amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Price {
    Free,
    Amount(String),
}

impl Price {
    pub fn as_str(&self) -> &str {
        match self {
            Price::Free => FREE_PRICE,
            Price::Amount(text) => text,
        }
    }
}

impl From<String> for Price {
    fn from(value: String) -> Self {
        if value == FREE_PRICE {
            Price::Free
        } else {
            Price::Amount(value)
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Price::from)
    }
}

/// A WGS84 point. Serialized as a GeoJSON `Point` with `[lng, lat]` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "GeoJsonPoint", try_from = "GeoJsonPoint")]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

#[derive(Serialize, Deserialize)]
struct GeoJsonPoint {
    #[serde(rename = "type")]
    kind: String,
    coordinates: [f64; 2],
}

impl From<GeoPoint> for GeoJsonPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [point.lng, point.lat],
        }
    }
}

impl TryFrom<GeoJsonPoint> for GeoPoint {
    type Error = String;

    fn try_from(value: GeoJsonPoint) -> Result<Self, Self::Error> {
        if value.kind != "Point" {
            return Err(format!("expected GeoJSON Point, got {}", value.kind));
        }
        let [lng, lat] = value.coordinates;
        Ok(Self { lng, lat })
    }
}

/// Reference to an uploaded media item. Opaque to the composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(pub serde_json::Value);
