// Record shapes served by the content backend.
//
// Field names follow the backend's JSON (`_id`, camelCase). Display-only
// strings default to empty so a sparse record still renders.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::resource::Resource;

/// A typed record belonging to exactly one [`Resource`].
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection this record type is served from.
    const RESOURCE: Resource;

    /// Server-assigned unique identifier.
    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($ty:ty, $resource:expr) => {
        impl Record for $ty {
            const RESOURCE: Resource = $resource;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub expertise: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub img: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    Youtube,
    Short,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub video_type: VideoType,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub rating: u8,
    #[serde(default)]
    pub review: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(rename = "_id")]
    pub id: String,
    pub q: String,
    pub a: String,
}

/// Service category. Records without one are filed under skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    #[default]
    Skin,
    Hair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: ServiceCategory,
    #[serde(default)]
    pub img: String,
}

/// Null or unrecognised categories are filed under skin rather than
/// failing the whole collection.
fn lenient_category<'de, D>(deserializer: D) -> Result<ServiceCategory, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("hair") => ServiceCategory::Hair,
        _ => ServiceCategory::Skin,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeforeAfterCase {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub img: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl_record!(Doctor, Resource::Doctors);
impl_record!(Video, Resource::Videos);
impl_record!(Testimonial, Resource::Testimonials);
impl_record!(Faq, Resource::Faqs);
impl_record!(Service, Resource::Services);
impl_record!(BeforeAfterCase, Resource::BeforeAfter);

/// An untyped record, as listed by the admin surface.
///
/// Admin tables render whichever columns the resource's form declares, so
/// the remaining fields are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawRecord {
    /// Render a field for display. Missing and null fields render empty.
    pub fn field_text(&self, name: &str) -> String {
        match self.fields.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Body returned by `POST /api/admin/login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body shape used by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn video_parses_backend_shape() {
        let video: Video = serde_json::from_value(json!({
            "_id": "v1",
            "title": "Hydrafacial walkthrough",
            "videoType": "short",
            "url": "https://www.instagram.com/reel/Cabc123/",
            "createdAt": "2025-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(video.video_type, VideoType::Short);
        assert!(video.thumbnail.is_none());
        assert!(video.created_at.is_some());
        assert_eq!(video.id(), "v1");
    }

    #[test]
    fn service_without_category_is_skin() {
        let svc: Service =
            serde_json::from_value(json!({ "_id": "s1", "title": "Chemical peel" })).unwrap();
        assert_eq!(svc.category, ServiceCategory::Skin);
    }

    #[test]
    fn unknown_or_null_category_is_skin() {
        let svcs: Vec<Service> = serde_json::from_value(json!([
            { "_id": "s1", "category": "laser" },
            { "_id": "s2", "category": null },
            { "_id": "s3", "category": "Hair" }
        ]))
        .unwrap();
        let cats: Vec<_> = svcs.iter().map(|s| s.category).collect();
        assert_eq!(
            cats,
            vec![ServiceCategory::Skin, ServiceCategory::Skin, ServiceCategory::Hair]
        );
    }

    #[test]
    fn raw_record_keeps_extra_fields() {
        let raw: RawRecord = serde_json::from_value(json!({
            "_id": "t1",
            "name": "Priya",
            "rating": 5,
            "role": null
        }))
        .unwrap();

        assert_eq!(raw.id, "t1");
        assert_eq!(raw.field_text("name"), "Priya");
        assert_eq!(raw.field_text("rating"), "5");
        assert_eq!(raw.field_text("role"), "");
        assert_eq!(raw.field_text("missing"), "");
    }
}
