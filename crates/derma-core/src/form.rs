// ── Admin form schema and drafts ──
//
// Each resource declares its editable fields. A `FormDraft` collects values
// for one add/edit form and is validated locally, so a bad draft never
// reaches the network.

use std::collections::BTreeMap;

use derma_api::payload::IMAGE_FIELD;
use derma_api::{ImageAttachment, Payload, RawRecord, Resource};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Allowed `category` values for services.
pub const SERVICE_CATEGORIES: &[&str] = &["skin", "hair"];

/// Allowed `videoType` values for videos.
pub const VIDEO_TYPES: &[&str] = &["youtube", "short"];

/// Input widget for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    /// Whole number from 1 to 5.
    Rating,
    Choice(&'static [&'static str]),
    /// Image upload. Required when creating, optional when editing.
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, label, kind }
}

const DOCTOR_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text),
    field("degree", "Degree", FieldKind::Text),
    field("expertise", "Expertise", FieldKind::Text),
    field("experience", "Experience", FieldKind::Text),
    field("img", "Image", FieldKind::Image),
];

const VIDEO_FIELDS: &[FieldSpec] = &[
    field("title", "Title", FieldKind::Text),
    field("videoType", "Video type", FieldKind::Choice(VIDEO_TYPES)),
    field("url", "URL", FieldKind::Text),
];

const TESTIMONIAL_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text),
    field("role", "Role", FieldKind::Text),
    field("rating", "Rating", FieldKind::Rating),
    field("review", "Review", FieldKind::LongText),
];

const FAQ_FIELDS: &[FieldSpec] = &[
    field("q", "Question", FieldKind::Text),
    field("a", "Answer", FieldKind::LongText),
];

const SERVICE_FIELDS: &[FieldSpec] = &[
    field("title", "Title", FieldKind::Text),
    field("description", "Description", FieldKind::LongText),
    field("category", "Category", FieldKind::Choice(SERVICE_CATEGORIES)),
    field("img", "Image", FieldKind::Image),
];

const BEFORE_AFTER_FIELDS: &[FieldSpec] = &[
    field("title", "Title", FieldKind::Text),
    field("img", "Image", FieldKind::Image),
];

/// Editable fields of `resource`, in form order.
pub fn fields(resource: Resource) -> &'static [FieldSpec] {
    match resource {
        Resource::Doctors => DOCTOR_FIELDS,
        Resource::Videos => VIDEO_FIELDS,
        Resource::Testimonials => TESTIMONIAL_FIELDS,
        Resource::Faqs => FAQ_FIELDS,
        Resource::Services => SERVICE_FIELDS,
        Resource::BeforeAfter => BEFORE_AFTER_FIELDS,
    }
}

/// Look up one field of `resource` by wire name.
pub fn field_spec(resource: Resource, name: &str) -> Option<&'static FieldSpec> {
    fields(resource).iter().find(|f| f.name == name)
}

/// Listing column: header text and the record field it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub field: &'static str,
}

const fn col(header: &'static str, field: &'static str) -> Column {
    Column { header, field }
}

const DOCTOR_COLUMNS: &[Column] = &[
    col("Name", "name"),
    col("Degree", "degree"),
    col("Expertise", "expertise"),
    col("Experience", "experience"),
];

const VIDEO_COLUMNS: &[Column] = &[
    col("Title", "title"),
    col("Type", "videoType"),
    col("URL", "url"),
];

const TESTIMONIAL_COLUMNS: &[Column] = &[
    col("Name", "name"),
    col("Role", "role"),
    col("Rating", "rating"),
    col("Review", "review"),
];

const FAQ_COLUMNS: &[Column] = &[col("Question", "q"), col("Answer", "a")];

const SERVICE_COLUMNS: &[Column] = &[
    col("Title", "title"),
    col("Category", "category"),
    col("Description", "description"),
    col("Image", "img"),
];

const BEFORE_AFTER_COLUMNS: &[Column] = &[col("Title", "title"), col("Image", "img")];

/// Columns shown when listing `resource` in the admin surface.
pub fn columns(resource: Resource) -> &'static [Column] {
    match resource {
        Resource::Doctors => DOCTOR_COLUMNS,
        Resource::Videos => VIDEO_COLUMNS,
        Resource::Testimonials => TESTIMONIAL_COLUMNS,
        Resource::Faqs => FAQ_COLUMNS,
        Resource::Services => SERVICE_COLUMNS,
        Resource::BeforeAfter => BEFORE_AFTER_COLUMNS,
    }
}

/// Whether the form adds a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Field values for one add/edit form.
#[derive(Debug, Clone)]
pub struct FormDraft {
    resource: Resource,
    mode: FormMode,
    values: BTreeMap<&'static str, String>,
    image: Option<ImageAttachment>,
}

impl FormDraft {
    /// An empty draft.
    pub fn new(resource: Resource, mode: FormMode) -> Self {
        Self {
            resource,
            mode,
            values: BTreeMap::new(),
            image: None,
        }
    }

    /// An edit draft pre-filled from an existing record. Fields outside the
    /// form schema (ids, timestamps) are not carried over.
    pub fn from_record(resource: Resource, record: &RawRecord) -> Self {
        let mut draft = Self::new(resource, FormMode::Edit);
        for spec in fields(resource) {
            let text = record.field_text(spec.name);
            if !text.is_empty() {
                draft.values.insert(spec.name, text);
            }
        }
        draft
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    /// Set a field. Unknown field names are rejected immediately.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), CoreError> {
        let spec = field_spec(self.resource, name).ok_or_else(|| {
            CoreError::validation(
                name,
                format!(
                    "not a {} field (expected one of: {})",
                    self.resource.singular(),
                    field_names(self.resource)
                ),
            )
        })?;
        self.values.insert(spec.name, value.into());
        Ok(())
    }

    /// Apply a `key=value` assignment.
    pub fn set_assignment(&mut self, assignment: &str) -> Result<(), CoreError> {
        let (key, value) = parse_assignment(assignment)?;
        self.set(key, value)
    }

    /// Attach an image upload. Only resources with an image field take one.
    pub fn attach_image(&mut self, image: ImageAttachment) -> Result<(), CoreError> {
        if !self.resource.accepts_image() {
            return Err(CoreError::validation(
                IMAGE_FIELD,
                format!("{} records do not take an image", self.resource.singular()),
            ));
        }
        self.image = Some(image);
        Ok(())
    }

    /// Check every field against the schema.
    pub fn validate(&self) -> Result<(), CoreError> {
        for spec in fields(self.resource) {
            let value = self.value(spec.name).map(str::trim).unwrap_or_default();
            match spec.kind {
                FieldKind::Image => {
                    if self.mode == FormMode::Create && self.image.is_none() {
                        return Err(CoreError::validation(
                            spec.name,
                            "an image is required for new records",
                        ));
                    }
                }
                FieldKind::Text | FieldKind::LongText => {
                    if value.is_empty() {
                        return Err(required(spec));
                    }
                }
                FieldKind::Rating => {
                    if value.is_empty() {
                        return Err(required(spec));
                    }
                    parse_rating(value)?;
                }
                FieldKind::Choice(options) => {
                    if value.is_empty() {
                        return Err(required(spec));
                    }
                    if !options.contains(&value) {
                        return Err(CoreError::validation(
                            spec.name,
                            format!("must be one of: {}", options.join(", ")),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Validate and convert into a wire payload.
    pub fn into_payload(self) -> Result<Payload, CoreError> {
        self.validate()?;

        let mut map = Map::new();
        for spec in fields(self.resource) {
            let Some(value) = self.values.get(spec.name) else {
                continue;
            };
            let value = value.trim();
            let json = match spec.kind {
                FieldKind::Rating => Value::from(parse_rating(value)?),
                // An uploaded image replaces the stored URL.
                FieldKind::Image if self.image.is_some() => continue,
                _ => Value::String(value.to_owned()),
            };
            map.insert(spec.name.to_owned(), json);
        }

        let payload = Payload::new(map);
        Ok(match self.image {
            Some(image) => payload.with_image(image),
            None => payload,
        })
    }
}

/// Split `key=value`. The value may itself contain `=`.
pub fn parse_assignment(assignment: &str) -> Result<(&str, &str), CoreError> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(CoreError::validation(assignment, "expected key=value")),
    }
}

fn parse_rating(value: &str) -> Result<u8, CoreError> {
    match value.parse::<u8>() {
        Ok(n @ 1..=5) => Ok(n),
        _ => Err(CoreError::validation("rating", "must be a whole number from 1 to 5")),
    }
}

fn required(spec: &FieldSpec) -> CoreError {
    CoreError::validation(spec.name, format!("{} is required", spec.label))
}

fn field_names(resource: Resource) -> String {
    fields(resource)
        .iter()
        .map(|f| f.name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn faq_draft() -> FormDraft {
        let mut d = FormDraft::new(Resource::Faqs, FormMode::Create);
        d.set("q", "Does it hurt?").unwrap();
        d.set("a", "Barely.").unwrap();
        d
    }

    #[test]
    fn every_resource_has_fields_and_columns() {
        for r in Resource::ALL {
            assert!(!fields(r).is_empty());
            assert!(!columns(r).is_empty());
        }
        assert!(fields(Resource::Doctors).iter().any(|f| f.kind == FieldKind::Image));
        assert!(!fields(Resource::Faqs).iter().any(|f| f.kind == FieldKind::Image));
    }

    #[test]
    fn every_column_shows_a_form_field() {
        let listed: Vec<&'static [Column]> = Resource::ALL.into_iter().map(columns).collect();
        for (resource, cols) in Resource::ALL.into_iter().zip(listed) {
            for column in cols {
                assert!(
                    field_spec(resource, column.field).is_some(),
                    "{resource} column {} has no form field",
                    column.field
                );
            }
        }
        assert_eq!(columns(Resource::Faqs)[0], col("Question", "q"));
    }

    #[test]
    fn complete_json_draft_validates() {
        let payload = faq_draft().into_payload().unwrap();
        assert!(payload.image.is_none());
        assert_eq!(payload.fields.get("q"), Some(&json!("Does it hurt?")));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut d = FormDraft::new(Resource::Faqs, FormMode::Create);
        let err = d.set("question", "x").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let mut d = FormDraft::new(Resource::Faqs, FormMode::Create);
        d.set("q", "  ").unwrap();
        d.set("a", "yes").unwrap();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "q"));
    }

    #[test]
    fn rating_must_be_one_to_five() {
        let mut d = FormDraft::new(Resource::Testimonials, FormMode::Create);
        d.set("name", "Asha").unwrap();
        d.set("role", "Patient").unwrap();
        d.set("review", "Great").unwrap();
        for bad in ["0", "6", "four", "-1", "4.5"] {
            d.set("rating", bad).unwrap();
            assert!(d.validate().is_err(), "{bad} accepted");
        }
        d.set("rating", "5").unwrap();
        let payload = d.into_payload().unwrap();
        assert_eq!(payload.fields.get("rating"), Some(&json!(5)));
    }

    #[test]
    fn choice_must_be_listed() {
        let mut d = FormDraft::new(Resource::Videos, FormMode::Create);
        d.set("title", "Peel").unwrap();
        d.set("url", "https://youtu.be/abcdefghijk").unwrap();
        d.set("videoType", "reel").unwrap();
        assert!(d.validate().is_err());
        d.set("videoType", "short").unwrap();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn image_required_on_create_only() {
        let mut d = FormDraft::new(Resource::BeforeAfter, FormMode::Create);
        d.set("title", "Acne scars").unwrap();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "img"));

        d.attach_image(ImageAttachment::new("case.png", vec![1, 2, 3]))
            .unwrap();
        let payload = d.into_payload().unwrap();
        assert!(payload.image.is_some());
        assert!(!payload.fields.contains_key("img"));

        let record: RawRecord = serde_json::from_value(json!({
            "_id": "b1", "title": "Acne scars", "img": "https://cdn/x.png"
        }))
        .unwrap();
        let edit = FormDraft::from_record(Resource::BeforeAfter, &record);
        assert_eq!(edit.mode(), FormMode::Edit);
        let payload = edit.into_payload().unwrap();
        assert_eq!(payload.fields.get("img"), Some(&json!("https://cdn/x.png")));
        assert!(payload.image.is_none());
    }

    #[test]
    fn image_on_imageless_resource_is_rejected() {
        let mut d = faq_draft();
        let err = d
            .attach_image(ImageAttachment::new("a.png", vec![0]))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn from_record_drops_non_schema_fields() {
        let record: RawRecord = serde_json::from_value(json!({
            "_id": "f1", "q": "Q", "a": "A", "__v": 0, "createdAt": "2024-01-01"
        }))
        .unwrap();
        let payload = FormDraft::from_record(Resource::Faqs, &record)
            .into_payload()
            .unwrap();
        assert_eq!(payload.fields.len(), 2);
    }

    #[test]
    fn assignments_split_on_first_equals() {
        assert_eq!(parse_assignment("url=https://x?a=b").unwrap(), ("url", "https://x?a=b"));
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
        let mut d = FormDraft::new(Resource::Faqs, FormMode::Create);
        d.set_assignment("a=").unwrap();
        assert_eq!(d.value("a"), Some(""));
    }
}
