// Write payloads for create/update calls.
//
// Doctors, services and before/after cases carry an `img` upload. When an
// image is attached the payload goes out as multipart/form-data; everything
// else is JSON.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::resource::Resource;

/// Multipart field name for the image upload.
pub const IMAGE_FIELD: &str = "img";

/// Wire encoding chosen for a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

/// A binary image to upload alongside a record.
#[derive(Clone)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageAttachment {
    /// Wrap raw bytes, guessing the content type from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_owned();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image from disk.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(file_name, bytes))
    }
}

/// Field values plus an optional image for a create/update call.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    pub fields: Map<String, Value>,
    pub image: Option<ImageAttachment>,
}

impl Payload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.image = Some(image);
        self
    }

    /// Pick the wire encoding for this payload against `resource`.
    ///
    /// Attaching an image to a resource without an image field is an error.
    pub fn encoding_for(&self, resource: Resource) -> Result<Encoding, Error> {
        match (resource.accepts_image(), self.image.is_some()) {
            (_, false) => Ok(Encoding::Json),
            (true, true) => Ok(Encoding::Multipart),
            (false, true) => Err(Error::UnsupportedAttachment { resource }),
        }
    }

    /// Build the multipart form: every field as text, the image as a file part.
    pub(crate) fn into_multipart(self) -> Result<Form, Error> {
        let mut form = Form::new();
        for (key, value) in self.fields {
            // The image travels as a file part, never as a text field.
            if key == IMAGE_FIELD {
                continue;
            }
            form = form.text(key, value_text(value));
        }
        if let Some(image) = self.image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?;
            form = form.part(IMAGE_FIELD, part);
        }
        Ok(form)
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields() -> Map<String, Value> {
        json!({ "title": "Laser toning" }).as_object().unwrap().clone()
    }

    #[test]
    fn json_without_image() {
        let payload = Payload::new(fields());
        for resource in Resource::ALL {
            assert_eq!(payload.encoding_for(resource).unwrap(), Encoding::Json);
        }
    }

    #[test]
    fn multipart_only_for_image_resources() {
        let payload = Payload::new(fields()).with_image(ImageAttachment::new("a.png", vec![1]));
        assert_eq!(
            payload.encoding_for(Resource::Services).unwrap(),
            Encoding::Multipart
        );
        assert!(matches!(
            payload.encoding_for(Resource::Faqs),
            Err(Error::UnsupportedAttachment {
                resource: Resource::Faqs
            })
        ));
    }

    #[test]
    fn content_type_guessed_from_extension() {
        assert_eq!(ImageAttachment::new("x.jpg", vec![]).content_type, "image/jpeg");
        assert_eq!(ImageAttachment::new("x.webp", vec![]).content_type, "image/webp");
        assert_eq!(
            ImageAttachment::new("noext", vec![]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn from_path_reads_file_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portrait.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let image = ImageAttachment::from_path(&path).unwrap();
        assert_eq!(image.file_name, "portrait.png");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes.len(), 4);
    }
}
