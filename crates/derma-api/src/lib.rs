//! Async client for the clinic content backend.
//!
//! The backend exposes six content collections (doctors, videos,
//! testimonials, FAQs, services, before/after cases) under `/api/{resource}`
//! and a small admin surface under `/api/admin/`. This crate handles URL
//! construction, bearer authentication, JSON vs. multipart encoding, and
//! maps HTTP failures into [`Error`].
//!
//! The client is stateless with respect to authentication: every admin call
//! takes the bearer token explicitly. Session lifecycle (storing, verifying
//! and clearing tokens) lives in `derma-core`.

pub mod auth;
pub mod client;
pub mod content;
pub mod error;
pub mod models;
pub mod payload;
pub mod resource;
pub mod transport;

pub use client::ContentClient;
pub use error::Error;
pub use models::{
    BeforeAfterCase, Doctor, Faq, RawRecord, Record, Service, ServiceCategory, Testimonial, Video,
    VideoType,
};
pub use payload::{Encoding, ImageAttachment, Payload};
pub use resource::Resource;
pub use transport::{TlsMode, TransportConfig};
