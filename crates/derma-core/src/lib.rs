//! Front-end-neutral logic for the clinic site, shared by the CLI and TUI.
//!
//! - **[`PagedCarousel`]**: responsive, wrap-around paging over an ordered
//!   list with a 500 ms transition lock. One instance per carousel.
//! - **[`AutoRotator`]**: timed single-item rotation (hero banner,
//!   testimonial spotlight).
//! - **[`CollectionLoader`]**: fetches one public collection with a bounded
//!   wait and substitutes static [`fallback`] content on any failure.
//! - **[`AdminSession`]**: bearer-token lifecycle (login, restore, logout,
//!   credential change) and CRUD over the six resources, with forms
//!   validated locally by [`FormDraft`].
//! - **[`Site`]**: facade that wires a [`SiteConfig`] into a shared HTTP
//!   client and hands out loaders and sessions.

pub mod carousel;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fallback;
pub mod form;
pub mod loader;
pub mod media;
pub mod rotator;
pub mod session;
pub mod site;

// ── Primary re-exports ──────────────────────────────────────────────
pub use carousel::{PageLayout, PagedCarousel, Position, TransitionLock};
pub use config::{EmptyPolicy, SiteConfig, TlsVerification};
pub use error::CoreError;
pub use form::{FieldKind, FieldSpec, FormDraft, FormMode};
pub use loader::{CollectionLoader, LoadOutcome, Loaded};
pub use rotator::AutoRotator;
pub use session::{
    ADMIN_TOKEN_KEY, AdminSession, MemoryTokenStore, TokenStore, VerifiedCredentials,
};
pub use site::Site;

// Record types and resource names, so front ends only depend on this crate.
pub use derma_api::{
    BeforeAfterCase, Doctor, Faq, ImageAttachment, Payload, RawRecord, Record, Resource, Service,
    ServiceCategory, Testimonial, Video, VideoType,
};
