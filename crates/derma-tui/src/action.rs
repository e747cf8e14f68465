//! UI actions. Actions are the sole mechanism for state mutation.

use derma_core::{
    BeforeAfterCase, Doctor, Faq, Loaded, Service, Testimonial, Video,
};

use crate::screen::ScreenId;

/// A finished background load, tagged by collection.
#[derive(Debug, Clone)]
pub enum Collection {
    Doctors(Loaded<Doctor>),
    Videos(Loaded<Video>),
    Testimonials(Loaded<Testimonial>),
    Faqs(Loaded<Faq>),
    Services(Loaded<Service>),
    BeforeAfter(Loaded<BeforeAfterCase>),
}

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Tick,
    Render,
    Resize(u16, u16),
    SwitchScreen(ScreenId),
    /// Refetch every collection.
    Reload,
    Loaded(Collection),
}
