// Static content shown when the backend is unreachable or empty.
//
// Videos have no fallback; the video section hides itself instead.

use derma_api::{BeforeAfterCase, Doctor, Faq, Service, ServiceCategory, Testimonial, Video};

/// A hero banner slide. Hero content is static, never fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroSlide {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
}

const WIDE_HERO: &[HeroSlide] = &[
    HeroSlide {
        title: "Dr. Akhila's Aesthetics",
        subtitle: "Glow with Confidence",
        description: "Personalised skin and hair care in Hyderabad.",
    },
    HeroSlide {
        title: "Expert Dermatologists",
        subtitle: "Your Skin, Our Expertise",
        description: "Board-certified doctors for every skin type.",
    },
    HeroSlide {
        title: "Advanced Treatments",
        subtitle: "Innovation in Aesthetics",
        description: "Laser, peels and regrowth therapies under one roof.",
    },
    HeroSlide {
        title: "Visible Results",
        subtitle: "Care That Shows",
        description: "Treatment plans tracked from first visit to final glow.",
    },
];

const NARROW_HERO: &[HeroSlide] = &[
    HeroSlide {
        title: "Dr. Akhila's Aesthetics",
        subtitle: "Glow with Confidence",
        description: "Skin and hair care, personalised.",
    },
    HeroSlide {
        title: "Advanced Treatments",
        subtitle: "Innovation in Aesthetics",
        description: "Modern care, gentle hands.",
    },
    HeroSlide {
        title: "Visible Results",
        subtitle: "Care That Shows",
        description: "Plans that track your progress.",
    },
];

/// Hero deck for the viewport. Narrow screens get a shorter deck.
pub fn hero_slides(wide: bool) -> &'static [HeroSlide] {
    if wide { WIDE_HERO } else { NARROW_HERO }
}

fn doctor(id: &str, name: &str, degree: &str, expertise: &str, experience: &str) -> Doctor {
    Doctor {
        id: id.into(),
        name: name.into(),
        degree: degree.into(),
        expertise: expertise.into(),
        experience: experience.into(),
        img: String::new(),
    }
}

pub fn doctors() -> Vec<Doctor> {
    vec![
        doctor("1", "Dr. K. Akhila Sai", "Founder and Director", "Aesthetic dermatology", "5+ years"),
        doctor("2", "Dr. Raja Shekar Madala", "MS, M.Ch", "Plastic & cosmetic surgery", "5+ years"),
        doctor("3", "Dr. K.S.N. Ravi Teja", "MBBS, MD (DVL)", "Venereology & cosmetology", "5+ years"),
        doctor("4", "Dr. R. Aravind Reddy", "MBBS, MD (DVL)", "Consultant dermatologist", "3+ years"),
    ]
}

fn testimonial(id: &str, name: &str, review: &str) -> Testimonial {
    Testimonial {
        id: id.into(),
        name: name.into(),
        role: "Patient".into(),
        rating: 5,
        review: review.into(),
    }
}

pub fn testimonials() -> Vec<Testimonial> {
    vec![
        testimonial("1", "Ravina P.", "Hair treatment results have been great, and every session is relaxing."),
        testimonial("2", "Rapole S.", "My pigmentation cleared up and I finally feel confident without makeup."),
        testimonial("3", "Samena B.", "The combination plan was explained clearly and delivered real results."),
        testimonial("4", "Anil K.", "Laser hair removal worked better than I expected. Friendly, clean clinic."),
        testimonial("5", "Poonam G.", "Professional staff and a facial that left my skin visibly healthier."),
        testimonial("6", "Preethi M.", "Two laser sessions in and the change is already obvious."),
    ]
}

fn faq(id: &str, q: &str, a: &str) -> Faq {
    Faq {
        id: id.into(),
        q: q.into(),
        a: a.into(),
    }
}

pub fn faqs() -> Vec<Faq> {
    vec![
        faq("1", "How do I book an appointment?", "Message us on WhatsApp, call, or walk in during opening hours."),
        faq("2", "What are your working hours?", "11 AM to 8 PM, every day of the week."),
        faq("3", "What does a consultation cost?", "A consultation is ₹500, including a personalised treatment plan."),
        faq("4", "Are the treatments safe?", "Every procedure is clinically approved and performed by qualified doctors."),
        faq("5", "Are the treatments suitable for sensitive skin?", "Yes. Plans are adjusted for oily, dry, combination and sensitive skin."),
    ]
}

fn service(id: &str, title: &str, description: &str, category: ServiceCategory) -> Service {
    Service {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category,
        img: String::new(),
    }
}

pub fn services() -> Vec<Service> {
    use ServiceCategory::{Hair, Skin};
    vec![
        service("1", "Hydra Facial", "Deep cleansing and hydration in a single session.", Skin),
        service("2", "Chemical Peels", "Targeted peels for pigmentation and uneven tone.", Skin),
        service("3", "Carbon Laser", "Oil control and pore refinement with carbon toning.", Skin),
        service("4", "Acne Scar Treatment", "Microneedling and laser resurfacing for scars.", Skin),
        service("5", "Laser Hair Reduction", "Long-lasting smoothness for all skin tones.", Skin),
        service("6", "PRP Therapy", "Platelet-rich plasma to strengthen thinning hair.", Hair),
        service("7", "Hair Regrowth Program", "Combined therapies to restore density.", Hair),
    ]
}

fn case(id: &str, title: &str) -> BeforeAfterCase {
    BeforeAfterCase {
        id: id.into(),
        title: title.into(),
        img: String::new(),
        description: None,
        rating: None,
        category: None,
    }
}

pub fn before_after() -> Vec<BeforeAfterCase> {
    vec![
        case("1", "Skin Whitening"),
        case("2", "Skin Whitening"),
        case("3", "Carbon Laser"),
        case("4", "Carbon Laser"),
        case("5", "Carbon Laser"),
        case("6", "Follitech Hair Regrowth"),
        case("7", "Follitech Hair Regrowth"),
    ]
}

/// Always empty.
pub fn videos() -> Vec<Video> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn fallback_ids_are_unique() {
        fn unique<'a>(ids: impl Iterator<Item = &'a str>) -> bool {
            let mut seen = HashSet::new();
            ids.into_iter().all(|id| seen.insert(id))
        }
        assert!(unique(doctors().iter().map(|d| d.id.as_str())));
        assert!(unique(faqs().iter().map(|f| f.id.as_str())));
        assert!(unique(before_after().iter().map(|c| c.id.as_str())));
    }

    #[test]
    fn both_service_categories_have_content() {
        let services = services();
        assert!(services.iter().any(|s| s.category == ServiceCategory::Skin));
        assert!(services.iter().any(|s| s.category == ServiceCategory::Hair));
    }

    #[test]
    fn fallback_ratings_are_in_range() {
        assert!(testimonials().iter().all(|t| (1..=5).contains(&t.rating)));
    }

    #[test]
    fn videos_have_no_fallback() {
        assert!(videos().is_empty());
    }

    #[test]
    fn narrow_hero_deck_is_shorter() {
        assert!(hero_slides(false).len() < hero_slides(true).len());
    }
}
