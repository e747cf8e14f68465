//! Public content reads: `derma content <resource>`.

use std::time::Duration;

use tabled::Tabled;

use derma_core::catalog::{group_services, split_videos};
use derma_core::{
    BeforeAfterCase, CollectionLoader, Doctor, EmptyPolicy, Faq, Loaded, Record, Service,
    ServiceCategory, Site, Testimonial, Video, VideoType, fallback, media,
};

use crate::cli::{ContentArgs, GlobalOpts, ResourceArg};
use crate::config::Target;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DoctorRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Degree")]
    degree: String,
    #[tabled(rename = "Expertise")]
    expertise: String,
    #[tabled(rename = "Experience")]
    experience: String,
}

impl From<&Doctor> for DoctorRow {
    fn from(d: &Doctor) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            degree: d.degree.clone(),
            expertise: output::truncate(&d.expertise, 40),
            experience: d.experience.clone(),
        }
    }
}

#[derive(Tabled)]
struct VideoRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Embed")]
    embed: String,
    #[tabled(rename = "Thumbnail")]
    thumbnail: String,
}

impl From<&Video> for VideoRow {
    fn from(v: &Video) -> Self {
        Self {
            id: v.id.clone(),
            kind: match v.video_type {
                VideoType::Youtube => "youtube",
                VideoType::Short => "short",
            },
            title: output::truncate(&v.title, 40),
            embed: media::embed_url(&v.url).unwrap_or_else(|| v.url.clone()),
            thumbnail: media::thumbnail_for(v).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct TestimonialRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Review")]
    review: String,
}

impl From<&Testimonial> for TestimonialRow {
    fn from(t: &Testimonial) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone(),
            role: t.role.clone(),
            rating: stars(t.rating),
            review: output::truncate(&t.review, 60),
        }
    }
}

#[derive(Tabled)]
struct FaqRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "Answer")]
    answer: String,
}

impl From<&Faq> for FaqRow {
    fn from(f: &Faq) -> Self {
        Self {
            id: f.id.clone(),
            question: f.q.clone(),
            answer: output::truncate(&f.a, 60),
        }
    }
}

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Service> for ServiceRow {
    fn from(s: &Service) -> Self {
        Self {
            id: s.id.clone(),
            category: match s.category {
                ServiceCategory::Skin => "skin",
                ServiceCategory::Hair => "hair",
            },
            title: s.title.clone(),
            description: output::truncate(&s.description, 60),
        }
    }
}

#[derive(Tabled)]
struct BeforeAfterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Image")]
    img: String,
}

impl From<&BeforeAfterCase> for BeforeAfterRow {
    fn from(c: &BeforeAfterCase) -> Self {
        Self {
            id: c.id.clone(),
            title: c.title.clone(),
            img: c.img.clone(),
        }
    }
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(mut target: Target, args: ContentArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(ms) = args.load_timeout_ms {
        target.site.load_timeout = Duration::from_millis(ms);
    }
    if args.strict_empty {
        target.site.empty_policy = EmptyPolicy::ShowEmpty;
    }
    let loader = Site::new(target.site)?.loader();

    match args.resource {
        ResourceArg::Doctors => {
            let loaded = load(&loader, fallback::doctors(), global).await;
            show(loaded, global, |x: &Doctor| DoctorRow::from(x))
        }
        ResourceArg::Videos => {
            let mut loaded = load(&loader, fallback::videos(), global).await;
            // Long-form first, then shorts, as the site lays them out.
            let (youtube, shorts) = split_videos(std::mem::take(&mut loaded.data));
            loaded.data = youtube.into_iter().chain(shorts).collect();
            show(loaded, global, |x: &Video| VideoRow::from(x))
        }
        ResourceArg::Testimonials => {
            let loaded = load(&loader, fallback::testimonials(), global).await;
            show(loaded, global, |x: &Testimonial| TestimonialRow::from(x))
        }
        ResourceArg::Faqs => {
            let loaded = load(&loader, fallback::faqs(), global).await;
            show(loaded, global, |x: &Faq| FaqRow::from(x))
        }
        ResourceArg::Services => {
            let mut loaded = load(&loader, fallback::services(), global).await;
            let groups = group_services(std::mem::take(&mut loaded.data));
            loaded.data = groups.skin.into_iter().chain(groups.hair).collect();
            show(loaded, global, |x: &Service| ServiceRow::from(x))
        }
        ResourceArg::BeforeAfter => {
            let loaded = load(&loader, fallback::before_after(), global).await;
            show(loaded, global, |x: &BeforeAfterCase| BeforeAfterRow::from(x))
        }
    }
}

async fn load<T: Record>(loader: &CollectionLoader, fallback: Vec<T>, global: &GlobalOpts) -> Loaded<T> {
    let spinner = util::spinner(&format!("Loading {}...", T::RESOURCE), global.quiet);
    let loaded = loader.load(fallback).await;
    util::finish(spinner);
    loaded
}

fn show<T, R>(loaded: Loaded<T>, global: &GlobalOpts, to_row: impl Fn(&T) -> R) -> Result<(), CliError>
where
    T: Record,
    R: Tabled,
{
    if loaded.used_fallback && !global.quiet {
        let color = output::should_color(&global.color);
        eprintln!(
            "{}",
            output::dim(
                &format!("note: showing built-in {} ({})", T::RESOURCE, loaded.outcome),
                color
            )
        );
    }
    let out = output::render_list(&global.output, &loaded.data, to_row, |r| r.id().to_owned())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_clamp_to_five() {
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(stars(0), "☆☆☆☆☆");
    }
}
