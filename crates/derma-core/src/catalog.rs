// Grouping helpers for the public listings.

use derma_api::{Service, ServiceCategory, Video, VideoType};

/// Services split by category, each in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceGroups {
    pub skin: Vec<Service>,
    pub hair: Vec<Service>,
}

impl ServiceGroups {
    pub fn get(&self, category: ServiceCategory) -> &[Service] {
        match category {
            ServiceCategory::Skin => &self.skin,
            ServiceCategory::Hair => &self.hair,
        }
    }
}

pub fn group_services(services: impl IntoIterator<Item = Service>) -> ServiceGroups {
    let mut groups = ServiceGroups::default();
    for service in services {
        match service.category {
            ServiceCategory::Skin => groups.skin.push(service),
            ServiceCategory::Hair => groups.hair.push(service),
        }
    }
    groups
}

/// Partition into (long-form YouTube, shorts).
pub fn split_videos(videos: impl IntoIterator<Item = Video>) -> (Vec<Video>, Vec<Video>) {
    videos
        .into_iter()
        .partition(|v| v.video_type == VideoType::Youtube)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    #[test]
    fn groups_keep_order() {
        let groups = group_services(fallback::services());
        assert_eq!(groups.skin.len(), 5);
        assert_eq!(groups.hair.len(), 2);
        assert_eq!(groups.get(ServiceCategory::Hair)[0].title, "PRP Therapy");
    }

    #[test]
    fn videos_partition_by_type() {
        let video = |id: &str, video_type| Video {
            id: id.into(),
            title: String::new(),
            video_type,
            url: String::new(),
            thumbnail: None,
            created_at: None,
        };
        let (long, shorts) = split_videos([
            video("a", VideoType::Short),
            video("b", VideoType::Youtube),
            video("c", VideoType::Short),
        ]);
        assert_eq!(long.len(), 1);
        assert_eq!(shorts.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(), ["a", "c"]);
    }
}
