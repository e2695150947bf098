//! Detail Tab Logic
//!
//! Pure derivations behind the project detail tabs: ordering, category
//! grouping, progress and cost figures, and video embed URLs.

use std::collections::HashSet;

use crate::models::{
    Material, Picture, PictureKind, Reference, SourceType, Task, Tool, Video, VideoKind,
};

/// Filter value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// Percentage rounded half away from zero; 0 when `total` is 0
pub fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (done as f64 / total as f64 * 100.0).round() as u32
}

/// Stable sort by `order`, entries without one last
fn by_order<T: Clone>(items: &[T], order: impl Fn(&T) -> Option<i64>) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| (order(item).is_none(), order(item)));
    sorted
}

/// Distinct values in order of first appearance
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Group items by key, groups in order of first appearance
fn group_by<T: Clone, K: PartialEq + Clone>(items: &[T], key: impl Fn(&T) -> K) -> Vec<(K, Vec<T>)> {
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(item);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(item.clone()),
            None => groups.push((k, vec![item.clone()])),
        }
    }
    groups
}

fn category_matches(filter: &str, category: &str) -> bool {
    filter == ALL_CATEGORIES || filter == category
}

// ========================
// Tasks
// ========================

pub fn sorted_tasks(tasks: &[Task]) -> Vec<Task> {
    by_order(tasks, |task| task.order)
}

/// `all` followed by each task category
pub fn task_categories(tasks: &[Task]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    categories.extend(distinct(tasks.iter().map(|t| t.category.as_str())));
    categories
}

/// Ordered tasks in `category` (`all` keeps every task)
pub fn filter_tasks(tasks: &[Task], category: &str) -> Vec<Task> {
    sorted_tasks(tasks)
        .into_iter()
        .filter(|task| category_matches(category, &task.category))
        .collect()
}

pub fn group_tasks(tasks: &[Task]) -> Vec<(String, Vec<Task>)> {
    group_by(tasks, |task| task.category.clone())
}

pub fn category_icon(category: &str) -> &'static str {
    match category {
        "Planning" => "📋",
        "Materials" => "📦",
        "Construction" => "🔨",
        "Installation" => "⚙️",
        "Finishing" => "✨",
        "Design" => "🎨",
        "Electronics" => "⚡",
        "Programming" => "💻",
        _ => "📝",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskProgress {
    pub completed: usize,
    pub total: usize,
}

impl TaskProgress {
    pub fn of(tasks: &[Task]) -> Self {
        Self {
            completed: tasks.iter().filter(|task| task.completed).count(),
            total: tasks.len(),
        }
    }

    pub fn percent(&self) -> u32 {
        percent(self.completed, self.total)
    }
}

// ========================
// Materials & tools
// ========================

/// Sum of estimated costs; missing costs count as zero
pub fn total_cost(materials: &[Material]) -> f64 {
    materials.iter().filter_map(|m| m.estimated_cost).sum()
}

pub fn format_cost(cost: f64) -> String {
    format!("${:.2}", cost)
}

pub fn material_categories(materials: &[Material]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    categories.extend(distinct(materials.iter().map(|m| m.category.as_str())));
    categories
}

pub fn tool_categories(tools: &[Tool]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    categories.extend(distinct(tools.iter().map(|t| t.category.as_str())));
    categories
}

pub fn filter_materials(materials: &[Material], category: &str, essential_only: bool) -> Vec<Material> {
    materials
        .iter()
        .filter(|m| category_matches(category, &m.category) && (!essential_only || m.essential))
        .cloned()
        .collect()
}

pub fn filter_tools(tools: &[Tool], category: &str, essential_only: bool) -> Vec<Tool> {
    tools
        .iter()
        .filter(|t| category_matches(category, &t.category) && (!essential_only || t.essential))
        .cloned()
        .collect()
}

pub fn group_materials(materials: &[Material]) -> Vec<(String, Vec<Material>)> {
    group_by(materials, |m| m.category.clone())
}

pub fn group_tools(tools: &[Tool]) -> Vec<(String, Vec<Tool>)> {
    group_by(tools, |t| t.category.clone())
}

pub fn supply_icon(category: &str) -> &'static str {
    match category {
        "Wood" => "🪵",
        "Hardware" => "🔩",
        "Electronics" => "⚡",
        "Adhesives" => "🧪",
        "Finish" => "🎨",
        "Consumables" => "📦",
        "Soil" => "🌱",
        "Power Tools" => "🔌",
        "Hand Tools" => "🔨",
        "Clamping" => "🗜️",
        _ => "📋",
    }
}

/// Checked ids of an in-memory checklist; never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    checked: HashSet<String>,
}

impl Checklist {
    pub fn toggle(&mut self, id: &str) {
        if !self.checked.remove(id) {
            self.checked.insert(id.to_string());
        }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.contains(id)
    }

    /// Percent of `ids` that are checked
    pub fn progress<'a>(&self, ids: impl Iterator<Item = &'a str>) -> u32 {
        let (done, total) = ids.fold((0, 0), |(done, total), id| {
            (done + usize::from(self.is_checked(id)), total + 1)
        });
        percent(done, total)
    }
}

// ========================
// Videos
// ========================

/// Embeddable player URL for YouTube and Vimeo links; others unchanged
pub fn embed_url(url: &str) -> String {
    if url.contains("youtube.com/watch?v=") {
        if let Some((_, rest)) = url.split_once("v=") {
            let id = rest.split('&').next().unwrap_or_default();
            return format!("https://www.youtube.com/embed/{}", id);
        }
    }
    if let Some((_, rest)) = url.split_once("youtu.be/") {
        let id = rest.split('?').next().unwrap_or_default();
        return format!("https://www.youtube.com/embed/{}", id);
    }
    if let Some((_, rest)) = url.split_once("vimeo.com/") {
        let id = rest.split('?').next().unwrap_or_default();
        return format!("https://player.vimeo.com/video/{}", id);
    }
    url.to_string()
}

pub fn video_icon(kind: &VideoKind) -> &'static str {
    match kind {
        VideoKind::Tutorial => "🎓",
        VideoKind::Progress => "📹",
        VideoKind::Reference => "🔗",
        VideoKind::Other(_) => "🎥",
    }
}

/// Video types present, in order of first appearance
pub fn video_kinds(videos: &[Video]) -> Vec<VideoKind> {
    distinct(videos.iter().map(|v| v.kind.as_str()))
        .into_iter()
        .map(VideoKind::from)
        .collect()
}

/// `None` keeps every video
pub fn filter_videos(videos: &[Video], kind: Option<&VideoKind>) -> Vec<Video> {
    videos
        .iter()
        .filter(|video| kind.map_or(true, |k| &video.kind == k))
        .cloned()
        .collect()
}

pub fn group_videos(videos: &[Video]) -> Vec<(VideoKind, Vec<Video>)> {
    group_by(videos, |video| video.kind.clone())
}

// ========================
// Pictures & references
// ========================

pub fn picture_icon(kind: &PictureKind) -> &'static str {
    match kind {
        PictureKind::Progress => "🔄",
        PictureKind::Final => "✅",
        PictureKind::Reference => "📋",
        PictureKind::Step => "👣",
        PictureKind::Other(_) => "📸",
    }
}

pub fn sorted_pictures(pictures: &[Picture]) -> Vec<Picture> {
    by_order(pictures, |picture| picture.order)
}

/// Next `order` for an appended picture
pub fn next_picture_order(pictures: &[Picture]) -> i64 {
    pictures.iter().filter_map(|p| p.order).max().map_or(1, |max| max + 1)
}

pub fn source_icon(source: &SourceType) -> &'static str {
    match source {
        SourceType::Website => "🌐",
        SourceType::Instagram => "📷",
        SourceType::Pinterest => "📌",
        SourceType::Youtube => "▶️",
        SourceType::Tiktok => "🎵",
        SourceType::Facebook => "👥",
        SourceType::Twitter => "🐦",
        SourceType::Reddit => "💬",
        SourceType::Misc | SourceType::Other(_) => "🔗",
    }
}

/// Source types present, in order of first appearance
pub fn reference_sources(references: &[Reference]) -> Vec<SourceType> {
    distinct(references.iter().map(|r| r.source_type.as_str()))
        .into_iter()
        .map(SourceType::from)
        .collect()
}

pub fn filter_references(references: &[Reference], source: Option<&SourceType>) -> Vec<Reference> {
    references
        .iter()
        .filter(|reference| source.map_or(true, |s| &reference.source_type == s))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, order: Option<i64>, category: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            order,
            category: category.to_string(),
            completed,
            ..Default::default()
        }
    }

    fn task_ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_tasks_sort_by_order_missing_last() {
        let tasks = vec![
            task("c", None, "Planning", false),
            task("b", Some(2), "Planning", false),
            task("a", Some(1), "Construction", false),
            task("d", None, "Planning", false),
        ];
        assert_eq!(task_ids(&sorted_tasks(&tasks)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_task_categories_and_filter() {
        let tasks = vec![
            task("a", Some(2), "Construction", false),
            task("b", Some(1), "Planning", false),
            task("c", Some(3), "Construction", false),
        ];
        assert_eq!(task_categories(&tasks), vec!["all", "Construction", "Planning"]);
        assert_eq!(task_ids(&filter_tasks(&tasks, "Construction")), vec!["a", "c"]);
        assert_eq!(task_ids(&filter_tasks(&tasks, "all")), vec!["b", "a", "c"]);

        let groups = group_tasks(&filter_tasks(&tasks, "all"));
        assert_eq!(groups[0].0, "Planning");
        assert_eq!(task_ids(&groups[1].1), vec!["a", "c"]);
    }

    #[test]
    fn test_task_progress_rounds() {
        let tasks = vec![
            task("a", None, "", true),
            task("b", None, "", false),
            task("c", None, "", true),
        ];
        assert_eq!(TaskProgress::of(&tasks).percent(), 67);
        assert_eq!(TaskProgress::of(&[]).percent(), 0);
        assert_eq!(percent(1, 8), 13);
    }

    #[test]
    fn test_total_cost_skips_missing() {
        let materials = vec![
            Material {
                estimated_cost: Some(12.5),
                ..Default::default()
            },
            Material::default(),
            Material {
                estimated_cost: Some(7.25),
                ..Default::default()
            },
        ];
        assert_eq!(total_cost(&materials), 19.75);
        assert_eq!(format_cost(19.75), "$19.75");
    }

    #[test]
    fn test_material_filters() {
        let materials = vec![
            Material {
                id: "m1".to_string(),
                category: "Wood".to_string(),
                essential: true,
                ..Default::default()
            },
            Material {
                id: "m2".to_string(),
                category: "Hardware".to_string(),
                ..Default::default()
            },
            Material {
                id: "m3".to_string(),
                category: "Wood".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(material_categories(&materials), vec!["all", "Wood", "Hardware"]);
        assert_eq!(filter_materials(&materials, "Wood", false).len(), 2);
        assert_eq!(filter_materials(&materials, "all", true)[0].id, "m1");
        assert_eq!(group_materials(&materials)[0].1.len(), 2);
    }

    #[test]
    fn test_checklist_progress() {
        let mut checklist = Checklist::default();
        checklist.toggle("a");
        checklist.toggle("b");
        checklist.toggle("b");

        assert!(checklist.is_checked("a"));
        assert!(!checklist.is_checked("b"));
        assert_eq!(checklist.progress(["a", "b", "c"].into_iter()), 33);
        assert_eq!(checklist.progress(std::iter::empty()), 0);
    }

    #[test]
    fn test_embed_urls() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=abc123&t=10"),
            "https://www.youtube.com/embed/abc123"
        );
        assert_eq!(embed_url("https://youtu.be/xyz?si=1"), "https://www.youtube.com/embed/xyz");
        assert_eq!(embed_url("https://vimeo.com/98765"), "https://player.vimeo.com/video/98765");
        assert_eq!(embed_url("https://cdn.example/clip.mp4"), "https://cdn.example/clip.mp4");
    }

    #[test]
    fn test_video_kinds_and_filter() {
        let videos = vec![
            Video {
                id: "v1".to_string(),
                kind: VideoKind::Progress,
                ..Default::default()
            },
            Video {
                id: "v2".to_string(),
                kind: VideoKind::Tutorial,
                ..Default::default()
            },
            Video {
                id: "v3".to_string(),
                kind: VideoKind::Progress,
                ..Default::default()
            },
        ];
        assert_eq!(video_kinds(&videos), vec![VideoKind::Progress, VideoKind::Tutorial]);
        assert_eq!(filter_videos(&videos, Some(&VideoKind::Tutorial))[0].id, "v2");
        assert_eq!(filter_videos(&videos, None).len(), 3);
        assert_eq!(group_videos(&videos)[0].1.len(), 2);
    }

    #[test]
    fn test_pictures_order() {
        let pictures = vec![
            Picture {
                id: "b".to_string(),
                order: Some(4),
                ..Default::default()
            },
            Picture {
                id: "a".to_string(),
                order: Some(1),
                ..Default::default()
            },
        ];
        let sorted = sorted_pictures(&pictures);
        assert_eq!(sorted[0].id, "a");
        assert_eq!(next_picture_order(&pictures), 5);
        assert_eq!(next_picture_order(&[]), 1);
    }

    #[test]
    fn test_reference_sources() {
        let references = vec![
            Reference {
                source_type: SourceType::Youtube,
                ..Default::default()
            },
            Reference {
                source_type: SourceType::from("mastodon"),
                ..Default::default()
            },
        ];
        assert_eq!(
            reference_sources(&references),
            vec![SourceType::Youtube, SourceType::Other("mastodon".to_string())]
        );
        assert_eq!(filter_references(&references, Some(&SourceType::Youtube)).len(), 1);
    }
}
