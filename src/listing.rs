//! Project Listing
//!
//! Client-side filter, sort and search over the loaded project list.
//! Everything here is pure so components can derive views in a `Memo`.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::{Project, Status};

/// Status filter value; `All` disables filtering
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => &project.status == status,
        }
    }

    /// Value for the server-side `status` query; `None` means all
    pub fn query_value(&self) -> Option<&str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, StatusFilter::All)
    }
}

impl From<&str> for StatusFilter {
    fn from(value: &str) -> Self {
        if value.is_empty() || value == "All" {
            StatusFilter::All
        } else {
            StatusFilter::Only(Status::from(value))
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Alphabetical,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Newest, SortOrder::Oldest, SortOrder::Alphabetical];

    /// Value used in the sort `<select>`
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Alphabetical => "alphabetical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest First",
            SortOrder::Oldest => "Oldest First",
            SortOrder::Alphabetical => "Alphabetical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|order| order.as_str() == value)
    }

    /// Comparator for a stable sort
    ///
    /// Projects without a created date go last in both date orders.
    pub fn compare(&self, a: &Project, b: &Project) -> Ordering {
        match self {
            SortOrder::Newest => match (a.created_date, b.created_date) {
                (Some(x), Some(y)) => y.cmp(&x),
                (x, y) => x.is_none().cmp(&y.is_none()),
            },
            SortOrder::Oldest => match (a.created_date, b.created_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (x, y) => x.is_none().cmp(&y.is_none()),
            },
            SortOrder::Alphabetical => collate(&a.title, &b.title),
        }
    }
}

/// Locale-aware title comparison, the browser's `localeCompare`
#[cfg(target_arch = "wasm32")]
pub fn collate(a: &str, b: &str) -> Ordering {
    let ordering = js_sys::JsString::from(a).locale_compare(b, &js_sys::Array::new(), &js_sys::Object::new());
    ordering.cmp(&0)
}

/// Root-locale approximation: base letters, then accents, then case
/// with lowercase first
#[cfg(not(target_arch = "wasm32"))]
pub fn collate(a: &str, b: &str) -> Ordering {
    use unicode_normalization::char::is_combining_mark;
    use unicode_normalization::UnicodeNormalization;

    let base = |s: &str| -> String {
        s.nfd().filter(|c| !is_combining_mark(*c)).collect::<String>().to_lowercase()
    };
    let accented = |s: &str| s.nfd().collect::<String>().to_lowercase();
    let lower_first = |s: &str| -> String {
        s.chars()
            .flat_map(|c| {
                if c.is_lowercase() {
                    c.to_uppercase().collect::<Vec<_>>()
                } else {
                    c.to_lowercase().collect::<Vec<_>>()
                }
            })
            .collect()
    };

    base(a)
        .cmp(&base(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| lower_first(a).cmp(&lower_first(b)))
}

/// Everything the list view needs to derive its visible projects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectQuery {
    pub status: StatusFilter,
    pub sort: SortOrder,
    pub search: String,
}

impl ProjectQuery {
    fn matches_search(&self, project: &Project) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || project.title.to_lowercase().contains(&needle)
            || project.description.to_lowercase().contains(&needle)
    }

    /// Filtered, searched and sorted copy of `projects`
    pub fn apply(&self, projects: &[Project]) -> Vec<Project> {
        let mut visible: Vec<Project> = projects
            .iter()
            .filter(|project| self.status.matches(project) && self.matches_search(project))
            .cloned()
            .collect();
        visible.sort_by(|a, b| self.sort.compare(a, b));
        visible
    }
}

/// `All` followed by each distinct status, in order of first appearance
pub fn status_options(projects: &[Project]) -> Vec<StatusFilter> {
    let mut options = vec![StatusFilter::All];
    for project in projects {
        let option = StatusFilter::Only(project.status.clone());
        if !options.contains(&option) {
            options.push(option);
        }
    }
    options
}

/// Counts shown in the list hero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub planning: usize,
}

impl ProjectStats {
    pub fn of(projects: &[Project]) -> Self {
        let count = |status: Status| projects.iter().filter(|p| p.status == status).count();
        Self {
            total: projects.len(),
            completed: count(Status::Completed),
            in_progress: count(Status::InProgress),
            planning: count(Status::Planning),
        }
    }
}

/// Card date such as "Jan 15, 2024"
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(|| "Unknown".to_string(), |d| d.format("%b %-d, %Y").to_string())
}

/// "1 project", "3 projects"
pub fn results_label(count: usize) -> String {
    format!("{} project{}", count, if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn project(id: &str, title: &str, status: Status, day: Option<u32>) -> Project {
        Project {
            id: id.to_string(),
            title: title.to_string(),
            status,
            created_date: day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    fn ids(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.id.as_str()).collect()
    }

    fn sample() -> Vec<Project> {
        vec![
            project("1", "bench", Status::Planning, Some(3)),
            project("2", "Arbor", Status::Completed, Some(1)),
            project("3", "Cabinet", Status::InProgress, None),
            project("4", "Desk", Status::Planning, Some(2)),
        ]
    }

    #[test]
    fn test_status_filter_keeps_order() {
        let query = ProjectQuery {
            status: StatusFilter::from("Planning"),
            sort: SortOrder::Newest,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&sample())), vec!["1", "4"]);
    }

    #[test]
    fn test_all_filter_keeps_everything() {
        let query = ProjectQuery::default();
        assert_eq!(query.apply(&sample()).len(), 4);
        assert_eq!(StatusFilter::from("All").query_value(), None);
        assert_eq!(StatusFilter::from("In Progress").query_value(), Some("In Progress"));
    }

    #[test]
    fn test_date_orders_put_undated_last() {
        let newest = ProjectQuery::default().apply(&sample());
        assert_eq!(ids(&newest), vec!["1", "4", "2", "3"]);

        let oldest = ProjectQuery {
            sort: SortOrder::Oldest,
            ..Default::default()
        }
        .apply(&sample());
        assert_eq!(ids(&oldest), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_alphabetical_folds_case() {
        let mut projects = sample();
        projects.push(project("5", "arbor", Status::Planning, None));

        let query = ProjectQuery {
            sort: SortOrder::Alphabetical,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&projects)), vec!["5", "2", "1", "3", "4"]);
    }

    #[test]
    fn test_alphabetical_sorts_accents_with_base_letter() {
        let projects = vec![
            project("z", "Zebra", Status::Planning, None),
            project("e", "Écrin", Status::Planning, None),
            project("a", "apple", Status::Planning, None),
        ];

        let query = ProjectQuery {
            sort: SortOrder::Alphabetical,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&projects)), vec!["a", "e", "z"]);
    }

    #[test]
    fn test_collate_levels() {
        assert_eq!(collate("ecrin", "Écrin"), Ordering::Less);
        assert_eq!(collate("Écrin", "edge"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_equal_dates_are_stable() {
        let projects = vec![
            project("a", "A", Status::Planning, Some(5)),
            project("b", "B", Status::Planning, Some(5)),
        ];
        assert_eq!(ids(&ProjectQuery::default().apply(&projects)), vec!["a", "b"]);
    }

    #[test]
    fn test_search_title_or_description() {
        let mut projects = sample();
        projects[2].description = "Walnut doors".to_string();

        let query = ProjectQuery {
            search: "  WALNUT ".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&projects)), vec!["3"]);

        let query = ProjectQuery {
            search: "desk".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&projects)), vec!["4"]);
    }

    #[test]
    fn test_status_options_first_appearance() {
        let options: Vec<String> = status_options(&sample()).iter().map(|o| o.to_string()).collect();
        assert_eq!(options, vec!["All", "Planning", "Completed", "In Progress"]);
    }

    #[test]
    fn test_stats() {
        let stats = ProjectStats::of(&sample());
        assert_eq!(
            stats,
            ProjectStats {
                total: 4,
                completed: 1,
                in_progress: 1,
                planning: 2,
            }
        );
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("oldest"), Some(SortOrder::Oldest));
        assert_eq!(SortOrder::parse("random"), None);
        assert_eq!(results_label(1), "1 project");
        assert_eq!(results_label(0), "0 projects");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 15, 0, 0).unwrap();
        assert_eq!(format_date(Some(date)), "Jan 5, 2024");
        assert_eq!(format_date(None), "Unknown");
    }
}
