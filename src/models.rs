//! Frontend Models
//!
//! Data structures matching backend entities. Decoding is lenient: any
//! field may be missing or `null`, ids may be strings or numbers, and
//! unknown enum labels are kept verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// String-backed enum whose unknown labels survive a round trip
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Label not known to this client
            Other(String),
        }

        impl $name {
            /// Every known variant, in display order
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(label) => label.as_str(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                match label.as_str() {
                    $($label => $name::$variant,)+
                    _ => $name::Other(label),
                }
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                Self::from(label.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                match value {
                    $name::Other(label) => label,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labeled_enum! {
    /// Project lifecycle status
    Status, default = Planning, {
        Planning => "Planning",
        InProgress => "In Progress",
        Completed => "Completed",
        Deleted => "Deleted",
    }
}

labeled_enum! {
    PictureKind, default = Progress, {
        Progress => "progress",
        Final => "final",
        Reference => "reference",
        Step => "step",
    }
}

labeled_enum! {
    VideoKind, default = Tutorial, {
        Tutorial => "tutorial",
        Progress => "progress",
        Reference => "reference",
    }
}

labeled_enum! {
    /// Where a saved reference link points
    SourceType, default = Website, {
        Website => "website",
        Instagram => "instagram",
        Pinterest => "pinterest",
        Youtube => "youtube",
        Tiktok => "tiktok",
        Facebook => "facebook",
        Twitter => "twitter",
        Reddit => "reddit",
        Misc => "other",
    }
}

impl Status {
    /// CSS modifier used by status badges
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Completed => "status-completed",
            Status::InProgress => "status-in-progress",
            Status::Planning => "status-planning",
            _ => "status-default",
        }
    }
}

impl PictureKind {
    pub fn label(&self) -> &'static str {
        match self {
            PictureKind::Progress => "Progress",
            PictureKind::Final => "Final Result",
            PictureKind::Reference => "Reference",
            PictureKind::Step => "Step",
            PictureKind::Other(_) => "Photo",
        }
    }
}

impl VideoKind {
    pub fn label(&self) -> &'static str {
        match self {
            VideoKind::Tutorial => "Tutorial",
            VideoKind::Progress => "Progress Video",
            VideoKind::Reference => "Reference",
            VideoKind::Other(_) => "Video",
        }
    }
}

impl SourceType {
    pub fn label(&self) -> &'static str {
        match self {
            SourceType::Website => "Website",
            SourceType::Instagram => "Instagram",
            SourceType::Pinterest => "Pinterest",
            SourceType::Youtube => "YouTube",
            SourceType::Tiktok => "TikTok",
            SourceType::Facebook => "Facebook",
            SourceType::Twitter => "Twitter/X",
            SourceType::Reddit => "Reddit",
            SourceType::Misc => "Other",
            SourceType::Other(_) => "Link",
        }
    }
}

/// Project data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::label")]
    pub status: Status,
    #[serde(deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub pictures: Vec<Picture>,
    #[serde(deserialize_with = "lenient::list")]
    pub tasks: Vec<Task>,
    #[serde(deserialize_with = "lenient::list")]
    pub videos: Vec<Video>,
    #[serde(deserialize_with = "lenient::list")]
    pub materials: Vec<Material>,
    #[serde(deserialize_with = "lenient::list")]
    pub tools: Vec<Tool>,
    #[serde(deserialize_with = "lenient::list")]
    pub references: Vec<Reference>,
}

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub completed: bool,
    #[serde(deserialize_with = "lenient::text")]
    pub estimated_time: String,
    #[serde(deserialize_with = "lenient::text")]
    pub difficulty: String,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Picture {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub caption: String,
    #[serde(rename = "type", deserialize_with = "lenient::label")]
    pub kind: PictureKind,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Video {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(rename = "type", deserialize_with = "lenient::label")]
    pub kind: VideoKind,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::text")]
    pub thumbnail: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Saved link to outside inspiration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::label")]
    pub source_type: SourceType,
    #[serde(with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub added_date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Material {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub quantity: String,
    #[serde(deserialize_with = "lenient::text")]
    pub specification: String,
    #[serde(deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub supplier: String,
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub essential: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub purchased: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tool {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub essential: bool,
    #[serde(deserialize_with = "lenient::text_list")]
    pub alternatives: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Field-level decoders that never reject a record over one bad field
pub(crate) mod lenient {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    /// Scalars as display text; `null`, arrays and objects become empty
    pub fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// JavaScript truthiness, so `1` and `"yes"` count as set
    pub fn truthy(value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar_text(Value::deserialize(deserializer)?))
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(truthy(&Value::deserialize(deserializer)?))
    }

    /// Enum label from any scalar; anything else is the default variant
    pub fn label<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + From<String>,
    {
        Ok(scalar_text(Value::deserialize(deserializer)?)
            .map(T::from)
            .unwrap_or_default())
    }

    /// Entries that fail to decode are skipped, not fatal
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
            Value::String(s) if !s.is_empty() => vec![s],
            _ => Vec::new(),
        })
    }

    /// String or number id; anything else becomes empty
    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(id_of(&Value::deserialize(deserializer)?).unwrap_or_default())
    }

    /// Id of a raw JSON entry, read the same way as the typed models do
    pub fn id_of(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(number(deserializer)?.map(|n| n as i64))
    }

    /// Parse an ISO-8601 date-time, a bare date, or epoch milliseconds
    pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::String(s) => {
                let s = s.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return Some(dt.with_timezone(&Utc));
                }
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            }
            Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
            _ => None,
        }
    }

    pub mod timestamp {
        use super::*;

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(parse_timestamp(&Value::deserialize(deserializer)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::from("In Progress"), Status::InProgress);
        assert_eq!(Status::InProgress.as_str(), "In Progress");
        assert_eq!(Status::from("Archived"), Status::Other("Archived".to_string()));
        assert_eq!(String::from(Status::Other("Archived".to_string())), "Archived");
        assert_eq!(Status::default(), Status::Planning);
    }

    #[test]
    fn test_project_lenient_decode() {
        let project: Project = serde_json::from_value(json!({
            "id": 7,
            "title": "Shelf",
            "description": null,
            "status": "Completed",
            "createdDate": "2024-01-15",
            "tasks": null,
            "pictures": [{ "id": "p1", "type": "final", "url": "http://x/p.png" }]
        }))
        .unwrap();

        assert_eq!(project.id, "7");
        assert_eq!(project.description, "");
        assert_eq!(project.status, Status::Completed);
        assert_eq!(project.created_date, Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()));
        assert!(project.tasks.is_empty());
        assert_eq!(project.pictures[0].kind, PictureKind::Final);
    }

    #[test]
    fn test_timestamp_formats() {
        use lenient::parse_timestamp;
        assert!(parse_timestamp(&json!("2024-02-01T10:30:00.000Z")).is_some());
        assert!(parse_timestamp(&json!(1_706_745_600_000i64)).is_some());
        assert!(parse_timestamp(&json!("not a date")).is_none());
        assert!(parse_timestamp(&Value::Null).is_none());
    }

    #[test]
    fn test_task_keeps_unknown_fields() {
        let task: Task = serde_json::from_value(json!({
            "id": "t1",
            "title": "Sand",
            "completed": true,
            "order": 2,
            "notes": "use 220 grit"
        }))
        .unwrap();

        assert_eq!(task.order, Some(2));
        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["notes"], "use 220 grit");
        assert_eq!(back["completed"], true);
    }

    #[test]
    fn test_picture_kind_wire_name() {
        let picture = Picture {
            id: "p1".to_string(),
            kind: PictureKind::Step,
            ..Default::default()
        };
        let value = serde_json::to_value(&picture).unwrap();
        assert_eq!(value["type"], "step");
        assert!(value.get("url").is_none());
    }

    #[test]
    fn test_material_cost_from_string() {
        let material: Material =
            serde_json::from_value(json!({ "id": "m1", "estimatedCost": "12.5" })).unwrap();
        assert_eq!(material.estimated_cost, Some(12.5));
        assert!(!material.purchased);
    }

    #[test]
    fn test_numbers_in_text_fields_decode() {
        let project: Project = serde_json::from_value(json!({
            "id": "p1",
            "title": 42,
            "estimatedTime": 2,
            "difficulty": null,
            "tasks": [{ "id": 1, "title": "Cut", "estimatedTime": 2, "completed": 1 }],
            "materials": [{ "id": "m1", "name": "Screws", "quantity": 12, "purchased": 0 }],
            "tools": [{ "id": "t1", "name": "Saw", "alternatives": ["Jigsaw", 3, null] }]
        }))
        .unwrap();

        assert_eq!(project.title, "42");
        assert_eq!(project.estimated_time.as_deref(), Some("2"));
        assert_eq!(project.difficulty, None);
        assert_eq!(project.tasks[0].estimated_time, "2");
        assert!(project.tasks[0].completed);
        assert_eq!(project.materials[0].quantity, "12");
        assert!(!project.materials[0].purchased);
        assert_eq!(project.tools[0].alternatives, vec!["Jigsaw", "3"]);
    }

    #[test]
    fn test_bad_entry_skipped_not_fatal() {
        let project: Project = serde_json::from_value(json!({
            "id": "p1",
            "status": 3,
            "pictures": [{ "id": "a", "url": "http://x/a.png" }, "junk", { "id": "b", "type": ["x"] }],
            "references": { "not": "a list" }
        }))
        .unwrap();

        assert_eq!(project.status, Status::Other("3".to_string()));
        assert_eq!(project.pictures.len(), 2);
        assert_eq!(project.pictures[1].kind, PictureKind::default());
        assert!(project.references.is_empty());
    }

    #[test]
    fn test_truthiness() {
        use lenient::truthy;
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("yes")));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&Value::Null));
    }
}
