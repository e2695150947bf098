//! Form Validation
//!
//! Checks that run before any request is made. Failures are shown inline.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use reqwest::Url;

use crate::api::{ImageSource, NewProject};
use crate::models::{Reference, SourceType, Status};
use crate::upload::{parse_data_url, EncodedFile};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Please enter a valid URL")]
    InvalidUrl,
}

/// Trimmed title, or an error when it is blank
pub fn require_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(title.to_string())
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Trim, default the scheme to `https://`, and check the result parses
///
/// `example.com` becomes `https://example.com`.
pub fn normalize_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidUrl);
    }
    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    let parsed = Url::parse(&candidate).map_err(|_| ValidationError::InvalidUrl)?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(candidate)
}

static LOCAL_ID_SEQ: AtomicU32 = AtomicU32::new(0);

/// Client-side id such as `ref-1718000000000-3`
pub fn new_local_id(prefix: &str) -> String {
    let seq = LOCAL_ID_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), seq)
}

/// Raw contents of the reference form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceForm {
    pub title: String,
    pub url: String,
    pub description: String,
    pub source_type: SourceType,
}

impl ReferenceForm {
    pub fn from_reference(reference: &Reference) -> Self {
        Self {
            title: reference.title.clone(),
            url: reference.url.clone(),
            description: reference.description.clone(),
            source_type: reference.source_type.clone(),
        }
    }

    /// Validate and build the reference to save
    ///
    /// When `editing` is given its id, added date and unknown fields carry
    /// over; otherwise a fresh id and `now` are used.
    pub fn build(
        &self,
        editing: Option<&Reference>,
        now: DateTime<Utc>,
    ) -> Result<Reference, ValidationError> {
        let title = require_title(&self.title)?;
        let url = normalize_url(&self.url)?;

        let (id, added_date, extra) = match editing {
            Some(existing) => (
                existing.id.clone(),
                existing.added_date.or(Some(now)),
                existing.extra.clone(),
            ),
            None => (new_local_id("ref"), Some(now), Default::default()),
        };

        Ok(Reference {
            id,
            title,
            url,
            description: self.description.trim().to_string(),
            source_type: self.source_type.clone(),
            added_date,
            extra,
        })
    }
}

/// Raw contents of the create-project form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub image_url: String,
    /// Picked file; wins over `image_url`. A pasted `data:` URL is sent
    /// as an upload too.
    pub upload: Option<EncodedFile>,
}

impl ProjectForm {
    pub fn build(&self) -> Result<NewProject, ValidationError> {
        let title = require_title(&self.title)?;
        let image = match (&self.upload, self.image_url.trim()) {
            (Some(file), _) => ImageSource::Upload(file.clone()),
            (None, "") => ImageSource::None,
            (None, url) => match parse_data_url(url) {
                Some(file) => ImageSource::Upload(file),
                None => ImageSource::Url(url.to_string()),
            },
        };
        Ok(NewProject {
            title,
            description: Some(self.description.trim().to_string()),
            status: Some(self.status.clone()),
            image,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_require_title() {
        assert_eq!(require_title("  Shelf "), Ok("Shelf".to_string()));
        assert_eq!(require_title("   "), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn test_normalize_adds_https() {
        assert_eq!(normalize_url("example.com"), Ok("https://example.com".to_string()));
        assert_eq!(normalize_url("  example.com/a?b=1 "), Ok("https://example.com/a?b=1".to_string()));
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://x.org"), Ok("http://x.org".to_string()));
        assert_eq!(normalize_url("HTTPS://X.org/p"), Ok("HTTPS://X.org/p".to_string()));
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize_url(""), Err(ValidationError::InvalidUrl));
        assert_eq!(normalize_url("exa mple.com"), Err(ValidationError::InvalidUrl));
        assert_eq!(normalize_url("https://"), Err(ValidationError::InvalidUrl));
    }

    #[test]
    fn test_local_ids_are_unique() {
        let a = new_local_id("ref");
        let b = new_local_id("ref");
        assert!(a.starts_with("ref-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_build_new_reference() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let form = ReferenceForm {
            title: " Table ideas ".to_string(),
            url: "pinterest.com/pin/1".to_string(),
            description: " oak ".to_string(),
            source_type: SourceType::Pinterest,
        };

        let reference = form.build(None, now).unwrap();
        assert!(reference.id.starts_with("ref-"));
        assert_eq!(reference.title, "Table ideas");
        assert_eq!(reference.url, "https://pinterest.com/pin/1");
        assert_eq!(reference.description, "oak");
        assert_eq!(reference.added_date, Some(now));
    }

    #[test]
    fn test_build_edit_keeps_identity() {
        let added = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let existing = Reference {
            id: "ref-1".to_string(),
            title: "Old".to_string(),
            url: "https://old.example".to_string(),
            added_date: Some(added),
            ..Default::default()
        };
        let mut form = ReferenceForm::from_reference(&existing);
        form.title = "New".to_string();

        let reference = form.build(Some(&existing), Utc::now()).unwrap();
        assert_eq!(reference.id, "ref-1");
        assert_eq!(reference.title, "New");
        assert_eq!(reference.added_date, Some(added));
    }

    #[test]
    fn test_build_validates_title_first() {
        let form = ReferenceForm {
            url: "not a url".to_string(),
            ..Default::default()
        };
        assert_eq!(form.build(None, Utc::now()), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn test_project_form_prefers_upload() {
        let mut form = ProjectForm {
            title: " Shelf ".to_string(),
            image_url: "http://x/img.png".to_string(),
            ..Default::default()
        };
        let project = form.build().unwrap();
        assert_eq!(project.title, "Shelf");
        assert_eq!(project.image, ImageSource::Url("http://x/img.png".to_string()));

        form.upload = Some(EncodedFile::from_bytes(b"img", "image/png"));
        let project = form.build().unwrap();
        assert!(matches!(project.image, ImageSource::Upload(_)));

        form.title.clear();
        assert_eq!(form.build(), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn test_project_form_pasted_data_url_is_upload() {
        let form = ProjectForm {
            title: "Shelf".to_string(),
            image_url: " data:image/png;base64,iVBORw0K ".to_string(),
            ..Default::default()
        };

        let project = form.build().unwrap();
        assert_eq!(
            project.image,
            ImageSource::Upload(EncodedFile {
                data: "iVBORw0K".to_string(),
                content_type: "image/png".to_string(),
            })
        );
        let body = project.to_body();
        assert_eq!(body["imageContentType"], "image/png");
        assert!(body.get("image").is_none());
    }
}
