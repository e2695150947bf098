//! Picture and Video Endpoints
//!
//! Uploads go to the nested collection endpoints, which store the bytes
//! and answer with hosted URLs. URL-only pictures are appended to the
//! project instead.

use serde::Serialize;
use serde_json::Value;

use super::client::{text_or, ApiClient, RequestOptions};
use super::error::ApiError;
use super::projects::{entry_value, project_path, remove_entry};
use super::transport::Transport;
use crate::models::{Picture, PictureKind, VideoKind};
use crate::upload::{EncodedFile, DEFAULT_IMAGE_TYPE};
use crate::validation::new_local_id;

#[derive(Debug, Clone, PartialEq)]
pub enum PictureSource {
    Upload(EncodedFile),
    Url(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPicture {
    pub id: Option<String>,
    pub source: PictureSource,
    pub caption: Option<String>,
    pub kind: Option<PictureKind>,
    pub order: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadPictureBody<'a> {
    image_data: &'a str,
    image_content_type: &'a str,
    caption: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<i64>,
}

impl NewPicture {
    fn kind_label(&self) -> &str {
        self.kind
            .as_ref()
            .map(PictureKind::as_str)
            .filter(|label| !label.is_empty())
            .unwrap_or("progress")
    }

    /// Body for the upload endpoint; `None` for URL pictures
    pub fn upload_body(&self) -> Option<Value> {
        let PictureSource::Upload(file) = &self.source else {
            return None;
        };
        let body = UploadPictureBody {
            image_data: &file.data,
            image_content_type: file.content_type_or(DEFAULT_IMAGE_TYPE),
            caption: text_or(&self.caption, ""),
            kind: self.kind_label(),
            id: self.id.as_deref(),
            order: self.order,
        };
        serde_json::to_value(&body).ok()
    }

    /// Gallery entry for a URL picture
    pub fn to_picture(&self) -> Option<Picture> {
        let PictureSource::Url(url) = &self.source else {
            return None;
        };
        Some(Picture {
            id: self.id.clone().unwrap_or_else(|| new_local_id("pic")),
            url: Some(url.trim().to_string()),
            caption: text_or(&self.caption, "").to_string(),
            kind: PictureKind::from(self.kind_label()),
            order: self.order,
            extra: Default::default(),
        })
    }
}

/// Video is either uploaded bytes or a link, never both
#[derive(Debug, Clone, PartialEq)]
pub enum VideoSource {
    Upload(EncodedFile),
    Url(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub id: Option<String>,
    pub source: VideoSource,
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<VideoKind>,
    pub duration: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddVideoBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    video_data: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    video_content_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    title: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    duration: &'a str,
    thumbnail: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

impl NewVideo {
    pub fn to_body(&self) -> Value {
        let (video_data, video_content_type, url) = match &self.source {
            VideoSource::Upload(file) => (
                Some(file.data.as_str()),
                Some(file.content_type.as_str()).filter(|t| !t.is_empty()),
                None,
            ),
            VideoSource::Url(url) => (None, None, Some(url.trim())),
        };
        let kind = self
            .kind
            .as_ref()
            .map(VideoKind::as_str)
            .filter(|label| !label.is_empty())
            .unwrap_or("tutorial");

        let body = AddVideoBody {
            video_data,
            video_content_type,
            url,
            title: text_or(&self.title, "Untitled Video"),
            description: text_or(&self.description, ""),
            kind,
            duration: text_or(&self.duration, "0:00"),
            thumbnail: text_or(&self.thumbnail, ""),
            id: self.id.as_deref(),
        };
        serde_json::to_value(&body).unwrap_or(Value::Null)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Upload to `/pictures`, or append a URL picture to the project
    pub async fn add_picture(&self, project_id: &str, picture: &NewPicture) -> Result<Value, ApiError> {
        if let Some(body) = picture.upload_body() {
            let path = format!("{}/pictures", project_path(project_id));
            return self.request(&path, RequestOptions::post(body)).await;
        }

        let Some(picture) = picture.to_picture() else {
            return Err(ApiError::decode(None, "picture has no source"));
        };
        let entry = entry_value(&picture)?;
        self.rewrite_collection(project_id, "pictures", move |mut pictures| {
            pictures.push(entry);
            pictures
        })
        .await
    }

    pub async fn delete_picture(&self, project_id: &str, picture_id: &str) -> Result<Value, ApiError> {
        self.rewrite_collection(project_id, "pictures", |pictures| {
            remove_entry(pictures, picture_id)
        })
        .await
    }

    pub async fn add_video(&self, project_id: &str, video: &NewVideo) -> Result<Value, ApiError> {
        let path = format!("{}/videos", project_path(project_id));
        self.request(&path, RequestOptions::post(video.to_body())).await
    }
}
