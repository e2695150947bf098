//! Project Endpoints

use serde::Serialize;
use serde_json::{Map, Value};

use super::client::{decode, encode_component, text_or, ApiClient, RequestOptions};
use super::error::ApiError;
use super::transport::Transport;
use crate::models::lenient::{id_of, truthy};
use crate::models::{Project, Status};
use crate::upload::{EncodedFile, DEFAULT_IMAGE_TYPE};

/// Where a new project's cover image comes from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ImageSource {
    #[default]
    None,
    /// Existing image URL, sent as `image`
    Url(String),
    /// Uploaded bytes, sent as `imageData` + `imageContentType`
    Upload(EncodedFile),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub difficulty: Option<String>,
    pub estimated_time: Option<String>,
    pub image: ImageSource,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectBody<'a> {
    title: &'a str,
    description: &'a str,
    status: &'a str,
    difficulty: &'a str,
    estimated_time: &'a str,
    pictures: &'a [Value],
    tasks: &'a [Value],
    videos: &'a [Value],
    materials: &'a [Value],
    tools: &'a [Value],
    references: &'a [Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    image_data: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_content_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
}

impl NewProject {
    /// Request body: fixed envelope plus at most one kind of image field
    pub fn to_body(&self) -> Value {
        let status = self.status.as_ref().map_or("Planning", Status::as_str);
        let mut body = CreateProjectBody {
            title: &self.title,
            description: text_or(&self.description, ""),
            status: if status.is_empty() { "Planning" } else { status },
            difficulty: text_or(&self.difficulty, "Beginner"),
            estimated_time: text_or(&self.estimated_time, ""),
            pictures: &[],
            tasks: &[],
            videos: &[],
            materials: &[],
            tools: &[],
            references: &[],
            image_data: None,
            image_content_type: None,
            image: None,
        };

        match &self.image {
            ImageSource::Upload(file) if !file.data.is_empty() => {
                body.image_data = Some(&file.data);
                body.image_content_type = Some(file.content_type_or(DEFAULT_IMAGE_TYPE));
            }
            ImageSource::Url(url) if !url.trim().is_empty() => {
                body.image = Some(url.trim());
            }
            _ => {}
        }

        serde_json::to_value(&body).unwrap_or(Value::Null)
    }
}

/// Partial project update; only the fields that are set are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
}

impl ProjectPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

pub(crate) fn project_path(id: &str) -> String {
    format!("/projects/{}", encode_component(id))
}

/// Accept either a bare array or `{ "projects": [...] }`
fn decode_project_list(body: Value) -> Result<Vec<Project>, ApiError> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => decode(body),
        Value::Object(mut map) => match map.remove("projects") {
            Some(list) => decode(list),
            None => Err(ApiError::decode(None, "response has no project list")),
        },
        other => Err(ApiError::decode(None, format!("unexpected project list: {}", other))),
    }
}

impl<T: Transport> ApiClient<T> {
    /// List projects, filtered server-side unless `status` is absent or `All`
    pub async fn get_projects(&self, status: Option<&str>) -> Result<Vec<Project>, ApiError> {
        let path = match status {
            Some(status) if !status.is_empty() && status != "All" => {
                format!("/projects?status={}", encode_component(status))
            }
            _ => "/projects".to_string(),
        };
        let body = self.request(&path, RequestOptions::get()).await?;
        decode_project_list(body)
    }

    /// Fetch one project; `Ok(None)` when the server returns no body
    pub async fn get_project(&self, id: &str) -> Result<Option<Project>, ApiError> {
        let body = self.request(&project_path(id), RequestOptions::get()).await?;
        if body.is_null() {
            return Ok(None);
        }
        decode(body).map(Some)
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Project, ApiError> {
        let body = self
            .request("/projects", RequestOptions::post(project.to_body()))
            .await?;
        decode(body)
    }

    /// PUT the patch as the whole body; merge semantics are the server's
    pub async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<Value, ApiError> {
        let body = serde_json::to_value(patch).map_err(|e| ApiError::decode(None, e))?;
        self.request(&project_path(id), RequestOptions::put(body)).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<Value, ApiError> {
        self.request(&project_path(id), RequestOptions::delete()).await
    }

    pub async fn update_project_status(&self, id: &str, status: Status) -> Result<Value, ApiError> {
        self.update_project(id, &ProjectPatch::status(status)).await
    }

    /// Read-modify-write of one sub-collection, kept as raw JSON
    ///
    /// Entries pass through exactly as the server sent them; only what
    /// `edit` touches changes. Not atomic: a concurrent writer between
    /// the GET and the PUT loses its change to the same field.
    pub(crate) async fn rewrite_collection<F>(
        &self,
        id: &str,
        field: &str,
        edit: F,
    ) -> Result<Value, ApiError>
    where
        F: FnOnce(Vec<Value>) -> Vec<Value>,
    {
        let body = self.request(&project_path(id), RequestOptions::get()).await?;
        let Value::Object(mut project) = body else {
            return Err(ApiError::decode(None, format!("project {} returned no data", id)));
        };
        let entries = match project.remove(field) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(ApiError::decode(
                    None,
                    format!("project {} has a non-list {}: {}", id, field, other),
                ))
            }
        };

        let mut patch = Map::new();
        patch.insert(field.to_string(), Value::Array(edit(entries)));
        self.request(&project_path(id), RequestOptions::put(Value::Object(patch)))
            .await
    }
}

/// Typed entry as wire JSON, for appending to a raw collection
pub(crate) fn entry_value<E: Serialize>(entry: &E) -> Result<Value, ApiError> {
    serde_json::to_value(entry).map_err(|e| ApiError::decode(None, e))
}

pub(crate) fn has_id(entry: &Value, id: &str) -> bool {
    entry.get("id").and_then(id_of).is_some_and(|entry_id| entry_id == id)
}

/// Negate a boolean field on the matching entries; absent counts as false
pub(crate) fn toggle_flag(mut entries: Vec<Value>, id: &str, flag: &str) -> Vec<Value> {
    for entry in entries.iter_mut().filter(|entry| has_id(entry, id)) {
        if let Value::Object(fields) = entry {
            let set = fields.get(flag).is_some_and(truthy);
            fields.insert(flag.to_string(), Value::Bool(!set));
        }
    }
    entries
}

pub(crate) fn remove_entry(entries: Vec<Value>, id: &str) -> Vec<Value> {
    entries.into_iter().filter(|entry| !has_id(entry, id)).collect()
}
