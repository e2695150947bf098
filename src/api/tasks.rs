//! Task Endpoints

use serde::Serialize;
use serde_json::Value;

use super::client::{decode, text_or, ApiClient, RequestOptions};
use super::error::ApiError;
use super::projects::{project_path, toggle_flag};
use super::transport::Transport;
use crate::models::Task;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub estimated_time: Option<String>,
    pub difficulty: Option<String>,
    pub order: Option<i64>,
    pub category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddTaskBody<'a> {
    title: &'a str,
    description: &'a str,
    completed: bool,
    estimated_time: &'a str,
    difficulty: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<i64>,
    category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

impl NewTask {
    pub fn to_body(&self) -> Value {
        let body = AddTaskBody {
            title: &self.title,
            description: text_or(&self.description, ""),
            completed: self.completed.unwrap_or(false),
            estimated_time: text_or(&self.estimated_time, ""),
            difficulty: text_or(&self.difficulty, "Beginner"),
            order: self.order,
            category: text_or(&self.category, "Planning"),
            id: self.id.as_deref(),
        };
        serde_json::to_value(&body).unwrap_or(Value::Null)
    }
}

/// Flip `completed` on the task with `task_id`, leaving the rest untouched
pub fn toggle_completed(tasks: Vec<Value>, task_id: &str) -> Vec<Value> {
    toggle_flag(tasks, task_id, "completed")
}

impl<T: Transport> ApiClient<T> {
    pub async fn add_task(&self, project_id: &str, task: &NewTask) -> Result<Value, ApiError> {
        let path = format!("{}/tasks", project_path(project_id));
        self.request(&path, RequestOptions::post(task.to_body())).await
    }

    pub async fn get_tasks(&self, project_id: &str) -> Result<Vec<Task>, ApiError> {
        let path = format!("{}/tasks", project_path(project_id));
        let body = self.request(&path, RequestOptions::get()).await?;
        if body.is_null() {
            return Ok(Vec::new());
        }
        decode(body)
    }

    /// Read-modify-write toggle of one task's completion
    pub async fn toggle_task(&self, project_id: &str, task_id: &str) -> Result<Value, ApiError> {
        self.rewrite_collection(project_id, "tasks", |tasks| toggle_completed(tasks, task_id))
            .await
    }
}
