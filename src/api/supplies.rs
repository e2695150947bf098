//! Material and Reference Endpoints
//!
//! There are no nested endpoints for these; every change rewrites the
//! project's whole sub-collection.

use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::projects::{entry_value, has_id, remove_entry, toggle_flag};
use super::transport::Transport;
use crate::models::lenient::id_of;
use crate::models::{Material, Reference};

/// Flip `purchased` on the material with `material_id`
pub fn toggle_purchased(materials: Vec<Value>, material_id: &str) -> Vec<Value> {
    toggle_flag(materials, material_id, "purchased")
}

/// Merge an edited reference over the entry with the same id, or append it
///
/// Keys the edit does not carry survive, as do the stored `id` and `addedDate`.
pub fn upsert_reference(mut references: Vec<Value>, reference: Value) -> Vec<Value> {
    let position = reference
        .get("id")
        .and_then(id_of)
        .and_then(|id| references.iter().position(|entry| has_id(entry, &id)));
    let Some(index) = position else {
        references.push(reference);
        return references;
    };

    match (&mut references[index], reference) {
        (Value::Object(stored), Value::Object(mut edit)) => {
            edit.remove("id");
            let kept_date = stored.get("addedDate").filter(|date| !date.is_null()).cloned();
            stored.extend(edit);
            if let Some(date) = kept_date {
                stored.insert("addedDate".to_string(), date);
            }
        }
        (slot, reference) => *slot = reference,
    }
    references
}

impl<T: Transport> ApiClient<T> {
    pub async fn add_material(&self, project_id: &str, material: Material) -> Result<Value, ApiError> {
        let entry = entry_value(&material)?;
        self.rewrite_collection(project_id, "materials", move |mut materials| {
            materials.push(entry);
            materials
        })
        .await
    }

    pub async fn toggle_material_purchased(
        &self,
        project_id: &str,
        material_id: &str,
    ) -> Result<Value, ApiError> {
        self.rewrite_collection(project_id, "materials", |materials| {
            toggle_purchased(materials, material_id)
        })
        .await
    }

    pub async fn add_reference(&self, project_id: &str, reference: Reference) -> Result<Value, ApiError> {
        let entry = entry_value(&reference)?;
        self.rewrite_collection(project_id, "references", move |mut references| {
            references.push(entry);
            references
        })
        .await
    }

    /// Add a new reference or replace an edited one
    pub async fn save_reference(&self, project_id: &str, reference: Reference) -> Result<Value, ApiError> {
        let entry = entry_value(&reference)?;
        self.rewrite_collection(project_id, "references", move |references| {
            upsert_reference(references, entry)
        })
        .await
    }

    pub async fn delete_reference(&self, project_id: &str, reference_id: &str) -> Result<Value, ApiError> {
        self.rewrite_collection(project_id, "references", |references| {
            remove_entry(references, reference_id)
        })
        .await
    }
}
