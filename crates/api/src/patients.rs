//! Patient endpoints.

use crate::{ApiClient, ApiResult};
use chrono::NaiveDate;
use clinica_core::Patient;
use clinica_types::NonEmptyText;
use serde::Serialize;
use uuid::Uuid;

/// Payload for creating or updating a patient.
///
/// Same shape as [`Patient`] minus the server-assigned id.
#[derive(Clone, Debug, Serialize)]
pub struct PatientDraft {
    pub full_name: NonEmptyText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sus_card: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_number: Option<String>,
    pub is_pregnant: bool,
    pub is_hypertensive: bool,
    pub is_diabetic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl PatientDraft {
    /// A draft with just a name; flags off, demographics empty.
    pub fn named(full_name: NonEmptyText) -> Self {
        Self {
            full_name,
            cpf: None,
            sus_card: None,
            birth_date: None,
            phone: None,
            record_number: None,
            is_pregnant: false,
            is_hypertensive: false,
            is_diabetic: false,
            observations: None,
        }
    }
}

impl ApiClient {
    /// List patients, optionally narrowed by a server-side free-text search.
    pub async fn list_patients(&self, search: Option<&str>) -> ApiResult<Vec<Patient>> {
        let mut query = Vec::new();
        if let Some(term) = search.filter(|t| !t.is_empty()) {
            query.push(("query", term.to_string()));
        }
        self.get_json("patients", &query).await
    }

    pub async fn get_patient(&self, id: Uuid) -> ApiResult<Patient> {
        self.get_json(&format!("patients/{id}"), &[]).await
    }

    pub async fn create_patient(&self, draft: &PatientDraft) -> ApiResult<Patient> {
        self.post_json("patients", draft).await
    }

    pub async fn update_patient(&self, id: Uuid, draft: &PatientDraft) -> ApiResult<Patient> {
        self.put_json(&format!("patients/{id}"), draft).await
    }

    pub async fn delete_patient(&self, id: Uuid) -> ApiResult<()> {
        self.delete(&format!("patients/{id}")).await
    }
}
