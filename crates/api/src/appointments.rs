//! Appointment endpoints.

use crate::{ApiClient, ApiResult};
use chrono::{DateTime, Utc};
use clinica_core::{Appointment, AppointmentStatus};
use serde::Serialize;
use uuid::Uuid;

/// Server-side filters for the appointment list.
#[derive(Clone, Debug, Default)]
pub struct AppointmentFilter {
    pub patient_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(patient_id) = self.patient_id {
            query.push(("patient_id", patient_id.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.to_wire().to_string()));
        }
        query
    }
}

/// Payload for creating or updating an appointment.
#[derive(Clone, Debug, Serialize)]
pub struct AppointmentDraft {
    pub patient_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub appointment_type: String,
    pub professional: String,
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ApiClient {
    pub async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> ApiResult<Vec<Appointment>> {
        self.get_json("appointments", &filter.to_query()).await
    }

    pub async fn get_appointment(&self, id: Uuid) -> ApiResult<Appointment> {
        self.get_json(&format!("appointments/{id}"), &[]).await
    }

    pub async fn create_appointment(&self, draft: &AppointmentDraft) -> ApiResult<Appointment> {
        self.post_json("appointments", draft).await
    }

    pub async fn update_appointment(
        &self,
        id: Uuid,
        draft: &AppointmentDraft,
    ) -> ApiResult<Appointment> {
        self.put_json(&format!("appointments/{id}"), draft).await
    }

    pub async fn delete_appointment(&self, id: Uuid) -> ApiResult<()> {
        self.delete(&format!("appointments/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_uses_wire_names() {
        let filter = AppointmentFilter {
            patient_id: None,
            status: Some(AppointmentStatus::Cancelled),
        };
        assert_eq!(filter.to_query(), vec![("status", "cancelled".to_string())]);
    }
}
