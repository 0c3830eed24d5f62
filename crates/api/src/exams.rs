//! Exam order endpoints.

use crate::{ApiClient, ApiResult};
use chrono::{DateTime, Utc};
use clinica_core::{ExamOrder, ExamStatus};
use serde::Serialize;
use uuid::Uuid;

/// Server-side filters for the exam list.
///
/// Every field is optional; an unset field is not sent at all, which the
/// API treats as "no filter".
#[derive(Clone, Debug, Default)]
pub struct ExamFilter {
    pub patient_id: Option<Uuid>,
    pub status: Option<ExamStatus>,
    pub exam_type: Option<String>,
}

impl ExamFilter {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(patient_id) = self.patient_id {
            query.push(("patient_id", patient_id.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.to_wire().to_string()));
        }
        if let Some(exam_type) = self.exam_type.as_deref().filter(|t| !t.is_empty()) {
            query.push(("exam_type", exam_type.to_string()));
        }
        query
    }
}

/// Payload for creating or updating an exam order.
#[derive(Clone, Debug, Serialize)]
pub struct ExamDraft {
    pub patient_id: Uuid,
    pub exam_type: String,
    pub scheduled_date: DateTime<Utc>,
    pub status: ExamStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_text: Option<String>,
}

impl ApiClient {
    pub async fn list_exams(&self, filter: &ExamFilter) -> ApiResult<Vec<ExamOrder>> {
        self.get_json("exams", &filter.to_query()).await
    }

    pub async fn get_exam(&self, id: Uuid) -> ApiResult<ExamOrder> {
        self.get_json(&format!("exams/{id}"), &[]).await
    }

    pub async fn create_exam(&self, draft: &ExamDraft) -> ApiResult<ExamOrder> {
        self.post_json("exams", draft).await
    }

    pub async fn update_exam(&self, id: Uuid, draft: &ExamDraft) -> ApiResult<ExamOrder> {
        self.put_json(&format!("exams/{id}"), draft).await
    }

    pub async fn delete_exam(&self, id: Uuid) -> ApiResult<()> {
        self.delete(&format!("exams/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_sends_no_parameters() {
        assert!(ExamFilter::default().to_query().is_empty());
    }

    #[test]
    fn set_fields_become_parameters() {
        let patient_id = Uuid::new_v4();
        let filter = ExamFilter {
            patient_id: Some(patient_id),
            status: Some(ExamStatus::AwaitingProtocol),
            exam_type: Some("ultrasound".into()),
        };

        let query = filter.to_query();
        assert_eq!(
            query,
            vec![
                ("patient_id", patient_id.to_string()),
                ("status", "awaiting_protocol".to_string()),
                ("exam_type", "ultrasound".to_string()),
            ]
        );
    }

    #[test]
    fn empty_exam_type_is_not_sent() {
        let filter = ExamFilter {
            exam_type: Some(String::new()),
            ..ExamFilter::default()
        };
        assert!(filter.to_query().is_empty());
    }
}
