//! Prenatal record endpoints and the batch exam association.

use crate::{ApiClient, ApiResult};
use chrono::NaiveDate;
use clinica_core::pregnancy::{expected_birth_date, RiskLevel};
use clinica_core::{BatchOutcome, BatchReport, PregnancyExam, PregnancyRecord};
use clinica_types::PositiveCount;
use serde::Serialize;
use uuid::Uuid;

/// Payload for creating or updating a prenatal record.
///
/// The expected birth date is derived, never supplied: [`PregnancyDraft::new`]
/// computes it and [`set_last_period_date`] keeps it in step, so the payload
/// sent to the API always satisfies the +280-days rule.
///
/// [`set_last_period_date`]: PregnancyDraft::set_last_period_date
#[derive(Clone, Debug, Serialize)]
pub struct PregnancyDraft {
    pub patient_id: Uuid,
    last_period_date: NaiveDate,
    expected_birth_date: NaiveDate,
    pub pregnancy_number: PositiveCount,
    pub risk_classification: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_appointment_date: Option<NaiveDate>,
    pub has_pregnancy_card: bool,
}

impl PregnancyDraft {
    pub fn new(
        patient_id: Uuid,
        last_period_date: NaiveDate,
        pregnancy_number: PositiveCount,
        risk_classification: RiskLevel,
    ) -> Self {
        Self {
            patient_id,
            last_period_date,
            expected_birth_date: expected_birth_date(last_period_date),
            pregnancy_number,
            risk_classification,
            first_appointment_date: None,
            has_pregnancy_card: false,
        }
    }

    pub fn last_period_date(&self) -> NaiveDate {
        self.last_period_date
    }

    pub fn expected_birth_date(&self) -> NaiveDate {
        self.expected_birth_date
    }

    /// Change the reference date, re-deriving the expected birth date.
    pub fn set_last_period_date(&mut self, last_period_date: NaiveDate) {
        self.last_period_date = last_period_date;
        self.expected_birth_date = expected_birth_date(last_period_date);
    }
}

/// Payload linking one exam to a prenatal record.
#[derive(Serialize)]
struct ExamAssociation {
    exam_id: Uuid,
}

/// Payload updating an existing association.
#[derive(Serialize)]
struct AssociationUpdate {
    is_completed: bool,
}

impl ApiClient {
    /// List prenatal records, optionally for one patient.
    pub async fn list_pregnancies(
        &self,
        patient_id: Option<Uuid>,
    ) -> ApiResult<Vec<PregnancyRecord>> {
        let mut query = Vec::new();
        if let Some(patient_id) = patient_id {
            query.push(("patient_id", patient_id.to_string()));
        }
        self.get_json("pregnancies", &query).await
    }

    pub async fn get_pregnancy(&self, id: Uuid) -> ApiResult<PregnancyRecord> {
        self.get_json(&format!("pregnancies/{id}"), &[]).await
    }

    pub async fn create_pregnancy(&self, draft: &PregnancyDraft) -> ApiResult<PregnancyRecord> {
        self.post_json("pregnancies", draft).await
    }

    pub async fn update_pregnancy(
        &self,
        id: Uuid,
        draft: &PregnancyDraft,
    ) -> ApiResult<PregnancyRecord> {
        self.put_json(&format!("pregnancies/{id}"), draft).await
    }

    /// Link one exam to a prenatal record.
    pub async fn add_pregnancy_exam(
        &self,
        pregnancy_id: Uuid,
        exam_id: Uuid,
    ) -> ApiResult<PregnancyExam> {
        self.post_json(
            &format!("pregnancies/{pregnancy_id}/exams"),
            &ExamAssociation { exam_id },
        )
        .await
    }

    /// Mark an existing association completed or not.
    pub async fn set_pregnancy_exam_completed(
        &self,
        association_id: Uuid,
        is_completed: bool,
    ) -> ApiResult<PregnancyExam> {
        self.put_json(
            &format!("pregnancies/exams/{association_id}"),
            &AssociationUpdate { is_completed },
        )
        .await
    }

    /// Link a batch of exams to a prenatal record, one request per exam.
    ///
    /// Requests run sequentially and a failure does not abort the batch:
    /// every exam gets its own outcome in the report, so callers can show
    /// exactly which associations were committed.
    pub async fn add_pregnancy_exams(
        &self,
        pregnancy_id: Uuid,
        exam_ids: &[Uuid],
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for &exam_id in exam_ids {
            match self.add_pregnancy_exam(pregnancy_id, exam_id).await {
                Ok(_) => report.record(exam_id, BatchOutcome::Added),
                Err(error) => {
                    tracing::error!(%pregnancy_id, %exam_id, %error, "exam association failed");
                    report.record(exam_id, BatchOutcome::Failed(error.to_string()));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn draft_always_carries_the_derived_delivery_date() {
        let mut draft = PregnancyDraft::new(
            Uuid::new_v4(),
            date(2024, 2, 20),
            PositiveCount::new(1).expect("count"),
            RiskLevel::Low,
        );
        assert_eq!(draft.expected_birth_date(), date(2024, 11, 26));

        draft.set_last_period_date(date(2024, 3, 1));
        assert_eq!(draft.expected_birth_date(), date(2024, 12, 6));

        let body = serde_json::to_value(&draft).expect("serializable");
        assert_eq!(body["last_period_date"], "2024-03-01");
        assert_eq!(body["expected_birth_date"], "2024-12-06");
    }
}
