//! Chronic monitoring endpoints and measurement entry.
//!
//! Measurement drafts are validated here, at the input boundary, before any
//! request goes out; the classifiers downstream assume in-range values.

use crate::{ApiClient, ApiResult};
use chrono::{DateTime, Utc};
use clinica_core::validation::{validate_blood_pressure_entry, validate_glucose_entry};
use clinica_core::{
    Adherence, BloodPressureReading, ChronicMonitoring, ConditionType, GlucoseReading,
    MeasurementType,
};
use serde::Serialize;
use uuid::Uuid;

/// Server-side filters for the enrolment list.
#[derive(Clone, Debug, Default)]
pub struct ChronicFilter {
    pub patient_id: Option<Uuid>,
    pub condition_type: Option<ConditionType>,
}

impl ChronicFilter {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(patient_id) = self.patient_id {
            query.push(("patient_id", patient_id.to_string()));
        }
        if let Some(condition) = self.condition_type {
            query.push(("condition_type", condition.to_wire().to_string()));
        }
        query
    }
}

/// Payload for creating or updating an enrolment.
#[derive(Clone, Debug, Serialize)]
pub struct ChronicDraft {
    pub patient_id: Uuid,
    pub condition_type: ConditionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    pub treatment_adherence: Adherence,
}

/// Payload for one blood-pressure measurement.
#[derive(Clone, Debug, Serialize)]
pub struct BloodPressureDraft {
    pub measured_at: DateTime<Utc>,
    pub systolic: u16,
    pub diastolic: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for one glucose measurement.
#[derive(Clone, Debug, Serialize)]
pub struct GlucoseDraft {
    pub measured_at: DateTime<Utc>,
    pub glucose_level: f64,
    pub measurement_type: MeasurementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ApiClient {
    pub async fn list_chronic_monitorings(
        &self,
        filter: &ChronicFilter,
    ) -> ApiResult<Vec<ChronicMonitoring>> {
        self.get_json("chronic-monitoring", &filter.to_query()).await
    }

    pub async fn get_chronic_monitoring(&self, id: Uuid) -> ApiResult<ChronicMonitoring> {
        self.get_json(&format!("chronic-monitoring/{id}"), &[]).await
    }

    pub async fn create_chronic_monitoring(
        &self,
        draft: &ChronicDraft,
    ) -> ApiResult<ChronicMonitoring> {
        self.post_json("chronic-monitoring", draft).await
    }

    pub async fn update_chronic_monitoring(
        &self,
        id: Uuid,
        draft: &ChronicDraft,
    ) -> ApiResult<ChronicMonitoring> {
        self.put_json(&format!("chronic-monitoring/{id}"), draft)
            .await
    }

    /// Blood-pressure history for one enrolment.
    pub async fn list_blood_pressure(
        &self,
        monitoring_id: Uuid,
    ) -> ApiResult<Vec<BloodPressureReading>> {
        self.get_json(
            &format!("chronic-monitoring/{monitoring_id}/blood-pressure"),
            &[],
        )
        .await
    }

    /// Record a blood-pressure measurement.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::ApiError::Invalid`] before sending anything if
    /// the values are outside the entry ranges.
    pub async fn add_blood_pressure(
        &self,
        monitoring_id: Uuid,
        draft: &BloodPressureDraft,
    ) -> ApiResult<BloodPressureReading> {
        validate_blood_pressure_entry(draft.systolic, draft.diastolic)?;
        self.post_json(
            &format!("chronic-monitoring/{monitoring_id}/blood-pressure"),
            draft,
        )
        .await
    }

    /// Glucose history for one enrolment.
    pub async fn list_glucose(&self, monitoring_id: Uuid) -> ApiResult<Vec<GlucoseReading>> {
        self.get_json(&format!("chronic-monitoring/{monitoring_id}/glucose"), &[])
            .await
    }

    /// Record a glucose measurement.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::ApiError::Invalid`] before sending anything if
    /// the level is outside the entry range or finer than the 0.1 step.
    pub async fn add_glucose(
        &self,
        monitoring_id: Uuid,
        draft: &GlucoseDraft,
    ) -> ApiResult<GlucoseReading> {
        validate_glucose_entry(draft.glucose_level)?;
        self.post_json(&format!("chronic-monitoring/{monitoring_id}/glucose"), draft)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiError;

    #[test]
    fn condition_filter_builds_expected_query() {
        let filter = ChronicFilter {
            patient_id: None,
            condition_type: Some(ConditionType::Diabetes),
        };
        assert_eq!(
            filter.to_query(),
            vec![("condition_type", "diabetes".to_string())]
        );
    }

    #[tokio::test]
    async fn out_of_range_entry_fails_before_any_request() {
        // Deliberately unroutable client: validation must reject first.
        let client = ApiClient::new("http://127.0.0.1:9").expect("valid url");

        let draft = BloodPressureDraft {
            measured_at: Utc::now(),
            systolic: 400,
            diastolic: 80,
            notes: None,
        };
        let err = client
            .add_blood_pressure(Uuid::new_v4(), &draft)
            .await
            .expect_err("systolic 400 is out of range");
        assert!(matches!(err, ApiError::Invalid(_)));

        let draft = GlucoseDraft {
            measured_at: Utc::now(),
            glucose_level: 10.0,
            measurement_type: MeasurementType::Fasting,
            notes: None,
        };
        let err = client
            .add_glucose(Uuid::new_v4(), &draft)
            .await
            .expect_err("glucose 10 is out of range");
        assert!(matches!(err, ApiError::Invalid(_)));
    }
}
