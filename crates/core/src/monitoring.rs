//! Chronic-condition monitoring and threshold classification.
//!
//! One [`ChronicMonitoring`] enrolment per patient and condition; readings
//! hang off the enrolment. Classification is pure and deterministic: the
//! history screens call it once per record to pick the per-item severity
//! badge, and the alert builders in [`crate::reports`] call it to collect
//! elevated readings. Entry-range validation is a separate concern and lives
//! in [`crate::validation`]; the classifiers assume pre-validated values.

use crate::{ClinicalError, ClinicalResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Systolic pressure at or above this is an elevated reading (mmHg).
pub const SYSTOLIC_ALERT_THRESHOLD: u16 = 140;
/// Diastolic pressure at or above this is an elevated reading (mmHg).
pub const DIASTOLIC_ALERT_THRESHOLD: u16 = 90;

/// Glucose limits in mg/dL, strict: a reading is elevated only above them.
pub const GLUCOSE_FASTING_LIMIT: f64 = 100.0;
pub const GLUCOSE_POST_MEAL_LIMIT: f64 = 140.0;
pub const GLUCOSE_CASUAL_LIMIT: f64 = 200.0;

/// Condition a patient is monitored for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    Hypertension,
    Diabetes,
}

impl ConditionType {
    pub fn to_wire(self) -> &'static str {
        match self {
            ConditionType::Hypertension => "hypertension",
            ConditionType::Diabetes => "diabetes",
        }
    }

    /// Parse from the wire format string.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicalError::InvalidInput`] for unknown values.
    pub fn from_wire(s: &str) -> ClinicalResult<Self> {
        match s {
            "hypertension" => Ok(ConditionType::Hypertension),
            "diabetes" => Ok(ConditionType::Diabetes),
            other => Err(ClinicalError::InvalidInput(format!(
                "unknown condition type '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for ConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_wire())
    }
}

/// Self-reported adherence to the prescribed treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adherence {
    Yes,
    No,
    Partial,
}

/// Context a glucose measurement was taken in.
///
/// The elevation threshold depends on this, so an unknown context is an
/// error at the boundary; it must never fall through to some default
/// branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    Fasting,
    PostMeal,
    Casual,
}

impl MeasurementType {
    pub fn to_wire(self) -> &'static str {
        match self {
            MeasurementType::Fasting => "fasting",
            MeasurementType::PostMeal => "post_meal",
            MeasurementType::Casual => "casual",
        }
    }

    /// Parse from the wire format string.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicalError::InvalidInput`] for unknown values.
    pub fn from_wire(s: &str) -> ClinicalResult<Self> {
        match s {
            "fasting" => Ok(MeasurementType::Fasting),
            "post_meal" => Ok(MeasurementType::PostMeal),
            "casual" => Ok(MeasurementType::Casual),
            other => Err(ClinicalError::InvalidInput(format!(
                "unknown measurement type '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_wire())
    }
}

/// True iff the reading crosses either pressure threshold.
///
/// Elevated means systolic ≥ 140 OR diastolic ≥ 90 mmHg. Assumes values
/// already passed entry validation.
pub fn blood_pressure_elevated(systolic: u16, diastolic: u16) -> bool {
    systolic >= SYSTOLIC_ALERT_THRESHOLD || diastolic >= DIASTOLIC_ALERT_THRESHOLD
}

/// True iff the glucose level exceeds the limit for its measurement context.
///
/// Limits are strict: a reading exactly at the limit is not elevated.
pub fn glucose_elevated(level: f64, measurement_type: MeasurementType) -> bool {
    let limit = match measurement_type {
        MeasurementType::Fasting => GLUCOSE_FASTING_LIMIT,
        MeasurementType::PostMeal => GLUCOSE_POST_MEAL_LIMIT,
        MeasurementType::Casual => GLUCOSE_CASUAL_LIMIT,
    };
    level > limit
}

/// A chronic-condition enrolment for one patient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChronicMonitoring {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub condition_type: ConditionType,
    /// Current medications, free text as entered at the clinic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    pub treatment_adherence: Adherence,
}

/// One blood-pressure measurement in an enrolment's history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    pub id: Uuid,
    pub chronic_monitoring_id: Uuid,
    pub measured_at: DateTime<Utc>,
    pub systolic: u16,
    pub diastolic: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BloodPressureReading {
    pub fn is_elevated(&self) -> bool {
        blood_pressure_elevated(self.systolic, self.diastolic)
    }
}

/// One glucose measurement in an enrolment's history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlucoseReading {
    pub id: Uuid,
    pub chronic_monitoring_id: Uuid,
    pub measured_at: DateTime<Utc>,
    /// mg/dL.
    pub glucose_level: f64,
    pub measurement_type: MeasurementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl GlucoseReading {
    pub fn is_elevated(&self) -> bool {
        glucose_elevated(self.glucose_level, self.measurement_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blood_pressure_thresholds_are_inclusive() {
        assert!(!blood_pressure_elevated(139, 89));
        assert!(blood_pressure_elevated(140, 80));
        assert!(blood_pressure_elevated(120, 90));
        assert!(blood_pressure_elevated(180, 110));
    }

    #[test]
    fn glucose_limits_are_strict_per_context() {
        assert!(!glucose_elevated(100.0, MeasurementType::Fasting));
        assert!(glucose_elevated(100.1, MeasurementType::Fasting));

        assert!(!glucose_elevated(140.0, MeasurementType::PostMeal));
        assert!(glucose_elevated(140.1, MeasurementType::PostMeal));

        assert!(!glucose_elevated(200.0, MeasurementType::Casual));
        assert!(glucose_elevated(200.1, MeasurementType::Casual));
    }

    #[test]
    fn measurement_type_rejects_unknown_wire_values() {
        assert!(MeasurementType::from_wire("fasting").is_ok());
        assert!(matches!(
            MeasurementType::from_wire("random"),
            Err(ClinicalError::InvalidInput(_))
        ));
    }

    #[test]
    fn condition_type_wire_round_trip() {
        for condition in [ConditionType::Hypertension, ConditionType::Diabetes] {
            assert_eq!(
                ConditionType::from_wire(condition.to_wire()).expect("round trip"),
                condition
            );
        }
        assert!(ConditionType::from_wire("asthma").is_err());
    }

    #[test]
    fn deserializes_reading_from_wire() {
        let json = r#"{
            "id": "7c9b7e58-3f3d-4b4e-9a6e-2f1f0c8d9e01",
            "chronic_monitoring_id": "a1b2c3d4-0000-4000-8000-000000000001",
            "measured_at": "2025-03-10T14:30:00Z",
            "glucose_level": 126.5,
            "measurement_type": "fasting"
        }"#;

        let reading: GlucoseReading = serde_json::from_str(json).expect("valid reading");
        assert!(reading.is_elevated());
        assert_eq!(reading.measurement_type, MeasurementType::Fasting);
    }

    #[test]
    fn unknown_measurement_type_fails_deserialization() {
        let json = r#"{
            "id": "7c9b7e58-3f3d-4b4e-9a6e-2f1f0c8d9e01",
            "chronic_monitoring_id": "a1b2c3d4-0000-4000-8000-000000000001",
            "measured_at": "2025-03-10T14:30:00Z",
            "glucose_level": 90.0,
            "measurement_type": "after_dinner"
        }"#;

        assert!(serde_json::from_str::<GlucoseReading>(json).is_err());
    }
}
