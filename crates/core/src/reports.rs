//! Reporting aggregates: summary counts and clinical alert lists.
//!
//! The remote API exposes these as ready-made aggregates; this module
//! rebuilds the same shapes client-side from raw collections, so the
//! dashboard keeps working when the reporting endpoints are unavailable and
//! the numbers can be cross-checked against the server's.

use crate::monitoring::{BloodPressureReading, ChronicMonitoring, GlucoseReading, MeasurementType};
use crate::patient::Patient;
use crate::pregnancy::{PregnancyRecord, RiskLevel};
use crate::query::PATIENT_NAME_UNAVAILABLE;
use crate::ExamOrder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Headline counts for the reporting dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_patients: usize,
    pub pregnant_patients: usize,
    pub hypertensive_patients: usize,
    pub diabetic_patients: usize,
    /// Exam orders not yet completed or cancelled.
    pub pending_exams: usize,
}

impl Summary {
    /// Rebuild the summary from raw collections.
    pub fn from_collections(patients: &[Patient], exams: &[ExamOrder]) -> Self {
        Self {
            total_patients: patients.len(),
            pregnant_patients: patients.iter().filter(|p| p.is_pregnant).count(),
            hypertensive_patients: patients.iter().filter(|p| p.is_hypertensive).count(),
            diabetic_patients: patients.iter().filter(|p| p.is_diabetic).count(),
            pending_exams: exams.iter().filter(|e| e.status.is_pending()).count(),
        }
    }
}

/// A high-risk pregnancy flagged on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    pub pregnancy_id: Uuid,
    pub patient_name: String,
}

/// An elevated blood-pressure reading flagged on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PressureAlert {
    pub chronic_monitoring_id: Uuid,
    pub patient_name: String,
    pub systolic: u16,
    pub diastolic: u16,
    pub measured_at: DateTime<Utc>,
}

/// An elevated glucose reading flagged on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlucoseAlert {
    pub chronic_monitoring_id: Uuid,
    pub patient_name: String,
    pub glucose_level: f64,
    pub measurement_type: MeasurementType,
    pub measured_at: DateTime<Utc>,
}

/// Alert lists for the reporting dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alerts {
    pub high_risk_pregnancies: Vec<RiskAlert>,
    pub elevated_blood_pressure: Vec<PressureAlert>,
    pub elevated_glucose: Vec<GlucoseAlert>,
}

impl Alerts {
    /// Rebuild the alert lists from raw collections.
    ///
    /// Readings resolve to a patient through their enrolment; a dangling
    /// reference on either hop gets the placeholder name, the alert itself
    /// is always kept.
    pub fn from_collections(
        pregnancies: &[PregnancyRecord],
        monitorings: &[ChronicMonitoring],
        pressure_readings: &[BloodPressureReading],
        glucose_readings: &[GlucoseReading],
        patients: &[Patient],
    ) -> Self {
        let patients_by_id: HashMap<Uuid, &Patient> =
            patients.iter().map(|p| (p.id, p)).collect();
        let monitorings_by_id: HashMap<Uuid, &ChronicMonitoring> =
            monitorings.iter().map(|m| (m.id, m)).collect();

        let name_of = |patient_id: Uuid| -> String {
            patients_by_id
                .get(&patient_id)
                .map(|p| p.full_name.as_str().to_owned())
                .unwrap_or_else(|| PATIENT_NAME_UNAVAILABLE.to_owned())
        };
        let name_via_monitoring = |monitoring_id: Uuid| -> String {
            monitorings_by_id
                .get(&monitoring_id)
                .map(|m| name_of(m.patient_id))
                .unwrap_or_else(|| PATIENT_NAME_UNAVAILABLE.to_owned())
        };

        let high_risk_pregnancies = pregnancies
            .iter()
            .filter(|p| p.risk_classification == RiskLevel::High)
            .map(|p| RiskAlert {
                pregnancy_id: p.id,
                patient_name: name_of(p.patient_id),
            })
            .collect();

        let elevated_blood_pressure = pressure_readings
            .iter()
            .filter(|r| r.is_elevated())
            .map(|r| PressureAlert {
                chronic_monitoring_id: r.chronic_monitoring_id,
                patient_name: name_via_monitoring(r.chronic_monitoring_id),
                systolic: r.systolic,
                diastolic: r.diastolic,
                measured_at: r.measured_at,
            })
            .collect();

        let elevated_glucose = glucose_readings
            .iter()
            .filter(|r| r.is_elevated())
            .map(|r| GlucoseAlert {
                chronic_monitoring_id: r.chronic_monitoring_id,
                patient_name: name_via_monitoring(r.chronic_monitoring_id),
                glucose_level: r.glucose_level,
                measurement_type: r.measurement_type,
                measured_at: r.measured_at,
            })
            .collect();

        Self {
            high_risk_pregnancies,
            elevated_blood_pressure,
            elevated_glucose,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.high_risk_pregnancies.is_empty()
            && self.elevated_blood_pressure.is_empty()
            && self.elevated_glucose.is_empty()
    }
}
