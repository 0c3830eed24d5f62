//! # Clinica Core
//!
//! Clinical domain logic for the primary-care patient management tools.
//!
//! This crate contains pure data types and derivation rules:
//! - Typed entities for patients, pregnancies, chronic monitoring, exams and
//!   appointments, validated once at the API boundary
//! - Pregnancy date arithmetic (expected delivery date, gestational age)
//! - Threshold classification for blood-pressure and glucose readings
//! - Joining and filtering of fetched collections for list views
//! - Client-side rebuilding of the reporting aggregates
//!
//! **No transport concerns**: HTTP, request shaping and error translation for
//! the remote API belong in `clinica-api`.

pub mod appointment;
pub mod error;
pub mod exam;
pub mod monitoring;
pub mod patient;
pub mod pregnancy;
pub mod query;
pub mod reports;
pub mod validation;
pub mod view;

pub use appointment::{Appointment, AppointmentStatus};
pub use error::{ClinicalError, ClinicalResult};
pub use exam::{BatchOutcome, BatchReport, ExamOrder, ExamStatus, PregnancyExam};
pub use monitoring::{
    blood_pressure_elevated, glucose_elevated, Adherence, BloodPressureReading, ChronicMonitoring,
    ConditionType, GlucoseReading, MeasurementType,
};
pub use patient::Patient;
pub use pregnancy::{
    expected_birth_date, gestational_age_weeks, parse_reference_date, PregnancyRecord, RiskLevel,
    Trimester,
};
pub use query::{
    filter_by_date_range, filter_by_equality, filter_by_name_substring, join_patient_names,
    PatientLinked, Timestamped, WithPatientName, PATIENT_NAME_UNAVAILABLE,
};
pub use reports::{Alerts, GlucoseAlert, PressureAlert, RiskAlert, Summary};
pub use view::ViewState;
