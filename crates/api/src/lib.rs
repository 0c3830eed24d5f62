//! # Clinica API client
//!
//! Typed client for the remote patient-management REST API.
//!
//! The remote API owns every entity and its wire schema; this crate only
//! defines the shapes it expects back (the `clinica-core` entities) and the
//! translation of failures:
//! - any non-2xx response becomes [`ApiError::Api`] carrying the server's
//!   human-readable message (or the HTTP status text when the body is not
//!   parseable JSON),
//! - transport failures become [`ApiError::Transport`],
//! - responses that do not match the expected shape become
//!   [`ApiError::Decode`] with the path to the failing field.
//!
//! No retries, no caching, no cross-request state: each view issues its own
//! requests and owns the fetched copies.

pub mod appointments;
pub mod client;
pub mod error;
pub mod exams;
pub mod monitoring;
pub mod patients;
pub mod pregnancies;
pub mod reports;

pub use client::{base_url_from_env_value, ApiClient, DEFAULT_API_URL};
pub use error::{ApiError, ApiResult};

pub use appointments::{AppointmentDraft, AppointmentFilter};
pub use exams::{ExamDraft, ExamFilter};
pub use monitoring::{BloodPressureDraft, ChronicDraft, ChronicFilter, GlucoseDraft};
pub use patients::PatientDraft;
pub use pregnancies::PregnancyDraft;
