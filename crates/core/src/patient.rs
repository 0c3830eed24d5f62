//! Patient demographics as consumed from the remote API.
//!
//! Patients are owned and persisted by the remote API; this crate holds
//! read-only, request-scoped copies that other records reference by id.

use chrono::NaiveDate;
use clinica_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered patient of the clinic.
///
/// The three care-group flags drive which programme screens a patient appears
/// on: prenatal tracking for `is_pregnant`, chronic monitoring for
/// `is_hypertensive` / `is_diabetic`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique identifier, assigned by the remote API.
    pub id: Uuid,

    /// Full name. Never blank.
    pub full_name: NonEmptyText,

    /// National taxpayer number (CPF).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,

    /// National health card number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sus_card: Option<String>,

    /// Date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Paper record number, where the clinic still keeps one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_number: Option<String>,

    /// Currently pregnant.
    #[serde(default)]
    pub is_pregnant: bool,

    /// Enrolled in hypertension monitoring.
    #[serde(default)]
    pub is_hypertensive: bool,

    /// Enrolled in diabetes monitoring.
    #[serde(default)]
    pub is_diabetic: bool,

    /// Free-text clinical observations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}
