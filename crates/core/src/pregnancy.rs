//! Prenatal tracking records and pregnancy date arithmetic.
//!
//! The expected delivery date (DPP) is a derived value: always the
//! last-menstrual-period date (DUM) plus 280 days. The remote API stores
//! whatever it was last given, so this module re-derives the value whenever a
//! record is built or its reference date changes; the two dates never diverge
//! inside this crate.
//!
//! All arithmetic operates on calendar dates, never instants. "Today" is the
//! current UTC date and is passed in by callers, which keeps every function
//! here pure and the behaviour identical across client timezones.

use crate::{ClinicalError, ClinicalResult};
use chrono::{DateTime, Days, NaiveDate, Utc};
use clinica_types::PositiveCount;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Days from the last menstrual period to the expected delivery date.
const GESTATION_DAYS: u64 = 280;

/// Risk classification assigned at prenatal intake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Routine prenatal follow-up.
    Low,
    /// High-risk pregnancy, flagged on the reporting dashboard.
    High,
}

impl RiskLevel {
    /// Convert to the wire format string.
    pub fn to_wire(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::High => "high",
        }
    }

    /// Parse from the wire format string.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicalError::InvalidInput`] for unknown values; risk is
    /// never defaulted.
    pub fn from_wire(s: &str) -> ClinicalResult<Self> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "high" => Ok(RiskLevel::High),
            other => Err(ClinicalError::InvalidInput(format!(
                "unknown risk classification '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_wire())
    }
}

/// Trimester bucket derived from gestational age.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    /// Bucket a gestational age in whole weeks.
    pub fn from_weeks(weeks: u32) -> Self {
        match weeks {
            0..=13 => Trimester::First,
            14..=27 => Trimester::Second,
            _ => Trimester::Third,
        }
    }
}

impl std::fmt::Display for Trimester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trimester::First => f.write_str("1st trimester"),
            Trimester::Second => f.write_str("2nd trimester"),
            Trimester::Third => f.write_str("3rd trimester"),
        }
    }
}

/// Expected delivery date: the reference date plus 280 calendar days.
///
/// Calendar arithmetic crosses month and year boundaries (including leap
/// years) correctly because it operates on date-only values.
pub fn expected_birth_date(last_period: NaiveDate) -> NaiveDate {
    last_period + Days::new(GESTATION_DAYS)
}

/// Gestational age in whole weeks as of the given date.
///
/// Returns `floor(days / 7)`, and 0 whenever `as_of` is on or before the
/// reference date; gestational age is never negative.
pub fn gestational_age_weeks(last_period: NaiveDate, as_of: NaiveDate) -> u32 {
    let days = (as_of - last_period).num_days();
    if days <= 0 {
        return 0;
    }
    (days / 7) as u32
}

/// Parse a last-menstrual-period value received at the boundary.
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp (the remote
/// API serialises dates both ways); a timestamp is reduced to its UTC
/// calendar date. An absent, blank or unparseable value is an error; the
/// calculator never silently substitutes week 0.
pub fn parse_reference_date(raw: Option<&str>) -> ClinicalResult<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(ClinicalError::InvalidInput(
            "last period date is required".into(),
        ));
    };

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => Ok(instant.with_timezone(&Utc).date_naive()),
        Err(_) => Err(ClinicalError::InvalidInput(format!(
            "unparseable date '{raw}'"
        ))),
    }
}

/// A prenatal tracking record, referencing a patient by id.
///
/// `last_period_date` and `expected_birth_date` are private so every path
/// that changes the reference date goes through [`set_last_period_date`],
/// which re-derives the delivery date. The delivery date is read-only to
/// callers (list and form screens present it as such).
///
/// [`set_last_period_date`]: PregnancyRecord::set_last_period_date
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PregnancyWire")]
pub struct PregnancyRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    last_period_date: NaiveDate,
    expected_birth_date: NaiveDate,
    pub pregnancy_number: PositiveCount,
    pub risk_classification: RiskLevel,
    pub first_appointment_date: Option<NaiveDate>,
    pub has_pregnancy_card: bool,
}

impl PregnancyRecord {
    /// Build a record, deriving the expected birth date.
    pub fn new(
        id: Uuid,
        patient_id: Uuid,
        last_period_date: NaiveDate,
        pregnancy_number: PositiveCount,
        risk_classification: RiskLevel,
    ) -> Self {
        Self {
            id,
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

    /// Change the reference date, overwriting the derived delivery date.
    pub fn set_last_period_date(&mut self, last_period_date: NaiveDate) {
        self.last_period_date = last_period_date;
        self.expected_birth_date = expected_birth_date(last_period_date);
    }

    /// Gestational age in whole weeks as of the given date.
    pub fn gestational_age_weeks(&self, as_of: NaiveDate) -> u32 {
        gestational_age_weeks(self.last_period_date, as_of)
    }

    /// Trimester as of the given date.
    pub fn trimester(&self, as_of: NaiveDate) -> Trimester {
        Trimester::from_weeks(self.gestational_age_weeks(as_of))
    }
}

/// Wire shape for a pregnancy record as returned by the remote API.
///
/// Dates arrive as strings (plain dates or timestamps, depending on which
/// screen last wrote the record) and the stored expected birth date is
/// accepted but re-derived.
#[derive(Deserialize)]
struct PregnancyWire {
    id: Uuid,
    patient_id: Uuid,
    last_period_date: String,
    #[serde(default)]
    expected_birth_date: Option<String>,
    pregnancy_number: u32,
    risk_classification: String,
    #[serde(default)]
    first_appointment_date: Option<String>,
    #[serde(default)]
    has_pregnancy_card: bool,
}

impl TryFrom<PregnancyWire> for PregnancyRecord {
    type Error = ClinicalError;

    fn try_from(wire: PregnancyWire) -> ClinicalResult<Self> {
        let last_period = parse_reference_date(Some(&wire.last_period_date))?;
        let derived = expected_birth_date(last_period);

        if let Some(stored) = wire.expected_birth_date.as_deref() {
            match parse_reference_date(Some(stored)) {
                Ok(stored) if stored != derived => {
                    tracing::warn!(
                        pregnancy = %wire.id,
                        %stored,
                        %derived,
                        "stored expected birth date diverges, re-deriving"
                    );
                }
                _ => {}
            }
        }

        let pregnancy_number = PositiveCount::new(wire.pregnancy_number)
            .map_err(|e| ClinicalError::InvalidInput(format!("pregnancy number: {e}")))?;

        let first_appointment_date = wire
            .first_appointment_date
            .as_deref()
            .map(|raw| parse_reference_date(Some(raw)))
            .transpose()?;

        Ok(Self {
            id: wire.id,
            patient_id: wire.patient_id,
            last_period_date: last_period,
            expected_birth_date: derived,
            pregnancy_number,
            risk_classification: RiskLevel::from_wire(&wire.risk_classification)?,
            first_appointment_date,
            has_pregnancy_card: wire.has_pregnancy_card,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn expected_birth_date_crosses_leap_year() {
        assert_eq!(
            expected_birth_date(date(2024, 2, 20)),
            date(2024, 11, 26)
        );
    }

    #[test]
    fn expected_birth_date_crosses_year_boundary() {
        assert_eq!(expected_birth_date(date(2023, 6, 15)), date(2024, 3, 21));
        // Non-leap year: same reference day lands one calendar day later.
        assert_eq!(expected_birth_date(date(2022, 6, 15)), date(2023, 3, 22));
    }

    #[test]
    fn gestational_age_is_floor_of_days_over_seven() {
        // 73 days -> 10 whole weeks.
        assert_eq!(
            gestational_age_weeks(date(2024, 1, 1), date(2024, 3, 15)),
            10
        );
        assert_eq!(gestational_age_weeks(date(2024, 1, 1), date(2024, 1, 8)), 1);
        assert_eq!(gestational_age_weeks(date(2024, 1, 1), date(2024, 1, 7)), 0);
    }

    #[test]
    fn gestational_age_never_negative() {
        let lmp = date(2024, 5, 1);
        assert_eq!(gestational_age_weeks(lmp, lmp), 0);
        assert_eq!(gestational_age_weeks(lmp, date(2024, 4, 1)), 0);
    }

    #[test]
    fn parse_reference_date_rejects_absent_or_garbage() {
        assert!(parse_reference_date(None).is_err());
        assert!(parse_reference_date(Some("   ")).is_err());
        assert!(parse_reference_date(Some("20/02/2024")).is_err());
    }

    #[test]
    fn parse_reference_date_accepts_both_wire_forms() {
        assert_eq!(
            parse_reference_date(Some("2024-02-20")).expect("plain date"),
            date(2024, 2, 20)
        );
        // Timestamps reduce to their UTC calendar date.
        assert_eq!(
            parse_reference_date(Some("2024-02-20T23:30:00-03:00")).expect("timestamp"),
            date(2024, 2, 21)
        );
    }

    #[test]
    fn changing_reference_date_rederives_delivery_date() {
        let mut record = PregnancyRecord::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            date(2024, 1, 10),
            PositiveCount::new(1).expect("count"),
            RiskLevel::Low,
        );
        assert_eq!(record.expected_birth_date(), date(2024, 10, 16));

        record.set_last_period_date(date(2024, 2, 1));
        assert_eq!(record.expected_birth_date(), date(2024, 11, 7));
    }

    #[test]
    fn wire_record_rederives_stale_stored_delivery_date() {
        let json = r#"{
            "id": "0d4dbb9e-30c1-4f74-bb2f-3a2f9a3c6f18",
            "patient_id": "6f2a1f64-9d3e-4e0a-bb1a-0a9c6d5b4e3f",
            "last_period_date": "2024-02-20",
            "expected_birth_date": "2024-10-01",
            "pregnancy_number": 2,
            "risk_classification": "high"
        }"#;

        let record: PregnancyRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(record.expected_birth_date(), date(2024, 11, 26));
        assert_eq!(record.pregnancy_number.get(), 2);
        assert_eq!(record.risk_classification, RiskLevel::High);
    }

    #[test]
    fn wire_record_rejects_unknown_risk() {
        let json = r#"{
            "id": "0d4dbb9e-30c1-4f74-bb2f-3a2f9a3c6f18",
            "patient_id": "6f2a1f64-9d3e-4e0a-bb1a-0a9c6d5b4e3f",
            "last_period_date": "2024-02-20",
            "pregnancy_number": 1,
            "risk_classification": "medium"
        }"#;

        assert!(serde_json::from_str::<PregnancyRecord>(json).is_err());
    }

    #[test]
    fn trimester_buckets() {
        assert_eq!(Trimester::from_weeks(0), Trimester::First);
        assert_eq!(Trimester::from_weeks(13), Trimester::First);
        assert_eq!(Trimester::from_weeks(14), Trimester::Second);
        assert_eq!(Trimester::from_weeks(27), Trimester::Second);
        assert_eq!(Trimester::from_weeks(28), Trimester::Third);
    }
}
