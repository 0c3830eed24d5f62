//! Joining and filtering of fetched collections.
//!
//! List screens fetch a domain collection plus the patient roster, join the
//! patient name in by id, then narrow with whatever filters the user set.
//! Joins are total over partial reference data: a dangling `patient_id`
//! yields a placeholder name, never an error. Filters preserve input order
//! and commute with each other, so screens may apply them in any order.

use crate::appointment::Appointment;
use crate::exam::ExamOrder;
use crate::monitoring::{BloodPressureReading, ChronicMonitoring, GlucoseReading};
use crate::patient::Patient;
use crate::pregnancy::PregnancyRecord;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Placeholder shown when a record references a patient the roster lacks.
pub const PATIENT_NAME_UNAVAILABLE: &str = "name unavailable";

/// A record that references a patient by id.
pub trait PatientLinked {
    fn patient_id(&self) -> Uuid;
}

impl PatientLinked for PregnancyRecord {
    fn patient_id(&self) -> Uuid {
        self.patient_id
    }
}

impl PatientLinked for ChronicMonitoring {
    fn patient_id(&self) -> Uuid {
        self.patient_id
    }
}

impl PatientLinked for ExamOrder {
    fn patient_id(&self) -> Uuid {
        self.patient_id
    }
}

impl PatientLinked for Appointment {
    fn patient_id(&self) -> Uuid {
        self.patient_id
    }
}

/// A record carrying a primary timestamp usable for range filtering.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Timestamped for Appointment {
    fn timestamp(&self) -> DateTime<Utc> {
        self.scheduled_at
    }
}

impl Timestamped for ExamOrder {
    fn timestamp(&self) -> DateTime<Utc> {
        self.scheduled_date
    }
}

impl Timestamped for BloodPressureReading {
    fn timestamp(&self) -> DateTime<Utc> {
        self.measured_at
    }
}

impl Timestamped for GlucoseReading {
    fn timestamp(&self) -> DateTime<Utc> {
        self.measured_at
    }
}

/// A domain record decorated with the owning patient's display name.
#[derive(Clone, Debug, PartialEq)]
pub struct WithPatientName<R> {
    pub record: R,
    pub patient_name: String,
}

/// Join patient display names into a fetched collection.
///
/// Lookup is by `patient_id`; records whose patient is missing from the
/// roster get [`PATIENT_NAME_UNAVAILABLE`] instead of failing the whole
/// screen. Input order is preserved.
pub fn join_patient_names<R: PatientLinked>(
    records: Vec<R>,
    patients: &[Patient],
) -> Vec<WithPatientName<R>> {
    let by_id: HashMap<Uuid, &Patient> = patients.iter().map(|p| (p.id, p)).collect();

    records
        .into_iter()
        .map(|record| {
            let patient_name = match by_id.get(&record.patient_id()) {
                Some(patient) => patient.full_name.as_str().to_owned(),
                None => {
                    tracing::warn!(patient_id = %record.patient_id(), "patient missing from roster");
                    PATIENT_NAME_UNAVAILABLE.to_owned()
                }
            };
            WithPatientName {
                record,
                patient_name,
            }
        })
        .collect()
}

impl<R: PatientLinked> PatientLinked for WithPatientName<R> {
    fn patient_id(&self) -> Uuid {
        self.record.patient_id()
    }
}

impl<R: Timestamped> Timestamped for WithPatientName<R> {
    fn timestamp(&self) -> DateTime<Utc> {
        self.record.timestamp()
    }
}

/// Keep records whose timestamp falls inside the (optional) date range.
///
/// The start bound is inclusive from midnight; the end bound is inclusive
/// through 23:59:59 of the end date, so filtering a single day keeps that
/// whole day's events.
pub fn filter_by_date_range<R: Timestamped>(
    records: Vec<R>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<R> {
    let start_bound = start.map(|d| d.and_time(NaiveTime::MIN).and_utc());
    let end_bound = end.and_then(|d| {
        NaiveTime::from_hms_opt(23, 59, 59).map(|t| d.and_time(t).and_utc())
    });

    records
        .into_iter()
        .filter(|record| {
            let at = record.timestamp();
            start_bound.is_none_or(|lo| at >= lo) && end_bound.is_none_or(|hi| at <= hi)
        })
        .collect()
}

/// Keep records whose field, read by `accessor`, equals `value`.
///
/// `None` or an empty string means "no filter": everything passes. This is
/// a pass-through, not a match against the empty string.
pub fn filter_by_equality<R>(
    records: Vec<R>,
    accessor: impl Fn(&R) -> &str,
    value: Option<&str>,
) -> Vec<R> {
    let Some(wanted) = value.filter(|v| !v.is_empty()) else {
        return records;
    };

    records
        .into_iter()
        .filter(|record| accessor(record) == wanted)
        .collect()
}

/// Keep records whose name field contains `needle`, case-insensitively.
///
/// An empty needle passes everything through.
pub fn filter_by_name_substring<R>(
    records: Vec<R>,
    accessor: impl Fn(&R) -> &str,
    needle: &str,
) -> Vec<R> {
    if needle.is_empty() {
        return records;
    }
    let needle = needle.to_lowercase();

    records
        .into_iter()
        .filter(|record| accessor(record).to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::AppointmentStatus;
    use clinica_types::NonEmptyText;

    fn patient(id: Uuid, name: &str) -> Patient {
        Patient {
            id,
            full_name: NonEmptyText::new(name).expect("name"),
            cpf: None,
            sus_card: None,
            birth_date: None,
            phone: None,
            record_number: None,
            is_pregnant: false,
            is_hypertensive: false,
            is_diabetic: false,
            observations: None,
        }
    }

    fn appointment(patient_id: Uuid, at: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            patient_id,
            scheduled_at: at.parse().expect("timestamp"),
            appointment_type: "routine".into(),
            professional: "Dr. Souza".into(),
            status,
            notes: None,
        }
    }

    #[test]
    fn join_substitutes_placeholder_for_missing_patient() {
        let known = Uuid::new_v4();
        let unknown = Uuid::new_v4();
        let patients = vec![patient(known, "Carla Mendes")];

        let records = vec![
            appointment(known, "2025-06-01T10:00:00Z", AppointmentStatus::Scheduled),
            appointment(unknown, "2025-06-02T10:00:00Z", AppointmentStatus::Scheduled),
        ];

        let joined = join_patient_names(records, &patients);
        assert_eq!(joined[0].patient_name, "Carla Mendes");
        assert_eq!(joined[1].patient_name, PATIENT_NAME_UNAVAILABLE);
    }

    #[test]
    fn date_range_end_is_inclusive_through_end_of_day() {
        let pid = Uuid::new_v4();
        let records = vec![
            appointment(pid, "2025-06-30T23:59:00Z", AppointmentStatus::Scheduled),
            appointment(pid, "2025-07-01T00:00:01Z", AppointmentStatus::Scheduled),
        ];

        let end = NaiveDate::from_ymd_opt(2025, 6, 30).expect("date");
        let kept = filter_by_date_range(records, None, Some(end));
        assert_eq!(kept.len(), 1);
        assert_eq!(
            kept[0].scheduled_at,
            "2025-06-30T23:59:00Z".parse::<DateTime<Utc>>().expect("ts")
        );
    }

    #[test]
    fn date_range_start_is_inclusive_from_midnight() {
        let pid = Uuid::new_v4();
        let records = vec![
            appointment(pid, "2025-06-30T00:00:00Z", AppointmentStatus::Scheduled),
            appointment(pid, "2025-06-29T23:59:59Z", AppointmentStatus::Scheduled),
        ];

        let start = NaiveDate::from_ymd_opt(2025, 6, 30).expect("date");
        let kept = filter_by_date_range(records, Some(start), None);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn equality_filter_treats_empty_as_pass_through() {
        let pid = Uuid::new_v4();
        let records = vec![
            appointment(pid, "2025-06-01T10:00:00Z", AppointmentStatus::Scheduled),
            appointment(pid, "2025-06-02T10:00:00Z", AppointmentStatus::Cancelled),
        ];

        let all = filter_by_equality(records.clone(), |a| a.status.to_wire(), None);
        assert_eq!(all.len(), 2);
        let all = filter_by_equality(records.clone(), |a| a.status.to_wire(), Some(""));
        assert_eq!(all.len(), 2);

        let cancelled =
            filter_by_equality(records, |a| a.status.to_wire(), Some("cancelled"));
        assert_eq!(cancelled.len(), 1);
    }

    #[test]
    fn name_filter_is_case_insensitive() {
        let ana = Uuid::new_v4();
        let bea = Uuid::new_v4();
        let patients = vec![patient(ana, "Ana Clara"), patient(bea, "Beatriz Lima")];

        let records = vec![
            appointment(ana, "2025-06-01T10:00:00Z", AppointmentStatus::Scheduled),
            appointment(bea, "2025-06-02T10:00:00Z", AppointmentStatus::Scheduled),
        ];
        let joined = join_patient_names(records, &patients);

        let hits = filter_by_name_substring(joined.clone(), |j| &j.patient_name, "ANA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].patient_name, "Ana Clara");

        let all = filter_by_name_substring(joined, |j| &j.patient_name, "");
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn filter_application_order_does_not_change_the_result_set() {
        let ana = Uuid::new_v4();
        let bea = Uuid::new_v4();
        let patients = vec![patient(ana, "Ana Clara"), patient(bea, "Beatriz Lima")];

        let records = vec![
            appointment(ana, "2025-06-01T10:00:00Z", AppointmentStatus::Scheduled),
            appointment(ana, "2025-06-20T10:00:00Z", AppointmentStatus::Cancelled),
            appointment(bea, "2025-06-10T10:00:00Z", AppointmentStatus::Scheduled),
            appointment(ana, "2025-07-05T10:00:00Z", AppointmentStatus::Scheduled),
        ];
        let joined = join_patient_names(records, &patients);

        let start = NaiveDate::from_ymd_opt(2025, 6, 1).expect("date");
        let end = NaiveDate::from_ymd_opt(2025, 6, 30).expect("date");

        let a = filter_by_name_substring(
            filter_by_equality(
                filter_by_date_range(joined.clone(), Some(start), Some(end)),
                |j| j.record.status.to_wire(),
                Some("scheduled"),
            ),
            |j| &j.patient_name,
            "ana",
        );

        let b = filter_by_date_range(
            filter_by_name_substring(
                filter_by_equality(
                    joined,
                    |j| j.record.status.to_wire(),
                    Some("scheduled"),
                ),
                |j| &j.patient_name,
                "ana",
            ),
            Some(start),
            Some(end),
        );

        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }
}
