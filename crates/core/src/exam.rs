//! Exam orders and their association with prenatal records.

use crate::{ClinicalError, ClinicalResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scheduling status of an exam order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    /// Requested, no slot yet.
    Scheduled,
    /// Slot booked at the lab.
    Booked,
    /// Booked, waiting on the referral protocol.
    AwaitingProtocol,
    Completed,
    Cancelled,
}

impl ExamStatus {
    pub fn to_wire(self) -> &'static str {
        match self {
            ExamStatus::Scheduled => "scheduled",
            ExamStatus::Booked => "booked",
            ExamStatus::AwaitingProtocol => "awaiting_protocol",
            ExamStatus::Completed => "completed",
            ExamStatus::Cancelled => "cancelled",
        }
    }

    /// Parse from the wire format string.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicalError::InvalidInput`] for unknown values.
    pub fn from_wire(s: &str) -> ClinicalResult<Self> {
        match s {
            "scheduled" => Ok(ExamStatus::Scheduled),
            "booked" => Ok(ExamStatus::Booked),
            "awaiting_protocol" => Ok(ExamStatus::AwaitingProtocol),
            "completed" => Ok(ExamStatus::Completed),
            "cancelled" => Ok(ExamStatus::Cancelled),
            other => Err(ClinicalError::InvalidInput(format!(
                "unknown exam status '{other}'"
            ))),
        }
    }

    /// An order still waiting on a result.
    pub fn is_pending(self) -> bool {
        !matches!(self, ExamStatus::Completed | ExamStatus::Cancelled)
    }
}

impl std::fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_wire())
    }
}

/// An exam ordered for a patient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExamOrder {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub exam_type: String,
    pub scheduled_date: DateTime<Utc>,
    pub status: ExamStatus,
    /// Link to an uploaded result document, once available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_text: Option<String>,
}

/// Association between a prenatal record and one of the patient's exams.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PregnancyExam {
    pub id: Uuid,
    pub pregnancy_id: Uuid,
    pub exam_id: Uuid,
    #[serde(default)]
    pub is_completed: bool,
}

/// Outcome of one item in a batch association.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchOutcome {
    Added,
    Failed(String),
}

/// Per-item results of a batch exam association.
///
/// The batch never aborts mid-way: every requested exam gets an outcome, so
/// the caller can show exactly which associations were committed and which
/// were not.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    items: Vec<(Uuid, BatchOutcome)>,
}

impl BatchReport {
    pub fn record(&mut self, exam_id: Uuid, outcome: BatchOutcome) {
        self.items.push((exam_id, outcome));
    }

    pub fn items(&self) -> &[(Uuid, BatchOutcome)] {
        &self.items
    }

    pub fn succeeded(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.items
            .iter()
            .filter(|(_, outcome)| matches!(outcome, BatchOutcome::Added))
            .map(|(id, _)| *id)
    }

    pub fn failed(&self) -> impl Iterator<Item = (Uuid, &str)> + '_ {
        self.items.iter().filter_map(|(id, outcome)| match outcome {
            BatchOutcome::Failed(message) => Some((*id, message.as_str())),
            BatchOutcome::Added => None,
        })
    }

    pub fn all_succeeded(&self) -> bool {
        self.items
            .iter()
            .all(|(_, outcome)| matches!(outcome, BatchOutcome::Added))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_covers_everything_but_terminal_states() {
        assert!(ExamStatus::Scheduled.is_pending());
        assert!(ExamStatus::Booked.is_pending());
        assert!(ExamStatus::AwaitingProtocol.is_pending());
        assert!(!ExamStatus::Completed.is_pending());
        assert!(!ExamStatus::Cancelled.is_pending());
    }

    #[test]
    fn exam_status_wire_rejects_unknown() {
        assert!(ExamStatus::from_wire("booked").is_ok());
        assert!(ExamStatus::from_wire("lost").is_err());
    }

    #[test]
    fn batch_report_partitions_outcomes() {
        let ok_id = Uuid::new_v4();
        let bad_id = Uuid::new_v4();

        let mut report = BatchReport::default();
        report.record(ok_id, BatchOutcome::Added);
        report.record(bad_id, BatchOutcome::Failed("exam already linked".into()));

        assert!(!report.all_succeeded());
        assert_eq!(report.succeeded().collect::<Vec<_>>(), vec![ok_id]);
        let failed: Vec<_> = report.failed().collect();
        assert_eq!(failed, vec![(bad_id, "exam already linked")]);
    }
}
