//! Entry validation for measurement forms.
//!
//! These checks run at the input boundary, before a reading is sent to the
//! remote API or classified. The classifiers in [`crate::monitoring`] assume
//! values have already passed through here.

use crate::{ClinicalError, ClinicalResult};

const SYSTOLIC_MIN: u16 = 60;
const SYSTOLIC_MAX: u16 = 300;
const DIASTOLIC_MIN: u16 = 40;
const DIASTOLIC_MAX: u16 = 200;
const GLUCOSE_MIN: f64 = 20.0;
const GLUCOSE_MAX: f64 = 600.0;

/// Validate a blood-pressure entry.
///
/// Systolic must lie in [60, 300] and diastolic in [40, 200] mmHg.
///
/// # Errors
///
/// Returns [`ClinicalError::OutOfRange`] naming the offending field.
pub fn validate_blood_pressure_entry(systolic: u16, diastolic: u16) -> ClinicalResult<()> {
    if !(SYSTOLIC_MIN..=SYSTOLIC_MAX).contains(&systolic) {
        return Err(ClinicalError::OutOfRange {
            field: "systolic",
            value: f64::from(systolic),
            min: f64::from(SYSTOLIC_MIN),
            max: f64::from(SYSTOLIC_MAX),
        });
    }

    if !(DIASTOLIC_MIN..=DIASTOLIC_MAX).contains(&diastolic) {
        return Err(ClinicalError::OutOfRange {
            field: "diastolic",
            value: f64::from(diastolic),
            min: f64::from(DIASTOLIC_MIN),
            max: f64::from(DIASTOLIC_MAX),
        });
    }

    Ok(())
}

/// Validate a glucose entry.
///
/// The level must lie in [20, 600] mg/dL and respect the form's 0.1-step
/// granularity.
///
/// # Errors
///
/// Returns [`ClinicalError::OutOfRange`] for values outside the range and
/// [`ClinicalError::InvalidInput`] for finer-than-0.1 values.
pub fn validate_glucose_entry(level: f64) -> ClinicalResult<()> {
    if !level.is_finite() || !(GLUCOSE_MIN..=GLUCOSE_MAX).contains(&level) {
        return Err(ClinicalError::OutOfRange {
            field: "glucose_level",
            value: level,
            min: GLUCOSE_MIN,
            max: GLUCOSE_MAX,
        });
    }

    // The entry form steps in 0.1 mg/dL; anything finer is a typo.
    let tenths = level * 10.0;
    if (tenths - tenths.round()).abs() > 1e-6 {
        return Err(ClinicalError::InvalidInput(format!(
            "glucose level {level} is finer than the 0.1 step"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blood_pressure_bounds_are_inclusive() {
        assert!(validate_blood_pressure_entry(60, 40).is_ok());
        assert!(validate_blood_pressure_entry(300, 200).is_ok());
        assert!(validate_blood_pressure_entry(59, 80).is_err());
        assert!(validate_blood_pressure_entry(301, 80).is_err());
        assert!(validate_blood_pressure_entry(120, 39).is_err());
        assert!(validate_blood_pressure_entry(120, 201).is_err());
    }

    #[test]
    fn out_of_range_error_names_the_field() {
        let err = validate_blood_pressure_entry(120, 210).expect_err("diastolic too high");
        assert!(err.to_string().contains("diastolic"));
    }

    #[test]
    fn glucose_bounds_and_granularity() {
        assert!(validate_glucose_entry(20.0).is_ok());
        assert!(validate_glucose_entry(600.0).is_ok());
        assert!(validate_glucose_entry(98.6).is_ok());
        assert!(validate_glucose_entry(19.9).is_err());
        assert!(validate_glucose_entry(600.1).is_err());
        assert!(validate_glucose_entry(f64::NAN).is_err());
        assert!(validate_glucose_entry(100.05).is_err());
    }
}
