//! Standard body-composition targets derived from height and sex.

use crate::types::Sex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TargetError {
    #[error("Height '{0}' is not a number")]
    InvalidHeight(String),
}

/// Standard weight, fat mass and lean mass in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Targets {
    pub standard_weight: f64,
    pub standard_fat: f64,
    pub standard_lean: f64,
}

fn standard_bmi(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 22.0,
        Sex::Female | Sex::Other => 21.0,
    }
}

fn ideal_fat_rate(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 0.15,
        Sex::Female | Sex::Other => 0.23,
    }
}

fn ideal_lean_rate(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 0.85,
        Sex::Female | Sex::Other => 0.77,
    }
}

impl Targets {
    /// Compute targets from a height in centimeters, as typed by the user.
    ///
    /// Any finite number is accepted, including zero and negative heights.
    pub fn calculate(height_cm: &str, sex: Sex) -> Result<Targets, TargetError> {
        let height_cm = height_cm
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|h| h.is_finite())
            .ok_or_else(|| TargetError::InvalidHeight(height_cm.to_string()))?;

        let height_m = height_cm / 100.0;
        let standard_weight = height_m * height_m * standard_bmi(sex);

        Ok(Targets {
            standard_weight,
            standard_fat: standard_weight * ideal_fat_rate(sex),
            standard_lean: standard_weight * ideal_lean_rate(sex),
        })
    }

    /// Share of standard weight that is fat, for the composition chart.
    pub fn fat_share(&self) -> f64 {
        if self.standard_weight == 0.0 {
            0.0
        } else {
            self.standard_fat / self.standard_weight
        }
    }
}

/// Two-decimal display used everywhere targets are shown.
pub fn format_kg(value: f64) -> String {
    format!("{:.2} kg", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round2(v: f64) -> f64 {
        (v * 100.0).round() / 100.0
    }

    #[test]
    fn male_170cm_matches_reference_values() {
        let targets = Targets::calculate("170", Sex::Male).unwrap();
        assert!((round2(targets.standard_weight) - 63.58).abs() < 0.01);
        assert!((round2(targets.standard_fat) - 9.537).abs() < 0.01);
        assert!((round2(targets.standard_lean) - 54.043).abs() < 0.01);
        assert_eq!(format_kg(targets.standard_weight), "63.58 kg");
    }

    #[test]
    fn composition_ratios_hold_for_every_sex() {
        for height in ["120", "155.5", "170", "201"] {
            for (sex, fat, lean) in [
                (Sex::Male, 0.15, 0.85),
                (Sex::Female, 0.23, 0.77),
                (Sex::Other, 0.23, 0.77),
            ] {
                let t = Targets::calculate(height, sex).unwrap();
                assert!((t.standard_fat / t.standard_weight - fat).abs() < 1e-9);
                assert!((t.standard_lean / t.standard_weight - lean).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn female_uses_bmi_21() {
        let t = Targets::calculate("160", Sex::Female).unwrap();
        assert!((t.standard_weight - 1.6 * 1.6 * 21.0).abs() < 1e-9);
    }

    #[test]
    fn negative_height_is_still_calculated() {
        let t = Targets::calculate("-170", Sex::Male).unwrap();
        assert!((round2(t.standard_weight) - 63.58).abs() < 0.01);
    }

    #[test]
    fn non_numeric_height_is_rejected() {
        assert_eq!(
            Targets::calculate("tall", Sex::Male),
            Err(TargetError::InvalidHeight("tall".to_string()))
        );
        assert!(Targets::calculate("NaN", Sex::Female).is_err());
        assert!(Targets::calculate("inf", Sex::Female).is_err());
        assert!(Targets::calculate("", Sex::Female).is_err());
    }

    #[test]
    fn zero_height_has_zero_fat_share() {
        let t = Targets::calculate("0", Sex::Male).unwrap();
        assert_eq!(t.fat_share(), 0.0);
    }
}
