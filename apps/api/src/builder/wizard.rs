use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const STEP_TITLES: [&str; 6] = [
    "Informations",
    "Expérience",
    "Formation",
    "Compétences",
    "Langues",
    "Aperçu",
];

pub const STEP_COUNT: u8 = STEP_TITLES.len() as u8;

/// 1-based pointer into the wizard; always within `1..=STEP_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub struct WizardStep(u8);

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.0
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::FIRST
    }
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep(1);
    pub const LAST: WizardStep = WizardStep(STEP_COUNT);

    pub fn new(ordinal: i64) -> Result<Self, AppError> {
        if (1..=i64::from(STEP_COUNT)).contains(&ordinal) {
            Ok(WizardStep(ordinal as u8))
        } else {
            Err(AppError::Validation(format!(
                "Step must be between 1 and {STEP_COUNT}, got {ordinal}"
            )))
        }
    }

    pub fn ordinal(self) -> u8 {
        self.0
    }

    pub fn title(self) -> &'static str {
        STEP_TITLES[(self.0 - 1) as usize]
    }

    /// Saturates at the last step.
    pub fn next(self) -> Self {
        WizardStep(self.0.saturating_add(1).min(STEP_COUNT))
    }

    /// Saturates at the first step.
    pub fn prev(self) -> Self {
        WizardStep(self.0.saturating_sub(1).max(1))
    }

    pub fn is_last(self) -> bool {
        self == WizardStep::LAST
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Active,
    Upcoming,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepInfo {
    pub step: u8,
    pub title: &'static str,
    pub status: StepStatus,
}

/// Progress bar entries relative to `current`.
pub fn step_overview(current: WizardStep) -> Vec<StepInfo> {
    (1..=STEP_COUNT)
        .map(|ordinal| StepInfo {
            step: ordinal,
            title: STEP_TITLES[(ordinal - 1) as usize],
            status: match ordinal.cmp(&current.ordinal()) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::Active,
                std::cmp::Ordering::Greater => StepStatus::Upcoming,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_saturates_at_last() {
        assert_eq!(WizardStep::LAST.next(), WizardStep::LAST);
        assert_eq!(WizardStep::FIRST.next().ordinal(), 2);
    }

    #[test]
    fn test_prev_saturates_at_first() {
        assert_eq!(WizardStep::FIRST.prev(), WizardStep::FIRST);
        assert_eq!(WizardStep::LAST.prev().ordinal(), 5);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(WizardStep::new(0).is_err());
        assert!(WizardStep::new(7).is_err());
        assert!(WizardStep::new(-1).is_err());
        assert!(WizardStep::new(300).is_err());
        assert_eq!(WizardStep::new(6).unwrap(), WizardStep::LAST);
    }

    #[test]
    fn test_titles() {
        assert_eq!(WizardStep::FIRST.title(), "Informations");
        assert_eq!(WizardStep::LAST.title(), "Aperçu");
    }

    #[test]
    fn test_overview_statuses() {
        let overview = step_overview(WizardStep::new(3).unwrap());
        let statuses: Vec<StepStatus> = overview.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![
                StepStatus::Completed,
                StepStatus::Completed,
                StepStatus::Active,
                StepStatus::Upcoming,
                StepStatus::Upcoming,
                StepStatus::Upcoming,
            ]
        );
    }
}
