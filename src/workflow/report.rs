//! Repetition Report
//!
//! The externally visible output of an analysis. Each rep serializes flat:
//! segment boundaries and validation fields side by side.

use crate::analysis::RepSegment;
use crate::validation::{BenchPressValidation, RepValidation, SquatValidation, ValidationStatus};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::counter::Exercise;

/// One completed repetition and its form verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepRecord<V> {
    #[serde(flatten)]
    pub segment: RepSegment,
    #[serde(flatten)]
    pub validation: V,
}

/// Rep count and per-rep records for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepReport<V> {
    pub rep_count: usize,
    pub reps: Vec<RepRecord<V>>,
}

impl<V> RepReport<V> {
    /// Report with no reps
    pub fn empty() -> Self {
        Self {
            rep_count: 0,
            reps: Vec::new(),
        }
    }

    /// Build a report; `rep_count` always equals the number of records
    pub fn from_records(reps: Vec<RepRecord<V>>) -> Self {
        Self {
            rep_count: reps.len(),
            reps,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reps.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &RepSegment> {
        self.reps.iter().map(|r| &r.segment)
    }
}

impl<V: RepValidation> RepReport<V> {
    /// Number of reps with the given verdict
    pub fn count_with_status(&self, status: ValidationStatus) -> usize {
        self.reps
            .iter()
            .filter(|r| r.validation.status() == status)
            .count()
    }
}

impl<V: Serialize> RepReport<V> {
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save report as pretty JSON
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

impl<V: serde::de::DeserializeOwned> RepReport<V> {
    /// Load a report from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let report: Self = serde_json::from_str(&content)?;
        if report.rep_count != report.reps.len() {
            tracing::warn!(
                rep_count = report.rep_count,
                records = report.reps.len(),
                "Report rep_count does not match its records"
            );
        }
        Ok(report)
    }
}

/// Report for whichever exercise was analyzed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExerciseReport {
    Squat(RepReport<SquatValidation>),
    BenchPress(RepReport<BenchPressValidation>),
}

impl ExerciseReport {
    pub fn exercise(&self) -> Exercise {
        match self {
            ExerciseReport::Squat(_) => Exercise::Squat,
            ExerciseReport::BenchPress(_) => Exercise::BenchPress,
        }
    }

    pub fn rep_count(&self) -> usize {
        match self {
            ExerciseReport::Squat(r) => r.rep_count,
            ExerciseReport::BenchPress(r) => r.rep_count,
        }
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a report file whose exercise is known
    pub fn load(exercise: Exercise, path: &Path) -> crate::Result<Self> {
        Ok(match exercise {
            Exercise::Squat => ExerciseReport::Squat(RepReport::load(path)?),
            Exercise::BenchPress => ExerciseReport::BenchPress(RepReport::load(path)?),
        })
    }
}
