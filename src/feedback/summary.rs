//! Session Summary
//!
//! Condenses a report into verdict counts and per-rep form issues. Metric
//! shortfalls stay in normalized units inside the core and are converted to
//! inches only here.

use crate::validation::{BenchPressValidation, RepValidation, SquatValidation, ValidationStatus};
use crate::workflow::{Exercise, ExerciseReport, RepReport};
use serde::Serialize;
use std::fmt::Write;

/// Normalized-unit to inch conversion used for display
pub const DEFAULT_INCHES_PER_UNIT: f64 = 39.37;

/// What went wrong in a rep
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// Hips stayed above the knees
    SquatDepth,
    /// Knees narrower than the shoulders allow
    KneeWidth,
    /// Bar stopped short of the chest
    BarDepth { depth_percentage: f64 },
    /// No usable pose at the lowest point, so form was never measured
    Unscorable,
}

/// A failed criterion for one rep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormIssue {
    pub rep_number: usize,
    #[serde(flatten)]
    pub kind: IssueKind,
    /// Shortfall in inches, absent for unscorable reps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missed_by_inches: Option<f64>,
}

impl FormIssue {
    fn unscorable(rep_number: usize) -> Self {
        Self {
            rep_number,
            kind: IssueKind::Unscorable,
            missed_by_inches: None,
        }
    }

    pub fn describe(&self) -> String {
        match (self.kind, self.missed_by_inches) {
            (IssueKind::SquatDepth, Some(inches)) => {
                format!("Rep {}: {:.1} inches too high", self.rep_number, inches)
            }
            (IssueKind::KneeWidth, Some(inches)) => {
                format!("Rep {}: knees {:.1} inches too narrow", self.rep_number, inches)
            }
            (IssueKind::BarDepth { depth_percentage }, Some(inches)) => format!(
                "Rep {}: bar stopped {:.1} inches too high (only {:.1}% depth)",
                self.rep_number, inches, depth_percentage
            ),
            _ => format!(
                "Rep {}: pose not fully visible at the lowest point, form not checked",
                self.rep_number
            ),
        }
    }
}

/// Validation records that can list their failed criteria
pub trait FormIssues {
    fn form_issues(&self, rep_number: usize, inches_per_unit: f64) -> Vec<FormIssue>;
}

impl FormIssues for SquatValidation {
    fn form_issues(&self, rep_number: usize, inches_per_unit: f64) -> Vec<FormIssue> {
        let (Some(depth_missed_by), Some(width_missed_by)) = (self.depth_missed_by, self.width_missed_by)
        else {
            return vec![FormIssue::unscorable(rep_number)];
        };
        let mut issues = Vec::new();
        if !self.depth_valid {
            issues.push(FormIssue {
                rep_number,
                kind: IssueKind::SquatDepth,
                missed_by_inches: Some(depth_missed_by * inches_per_unit),
            });
        }
        if !self.knee_width_valid {
            issues.push(FormIssue {
                rep_number,
                kind: IssueKind::KneeWidth,
                missed_by_inches: Some(width_missed_by * inches_per_unit),
            });
        }
        issues
    }
}

impl FormIssues for BenchPressValidation {
    fn form_issues(&self, rep_number: usize, inches_per_unit: f64) -> Vec<FormIssue> {
        if self.depth_valid {
            return Vec::new();
        }
        let (Some(depth_missed_by), Some(depth_percentage)) = (self.depth_missed_by, self.depth_percentage)
        else {
            return vec![FormIssue::unscorable(rep_number)];
        };
        vec![FormIssue {
            rep_number,
            kind: IssueKind::BarDepth { depth_percentage },
            missed_by_inches: Some(depth_missed_by * inches_per_unit),
        }]
    }
}

/// Verdict counts and issues for one analyzed session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub exercise: Exercise,
    pub rep_count: usize,
    pub valid: usize,
    pub partially_valid: usize,
    pub invalid: usize,
    pub issues: Vec<FormIssue>,
}

impl SessionSummary {
    /// Summarize a typed report
    pub fn from_report<V>(exercise: Exercise, report: &RepReport<V>, inches_per_unit: f64) -> Self
    where
        V: RepValidation + FormIssues,
    {
        let issues = report
            .reps
            .iter()
            .flat_map(|r| r.validation.form_issues(r.segment.rep_number, inches_per_unit))
            .collect();

        Self {
            exercise,
            rep_count: report.rep_count,
            valid: report.count_with_status(ValidationStatus::Valid),
            partially_valid: report.count_with_status(ValidationStatus::PartiallyValid),
            invalid: report.count_with_status(ValidationStatus::Invalid),
            issues,
        }
    }

    /// Summarize whichever exercise the report holds
    pub fn from_exercise_report(report: &ExerciseReport, inches_per_unit: f64) -> Self {
        match report {
            ExerciseReport::Squat(r) => Self::from_report(Exercise::Squat, r, inches_per_unit),
            ExerciseReport::BenchPress(r) => Self::from_report(Exercise::BenchPress, r, inches_per_unit),
        }
    }

    /// Reps that were not fully valid
    pub fn needs_work(&self) -> usize {
        self.partially_valid + self.invalid
    }

    /// Reps that missed depth
    pub fn depth_issue_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i.kind, IssueKind::SquatDepth | IssueKind::BarDepth { .. }))
            .count()
    }

    /// Reps with knees too narrow
    pub fn knee_width_issue_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.kind == IssueKind::KneeWidth)
            .count()
    }

    /// Reps whose form could not be measured
    pub fn unscorable_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.kind == IssueKind::Unscorable)
            .count()
    }

    /// Plain-text rendering for terminal output
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(512);
        // Writing to a String is infallible
        self.write_text(&mut out).expect("write to String");
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "Exercise: {}", self.exercise.name())?;
        writeln!(out, "Total reps: {}", self.rep_count)?;
        writeln!(out, "  Valid: {}", self.valid)?;
        writeln!(out, "  Partially valid: {}", self.partially_valid)?;
        writeln!(out, "  Invalid: {}", self.invalid)?;

        if self.issues.is_empty() {
            writeln!(out, "No form issues found.")?;
        } else {
            writeln!(out, "Issues:")?;
            for issue in &self.issues {
                writeln!(out, "  - {}", issue.describe())?;
            }
        }
        Ok(())
    }
}
