//! Coaching prompt assembly
//!
//! Builds the text handed to the external language-model collaborator that
//! writes the user-facing coaching feedback. No network access happens here.

use super::summary::SessionSummary;
use crate::workflow::Exercise;
use serde::Serialize;
use std::fmt::Write;

/// System and user prompt for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachPrompt {
    pub system: String,
    pub user: String,
}

impl CoachPrompt {
    /// Build the prompt from a session summary
    pub fn for_summary(summary: &SessionSummary) -> Self {
        Self {
            system: system_prompt(summary.exercise),
            user: user_prompt(summary),
        }
    }

    /// Single prompt string (system, blank line, user)
    pub fn combined(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }
}

fn exercise_title(exercise: Exercise) -> &'static str {
    match exercise {
        Exercise::Squat => "Squat",
        Exercise::BenchPress => "Bench Press",
    }
}

fn system_prompt(exercise: Exercise) -> String {
    format!(
        "You are a professional strength coach analyzing {} form. Provide friendly, actionable feedback in 3-4 sentences.\n\
         Focus on: 1) Overall form quality, 2) Main issues to fix, 3) Specific tips for improvement.\n\
         Be encouraging but honest. Use simple language, not technical jargon.",
        exercise.name()
    )
}

fn main_issues(summary: &SessionSummary) -> Vec<String> {
    let mut issues = Vec::new();

    let depth = summary.depth_issue_count();
    if depth > 0 {
        let criterion = match summary.exercise {
            Exercise::Squat => "hips below knees",
            Exercise::BenchPress => "bar should touch chest or close",
        };
        issues.push(format!(
            "Depth Problems: {} reps didn't reach proper depth ({})",
            depth, criterion
        ));
    }

    let knees = summary.knee_width_issue_count();
    if knees > 0 {
        issues.push(format!(
            "Knee Tracking: {} reps had knees too narrow (should be shoulder-width)",
            knees
        ));
    }

    let unscorable = summary.unscorable_count();
    if unscorable > 0 {
        issues.push(format!(
            "Not Checked: {} reps had the body out of view at the bottom, so form couldn't be judged",
            unscorable
        ));
    }

    issues
}

fn user_prompt(summary: &SessionSummary) -> String {
    let title = exercise_title(summary.exercise);
    let mut out = String::with_capacity(512);

    // Writing to a String is infallible, so these cannot fail
    writeln!(out, "{} Session Summary:", title).expect("write to String");
    writeln!(out, "- Total Reps: {}", summary.rep_count).expect("write to String");
    writeln!(out, "- Perfect Form: {} reps", summary.valid).expect("write to String");
    writeln!(out, "- Needs Work: {} reps", summary.needs_work()).expect("write to String");
    writeln!(out).expect("write to String");
    writeln!(out, "Main Issues:").expect("write to String");

    let issues = main_issues(summary);
    if issues.is_empty() {
        writeln!(out, "- None! All reps had good form.").expect("write to String");
    } else {
        for issue in &issues {
            writeln!(out, "- {}", issue).expect("write to String");
        }
    }

    writeln!(out).expect("write to String");
    write!(
        out,
        "Give encouraging feedback with specific tips to improve their {} form.",
        summary.exercise.name()
    )
    .expect("write to String");

    out
}
