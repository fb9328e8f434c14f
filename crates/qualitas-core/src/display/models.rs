//! Display implementations for domain models.
//!
//! All output is markdown so the CLI renderer and MCP clients can show it
//! as-is.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    ActionStatus, ImprovementAction, Reminder, ScanSummary, StageRecord, StepName, StepStatus,
    WorkflowPlan, WorkflowStep,
};

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn fmt_stage(f: &mut fmt::Formatter<'_>, heading: &str, record: &StageRecord) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "## {heading}")?;
    writeln!(f)?;
    writeln!(f, "- Responsible: {}", record.responsible)?;
    writeln!(f, "- Recorded: {}", LocalDateTime(&record.recorded_at))?;
    if let Some(notes) = &record.notes {
        writeln!(f)?;
        writeln!(f, "{notes}")?;
    }
    Ok(())
}

impl fmt::Display for ImprovementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Type: {}", self.action_type)?;
        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- Responsible group: {}", self.responsible_group_id)?;
        writeln!(f, "- Creation date: {}", self.creation_date)?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if let Some(record) = &self.analysis {
            fmt_stage(f, "Analysis", record)?;
        }
        if let Some(record) = &self.verification {
            fmt_stage(f, "Verification", record)?;
        }
        if let Some(record) = &self.closure {
            fmt_stage(f, "Closure", record)?;
        }

        Ok(())
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "| {} | {} | {} | {} |",
            self.step_name,
            self.responsible_party,
            self.due_date,
            self.status.with_icon()
        )
    }
}

impl fmt::Display for WorkflowPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Workflow {}", self.workflow_id)?;
        writeln!(f)?;
        writeln!(f, "- Action: {}", self.action_id)?;
        writeln!(f, "- Generated: {}", LocalDateTime(&self.generated_at))?;
        writeln!(f)?;

        if self.steps.is_empty() {
            return writeln!(f, "No steps in this workflow.");
        }

        writeln!(f, "| Step | Responsible | Due | Status |")?;
        writeln!(f, "|---|---|---|---|")?;
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.overdue { " **(overdue)**" } else { "" };
        writeln!(
            f,
            "- Action {}: {} due {} → {}{marker}",
            self.action_id, self.step_name, self.due_date, self.recipient
        )
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            writeln!(f, "# Due-date scan (dry run)")?;
        } else {
            writeln!(f, "# Due-date scan")?;
        }
        writeln!(f)?;
        writeln!(f, "- Checked actions: {}", self.checked_actions)?;
        let label = if self.dry_run {
            "Reminders that would be sent"
        } else {
            "Reminders sent"
        };
        writeln!(f, "- {label}: {}", self.sent_emails.len())?;
        writeln!(f, "- Errors: {}", self.errors.len())?;

        if !self.sent_emails.is_empty() {
            writeln!(f, "\n## Reminders")?;
            writeln!(f)?;
            for reminder in &self.sent_emails {
                write!(f, "{reminder}")?;
            }
        }

        if !self.errors.is_empty() {
            writeln!(f, "\n## Errors")?;
            writeln!(f)?;
            for error in &self.errors {
                writeln!(f, "- {error}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::dates::CalendarDate;

    fn reminder(overdue: bool) -> Reminder {
        Reminder {
            recipient: "qualitat@example.com".to_string(),
            action_id: 3,
            step_name: StepName::CauseAnalysis,
            due_date: "31/01/2025".parse::<CalendarDate>().unwrap(),
            overdue,
        }
    }

    #[test]
    fn test_reminder_marks_overdue() {
        let output = reminder(true).to_string();
        assert!(output.contains("Action 3: Análisis de Causas due 31/01/2025"));
        assert!(output.contains("(overdue)"));
        assert!(!reminder(false).to_string().contains("overdue"));
    }

    #[test]
    fn test_scan_summary_sections() {
        let summary = ScanSummary {
            checked_actions: 2,
            sent_emails: vec![reminder(false)],
            errors: vec!["action 9: invalid creation_date".to_string()],
            dry_run: true,
        };
        let output = summary.to_string();

        assert!(output.starts_with("# Due-date scan (dry run)"));
        assert!(output.contains("- Checked actions: 2"));
        assert!(output.contains("Reminders that would be sent: 1"));
        assert!(output.contains("## Errors"));
        assert!(output.contains("- action 9: invalid creation_date"));
    }

    #[test]
    fn test_clean_summary_has_no_error_section() {
        let output = ScanSummary::default().to_string();
        assert!(output.contains("- Reminders sent: 0"));
        assert!(!output.contains("## Errors"));
        assert!(!output.contains("## Reminders"));
    }

    #[test]
    fn test_workflow_plan_renders_table() {
        let plan = WorkflowPlan {
            workflow_id: "1-1700000000000".to_string(),
            action_id: 1,
            generated_at: Timestamp::from_second(1_700_000_000).unwrap(),
            steps: vec![WorkflowStep {
                step_name: StepName::ActionClosure,
                responsible_party: "produccio@example.com".to_string(),
                due_date: "01/04/2025".parse().unwrap(),
                status: StepStatus::Pendiente,
            }],
        };
        let output = plan.to_string();

        assert!(output.contains("# Workflow 1-1700000000000"));
        assert!(output.contains("| Step | Responsible | Due | Status |"));
        assert!(output.contains("| Cierre de la Acción | produccio@example.com | 01/04/2025 | ○ Pendiente |"));
    }

    #[test]
    fn test_action_shows_recorded_stages() {
        let now = Timestamp::from_second(1_700_000_000).unwrap();
        let action = ImprovementAction {
            id: 4,
            title: "Expired fire extinguisher".to_string(),
            description: None,
            action_type: "Millora Interna".to_string(),
            category: "Seguretat i Salut Laboral".to_string(),
            responsible_group_id: "manteniment@example.com".to_string(),
            creation_date: "05/02/2025".to_string(),
            status: ActionStatus::PendienteComprobacion,
            analysis: Some(StageRecord {
                responsible: "tecnic@example.com".to_string(),
                notes: Some("Inspection schedule missed".to_string()),
                recorded_at: now,
            }),
            verification: None,
            closure: None,
            created_at: now,
            updated_at: now,
        };
        let output = action.to_string();

        assert!(output.starts_with("# 4. Expired fire extinguisher"));
        assert!(output.contains("- Status: Pendiente Comprobación"));
        assert!(output.contains("## Analysis"));
        assert!(output.contains("Inspection schedule missed"));
        assert!(!output.contains("## Verification"));
    }
}
