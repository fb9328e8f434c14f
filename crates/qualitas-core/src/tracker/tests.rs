//! Tests for the tracker module.

use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use super::*;
use crate::{
    dates::CalendarDate,
    models::{ActionStatus, Reminder, StepName},
    params::{CreateAction, DeleteAction, Id, ListActions, PlanWorkflow, RecordStage, ScanDueDates},
    scanner::Notifier,
    workflow::SAFETY_CATEGORY,
};

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Reminder>>,
}

impl Notifier for RecordingNotifier {
    fn send(&self, reminder: &Reminder) -> Result<()> {
        self.sent.lock().unwrap().push(reminder.clone());
        Ok(())
    }
}

/// Helper function to create a test tracker
async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

fn new_action(action_type: &str, category: &str) -> CreateAction {
    CreateAction {
        title: "Missing lockout tag on press 4".to_string(),
        description: Some("Found during the monthly walk-through".to_string()),
        action_type: action_type.to_string(),
        category: category.to_string(),
        responsible_group_id: "manteniment@example.com".to_string(),
        creation_date: Some("01/01/2025".to_string()),
    }
}

fn stage(id: u64, responsible: &str) -> RecordStage {
    RecordStage {
        id,
        responsible: responsible.to_string(),
        notes: Some("Done".to_string()),
    }
}

#[tokio::test]
async fn test_create_action_starts_as_draft() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let action = tracker
        .create_action(&new_action("No Conformitat", SAFETY_CATEGORY))
        .await
        .expect("Failed to create action");

    assert_eq!(action.id, 1);
    assert_eq!(action.status, ActionStatus::Borrador);
    assert_eq!(action.creation_date, "01/01/2025");

    let loaded = tracker
        .get_action(&Id { id: action.id })
        .await
        .expect("Failed to get action")
        .expect("Action should exist");
    assert_eq!(loaded.title, action.title);
    assert_eq!(loaded.description, action.description);
}

#[tokio::test]
async fn test_create_action_validates_input() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let mut bad_date = new_action("No Conformitat", "Processos");
    bad_date.creation_date = Some("2025/01/01".to_string());
    let err = tracker.create_action(&bad_date).await.unwrap_err();
    assert!(matches!(err, TrackerError::Validation { ref field, .. } if field == "creation_date"));

    let mut short_year = new_action("No Conformitat", "Processos");
    short_year.creation_date = Some("01/03/24".to_string());
    let err = tracker.create_action(&short_year).await.unwrap_err();
    assert!(matches!(err, TrackerError::Validation { ref field, .. } if field == "creation_date"));

    let mut no_title = new_action("No Conformitat", "Processos");
    no_title.title = "  ".to_string();
    let err = tracker.create_action(&no_title).await.unwrap_err();
    assert!(matches!(err, TrackerError::Validation { ref field, .. } if field == "title"));

    let all = tracker
        .list_actions(&ListActions {
            include_closed: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_create_action_defaults_to_today() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let mut params = new_action("Millora Interna", "Processos");
    params.creation_date = None;
    let action = tracker.create_action(&params).await.unwrap();

    assert_eq!(action.creation_date, CalendarDate::today().to_string());
}

#[tokio::test]
async fn test_full_lifecycle_records_every_stage() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let action = tracker
        .create_action(&new_action("Auditoria Externa", "Processos"))
        .await
        .unwrap();
    let id = Id { id: action.id };

    let submitted = tracker.submit_action(&id).await.unwrap();
    assert_eq!(submitted.status, ActionStatus::PendienteAnalisis);

    let analysed = tracker
        .record_analysis(&stage(action.id, "analista@example.com"))
        .await
        .unwrap();
    assert_eq!(analysed.status, ActionStatus::PendienteComprobacion);
    assert_eq!(
        analysed.analysis.as_ref().map(|r| r.responsible.as_str()),
        Some("analista@example.com")
    );

    let verified = tracker
        .record_verification(&stage(action.id, "auditor@example.com"))
        .await
        .unwrap();
    assert_eq!(verified.status, ActionStatus::PendienteCierre);
    assert!(verified.verification.is_some());

    let closed = tracker
        .record_closure(&stage(action.id, "direccio@example.com"))
        .await
        .unwrap();
    assert_eq!(closed.status, ActionStatus::Finalizada);
    assert!(closed.analysis.is_some());
    assert!(closed.verification.is_some());
    assert_eq!(closed.closure.as_ref().unwrap().notes.as_deref(), Some("Done"));
}

#[tokio::test]
async fn test_transitions_cannot_skip_or_regress() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let action = tracker
        .create_action(&new_action("Millora Interna", "Processos"))
        .await
        .unwrap();

    // analysis before submission
    let err = tracker
        .record_analysis(&stage(action.id, "analista@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TrackerError::InvalidTransition {
            from: ActionStatus::Borrador,
            to: ActionStatus::PendienteComprobacion,
            ..
        }
    ));

    tracker.submit_action(&Id { id: action.id }).await.unwrap();

    // submitting twice would move backwards in the lifecycle
    let err = tracker.submit_action(&Id { id: action.id }).await.unwrap_err();
    assert!(matches!(err, TrackerError::InvalidTransition { .. }));

    let stored = tracker
        .get_action(&Id { id: action.id })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ActionStatus::PendienteAnalisis);
    assert!(stored.analysis.is_none());
}

#[tokio::test]
async fn test_lifecycle_on_missing_action() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let err = tracker.submit_action(&Id { id: 99 }).await.unwrap_err();
    assert!(matches!(err, TrackerError::ActionNotFound { id: 99 }));
}

#[tokio::test]
async fn test_list_actions_filters() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let first = tracker
        .create_action(&new_action("No Conformitat", "Processos"))
        .await
        .unwrap();
    tracker
        .create_action(&new_action("Millora Interna", SAFETY_CATEGORY))
        .await
        .unwrap();
    tracker.submit_action(&Id { id: first.id }).await.unwrap();

    let open = tracker.list_actions(&ListActions::default()).await.unwrap();
    assert_eq!(open.len(), 2);

    let pending = tracker
        .list_actions(&ListActions {
            status: Some("Pendiente Análisis".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, first.id);

    let safety = tracker
        .list_actions(&ListActions {
            category: Some(SAFETY_CATEGORY.to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(safety.len(), 1);
    assert_eq!(safety[0].action_type, "Millora Interna");

    let err = tracker
        .list_actions(&ListActions {
            status: Some("archived".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation { .. }));
}

#[tokio::test]
async fn test_finalized_actions_hidden_by_default() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let action = tracker
        .create_action(&new_action("Millora Interna", "Processos"))
        .await
        .unwrap();
    tracker.submit_action(&Id { id: action.id }).await.unwrap();
    tracker.record_analysis(&stage(action.id, "a")).await.unwrap();
    tracker.record_verification(&stage(action.id, "b")).await.unwrap();
    tracker.record_closure(&stage(action.id, "c")).await.unwrap();

    assert!(tracker
        .list_actions(&ListActions::default())
        .await
        .unwrap()
        .is_empty());
    let all = tracker
        .list_actions(&ListActions {
            include_closed: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_plan_workflow_persists_latest_plan() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let action = tracker
        .create_action(&new_action("No Conformitat", SAFETY_CATEGORY))
        .await
        .unwrap();
    let id = Id { id: action.id };

    let missing = tracker.show_workflow(&id).await.unwrap_err();
    assert!(matches!(missing, TrackerError::WorkflowNotFound { action_id: 1 }));

    let plan = tracker.plan_workflow(&id).await.unwrap();
    assert_eq!(plan.steps.len(), 6);
    assert!(plan.workflow_id.starts_with("1-"));

    let stored = tracker.show_workflow(&id).await.unwrap();
    assert_eq!(stored.workflow_id, plan.workflow_id);
    assert_eq!(stored.steps, plan.steps);
    assert_eq!(
        stored.step(StepName::SafetyCommitteeVerification).unwrap().due_date.to_string(),
        "16/05/2025"
    );
}

#[tokio::test]
async fn test_workflow_requests_for_unknown_action() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let err = tracker.plan_workflow(&Id { id: 5 }).await.unwrap_err();
    assert!(matches!(err, TrackerError::ActionNotFound { id: 5 }));
    let err = tracker.show_workflow(&Id { id: 5 }).await.unwrap_err();
    assert!(matches!(err, TrackerError::ActionNotFound { id: 5 }));
}

#[tokio::test]
async fn test_preview_workflow_does_not_store() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let plan = tracker
        .preview_workflow(&PlanWorkflow {
            action_id: 0,
            action_type: "Reclamació de Client".to_string(),
            category: "Atenció al Client".to_string(),
            responsible_group_id: "comercial@example.com".to_string(),
            creation_date: "15/06/2025".to_string(),
        })
        .unwrap();
    assert_eq!(plan.steps.len(), 5);
    assert!(tracker
        .list_actions(&ListActions::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let action = tracker
        .create_action(&new_action("Millora Interna", "Processos"))
        .await
        .unwrap();
    tracker.plan_workflow(&Id { id: action.id }).await.unwrap();

    let err = tracker
        .delete_action(&DeleteAction {
            id: action.id,
            confirmed: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation { .. }));

    let deleted = tracker
        .delete_action(&DeleteAction {
            id: action.id,
            confirmed: true,
        })
        .await
        .unwrap();
    assert_eq!(deleted.id, action.id);
    assert!(tracker.get_action(&Id { id: action.id }).await.unwrap().is_none());
}

#[tokio::test]
async fn test_scan_uses_configured_notifier() {
    let temp_dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("scan.db")))
        .with_notifier(notifier.clone())
        .build()
        .await
        .unwrap();

    let action = tracker
        .create_action(&new_action("Millora Interna", "Processos"))
        .await
        .unwrap();
    tracker.submit_action(&Id { id: action.id }).await.unwrap();

    let dry = tracker
        .scan_due_dates(&ScanDueDates {
            dry_run: true,
            as_of: Some("20/02/2025".to_string()),
            lead_days: None,
        })
        .await
        .unwrap();
    assert_eq!(dry.checked_actions, 1);
    assert_eq!(dry.sent_emails.len(), 2);
    assert!(notifier.sent.lock().unwrap().is_empty());

    let live = tracker
        .scan_due_dates(&ScanDueDates {
            dry_run: false,
            as_of: Some("20/02/2025".to_string()),
            lead_days: None,
        })
        .await
        .unwrap();
    assert_eq!(live.sent_emails, dry.sent_emails);
    assert_eq!(notifier.sent.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_scan_rejects_bad_as_of_date() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let err = tracker
        .scan_due_dates(&ScanDueDates {
            dry_run: true,
            as_of: Some("yesterday".to_string()),
            lead_days: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation { ref field, .. } if field == "as_of"));
}

#[tokio::test]
async fn test_scan_lead_days_override() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    tracker
        .create_action(&new_action("Millora Interna", "Processos"))
        .await
        .unwrap();

    // cause analysis is due 31/01/2025
    let scan = |lead_days| ScanDueDates {
        dry_run: true,
        as_of: Some("25/01/2025".to_string()),
        lead_days,
    };

    let without_lead = tracker.scan_due_dates(&scan(None)).await.unwrap();
    assert!(without_lead.sent_emails.is_empty());

    let with_lead = tracker.scan_due_dates(&scan(Some(7))).await.unwrap();
    assert_eq!(with_lead.sent_emails.len(), 1);
    assert_eq!(with_lead.sent_emails[0].step_name, StepName::CauseAnalysis);
    assert!(!with_lead.sent_emails[0].overdue);

    let err = tracker.scan_due_dates(&scan(Some(-3))).await.unwrap_err();
    assert!(matches!(err, TrackerError::Validation { ref field, .. } if field == "lead_days"));
}

#[tokio::test]
async fn test_negative_lead_days_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let result = TrackerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("lead.db")))
        .with_reminder_lead_days(-1)
        .build()
        .await;
    assert!(matches!(result, Err(TrackerError::Validation { .. })));
}
