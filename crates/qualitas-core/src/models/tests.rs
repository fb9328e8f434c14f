use jiff::Timestamp;
use serde_json::json;

use crate::{
    dates::CalendarDate,
    error::TrackerError,
    models::{
        ActionFilter, ActionStatus, ImprovementAction, Reminder, ScanSummary, Stage, StepName,
        StepStatus, WorkflowPlan, WorkflowStep,
    },
    params::{ListActions, PlanWorkflow},
};

fn create_test_action(status: ActionStatus) -> ImprovementAction {
    ImprovementAction {
        id: 21,
        title: "Operator trained on outdated procedure".to_string(),
        description: None,
        action_type: "Reclamació de Client".to_string(),
        category: "Formació".to_string(),
        responsible_group_id: "rrhh@example.com".to_string(),
        creation_date: "14/02/2025".to_string(),
        status,
        analysis: None,
        verification: None,
        closure: None,
        created_at: Timestamp::from_second(1_739_491_200).unwrap(),
        updated_at: Timestamp::from_second(1_739_491_200).unwrap(),
    }
}

#[test]
fn test_action_status_parses_labels_and_slugs() {
    for status in ActionStatus::ALL {
        assert_eq!(status.as_str().parse::<ActionStatus>(), Ok(status));
        assert_eq!(status.slug().parse::<ActionStatus>(), Ok(status));
    }
    assert_eq!(
        " PENDIENTE-CIERRE ".parse::<ActionStatus>(),
        Ok(ActionStatus::PendienteCierre)
    );
    assert!("Cerrada".parse::<ActionStatus>().is_err());
}

#[test]
fn test_action_status_progression() {
    let mut status = ActionStatus::default();
    let mut visited = vec![status];
    while let Some(next) = status.next() {
        assert!(next > status);
        status = next;
        visited.push(status);
    }
    assert_eq!(visited, ActionStatus::ALL.to_vec());
    assert!(!ActionStatus::Finalizada.is_open());
    assert!(ActionStatus::PendienteCierre.is_open());
}

#[test]
fn test_stage_required_status_precedes_its_result() {
    assert_eq!(
        Stage::Analysis.required_status().next(),
        Some(ActionStatus::PendienteComprobacion)
    );
    assert_eq!(
        Stage::Closure.required_status().next(),
        Some(ActionStatus::Finalizada)
    );
}

#[test]
fn test_step_status_with_icon() {
    assert_eq!(StepStatus::Completado.with_icon(), "✓ Completado");
    assert_eq!(StepStatus::EnCurso.with_icon(), "➤ En Curso");
    assert_eq!(StepStatus::Pendiente.with_icon(), "○ Pendiente");
    assert_eq!("en curso".parse::<StepStatus>(), Ok(StepStatus::EnCurso));
}

#[test]
fn test_step_name_round_trips_through_display() {
    for name in StepName::ALL {
        assert_eq!(name.to_string().parse::<StepName>(), Ok(name));
    }
}

#[test]
fn test_workflow_plan_json_shape() {
    let plan = WorkflowPlan {
        workflow_id: "21-1739491200000".to_string(),
        action_id: 21,
        generated_at: Timestamp::from_second(1_739_491_200).unwrap(),
        steps: vec![WorkflowStep {
            step_name: StepName::RegulatoryImpactAnalysis,
            responsible_party: "direccio.qualitat@example.com".to_string(),
            due_date: "21/02/2025".parse::<CalendarDate>().unwrap(),
            status: StepStatus::Pendiente,
        }],
    };

    let value = serde_json::to_value(&plan).unwrap();
    assert_eq!(value["workflowId"], "21-1739491200000");
    assert_eq!(value["actionId"], 21);
    assert_eq!(
        value["steps"][0],
        json!({
            "stepName": "Análisis de Impacto Regulatorio",
            "responsibleParty": "direccio.qualitat@example.com",
            "dueDate": "21/02/2025",
            "status": "Pendiente",
        })
    );

    let back: WorkflowPlan = serde_json::from_value(value).unwrap();
    assert_eq!(back, plan);
}

#[test]
fn test_scan_summary_json_shape() {
    let summary = ScanSummary {
        checked_actions: 1,
        sent_emails: vec![Reminder {
            recipient: "rrhh@example.com".to_string(),
            action_id: 21,
            step_name: StepName::CauseAnalysis,
            due_date: "31/03/2025".parse().unwrap(),
            overdue: false,
        }],
        errors: vec![],
        dry_run: false,
    };

    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["checkedActions"], 1);
    assert_eq!(value["sentEmails"][0]["recipient"], "rrhh@example.com");
    assert_eq!(value["sentEmails"][0]["stepName"], "Análisis de Causas");
    assert_eq!(value["errors"], json!([]));
    assert!(summary.is_clean());
}

#[test]
fn test_step_status_defaults_when_missing_from_json() {
    let step: WorkflowStep = serde_json::from_value(json!({
        "stepName": "Plan de Acción",
        "responsibleParty": "rrhh@example.com",
        "dueDate": "31/03/2025",
    }))
    .unwrap();
    assert_eq!(step.status, StepStatus::Pendiente);
}

#[test]
fn test_plan_request_from_action() {
    let action = create_test_action(ActionStatus::PendienteAnalisis);
    let request = PlanWorkflow::from(&action);

    assert_eq!(request.action_id, 21);
    assert_eq!(request.action_type, "Reclamació de Client");
    assert_eq!(request.responsible_group_id, "rrhh@example.com");
    assert_eq!(request.creation_date, "14/02/2025");
}

#[test]
fn test_action_filter_from_list_params() {
    let filter = ActionFilter::try_from(&ListActions::default()).unwrap();
    assert!(filter.open_only);
    assert_eq!(filter.status, None);

    let filter = ActionFilter::try_from(&ListActions {
        status: Some("Finalizada".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(filter.status, Some(ActionStatus::Finalizada));
    assert!(!filter.open_only);

    let filter = ActionFilter::try_from(&ListActions {
        include_closed: true,
        category: Some("Formació".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert!(!filter.open_only);
    assert_eq!(filter.category.as_deref(), Some("Formació"));

    let err = ActionFilter::try_from(&ListActions {
        status: Some("closed".to_string()),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, TrackerError::Validation { ref field, .. } if field == "status"));
}
