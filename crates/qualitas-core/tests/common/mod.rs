#![allow(dead_code)]

use qualitas_core::{params::CreateAction, Tracker, TrackerBuilder};
use tempfile::TempDir;

/// Helper function to create a test tracker
pub async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

/// Creation parameters with a fixed creation date.
pub fn new_action(action_type: &str, category: &str, creation_date: &str) -> CreateAction {
    CreateAction {
        title: format!("{action_type} in {category}"),
        description: None,
        action_type: action_type.to_string(),
        category: category.to_string(),
        responsible_group_id: "qualitat@example.com".to_string(),
        creation_date: Some(creation_date.to_string()),
    }
}
