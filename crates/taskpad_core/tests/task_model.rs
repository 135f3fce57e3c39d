use taskpad_core::{Task, TaskValidationError};
use uuid::Uuid;

#[test]
fn new_task_generates_a_stable_id() {
    let task = Task::new("buy milk", 1_700_000_000_000).unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.text, "buy milk");
    assert_eq!(task.created_at, 1_700_000_000_000);
}

#[test]
fn empty_and_whitespace_text_are_rejected() {
    assert_eq!(
        Task::new("", 1).unwrap_err(),
        TaskValidationError::EmptyText
    );
    assert_eq!(
        Task::new("   ", 1).unwrap_err(),
        TaskValidationError::EmptyText
    );
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Task::with_id(Uuid::nil(), "valid text", 1).unwrap_err();
    assert_eq!(err, TaskValidationError::NilId);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let task = Task::with_id(task_id, "ship the release", 1_700_000_000_000).unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task_id.to_string());
    assert_eq!(json["text"], "ship the release");
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}
