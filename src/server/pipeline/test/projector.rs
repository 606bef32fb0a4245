use serde_json::Value;

use super::{message, user};
use crate::server::pipeline::projector::{project, project_all};

/// Tests that sensitive fields never reach the public view.
///
/// Expected: password and tokens removed, other fields kept
#[test]
fn strips_sensitive_fields() {
    let view = project(&user()).unwrap();

    assert!(!view.contains("password"));
    assert!(!view.contains("tokens"));
    assert_eq!(view.get("username"), Some(&Value::from("ada")));
}

/// Tests that stripping an already projected view changes nothing.
///
/// Expected: identical views
#[test]
fn projection_is_idempotent() {
    let view = project(&user()).unwrap();

    assert_eq!(view.clone().strip(&["password", "tokens"]), view);
}

/// Tests that records without sensitive fields are projected whole.
///
/// Expected: every serialized field present, order of the list kept
#[test]
fn projects_lists_in_order() {
    let mut second = message();
    second.id = 4;

    let views = project_all(&[message(), second]).unwrap();

    assert_eq!(views.len(), 2);
    assert_eq!(views[0].get("id"), Some(&Value::from(3)));
    assert_eq!(views[1].get("id"), Some(&Value::from(4)));
    assert!(views[0].contains("email"));
}
