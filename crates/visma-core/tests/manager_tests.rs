//! Manager behavior against a spy transport: whitelist gating, CRUD
//! translation and the error taxonomy.

mod common;

use common::{Project, SpyTransport, page, project_json};
use serde_json::json;
use uuid::Uuid;
use visma_core::{ClientError, Error, Manager, Operator};

#[tokio::test]
async fn test_disallowed_operation_never_reaches_the_transport() {
	let spy = SpyTransport::new();
	let manager: Manager<Project> = Manager::with_transport(spy.clone());

	// Delete is not in Project's allowed set.
	let result = manager.delete(&Uuid::new_v4()).await;
	assert!(matches!(
		result,
		Err(Error::Client(ClientError::MethodNotAllowed { .. }))
	));
	assert_eq!(spy.call_count(), 0);
}

#[tokio::test]
async fn test_get_decodes_one_instance() {
	let spy = SpyTransport::new();
	let id = Uuid::new_v4();
	spy.push_response(project_json(id, "Greenhouse"));

	let manager: Manager<Project> = Manager::with_transport(spy.clone());
	let project = manager.get(&id).await.unwrap();

	assert_eq!(project.id, Some(id));
	assert_eq!(project.name, "Greenhouse");

	let calls = spy.calls();
	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].method, "GET");
	assert_eq!(calls[0].path, format!("/projects/{id}"));
}

#[tokio::test]
async fn test_create_strips_read_only_fields_from_the_body() {
	let spy = SpyTransport::new();
	let assigned = Uuid::new_v4();
	spy.push_response(project_json(assigned, "Greenhouse"));

	let manager: Manager<Project> = Manager::with_transport(spy.clone());
	let mut unsaved = Project::named("Greenhouse");
	// Even a locally poked id must not be sent: the field is read-only.
	unsaved.id = Some(Uuid::new_v4());

	let created = manager.create(&unsaved).await.unwrap();
	assert_eq!(created.id, Some(assigned));

	let calls = spy.calls();
	assert_eq!(calls[0].method, "POST");
	assert_eq!(calls[0].path, "/projects");
	let body = calls[0].body.as_ref().unwrap();
	assert!(body.get("Id").is_none());
	assert_eq!(body.get("Name"), Some(&json!("Greenhouse")));
}

#[tokio::test]
async fn test_create_checks_constraints_before_any_io() {
	let spy = SpyTransport::new();
	let manager: Manager<Project> = Manager::with_transport(spy.clone());

	let oversized = Project::named(&"x".repeat(80));
	let result = manager.create(&oversized).await;

	assert!(matches!(
		result,
		Err(Error::Client(ClientError::Validation { .. }))
	));
	assert_eq!(spy.call_count(), 0);
}

#[tokio::test]
async fn test_update_requires_an_id() {
	let spy = SpyTransport::new();
	let manager: Manager<Project> = Manager::with_transport(spy.clone());

	let unsaved = Project::named("Greenhouse");
	let result = manager.update(&unsaved).await;

	assert!(matches!(
		result,
		Err(Error::Client(ClientError::MissingField { .. }))
	));
	assert_eq!(spy.call_count(), 0);
}

#[tokio::test]
async fn test_update_puts_to_the_id_path() {
	let spy = SpyTransport::new();
	let id = Uuid::new_v4();
	spy.push_response(project_json(id, "Renamed"));

	let manager: Manager<Project> = Manager::with_transport(spy.clone());
	let mut project = Project::named("Greenhouse");
	project.id = Some(id);

	let updated = manager.update(&project).await.unwrap();
	assert_eq!(updated.name, "Renamed");

	let calls = spy.calls();
	assert_eq!(calls[0].method, "PUT");
	assert_eq!(calls[0].path, format!("/projects/{id}"));
}

#[tokio::test]
async fn test_transport_failure_surfaces_unchanged() {
	let spy = SpyTransport::new();
	let manager: Manager<Project> = Manager::with_transport(spy.clone());

	// The spy script is empty, so the transport-level failure surfaces.
	let result = manager.get(&Uuid::new_v4()).await;
	assert!(matches!(result, Err(Error::Transport(_))));
	assert_eq!(spy.call_count(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
	let spy = SpyTransport::new();
	spy.push_response(json!({ "Unexpected": true }));

	let manager: Manager<Project> = Manager::with_transport(spy.clone());
	let result = manager.get(&Uuid::new_v4()).await;
	assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn test_filter_shorthand_builds_a_constrained_set() {
	let spy = SpyTransport::new();
	spy.push_response(page(vec![], 1, 1, 0));

	let manager: Manager<Project> = Manager::with_transport(spy.clone());
	let since = chrono::NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
	let set = manager.filter_op("start_date", Operator::Gte, since).unwrap();
	assert!(!set.exists().await.unwrap());

	let calls = spy.calls();
	assert_eq!(calls[0].param("$filter"), Some("StartDate ge 2018-01-01"));
}
