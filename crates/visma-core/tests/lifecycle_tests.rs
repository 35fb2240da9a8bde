//! The active-record lifecycle through the process-wide transport.
//!
//! `save()` and `delete()` resolve their manager via the global
//! transport, so this binary installs one spy for its single test.

mod common;

use common::{Project, SpyTransport, project_json};
use serde_json::json;
use uuid::Uuid;
use visma_core::{ApiModel, init_transport};

#[tokio::test]
async fn test_save_creates_then_updates_through_the_global_transport() {
	let spy = SpyTransport::new();
	init_transport(spy.clone()).unwrap();

	// First save: no id yet, so the instance is created. The scripted
	// response echoes the payload plus the server-assigned id.
	let assigned = Uuid::new_v4();
	spy.push_response(project_json(assigned, "Greenhouse"));

	let mut project = Project::named("Greenhouse");
	project.save().await.unwrap();

	assert_eq!(project.id, Some(assigned));
	assert_eq!(project.name, "Greenhouse");
	{
		let calls = spy.calls();
		assert_eq!(calls.len(), 1);
		assert_eq!(calls[0].method, "POST");
		assert_eq!(calls[0].path, "/projects");
		assert!(calls[0].body.as_ref().unwrap().get("Id").is_none());
	}

	// Second save: the id is set, so the instance is replaced remotely.
	spy.push_response(json!({
		"Id": assigned,
		"Name": "Greenhouse II",
		"IsActive": true,
	}));
	project.name = "Greenhouse II".to_string();
	project.save().await.unwrap();

	assert_eq!(project.id, Some(assigned));
	assert_eq!(project.name, "Greenhouse II");
	{
		let calls = spy.calls();
		assert_eq!(calls.len(), 2);
		assert_eq!(calls[1].method, "PUT");
		assert_eq!(calls[1].path, format!("/projects/{assigned}"));
	}
}
