//! Shared test fixtures: a scripted spy transport and a test resource.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use visma_core::{
	ApiModel, ApiResponse, Error, FieldDescriptor, Model, ModelMeta, Operation, Result, Transport,
};

/// One request as the spy saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
	pub method: &'static str,
	pub path: String,
	pub params: Vec<(String, String)>,
	pub body: Option<Value>,
}

impl RecordedCall {
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}
}

/// A transport that records every call and answers from a script.
pub struct SpyTransport {
	calls: Mutex<Vec<RecordedCall>>,
	responses: Mutex<VecDeque<ApiResponse>>,
}

impl SpyTransport {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			calls: Mutex::new(Vec::new()),
			responses: Mutex::new(VecDeque::new()),
		})
	}

	pub fn push_response(&self, body: Value) {
		self.responses
			.lock()
			.unwrap()
			.push_back(ApiResponse::new(200, body));
	}

	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls.lock().unwrap().clone()
	}

	pub fn call_count(&self) -> usize {
		self.calls.lock().unwrap().len()
	}

	fn record(
		&self,
		method: &'static str,
		path: &str,
		params: &[(String, String)],
		body: Option<Value>,
	) -> Result<ApiResponse> {
		self.calls.lock().unwrap().push(RecordedCall {
			method,
			path: path.to_string(),
			params: params.to_vec(),
			body,
		});
		self.responses
			.lock()
			.unwrap()
			.pop_front()
			.ok_or_else(|| Error::Transport("no scripted response left".into()))
	}
}

#[async_trait]
impl Transport for SpyTransport {
	async fn get(&self, path: &str, params: &[(String, String)]) -> Result<ApiResponse> {
		self.record("GET", path, params, None)
	}

	async fn post(&self, path: &str, body: Value) -> Result<ApiResponse> {
		self.record("POST", path, &[], Some(body))
	}

	async fn put(&self, path: &str, body: Value) -> Result<ApiResponse> {
		self.record("PUT", path, &[], Some(body))
	}

	async fn delete(&self, path: &str) -> Result<ApiResponse> {
		self.record("DELETE", path, &[], None)
	}
}

/// A paginated test resource. Delete is deliberately not allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
	#[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Uuid>,
	#[serde(rename = "Name")]
	pub name: String,
	#[serde(rename = "Number", default, skip_serializing_if = "Option::is_none")]
	pub number: Option<String>,
	#[serde(rename = "StartDate", default, skip_serializing_if = "Option::is_none")]
	pub start_date: Option<NaiveDate>,
	#[serde(rename = "IsActive", default)]
	pub is_active: bool,
}

static PROJECT_META: Lazy<ModelMeta> = Lazy::new(|| {
	ModelMeta::builder("Project")
		.field(FieldDescriptor::uuid("id", "Id").read_only())
		.field(FieldDescriptor::string("name", "Name").required().max_length(50))
		.field(FieldDescriptor::string("number", "Number").nullable().max_length(9))
		.field(FieldDescriptor::date("start_date", "StartDate").nullable())
		.field(FieldDescriptor::boolean("is_active", "IsActive").default_value(true))
		.endpoint(
			"/projects",
			&[
				Operation::List,
				Operation::Get,
				Operation::Create,
				Operation::Update,
			],
		)
		.paginated()
		.build()
});

impl Model for Project {
	fn meta() -> &'static ModelMeta {
		&PROJECT_META
	}
}

impl ApiModel for Project {
	type Pk = Uuid;

	fn pk(&self) -> Option<&Uuid> {
		self.id.as_ref()
	}
}

impl Project {
	pub fn named(name: &str) -> Self {
		Self {
			id: None,
			name: name.to_string(),
			number: None,
			start_date: None,
			is_active: true,
		}
	}
}

/// An unpaginated, settings-style test resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
	#[serde(rename = "Name")]
	pub name: String,
	#[serde(rename = "CurrencyCode", default, skip_serializing_if = "Option::is_none")]
	pub currency_code: Option<String>,
}

static COMPANY_PROFILE_META: Lazy<ModelMeta> = Lazy::new(|| {
	ModelMeta::builder("CompanyProfile")
		.field(FieldDescriptor::string("name", "Name").required())
		.field(FieldDescriptor::string("currency_code", "CurrencyCode").nullable())
		.endpoint("/companyprofile", &[Operation::List, Operation::Update])
		.build()
});

impl Model for CompanyProfile {
	fn meta() -> &'static ModelMeta {
		&COMPANY_PROFILE_META
	}
}

impl ApiModel for CompanyProfile {
	type Pk = String;

	fn pk(&self) -> Option<&String> {
		None
	}
}

/// Builds a one-page envelope body.
pub fn page(items: Vec<Value>, current: u32, total_pages: u32, total_results: u32) -> Value {
	json!({
		"Data": items,
		"Meta": {
			"CurrentPage": current,
			"PageSize": 50,
			"TotalNumberOfPages": total_pages,
			"TotalNumberOfResults": total_results,
		}
	})
}

/// A wire-shaped project object.
pub fn project_json(id: Uuid, name: &str) -> Value {
	json!({
		"Id": id,
		"Name": name,
		"IsActive": true,
	})
}
