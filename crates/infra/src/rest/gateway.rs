//! REST gateway to the remote timesheet service
//!
//! One HTTP facade implements all three scheduling ports: the remote
//! service owns activities, session permissions, and the project
//! directory. Payloads are the domain types themselves; the service
//! speaks the same JSON shapes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::json;
use timegrid_core::scheduling::ports::{
    ActivityStore, PermissionService, ProjectDirectory, ProjectRef,
};
use timegrid_domain::{Activity, ActivityPatch, RawPermissions, Result, ScheduleError};
use uuid::Uuid;

use super::client::RestClient;
use crate::errors::InfraError;

/// Gateway over the timesheet service's REST API
#[derive(Clone)]
pub struct RestTimesheetGateway {
    client: RestClient,
}

#[derive(Deserialize)]
struct CreatedResponse {
    id: Uuid,
}

#[derive(Deserialize)]
struct TaskResponse {
    #[serde(default)]
    project: Option<String>,
}

impl RestTimesheetGateway {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ActivityStore for RestTimesheetGateway {
    async fn query(
        &self,
        employee: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Activity>> {
        let mut query = vec![("start", start.to_rfc3339()), ("end", end.to_rfc3339())];
        if let Some(employee) = employee {
            query.push(("employee", employee.to_string()));
        }

        let activities = self
            .client
            .fetch_json(Method::GET, "api/activities", &query, None)
            .await
            .map_err(ScheduleError::from)?;
        Ok(activities)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Activity>> {
        let response = self
            .client
            .execute(Method::GET, &format!("api/activities/{id}"), &[], None)
            .await
            .map_err(ScheduleError::from)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = RestClient::check_status(response).await.map_err(ScheduleError::from)?;
        let activity = response
            .json()
            .await
            .map_err(InfraError::Http)
            .map_err(ScheduleError::from)?;
        Ok(Some(activity))
    }

    async fn create(&self, activity: &Activity) -> Result<Uuid> {
        let body = json!(activity);
        let created: CreatedResponse = self
            .client
            .fetch_json(Method::POST, "api/activities", &[], Some(&body))
            .await
            .map_err(ScheduleError::from)?;
        Ok(created.id)
    }

    async fn update(&self, id: Uuid, patch: &ActivityPatch) -> Result<()> {
        let body = json!(patch);
        let response = self
            .client
            .execute(Method::PUT, &format!("api/activities/{id}"), &[], Some(&body))
            .await
            .map_err(ScheduleError::from)?;
        RestClient::check_status(response).await.map_err(ScheduleError::from)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .execute(Method::DELETE, &format!("api/activities/{id}"), &[], None)
            .await
            .map_err(ScheduleError::from)?;
        RestClient::check_status(response).await.map_err(ScheduleError::from)?;
        Ok(())
    }
}

#[async_trait]
impl PermissionService for RestTimesheetGateway {
    async fn resolve(&self) -> Result<RawPermissions> {
        let permissions = self
            .client
            .fetch_json(Method::GET, "api/session/permissions", &[], None)
            .await
            .map_err(ScheduleError::from)?;
        Ok(permissions)
    }
}

#[async_trait]
impl ProjectDirectory for RestTimesheetGateway {
    async fn project_of_task(&self, task: &str) -> Result<Option<String>> {
        let response: TaskResponse = self
            .client
            .fetch_json(Method::GET, &format!("api/tasks/{task}"), &[], None)
            .await
            .map_err(ScheduleError::from)?;
        Ok(response.project)
    }

    async fn assigned_projects(&self, employee: &str) -> Result<Vec<ProjectRef>> {
        let projects = self
            .client
            .fetch_json(Method::GET, &format!("api/employees/{employee}/projects"), &[], None)
            .await
            .map_err(ScheduleError::from)?;
        Ok(projects)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::TimeZone;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn gateway(server: &MockServer) -> RestTimesheetGateway {
        let client = RestClient::builder(server.uri())
            .base_backoff(Duration::from_millis(5))
            .max_attempts(2)
            .build()
            .unwrap();
        RestTimesheetGateway::new(client)
    }

    fn activity() -> Activity {
        Activity {
            id: None,
            employee: "EMP-0001".to_string(),
            start: Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 3, 11, 17, 0, 0).unwrap(),
            project: Some("PROJ-001".to_string()),
            task: None,
            activity_type: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn create_returns_assigned_id() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/api/activities"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": id })))
            .expect(1)
            .mount(&server)
            .await;

        let created = gateway(&server).await.create(&activity()).await.unwrap();
        assert_eq!(created, id);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_persistence_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/activities"))
            .respond_with(ResponseTemplate::new(422).set_body_string("validation failed"))
            .mount(&server)
            .await;

        let result = gateway(&server).await.create(&activity()).await;
        match result {
            Err(ScheduleError::Persistence(message)) => {
                assert!(message.contains("422"));
            }
            other => panic!("expected persistence error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_activity_reads_as_none() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path(format!("/api/activities/{id}")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let found = gateway(&server).await.get(id).await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn query_round_trips_activities() {
        let server = MockServer::start().await;
        let mut stored = activity();
        stored.id = Some(Uuid::new_v4());
        Mock::given(method("GET"))
            .and(path("/api/activities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([stored])))
            .mount(&server)
            .await;

        let gateway = gateway(&server).await;
        let activities = gateway
            .query(Some("EMP-0001"), stored.start, stored.end)
            .await
            .unwrap();

        assert_eq!(activities, vec![stored]);
    }

    #[tokio::test]
    async fn permissions_payload_deserializes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/session/permissions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "is_employee_only": true,
                "current_employee": "EMP-0001"
            })))
            .mount(&server)
            .await;

        let permissions = gateway(&server).await.resolve().await.unwrap();
        assert!(permissions.is_employee_only);
        assert_eq!(permissions.current_employee.as_deref(), Some("EMP-0001"));
    }

    #[tokio::test]
    async fn task_without_project_resolves_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks/TASK-001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let project = gateway(&server).await.project_of_task("TASK-001").await.unwrap();
        assert_eq!(project, None);
    }
}
