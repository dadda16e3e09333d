//! Schedule CRUD endpoints

use crate::client::{ApiClient, Result};
use crate::envelope::Pager;
use serde::{Deserialize, Serialize};

/// A scheduled job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    /// Job id
    pub id: String,
    /// Display title
    pub title: String,
    /// Description
    pub desc: String,
    /// Cron expression
    pub cron_string: String,
    /// Executor the job runs on
    pub executor: String,
    /// Executor parameters
    pub params: String,
    /// Whether the job is enabled
    pub enabled: bool,
    /// Last run status
    pub status: String,
    /// Next scheduled run
    pub next_time: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// An executor a schedule can target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Executor {
    /// Executor identifier
    pub name: String,
    /// Human-readable name
    pub display_name: String,
}

/// Fetch one page of schedules
pub async fn page(client: &ApiClient, page: u64, size: u64) -> Result<Pager<ScheduleItem>> {
    client
        .get(
            "/schedule/page",
            &[("page", &page.to_string()), ("size", &size.to_string())],
        )
        .await
}

/// List the available executors
pub async fn executors(client: &ApiClient) -> Result<Vec<Executor>> {
    client.get("/schedule/executors", &[]).await
}

/// Update a schedule in place
pub async fn update(client: &ApiClient, item: &ScheduleItem) -> Result<serde_json::Value> {
    client.put(&format!("/schedule/{}", item.id), item).await
}

/// Delete a schedule by id
pub async fn remove(client: &ApiClient, id: &str) -> Result<serde_json::Value> {
    client.delete(&format!("/schedule/{}", id), &[]).await
}
