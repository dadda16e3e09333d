//! Dashboard statistics endpoint

use crate::client::{ApiClient, Result};
use serde::{Deserialize, Serialize};

/// One statistic card on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticItem {
    /// Statistic label
    pub name: String,
    /// Current value
    pub count: u64,
    /// Console path the card links to
    pub path: String,
    /// Icon identifier
    pub icon: String,
}

/// Fetch the dashboard statistic cards
pub async fn statistics(client: &ApiClient) -> Result<Vec<StatisticItem>> {
    client.get("/system/statistic", &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistic_item_wire_shape() {
        let item: StatisticItem = serde_json::from_value(serde_json::json!({
            "name": "schedules",
            "count": 12,
            "path": "/schedule",
            "icon": "clock"
        }))
        .unwrap();
        assert_eq!(item.count, 12);
        assert_eq!(item.path, "/schedule");
    }
}
