//! User and login endpoints

use crate::client::{ApiClient, Result};
use serde::{Deserialize, Serialize};

/// An OAuth provider the backend can authenticate against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableOAuth {
    /// Provider identifier
    pub oauth: String,
    /// Provider kind
    #[serde(rename = "type")]
    pub kind: String,
}

/// The authenticated user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User id
    pub id: String,
    /// Login name
    pub username: String,
    /// Display name
    pub nickname: String,
    /// Avatar URL
    pub avatar: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// List the OAuth providers available for login
pub async fn available_oauth(client: &ApiClient) -> Result<Vec<AvailableOAuth>> {
    client.get("/user/oauth/all", &[]).await
}

/// Resolve the authorization URL for one provider, returning the user to
/// `redirect_url` afterwards
pub async fn oauth_url(client: &ApiClient, oauth: &str, redirect_url: &str) -> Result<String> {
    client
        .get("/user/oauth", &[("oauth", oauth), ("redirectURL", redirect_url)])
        .await
}

/// Fetch the current user's profile
pub async fn user_info(client: &ApiClient) -> Result<UserInfo> {
    client.get("/user/info", &[]).await
}

/// End the current session
pub async fn logout(client: &ApiClient) -> Result<serde_json::Value> {
    client.get("/user/logout", &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_oauth_wire_shape() {
        let provider: AvailableOAuth =
            serde_json::from_str(r#"{"oauth":"github","type":"web"}"#).unwrap();
        assert_eq!(provider.oauth, "github");
        assert_eq!(provider.kind, "web");
    }

    #[test]
    fn test_user_info_camel_case_fields() {
        let info: UserInfo = serde_json::from_value(serde_json::json!({
            "id": "1",
            "username": "admin",
            "nickname": "Admin",
            "avatar": "",
            "email": "admin@example.com",
            "phone": "",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(info.created_at, "2024-01-01T00:00:00Z");
    }
}
