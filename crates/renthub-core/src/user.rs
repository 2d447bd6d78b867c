// User domain types
//
// These mirror the user service's wire format. Ids are numeric and minted
// server-side; the client never fabricates an identity.

use serde::{Deserialize, Serialize};

/// Role of an account on the rent platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Tenant,
    Owner,
    Admin,
    Broker,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Tenant
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Tenant => write!(f, "tenant"),
            UserRole::Owner => write!(f, "owner"),
            UserRole::Admin => write!(f, "admin"),
            UserRole::Broker => write!(f, "broker"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tenant" => Ok(UserRole::Tenant),
            "owner" => Ok(UserRole::Owner),
            "admin" => Ok(UserRole::Admin),
            "broker" => Ok(UserRole::Broker),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Identity record returned by the user service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl UserProfile {
    /// Check if the account holds a specific role
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role || self.role == UserRole::Admin
    }

    /// Check if the account is an admin
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Credentials submitted on login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Payload submitted on registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInfo {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Partial profile update; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.phone_number.is_none()
    }
}

/// Password change payload (authenticated)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Tenant).unwrap(), "\"tenant\"");
        assert_eq!(serde_json::to_string(&UserRole::Broker).unwrap(), "\"broker\"");

        let role: UserRole = serde_json::from_str("\"owner\"").unwrap();
        assert_eq!(role, UserRole::Owner);
    }

    #[test]
    fn test_unknown_role_fails_deserialization() {
        let result: std::result::Result<UserRole, _> = serde_json::from_str("\"landlord\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_from_service_payload() {
        let payload = serde_json::json!({
            "id": 1,
            "email": "a@b.com",
            "full_name": "Abel Bekele",
            "role": "tenant",
            "phone_number": "+251911223344",
            "profile_picture": null
        });

        let user: UserProfile = serde_json::from_value(payload).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.role, UserRole::Tenant);
        assert_eq!(user.phone_number.as_deref(), Some("+251911223344"));
        assert!(user.profile_picture.is_none());
    }

    #[test]
    fn test_profile_optional_fields_default() {
        let payload = serde_json::json!({
            "id": 7,
            "email": "owner@b.com",
            "full_name": "Owner",
            "role": "owner"
        });

        let user: UserProfile = serde_json::from_value(payload).unwrap();
        assert!(user.phone_number.is_none());
        assert!(user.profile_picture.is_none());
    }

    #[test]
    fn test_has_role() {
        let tenant = UserProfile {
            id: 1,
            email: "t@b.com".to_string(),
            full_name: "T".to_string(),
            role: UserRole::Tenant,
            phone_number: None,
            profile_picture: None,
        };
        assert!(tenant.has_role(UserRole::Tenant));
        assert!(!tenant.has_role(UserRole::Owner));
        assert!(!tenant.is_admin());

        let admin = UserProfile {
            role: UserRole::Admin,
            ..tenant
        };
        assert!(admin.is_admin());
        assert!(admin.has_role(UserRole::Owner)); // Admin has all roles
    }

    #[test]
    fn test_register_info_serializes_default_role() {
        let info = RegisterInfo {
            full_name: "New User".to_string(),
            email: "new@b.com".to_string(),
            password: "secret".to_string(),
            role: UserRole::default(),
            phone_number: None,
            profile_picture: None,
        };

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["role"], "tenant");
        assert!(value.get("phone_number").is_none());
    }

    #[test]
    fn test_profile_update_skips_omitted_fields() {
        let update = ProfileUpdate {
            full_name: Some("Renamed".to_string()),
            phone_number: None,
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["full_name"], "Renamed");
        assert!(value.get("phone_number").is_none());
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }
}
