use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";

/// User profile, keyed by email by convention (no unique index is enforced).
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateRoleRequest {
    pub role: Option<String>,
}

/// Returned instead of an insert when the email is already registered.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExistingUserResponse {
    pub message: String,
    #[schema(value_type = Option<String>)]
    pub inserted_id: Option<String>,
}

impl ExistingUserResponse {
    pub fn already_exists() -> Self {
        ExistingUserResponse {
            message: "User already exists".to_string(),
            inserted_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_role_is_exact() {
        let mut user = User {
            role: Some("admin".into()),
            ..Default::default()
        };
        assert!(user.is_admin());

        user.role = Some("Admin".into());
        assert!(!user.is_admin());

        user.role = None;
        assert!(!user.is_admin());
    }

    #[test]
    fn test_existing_user_marker() {
        let json = serde_json::to_value(ExistingUserResponse::already_exists()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "User already exists", "insertedId": null })
        );
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let user: User =
            serde_json::from_str(r#"{"name":"Ana","email":"ana@mail.com","photo":"x.png"}"#).unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Ana", "email": "ana@mail.com" }));
    }
}
