//! User request models.

use serde::Serialize;

/// JSON:API resource type for users.
pub const USERS: &str = "users";

/// Attributes of a user registration.
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_email_confirmed: bool,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("is_email_confirmed", &self.is_email_confirmed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_user_payload() {
        let user = NewUser {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "hunter22".into(),
            is_email_confirmed: false,
        };

        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "hunter22",
                "isEmailConfirmed": false
            })
        );
        assert!(!format!("{:?}", user).contains("hunter22"));
    }
}
