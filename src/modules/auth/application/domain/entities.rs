use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::ApiError;

/// A platform user. `secret` holds the argon2 hash once the user went through
/// the store; the plaintext only ever lives inside a request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub mail: String,
    pub secret: String,
    pub admin_platform: bool,
}

impl User {
    pub fn new(
        first_name: &str,
        last_name: &str,
        mail: &str,
        secret: &str,
        admin_platform: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            mail: mail.trim().to_lowercase(),
            secret: secret.to_string(),
            admin_platform,
        }
    }

    /// The fixed `root` principal, never persisted.
    pub fn root(secret: &str) -> Self {
        Self {
            id: Uuid::nil(),
            first_name: "root".to_string(),
            last_name: "oscied".to_string(),
            mail: "root@oscied.org".to_string(),
            secret: secret.to_string(),
            admin_platform: true,
        }
    }

    /// The fixed `node` principal used by workers for callbacks.
    pub fn node(secret: &str) -> Self {
        Self {
            id: Uuid::nil(),
            first_name: "node".to_string(),
            last_name: "oscied".to_string(),
            mail: "node@oscied.org".to_string(),
            secret: secret.to_string(),
            admin_platform: false,
        }
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_valid(&self) -> Result<(), ApiError> {
        if self.first_name.is_empty() || self.last_name.is_empty() {
            return Err(ApiError::invalid("User's first and last name are required."));
        }
        if !email_address::EmailAddress::is_valid(&self.mail) {
            return Err(ApiError::invalid(format!(
                "Invalid email address {}.",
                self.mail
            )));
        }
        if self.secret.is_empty() {
            return Err(ApiError::invalid("User's secret is required."));
        }
        Ok(())
    }

    /// Serialized shape sent to clients, with the computed `name` and without
    /// the secret.
    pub fn to_view(&self) -> UserView {
        UserView {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            name: self.name(),
            mail: self.mail.clone(),
            admin_platform: self.admin_platform,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub mail: String,
    pub admin_platform: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_mail_to_lowercase() {
        let user = User::new("A", "B", "Tabby@Bernex.CH", "s", false);
        assert_eq!(user.mail, "tabby@bernex.ch");
    }

    #[test]
    fn view_never_carries_the_secret() {
        let user = User::new("Tabby", "Fischer", "t@f.com", "miaow", false);
        let json = serde_json::to_value(user.to_view()).unwrap();
        assert!(json.get("secret").is_none());
        assert_eq!(json["name"], "Tabby Fischer");
    }

    #[test]
    fn validation_refuses_bad_mail_and_empty_secret() {
        let mut user = User::new("A", "B", "not a mail", "s", false);
        assert!(user.is_valid().is_err());
        user.mail = "a@b.com".to_string();
        user.secret = String::new();
        assert!(user.is_valid().is_err());
        user.secret = "s".to_string();
        assert!(user.is_valid().is_ok());
    }
}
