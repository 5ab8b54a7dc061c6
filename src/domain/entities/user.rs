//! User entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::utils::text::email_local_part;

/// An account that owns appliances.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
}

impl NewUser {
    /// Normalizes the email and defaults the name to the email's local part.
    pub fn new(email: &str, name: Option<&str>) -> Self {
        let email = email.trim().to_lowercase();
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => email_local_part(&email).to_string(),
        };
        Self { email, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_name() {
        let user = NewUser::new(" Jane.Doe@Example.com ", None);
        assert_eq!(user.email, "jane.doe@example.com");
        assert_eq!(user.name, "jane.doe");
    }

    #[test]
    fn test_new_user_blank_name_falls_back() {
        let user = NewUser::new("sam@example.com", Some("  "));
        assert_eq!(user.name, "sam");
    }

    #[test]
    fn test_new_user_keeps_name() {
        let user = NewUser::new("sam@example.com", Some(" Sam Smith "));
        assert_eq!(user.name, "Sam Smith");
    }
}
