use serde::{Deserialize, Serialize};

use crate::domain::order::Order;

/// Access level attached to a signed-in account.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular shopper.
    User,
    /// Merchant with access to the admin console.
    Admin,
}

/// A shopper account together with its loyalty state and order history.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    /// Unique account identifier.
    pub id: String,
    /// Display name shown across the shop.
    pub name: String,
    /// Sign-in email, stored as supplied.
    pub email: String,
    /// Access level of the account.
    pub role: UserRole,
    /// Loyalty points earned from completed orders.
    #[serde(default)]
    pub points: i64,
    /// Order history, newest first.
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Product identifiers the shopper saved for later.
    #[serde(default)]
    pub wishlist: Vec<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Payload for creating a shopper account.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name, when one was supplied.
    pub name: Option<String>,
    /// Sign-in email.
    pub email: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    /// Attach a display name to the payload.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Materialise the account under `id`. A missing name falls back to the
    /// part of the email before the `@`.
    pub fn into_user(self, id: impl Into<String>) -> User {
        let name = self.name.unwrap_or_else(|| {
            self.email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string()
        });

        User {
            id: id.into(),
            name,
            email: self.email,
            role: UserRole::User,
            points: 0,
            orders: Vec::new(),
            wishlist: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_user_defaults_name_to_email_prefix() {
        let user = NewUser::new("ayesha@example.com").into_user("u1");

        assert_eq!(user.id, "u1");
        assert_eq!(user.name, "ayesha");
        assert_eq!(user.email, "ayesha@example.com");
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.points, 0);
        assert!(user.orders.is_empty());
        assert!(user.wishlist.is_empty());
    }

    #[test]
    fn into_user_keeps_supplied_name() {
        let user = NewUser::new("ayesha@example.com")
            .with_name("Ayesha Rahman")
            .into_user("u2");

        assert_eq!(user.name, "Ayesha Rahman");
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Admin).expect("serialize");
        assert_eq!(json, "\"admin\"");
    }

    #[test]
    fn missing_loyalty_fields_default_when_deserializing() {
        let json = r#"{
            "id": "u1",
            "name": "Ayesha",
            "email": "ayesha@example.com",
            "role": "user"
        }"#;

        let user: User = serde_json::from_str(json).expect("deserialize");
        assert_eq!(user.points, 0);
        assert!(user.orders.is_empty());
        assert!(user.wishlist.is_empty());
        assert!(!user.is_admin());
    }
}
