use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Registered marketplace user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub datasets_minted: i32,
    pub total_earnings: Decimal,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User representation safe to return to clients (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_verified: bool,
    pub datasets_minted: i32,
    pub total_earnings: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            is_verified: user.is_verified,
            datasets_minted: user.datasets_minted,
            total_earnings: user.total_earnings,
            created_at: user.created_at,
        }
    }
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            is_verified: false,
            datasets_minted: 3,
            total_earnings: Decimal::new(125, 4),
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn public_user_omits_password_hash() {
        let user = sample_user();
        let public = PublicUser::from(user.clone());
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains(&user.email));
    }

    #[test]
    fn full_name_joins_parts() {
        assert_eq!(sample_user().full_name(), "Ada Lovelace");
    }
}
