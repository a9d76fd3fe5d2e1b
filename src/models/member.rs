//! Member model and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Full member model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Cost of the most recently saved transaction for this member,
    /// overwritten on every transaction save
    pub cost_incurred: Decimal,
}

impl Member {
    /// Canonical detail-view path for this member
    pub fn detail_path(&self) -> String {
        format!("/members/{}", self.id)
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Aggregate cost summary for a member
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberCosts {
    pub member_id: Uuid,
    /// Most recently saved transaction cost
    pub cost_incurred: Decimal,
    /// cost_incurred plus the sum of total_cost over the member's transactions
    pub total_costs: Decimal,
}

/// Member query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct MemberQuery {
    pub name: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(max = 80, message = "Phone must be at most 80 characters"))]
    pub phone: String,
}

/// Update member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMember {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(max = 80, message = "Phone must be at most 80 characters"))]
    pub phone: Option<String>,
}
