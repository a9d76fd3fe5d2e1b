//! Borrowing transaction model and cost accrual

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Transaction model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookTransaction {
    pub id: i64,
    pub member_id: Uuid,
    pub book_id: Uuid,
    /// Fixed at creation
    pub date_borrowed: DateTime<Utc>,
    pub date_returned: Option<DateTime<Utc>>,
    pub returned: bool,
    /// Derived on every save, never settable
    pub borrowed_days: i32,
    /// Derived on every save, never settable
    pub total_cost: Decimal,
}

impl BookTransaction {
    /// Canonical detail-view path for this transaction
    pub fn detail_path(&self) -> String {
        format!("/transactions/{}", self.id)
    }
}

/// Transaction with member and book names for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionDetails {
    pub id: i64,
    pub member_id: Uuid,
    pub member_name: String,
    pub book_id: Uuid,
    pub book_title: String,
    pub date_borrowed: DateTime<Utc>,
    pub date_returned: Option<DateTime<Utc>>,
    pub returned: bool,
    pub borrowed_days: i32,
    pub total_cost: Decimal,
}

impl TransactionDetails {
    /// Canonical detail-view path for this transaction
    pub fn detail_path(&self) -> String {
        format!("/transactions/{}", self.id)
    }
}

impl std::fmt::Display for TransactionDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} borrowed {}", self.member_name, self.book_title)
    }
}

/// Create transaction request (borrow a book)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransaction {
    pub member_id: Uuid,
    pub book_id: Uuid,
}

/// Update transaction request. Only the return state is settable;
/// date_borrowed never changes after creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTransaction {
    pub date_returned: Option<DateTime<Utc>>,
    pub returned: Option<bool>,
}

/// Transaction query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TransactionQuery {
    pub member_id: Option<Uuid>,
    pub book_id: Option<Uuid>,
    pub returned: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Whole days elapsed for a borrow period, truncated toward zero.
/// Open transactions accrue against `now`, returned ones against their return date.
pub fn borrowed_days(
    date_borrowed: DateTime<Utc>,
    date_returned: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> i64 {
    (date_returned.unwrap_or(now) - date_borrowed).num_days()
}

/// Derived fields for a transaction save: day count and accrued cost.
/// Fails when the book carries no cost, or the return date precedes the borrow date.
pub fn accrue(
    date_borrowed: DateTime<Utc>,
    date_returned: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cost_per_day: Option<Decimal>,
) -> AppResult<(i32, Decimal)> {
    let cost_per_day =
        cost_per_day.ok_or_else(|| AppError::Validation("Book has no rental cost".to_string()))?;

    let days = borrowed_days(date_borrowed, date_returned, now);
    if days < 0 {
        return Err(AppError::Validation(
            "Return date is earlier than borrow date".to_string(),
        ));
    }

    Ok((days as i32, cost_per_day * Decimal::from(days)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn five_day_rental_accrues_linear_cost() {
        let returned = t0() + Duration::days(5);
        let (days, cost) = accrue(t0(), Some(returned), t0(), Some(dec("2.50"))).unwrap();
        assert_eq!(days, 5);
        assert_eq!(cost, dec("12.50"));
    }

    #[test]
    fn same_day_return_costs_nothing() {
        let returned = t0() + Duration::hours(6);
        let (days, cost) = accrue(t0(), Some(returned), t0(), Some(dec("2.50"))).unwrap();
        assert_eq!(days, 0);
        assert_eq!(cost, dec("0.00"));
    }

    #[test]
    fn partial_days_truncate_toward_zero() {
        let returned = t0() + Duration::days(5) + Duration::hours(23);
        let (days, cost) = accrue(t0(), Some(returned), t0(), Some(dec("2.50"))).unwrap();
        assert_eq!(days, 5);
        assert_eq!(cost, dec("12.50"));
    }

    #[test]
    fn open_transaction_accrues_against_now() {
        let early = borrowed_days(t0(), None, t0() + Duration::days(3));
        let late = borrowed_days(t0(), None, t0() + Duration::days(10));
        assert_eq!(early, 3);
        assert_eq!(late, 10);
        assert!(late > early);
    }

    #[test]
    fn return_before_borrow_is_rejected() {
        let returned = t0() - Duration::days(1);
        let err = accrue(t0(), Some(returned), t0(), Some(dec("2.50"))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn missing_cost_is_rejected() {
        let err = accrue(t0(), None, t0() + Duration::days(2), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn display_label_and_detail_path() {
        let details = TransactionDetails {
            id: 7,
            member_id: Uuid::nil(),
            member_name: "Ada".to_string(),
            book_id: Uuid::nil(),
            book_title: "Dune".to_string(),
            date_borrowed: t0(),
            date_returned: None,
            returned: false,
            borrowed_days: 0,
            total_cost: dec("0.00"),
        };
        assert_eq!(details.to_string(), "Ada borrowed Dune");
        assert_eq!(details.detail_path(), "/transactions/7");
    }
}
