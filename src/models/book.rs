//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Book availability status. Stored as a 2-char code ('AV' / 'UN').
/// Not synchronized with borrower presence; changed only through book updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Unavailable,
}

impl BookStatus {
    /// Return the storage code for this status
    pub fn as_code(&self) -> &'static str {
        match self {
            BookStatus::Available => "AV",
            BookStatus::Unavailable => "UN",
        }
    }
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::Available
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookStatus::Available => "Available",
            BookStatus::Unavailable => "Unavailable",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AV" | "available" => Ok(BookStatus::Available),
            "UN" | "unavailable" => Ok(BookStatus::Unavailable),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

// SQLx conversion for BookStatus
impl sqlx::Type<Postgres> for BookStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BookStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_code().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year: i32,
    pub genre: String,
    pub summary: String,
    pub date_added: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
    pub status: BookStatus,
    /// Rental cost per borrowed day; a book without one cannot be lent
    pub cost: Option<Decimal>,
    /// Member currently holding the book, if any
    pub borrower_id: Option<Uuid>,
}

impl Book {
    /// Canonical detail-view path for this book
    pub fn detail_path(&self) -> String {
        format!("/books/{}", self.id)
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Book query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub status: Option<BookStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "Author must be 1-200 characters"))]
    pub author: String,
    #[validate(length(max = 200, message = "ISBN must be at most 200 characters"))]
    pub isbn: String,
    pub year: i32,
    #[validate(length(max = 80, message = "Genre must be at most 80 characters"))]
    pub genre: String,
    pub summary: Option<String>,
    pub status: Option<BookStatus>,
    pub cost: Option<Decimal>,
    pub borrower_id: Option<Uuid>,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Author must be 1-200 characters"))]
    pub author: Option<String>,
    #[validate(length(max = 200, message = "ISBN must be at most 200 characters"))]
    pub isbn: Option<String>,
    pub year: Option<i32>,
    #[validate(length(max = 80, message = "Genre must be at most 80 characters"))]
    pub genre: Option<String>,
    pub summary: Option<String>,
    pub status: Option<BookStatus>,
    pub cost: Option<Decimal>,
    /// Set (uuid) or clear (null) the holding member; absent leaves it unchanged
    #[serde(default, with = "serde_with::rust::double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub borrower_id: Option<Option<Uuid>>,
}

#[cfg(test)]
mod tests {
    use super::BookStatus;

    #[test]
    fn status_codes_round_trip() {
        for status in [BookStatus::Available, BookStatus::Unavailable] {
            assert_eq!(status.as_code().parse::<BookStatus>().unwrap(), status);
        }
        assert!("XX".parse::<BookStatus>().is_err());
    }

    #[test]
    fn status_labels() {
        assert_eq!(BookStatus::Available.to_string(), "Available");
        assert_eq!(BookStatus::Unavailable.to_string(), "Unavailable");
    }
}
