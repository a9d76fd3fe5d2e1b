//! Members repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, MemberQuery, UpdateMember},
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Search members with pagination
    pub async fn search(&self, query: &MemberQuery) -> AppResult<(Vec<Member>, i64)> {
        let page = query.page.unwrap_or(1);
        let per_page = query.per_page.unwrap_or(20);
        let offset = (page - 1) * per_page;

        let name_filter = query.name.as_ref().map(|n| format!("%{}%", n.to_lowercase()));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM members WHERE ($1::text IS NULL OR LOWER(name) LIKE $1)",
        )
        .bind(&name_filter)
        .fetch_one(&self.pool)
        .await?;

        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT * FROM members
            WHERE ($1::text IS NULL OR LOWER(name) LIKE $1)
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&name_filter)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((members, total))
    }

    /// Create a new member
    pub async fn create(&self, member: &CreateMember) -> AppResult<Member> {
        let created = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (name, email, phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing member
    pub async fn update(&self, id: Uuid, member: &UpdateMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Delete a member; transactions cascade, borrowed books are released
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member with id {} not found", id)));
        }

        Ok(())
    }

    /// Amount the member owes: cost_incurred plus the sum of every
    /// transaction's total_cost
    pub async fn total_costs(&self, id: Uuid) -> AppResult<Decimal> {
        sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT m.cost_incurred + COALESCE(SUM(t.total_cost), 0)
            FROM members m
            LEFT JOIN transactions t ON t.member_id = m.id
            WHERE m.id = $1
            GROUP BY m.id, m.cost_incurred
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Count members
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
