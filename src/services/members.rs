//! Member management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        member::{CreateMember, Member, MemberCosts, MemberQuery, UpdateMember},
        transaction::TransactionDetails,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    /// Search members
    pub async fn search(&self, query: &MemberQuery) -> AppResult<(Vec<Member>, i64)> {
        self.repository.members.search(query).await
    }

    /// Create a new member
    pub async fn create(&self, member: CreateMember) -> AppResult<Member> {
        member
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.repository.members.create(&member).await
    }

    /// Update an existing member
    pub async fn update(&self, id: Uuid, member: UpdateMember) -> AppResult<Member> {
        member
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.repository.members.update(id, &member).await
    }

    /// Delete a member; their transactions go with them
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.members.delete(id).await
    }

    /// Books currently held by a member
    pub async fn borrowed_books(&self, id: Uuid) -> AppResult<Vec<Book>> {
        // Verify member exists
        self.repository.members.get_by_id(id).await?;
        self.repository.books.find_by_borrower(id).await
    }

    /// Borrowing history for a member
    pub async fn transactions(&self, id: Uuid) -> AppResult<Vec<TransactionDetails>> {
        // Verify member exists
        self.repository.members.get_by_id(id).await?;
        self.repository.transactions.find_by_member(id).await
    }

    /// Total amount the member owes
    pub async fn total_costs(&self, id: Uuid) -> AppResult<MemberCosts> {
        let member = self.repository.members.get_by_id(id).await?;
        let total_costs = self.repository.members.total_costs(id).await?;

        Ok(MemberCosts {
            member_id: member.id,
            cost_incurred: member.cost_incurred,
            total_costs,
        })
    }
}
