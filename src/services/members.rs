//! Membership management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{BorrowedBook, BorrowingHistoryEntry, CreateMember, Member, MemberDetails},
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

    /// List all members
    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.repository.members.list().await
    }

    /// Get member by ID with both derived borrowing views
    pub async fn get_member_details(&self, id: i32) -> AppResult<MemberDetails> {
        let member = self.repository.members.get_by_id(id).await?;
        let borrowing_history = self.repository.members.borrowing_history(id).await?;
        let currently_borrowed_books =
            self.repository.members.currently_borrowed_books(id).await?;

        Ok(MemberDetails {
            id: member.id,
            name: member.name,
            email: member.email,
            borrowing_history,
            currently_borrowed_books,
        })
    }

    /// Create a new member
    pub async fn create_member(&self, member: CreateMember) -> AppResult<Member> {
        member
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.members.email_exists(&member.email).await? {
            return Err(AppError::Conflict(
                "A member with this email already exists".to_string(),
            ));
        }

        self.repository.members.create(&member).await
    }

    /// Delete a member; fails with Conflict while open loans exist
    pub async fn delete_member(&self, id: i32) -> AppResult<()> {
        self.repository.members.delete(id).await
    }

    /// All borrowing records of a member
    pub async fn borrowing_history(&self, id: i32) -> AppResult<Vec<BorrowingHistoryEntry>> {
        self.repository.members.get_by_id(id).await?;
        self.repository.members.borrowing_history(id).await
    }

    /// Open records of a member with day counts
    pub async fn currently_borrowed_books(&self, id: i32) -> AppResult<Vec<BorrowedBook>> {
        self.repository.members.get_by_id(id).await?;
        self.repository.members.currently_borrowed_books(id).await
    }
}
