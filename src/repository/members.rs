//! Members repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::member::{days_borrowed, BorrowedBook, BorrowingHistoryEntry, CreateMember, Member},
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
    pub async fn get_by_id(&self, id: i32) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// List all members, insertion order
    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>("SELECT * FROM members ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(members)
    }

    /// Create a new member
    pub async fn create(&self, member: &CreateMember) -> AppResult<Member> {
        let created = sqlx::query_as::<_, Member>(
            "INSERT INTO members (name, email) VALUES ($1, $2) RETURNING *",
        )
        .bind(&member.name)
        .bind(&member.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Check whether a member email is already registered
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// All borrowing records of a member, open ones included, with book titles
    pub async fn borrowing_history(&self, member_id: i32) -> AppResult<Vec<BorrowingHistoryEntry>> {
        let history = sqlx::query_as::<_, BorrowingHistoryEntry>(
            r#"
            SELECT r.borrow_id, r.book_id, b.title AS book_title,
                   r.borrow_date, r.return_date
            FROM borrowing_records r
            JOIN books b ON b.id = r.book_id
            WHERE r.member_id = $1
            ORDER BY r.borrow_id
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(history)
    }

    /// Open records of a member, annotated with days elapsed since borrowing
    pub async fn currently_borrowed_books(&self, member_id: i32) -> AppResult<Vec<BorrowedBook>> {
        let open = sqlx::query_as::<_, BorrowingHistoryEntry>(
            r#"
            SELECT r.borrow_id, r.book_id, b.title AS book_title,
                   r.borrow_date, r.return_date
            FROM borrowing_records r
            JOIN books b ON b.id = r.book_id
            WHERE r.member_id = $1 AND r.return_date IS NULL
            ORDER BY r.borrow_id
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        let today = Utc::now().date_naive();

        Ok(open
            .into_iter()
            .map(|entry| BorrowedBook {
                borrow_id: entry.borrow_id,
                book_title: entry.book_title,
                borrow_date: entry.borrow_date,
                days_borrowed: days_borrowed(entry.borrow_date, today),
            })
            .collect())
    }

    /// Delete a member. Blocked while the member holds open records;
    /// closed history rows are removed with the member by the FK cascade.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get_by_id(id).await?;

        let open_records: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrowing_records WHERE member_id = $1 AND return_date IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if open_records > 0 {
            return Err(AppError::Conflict(format!(
                "Member has {} book(s) currently borrowed",
                open_records
            )));
        }

        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
