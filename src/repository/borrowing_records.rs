//! Borrowing records repository: the lending ledger
//!
//! Records move Open -> Closed exactly once. The borrow path runs in a
//! transaction that locks the book row, so two concurrent borrows of the
//! same book cannot both pass the availability check.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrowing_record::{BorrowingRecord, CreateBorrowingRecord, ReturnBorrowingRecord},
};

#[derive(Clone)]
pub struct BorrowingRecordsRepository {
    pool: Pool<Postgres>,
}

impl BorrowingRecordsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a borrowing record by ID
    pub async fn get_by_id(&self, borrow_id: i32) -> AppResult<BorrowingRecord> {
        sqlx::query_as::<_, BorrowingRecord>(
            "SELECT * FROM borrowing_records WHERE borrow_id = $1",
        )
        .bind(borrow_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Borrowing record with id {} not found", borrow_id))
        })
    }

    /// List all borrowing records, insertion order
    pub async fn list(&self) -> AppResult<Vec<BorrowingRecord>> {
        let records = sqlx::query_as::<_, BorrowingRecord>(
            "SELECT * FROM borrowing_records ORDER BY borrow_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Create a new borrowing record (borrow a book).
    ///
    /// The borrow date is always the server date; callers cannot backdate
    /// loans.
    pub async fn create(&self, record: &CreateBorrowingRecord) -> AppResult<BorrowingRecord> {
        let mut tx = self.pool.begin().await?;

        // Lock the book row so concurrent borrows of the same book serialize
        // on the availability check below.
        let book_id: Option<i32> =
            sqlx::query_scalar("SELECT id FROM books WHERE id = $1 FOR UPDATE")
                .bind(record.book_id)
                .fetch_optional(&mut *tx)
                .await?;

        if book_id.is_none() {
            return Err(AppError::NotFound(format!(
                "Book with id {} not found",
                record.book_id
            )));
        }

        let already_borrowed: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM borrowing_records
                WHERE book_id = $1 AND return_date IS NULL
            )
            "#,
        )
        .bind(record.book_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_borrowed {
            return Err(AppError::Conflict("Book is currently borrowed".to_string()));
        }

        let member_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id = $1)")
                .bind(record.member_id)
                .fetch_one(&mut *tx)
                .await?;

        if !member_exists {
            return Err(AppError::NotFound(format!(
                "Member with id {} not found",
                record.member_id
            )));
        }

        let today = Utc::now().date_naive();

        let created = sqlx::query_as::<_, BorrowingRecord>(
            r#"
            INSERT INTO borrowing_records (book_id, member_id, borrow_date)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(record.book_id)
        .bind(record.member_id)
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Close a borrowing record (return a book).
    ///
    /// Uses the supplied return date, or the server date when omitted.
    /// A closed record is never mutated again.
    pub async fn close(
        &self,
        borrow_id: i32,
        request: &ReturnBorrowingRecord,
    ) -> AppResult<BorrowingRecord> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, BorrowingRecord>(
            "SELECT * FROM borrowing_records WHERE borrow_id = $1 FOR UPDATE",
        )
        .bind(borrow_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Borrowing record with id {} not found", borrow_id))
        })?;

        if !record.is_open() {
            return Err(AppError::Conflict(
                "Borrowing record is already returned".to_string(),
            ));
        }

        let return_date = request
            .return_date
            .unwrap_or_else(|| Utc::now().date_naive());

        if return_date < record.borrow_date {
            return Err(AppError::Validation(
                "Return date cannot be before borrow date".to_string(),
            ));
        }

        let closed = sqlx::query_as::<_, BorrowingRecord>(
            r#"
            UPDATE borrowing_records
            SET return_date = $1
            WHERE borrow_id = $2
            RETURNING *
            "#,
        )
        .bind(return_date)
        .bind(borrow_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(closed)
    }
}
