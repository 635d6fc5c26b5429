//! Lending ledger service

use crate::{
    error::AppResult,
    models::borrowing_record::{BorrowingRecord, CreateBorrowingRecord, ReturnBorrowingRecord},
    repository::Repository,
};

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
}

impl LendingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all borrowing records
    pub async fn list_records(&self) -> AppResult<Vec<BorrowingRecord>> {
        self.repository.borrowing_records.list().await
    }

    /// Get a borrowing record by ID
    pub async fn get_record(&self, borrow_id: i32) -> AppResult<BorrowingRecord> {
        self.repository.borrowing_records.get_by_id(borrow_id).await
    }

    /// Borrow a book: checks existence and availability, then opens a record
    pub async fn borrow(&self, record: CreateBorrowingRecord) -> AppResult<BorrowingRecord> {
        let created = self.repository.borrowing_records.create(&record).await?;

        tracing::info!(
            "Book {} borrowed by member {} (record {})",
            created.book_id,
            created.member_id,
            created.borrow_id
        );

        Ok(created)
    }

    /// Return a book: closes the record, which frees the book for borrowing
    pub async fn return_book(
        &self,
        borrow_id: i32,
        request: ReturnBorrowingRecord,
    ) -> AppResult<BorrowingRecord> {
        let closed = self
            .repository
            .borrowing_records
            .close(borrow_id, &request)
            .await?;

        tracing::info!(
            "Record {} closed, book {} returned",
            closed.borrow_id,
            closed.book_id
        );

        Ok(closed)
    }
}
