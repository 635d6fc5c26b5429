//! Borrowing record model
//!
//! A record is Open while `return_date` is NULL and Closed once it is set.
//! The transition is one-way: closed records are never reopened.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrowing record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowingRecord {
    pub borrow_id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub borrow_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl BorrowingRecord {
    /// An open record is a loan that has not been returned yet
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Create borrowing record request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBorrowingRecord {
    pub book_id: i32,
    pub member_id: i32,
}

/// Close borrowing record request; the server date is used when omitted
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReturnBorrowingRecord {
    pub return_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_open_without_return_date() {
        let record = BorrowingRecord {
            borrow_id: 1,
            book_id: 1,
            member_id: 1,
            borrow_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            return_date: None,
        };
        assert!(record.is_open());
    }

    #[test]
    fn test_record_closed_with_return_date() {
        let record = BorrowingRecord {
            borrow_id: 1,
            book_id: 1,
            member_id: 1,
            borrow_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 6, 8),
        };
        assert!(!record.is_open());
    }
}
