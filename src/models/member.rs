//! Member model and derived borrowing views

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Member model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// One entry of a member's borrowing history, open records included
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowingHistoryEntry {
    pub borrow_id: i32,
    pub book_id: i32,
    pub book_title: String,
    pub borrow_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// A book the member currently holds (open record)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowedBook {
    pub borrow_id: i32,
    pub book_title: String,
    pub borrow_date: NaiveDate,
    pub days_borrowed: i64,
}

/// Member with both derived views, for the detail endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberDetails {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub borrowing_history: Vec<BorrowingHistoryEntry>,
    pub currently_borrowed_books: Vec<BorrowedBook>,
}

/// Whole days elapsed since a loan was taken out
pub fn days_borrowed(borrow_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - borrow_date).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_borrowed_same_day() {
        assert_eq!(days_borrowed(date(2025, 3, 10), date(2025, 3, 10)), 0);
    }

    #[test]
    fn test_days_borrowed_across_month() {
        assert_eq!(days_borrowed(date(2025, 1, 30), date(2025, 2, 2)), 3);
    }

    #[test]
    fn test_days_borrowed_whole_days_only() {
        assert_eq!(days_borrowed(date(2025, 3, 1), date(2025, 3, 15)), 14);
    }
}
