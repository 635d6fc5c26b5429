//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books, optionally filtered by derived availability.
    ///
    /// The filter is applied over the derived property after the fetch, not
    /// pushed into the query predicate.
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = self.repository.books.list().await?;

        Ok(match query.is_available {
            Some(wanted) => filter_by_availability(books, wanted),
            None => books,
        })
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book. ISBN uniqueness is deliberately not checked.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.repository.books.create(&book).await
    }
}

fn filter_by_availability(books: Vec<Book>, wanted: bool) -> Vec<Book> {
    books
        .into_iter()
        .filter(|book| book.is_available == wanted)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i32, is_available: bool) -> Book {
        Book {
            id,
            title: format!("Book {}", id),
            author: "Author".to_string(),
            published_year: 2000,
            isbn: "0000000000".to_string(),
            is_available,
        }
    }

    #[test]
    fn test_filter_keeps_available() {
        let books = vec![book(1, true), book(2, false), book(3, true)];
        let filtered = filter_by_availability(books, true);
        assert_eq!(filtered.iter().map(|b| b.id).collect::<Vec<_>>(), [1, 3]);
    }

    #[test]
    fn test_filter_keeps_borrowed() {
        let books = vec![book(1, true), book(2, false)];
        let filtered = filter_by_availability(books, false);
        assert_eq!(filtered.iter().map(|b| b.id).collect::<Vec<_>>(), [2]);
    }

    #[test]
    fn test_filter_empty_input() {
        assert!(filter_by_availability(Vec::new(), true).is_empty());
    }
}
