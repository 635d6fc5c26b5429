//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID, with availability derived from the lending ledger
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT b.*,
                   NOT EXISTS (
                       SELECT 1 FROM borrowing_records r
                       WHERE r.book_id = b.id
                         AND r.return_date IS NULL
                   ) AS is_available
            FROM books b
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// List all books with derived availability, insertion order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.*,
                   NOT EXISTS (
                       SELECT 1 FROM borrowing_records r
                       WHERE r.book_id = b.id
                         AND r.return_date IS NULL
                   ) AS is_available
            FROM books b
            ORDER BY b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Create a new book. A fresh book has no ledger entries, so it is
    /// available by definition.
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, published_year, isbn)
            VALUES ($1, $2, $3, $4)
            RETURNING *, TRUE AS is_available
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.published_year)
        .bind(&book.isbn)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
