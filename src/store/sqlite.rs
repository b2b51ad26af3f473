//! SQLite record store
//!
//! - One `books` table, insertion order kept by rowid
//! - WAL mode + busy timeout so concurrent searches never block writers
//! - Timestamps stored as fixed-width RFC 3339 text, so text order is time order

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

use super::{BookFilter, BookOrder, RecordStore, StoreError};
use crate::models::{AuthorSummary, Book, NewBook};

#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: String,
    title: String,
    author: String,
    description: String,
    cover_image: String,
    pdf_url: String,
    category: String,
    created_at: String,
}

impl TryFrom<BookRow> for Book {
    type Error = StoreError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| StoreError::Decode(format!("book {} created_at: {}", row.id, e)))?
            .with_timezone(&Utc);

        Ok(Book {
            id: row.id,
            title: row.title,
            author: row.author,
            description: row.description,
            cover_image: row.cover_image,
            pdf_url: row.pdf_url,
            category: row.category,
            created_at,
        })
    }
}

const BOOK_COLUMNS: &str =
    "id, title, author, description, cover_image, pdf_url, category, created_at";

/// SQLite-backed book store
pub struct SqliteStore {
    db: Pool<Sqlite>,
}

impl SqliteStore {
    /// Connect and apply pragmas; call `init` before use
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let db = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        sqlx::query("PRAGMA journal_mode=WAL").execute(&db).await?;
        sqlx::query("PRAGMA busy_timeout=5000").execute(&db).await?;
        sqlx::query("PRAGMA synchronous=NORMAL").execute(&db).await?;

        tracing::info!("Book database connected: {} (WAL mode)", url);

        Ok(Self { db })
    }

    /// Create tables if missing; never drops data
    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                description TEXT NOT NULL,
                cover_image TEXT NOT NULL,
                pdf_url TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT 'General',
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_books_author ON books(author)")
            .execute(&self.db)
            .await?;

        Ok(())
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn find(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let order = match filter.order {
            BookOrder::Natural => "rowid ASC",
            BookOrder::NewestFirst => "created_at DESC, rowid DESC",
        };

        let rows: Vec<BookRow> = match &filter.author {
            Some(author) => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM books WHERE author = ? ORDER BY {}",
                    BOOK_COLUMNS, order
                ))
                .bind(author)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as(&format!("SELECT {} FROM books ORDER BY {}", BOOK_COLUMNS, order))
                    .fetch_all(&self.db)
                    .await?
            }
        };

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let book = book.into_book()?;

        sqlx::query(
            "INSERT INTO books (id, title, author, description, cover_image, pdf_url, category, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(&book.cover_image)
        .bind(&book.pdf_url)
        .bind(&book.category)
        .bind(book.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true))
        .execute(&self.db)
        .await?;

        tracing::debug!("Book created: {} ({})", book.title, book.id);
        Ok(book)
    }

    async fn get(&self, id: &str) -> Result<Option<Book>, StoreError> {
        let row: Option<BookRow> =
            sqlx::query_as(&format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS))
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        row.map(Book::try_from).transpose()
    }

    async fn authors(&self) -> Result<Vec<AuthorSummary>, StoreError> {
        let rows: Vec<(String, i64, Option<String>)> = sqlx::query_as(
            r#"
            SELECT b.author, COUNT(*) AS count,
                (SELECT f.cover_image FROM books f WHERE f.author = b.author ORDER BY f.rowid LIMIT 1) AS image
            FROM books b
            GROUP BY b.author
            ORDER BY b.author ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, count, image)| AuthorSummary { name, count, image })
            .collect())
    }
}
