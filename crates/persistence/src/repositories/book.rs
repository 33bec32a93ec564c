//! Book catalog repository.

use sqlx::PgPool;

use domain::models::book::{BookSearchQuery, CreateBookRequest, UpdateBookRequest};

use crate::entities::BookEntity;
use crate::error::StoreError;
use crate::metrics::QueryTimer;

const BOOK_COLUMNS: &str = r#"
    id, title, author, isbn, price, tags, description, cover_image_url,
    pages, stock, created_at, updated_at, version
"#;

/// Repository for the book catalog.
#[derive(Clone)]
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, book: &CreateBookRequest) -> Result<BookEntity, StoreError> {
        let timer = QueryTimer::new("create_book");
        let sql = format!(
            r#"
            INSERT INTO books (title, author, isbn, price, tags, description, cover_image_url, pages, stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let result = sqlx::query_as::<_, BookEntity>(&sql)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(book.price)
            .bind(&book.tags)
            .bind(&book.description)
            .bind(&book.cover_image_url)
            .bind(book.pages)
            .bind(book.stock)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(result?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<BookEntity>, StoreError> {
        let timer = QueryTimer::new("find_book_by_id");
        let sql = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let result = sqlx::query_as::<_, BookEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?)
    }

    /// Apply a partial update if the stored version still matches `changes.version`.
    ///
    /// A stale version yields `VersionConflict` and writes nothing; an unknown ID
    /// yields `NotFound`.
    pub async fn update(
        &self,
        id: i64,
        changes: &UpdateBookRequest,
    ) -> Result<BookEntity, StoreError> {
        let timer = QueryTimer::new("update_book");
        let sql = format!(
            r#"
            UPDATE books
            SET title = COALESCE($1, title),
                author = COALESCE($2, author),
                isbn = COALESCE($3, isbn),
                price = COALESCE($4, price),
                tags = COALESCE($5, tags),
                description = COALESCE($6, description),
                cover_image_url = COALESCE($7, cover_image_url),
                pages = COALESCE($8, pages),
                stock = COALESCE($9, stock),
                version = version + 1,
                updated_at = NOW()
            WHERE id = $10 AND version = $11
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let updated = sqlx::query_as::<_, BookEntity>(&sql)
            .bind(&changes.title)
            .bind(&changes.author)
            .bind(&changes.isbn)
            .bind(changes.price)
            .bind(&changes.tags)
            .bind(&changes.description)
            .bind(&changes.cover_image_url)
            .bind(changes.pages)
            .bind(changes.stock)
            .bind(id)
            .bind(changes.version)
            .fetch_optional(&self.pool)
            .await?;
        timer.record();

        match updated {
            Some(entity) => Ok(entity),
            None if self.exists(id).await? => Err(StoreError::VersionConflict),
            None => Err(StoreError::NotFound),
        }
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("book_exists");
        let result = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(result?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let timer = QueryTimer::new("delete_book");
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Search the catalog. Every present filter narrows the result; ordered by title.
    pub async fn search(&self, query: &BookSearchQuery) -> Result<Vec<BookEntity>, StoreError> {
        let timer = QueryTimer::new("search_books");

        let text = query.text().map(|q| format!("%{}%", q));
        let title = query.title().map(|t| format!("%{}%", t));
        let author = query.author().map(|a| format!("%{}%", a));
        let tags = query.tags();
        let min_price = query.min_price();
        let max_price = query.max_price();

        let mut conditions: Vec<String> = Vec::new();
        let mut param_count = 0;

        if text.is_some() {
            param_count += 1;
            conditions.push(format!(
                "(title ILIKE ${0} OR author ILIKE ${0} OR description ILIKE ${0})",
                param_count
            ));
        }
        if title.is_some() {
            param_count += 1;
            conditions.push(format!("title ILIKE ${}", param_count));
        }
        if author.is_some() {
            param_count += 1;
            conditions.push(format!("author ILIKE ${}", param_count));
        }
        if !tags.is_empty() {
            param_count += 1;
            conditions.push(format!("tags && ${}", param_count));
        }
        if min_price.is_some() {
            param_count += 1;
            conditions.push(format!("price >= ${}", param_count));
        }
        if max_price.is_some() {
            param_count += 1;
            conditions.push(format!("price <= ${}", param_count));
        }
        if query.in_stock_only() {
            conditions.push("stock > 0".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT {} FROM books {} ORDER BY title ASC",
            BOOK_COLUMNS, where_clause
        );

        let mut search = sqlx::query_as::<_, BookEntity>(&sql);
        if let Some(ref text) = text {
            search = search.bind(text);
        }
        if let Some(ref title) = title {
            search = search.bind(title);
        }
        if let Some(ref author) = author {
            search = search.bind(author);
        }
        if !tags.is_empty() {
            search = search.bind(&tags);
        }
        if let Some(min_price) = min_price {
            search = search.bind(min_price);
        }
        if let Some(max_price) = max_price {
            search = search.bind(max_price);
        }

        let result = search.fetch_all(&self.pool).await;
        timer.record();
        Ok(result?)
    }
}
