use async_trait::async_trait;

use super::PgStore;
use crate::database::models::{Comment, CommentWithAuthor, NewComment, NewReview, PhoneReview, Review, ReviewListing};
use crate::database::{CommentRepository, ReviewRepository, StoreError, StoreResult};

const REVIEW_COLUMNS: &str = "id, user_id, phone_id, rating, content, created_at, updated_at";
const COMMENT_COLUMNS: &str = "id, user_id, review_id, content, created_at, updated_at";

#[async_trait]
impl ReviewRepository for PgStore {
    async fn find_review(&self, id: i64) -> StoreResult<Option<Review>> {
        let sql = format!("SELECT {} FROM reviews WHERE id = $1", REVIEW_COLUMNS);
        Ok(sqlx::query_as::<_, Review>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn find_review_by_author(&self, user_id: i64, phone_id: i64) -> StoreResult<Option<Review>> {
        let sql = format!(
            "SELECT {} FROM reviews WHERE user_id = $1 AND phone_id = $2",
            REVIEW_COLUMNS
        );
        Ok(sqlx::query_as::<_, Review>(&sql)
            .bind(user_id)
            .bind(phone_id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn create_review(&self, new: NewReview) -> StoreResult<Review> {
        let sql = format!(
            "INSERT INTO reviews (user_id, phone_id, rating, content) VALUES ($1, $2, $3, $4) RETURNING {}",
            REVIEW_COLUMNS
        );
        Ok(sqlx::query_as::<_, Review>(&sql)
            .bind(new.user_id)
            .bind(new.phone_id)
            .bind(new.rating)
            .bind(&new.content)
            .fetch_one(self.pool())
            .await?)
    }

    async fn update_review(&self, review: &Review) -> StoreResult<Review> {
        let sql = format!(
            "UPDATE reviews SET rating = $2, content = $3, updated_at = NOW() WHERE id = $1 RETURNING {}",
            REVIEW_COLUMNS
        );
        sqlx::query_as::<_, Review>(&sql)
            .bind(review.id)
            .bind(review.rating)
            .bind(&review.content)
            .fetch_optional(self.pool())
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_review(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_phone_reviews(&self, phone_id: i64) -> StoreResult<Vec<PhoneReview>> {
        Ok(sqlx::query_as::<_, PhoneReview>(
            r#"
            SELECT r.id, r.user_id, r.phone_id, u.username, r.rating, r.content, r.created_at, r.updated_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.phone_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(phone_id)
        .fetch_all(self.pool())
        .await?)
    }

    async fn list_account_reviews(&self, user_id: i64) -> StoreResult<Vec<Review>> {
        let sql = format!("SELECT {} FROM reviews WHERE user_id = $1 ORDER BY id", REVIEW_COLUMNS);
        Ok(sqlx::query_as::<_, Review>(&sql)
            .bind(user_id)
            .fetch_all(self.pool())
            .await?)
    }

    async fn list_reviews(&self) -> StoreResult<Vec<ReviewListing>> {
        Ok(sqlx::query_as::<_, ReviewListing>(
            r#"
            SELECT r.id, r.user_id, r.phone_id, u.username, p.model AS phone_model,
                   r.rating, r.content, r.created_at, r.updated_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            JOIN phones p ON p.id = r.phone_id
            ORDER BY r.id
            "#,
        )
        .fetch_all(self.pool())
        .await?)
    }
}

#[async_trait]
impl CommentRepository for PgStore {
    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>> {
        let sql = format!("SELECT {} FROM comments WHERE id = $1", COMMENT_COLUMNS);
        Ok(sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn create_comment(&self, new: NewComment) -> StoreResult<Comment> {
        let sql = format!(
            "INSERT INTO comments (user_id, review_id, content) VALUES ($1, $2, $3) RETURNING {}",
            COMMENT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Comment>(&sql)
            .bind(new.user_id)
            .bind(new.review_id)
            .bind(&new.content)
            .fetch_one(self.pool())
            .await?)
    }

    async fn update_comment(&self, comment: &Comment) -> StoreResult<Comment> {
        let sql = format!(
            "UPDATE comments SET content = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            COMMENT_COLUMNS
        );
        sqlx::query_as::<_, Comment>(&sql)
            .bind(comment.id)
            .bind(&comment.content)
            .fetch_optional(self.pool())
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_comment(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_review_comments(&self, review_id: i64) -> StoreResult<Vec<CommentWithAuthor>> {
        Ok(sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.user_id, c.review_id, u.username, c.content, c.created_at, c.updated_at
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.review_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(review_id)
        .fetch_all(self.pool())
        .await?)
    }

    async fn list_comments(&self) -> StoreResult<Vec<Comment>> {
        let sql = format!("SELECT {} FROM comments ORDER BY id", COMMENT_COLUMNS);
        Ok(sqlx::query_as::<_, Comment>(&sql).fetch_all(self.pool()).await?)
    }
}
