use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::database::models::{CommentWithAuthor, NewReview, Review, ReviewListing};
use crate::database::prelude::*;

use super::error::{ServiceError, ServiceResult};
use super::validation::{provided, provided_num, require};
use super::caller_is_admin;

#[derive(Debug, Default, Deserialize)]
pub struct ReviewInput {
    pub rating: Option<i32>,
    pub content: Option<String>,
}

pub struct ReviewService {
    store: Arc<dyn Store>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, account_id: i64, phone_id: i64, input: ReviewInput) -> ServiceResult<Review> {
        if self.store.find_phone(phone_id).await?.is_none() {
            return Err(ServiceError::not_found("phone"));
        }

        let rating = provided_num(input.rating);
        let content = provided(&input.content);
        require(&[("rating", rating.is_some()), ("content", content.is_some())])?;
        let rating = rating.unwrap_or_default();
        ensure_rating(rating)?;

        if self.store.find_review_by_author(account_id, phone_id).await?.is_some() {
            return Err(ServiceError::Conflict(
                "you have already reviewed this phone".to_string(),
            ));
        }

        let review = self
            .store
            .create_review(NewReview {
                user_id: account_id,
                phone_id,
                rating,
                content: content.unwrap_or_default().to_string(),
            })
            .await?;
        info!(review_id = review.id, account_id, phone_id, "Review created");
        Ok(review)
    }

    pub async fn update(&self, account_id: i64, review_id: i64, input: ReviewInput) -> ServiceResult<Review> {
        let mut review = self.find(review_id).await?;
        if review.user_id != account_id {
            warn!(account_id, review_id, "Review update by non-owner refused");
            return Err(ServiceError::forbidden("you can only update your own review"));
        }

        if let Some(rating) = provided_num(input.rating) {
            ensure_rating(rating)?;
            review.rating = rating;
        }
        if let Some(content) = provided(&input.content) {
            review.content = content.to_string();
        }

        Ok(self.store.update_review(&review).await?)
    }

    /// Owners delete their own reviews; admins may delete any review
    pub async fn delete(&self, account_id: i64, review_id: i64) -> ServiceResult<()> {
        let review = self.find(review_id).await?;
        if review.user_id != account_id && !caller_is_admin(self.store.as_ref(), account_id).await? {
            warn!(account_id, review_id, "Review delete by non-owner refused");
            return Err(ServiceError::forbidden("you can only delete your own review"));
        }

        if !self.store.delete_review(review_id).await? {
            return Err(ServiceError::not_found("review"));
        }
        info!(review_id, account_id, "Review deleted");
        Ok(())
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<ReviewListing>> {
        Ok(self.store.list_reviews().await?)
    }

    pub async fn comments(&self, review_id: i64) -> ServiceResult<Vec<CommentWithAuthor>> {
        let review = self.find(review_id).await?;
        Ok(self.store.list_review_comments(review.id).await?)
    }

    async fn find(&self, review_id: i64) -> ServiceResult<Review> {
        self.store
            .find_review(review_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("review"))
    }
}

fn ensure_rating(rating: i32) -> ServiceResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ServiceError::validation("rating must be between 1 and 5"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::role::ADMIN_ROLE_ID;
    use crate::testing::TestContext;

    fn review(rating: i32, content: &str) -> ReviewInput {
        ReviewInput { rating: Some(rating), content: Some(content.into()) }
    }

    #[tokio::test]
    async fn one_review_per_account_and_phone() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = ReviewService::new(ctx.store.clone());
        let alice = ctx.create_member("alice").await?;
        let bob = ctx.create_member("bob").await?;
        let acme = ctx.create_brand("Acme").await?;
        let phone = ctx.create_phone(&acme, "Rocket").await?;

        service.create(alice.id, phone.id, review(5, "great")).await?;
        let err = service.create(alice.id, phone.id, review(4, "again")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        service.create(bob.id, phone.id, review(3, "fine")).await?;
        assert_eq!(ctx.store.list_phone_reviews(phone.id).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn rating_must_be_in_range() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = ReviewService::new(ctx.store.clone());
        let alice = ctx.create_member("alice").await?;
        let acme = ctx.create_brand("Acme").await?;
        let phone = ctx.create_phone(&acme, "Rocket").await?;

        for rating in [6, -1] {
            let err = service.create(alice.id, phone.id, review(rating, "x")).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(m) if m == "rating must be between 1 and 5"));
        }
        let err = service.create(alice.id, phone.id, review(0, "x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(m) if m == "rating is required"));

        let created = service.create(alice.id, phone.id, review(4, "good")).await?;
        let err = service
            .update(alice.id, created.id, ReviewInput { rating: Some(9), content: None })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn review_for_missing_phone_is_not_found() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = ReviewService::new(ctx.store.clone());
        let alice = ctx.create_member("alice").await?;

        let err = service.create(alice.id, 77, review(5, "x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(m) if m == "phone not found"));
        Ok(())
    }

    #[tokio::test]
    async fn only_owner_updates_and_admin_may_delete() -> anyhow::Result<()> {
        let ctx = TestContext::new().await?;
        let service = ReviewService::new(ctx.store.clone());
        let alice = ctx.create_member("alice").await?;
        let bob = ctx.create_member("bob").await?;
        let acme = ctx.create_brand("Acme").await?;
        let phone = ctx.create_phone(&acme, "Rocket").await?;
        let created = service.create(alice.id, phone.id, review(4, "good")).await?;

        let err = service.update(bob.id, created.id, review(1, "bad")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert!(matches!(service.delete(bob.id, created.id).await, Err(ServiceError::Forbidden(_))));

        let updated = service
            .update(alice.id, created.id, ReviewInput { rating: Some(0), content: Some("better".into()) })
            .await?;
        assert_eq!(updated.rating, 4);
        assert_eq!(updated.content, "better");

        let admin = ctx
            .store
            .find_account_by_username("admin")
            .await?
            .ok_or_else(|| anyhow::anyhow!("seeded admin missing"))?;
        assert_eq!(admin.role_id, ADMIN_ROLE_ID);
        service.delete(admin.id, created.id).await?;
        assert!(matches!(service.delete(alice.id, created.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
