use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::database::models::{Comment, NewComment};
use crate::database::prelude::*;

use super::error::{ServiceError, ServiceResult};
use super::validation::{provided, require};
use super::caller_is_admin;

#[derive(Debug, Default, Deserialize)]
pub struct CommentInput {
    pub content: Option<String>,
}

pub struct CommentService {
    store: Arc<dyn Store>,
}

impl CommentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, account_id: i64, review_id: i64, input: CommentInput) -> ServiceResult<Comment> {
        if self.store.find_review(review_id).await?.is_none() {
            return Err(ServiceError::not_found("review"));
        }
        let content = provided(&input.content);
        require(&[("content", content.is_some())])?;

        let comment = self
            .store
            .create_comment(NewComment {
                user_id: account_id,
                review_id,
                content: content.unwrap_or_default().to_string(),
            })
            .await?;
        info!(comment_id = comment.id, account_id, review_id, "Comment created");
        Ok(comment)
    }

    pub async fn update(&self, account_id: i64, comment_id: i64, input: CommentInput) -> ServiceResult<Comment> {
        let mut comment = self.find(comment_id).await?;
        if comment.user_id != account_id {
            warn!(account_id, comment_id, "Comment update by non-owner refused");
            return Err(ServiceError::forbidden("you can only update your own comment"));
        }
        if let Some(content) = provided(&input.content) {
            comment.content = content.to_string();
        }
        Ok(self.store.update_comment(&comment).await?)
    }

    pub async fn delete(&self, account_id: i64, comment_id: i64) -> ServiceResult<()> {
        let comment = self.find(comment_id).await?;
        if comment.user_id != account_id && !caller_is_admin(self.store.as_ref(), account_id).await? {
            warn!(account_id, comment_id, "Comment delete by non-owner refused");
            return Err(ServiceError::forbidden("you can only delete your own comment"));
        }
        self.remove(comment_id).await
    }

    /// Moderation path; callers are already gated to admins
    pub async fn delete_as_admin(&self, comment_id: i64) -> ServiceResult<()> {
        self.remove(comment_id).await
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<Comment>> {
        Ok(self.store.list_comments().await?)
    }

    async fn remove(&self, comment_id: i64) -> ServiceResult<()> {
        if !self.store.delete_comment(comment_id).await? {
            return Err(ServiceError::not_found("comment"));
        }
        info!(comment_id, "Comment deleted");
        Ok(())
    }

    async fn find(&self, comment_id: i64) -> ServiceResult<Comment> {
        self.store
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("comment"))
    }
}
