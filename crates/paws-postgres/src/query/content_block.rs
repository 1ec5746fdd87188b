//! Content block repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{ContentBlock, NewContentBlock, UpdateContentBlock};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for content block database operations.
pub trait ContentBlockRepository {
    /// Creates a new content block.
    fn create_content_block(
        &mut self,
        new_block: NewContentBlock,
    ) -> impl Future<Output = PgResult<ContentBlock>> + Send;

    /// Finds a content block by its unique identifier.
    fn find_content_block_by_id(
        &mut self,
        block_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<ContentBlock>>> + Send;

    /// Lists an organization's content blocks in display order.
    fn list_organization_content_blocks(
        &mut self,
        organization_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<ContentBlock>>> + Send;

    /// Applies a partial update.
    ///
    /// Returns `None` when the block does not exist. An empty changeset
    /// returns the current row untouched.
    fn update_content_block(
        &mut self,
        block_id: Uuid,
        updates: UpdateContentBlock,
    ) -> impl Future<Output = PgResult<Option<ContentBlock>>> + Send;

    /// Permanently deletes a content block. Returns whether a row was removed.
    fn delete_content_block(
        &mut self,
        block_id: Uuid,
    ) -> impl Future<Output = PgResult<bool>> + Send;
}

impl ContentBlockRepository for PgConnection {
    async fn create_content_block(&mut self, new_block: NewContentBlock) -> PgResult<ContentBlock> {
        use schema::content_blocks;

        diesel::insert_into(content_blocks::table)
            .values(&new_block)
            .returning(ContentBlock::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_content_block_by_id(&mut self, block_id: Uuid) -> PgResult<Option<ContentBlock>> {
        use schema::content_blocks::{self, dsl};

        content_blocks::table
            .filter(dsl::id.eq(block_id))
            .select(ContentBlock::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_organization_content_blocks(
        &mut self,
        organization_id: Uuid,
    ) -> PgResult<Vec<ContentBlock>> {
        use schema::content_blocks::{self, dsl};

        content_blocks::table
            .filter(dsl::organization_id.eq(organization_id))
            .order((dsl::position.asc(), dsl::created_at.asc()))
            .select(ContentBlock::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_content_block(
        &mut self,
        block_id: Uuid,
        updates: UpdateContentBlock,
    ) -> PgResult<Option<ContentBlock>> {
        use schema::content_blocks::{self, dsl};

        if updates.is_empty() {
            return self.find_content_block_by_id(block_id).await;
        }

        diesel::update(content_blocks::table.filter(dsl::id.eq(block_id)))
            .set(&updates)
            .returning(ContentBlock::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_content_block(&mut self, block_id: Uuid) -> PgResult<bool> {
        use schema::content_blocks::{self, dsl};

        let deleted = diesel::delete(content_blocks::table.filter(dsl::id.eq(block_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}
