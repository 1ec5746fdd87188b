//! Content block model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use crate::schema::content_blocks;

/// Piece of page content owned by exactly one organization.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = content_blocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContentBlock {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// Free-form block discriminator, e.g. `hero` or `text`.
    pub block_type: String,
    /// Block payload, interpreted by the client per `block_type`.
    pub content: Value,
    /// Sort order within the organization page.
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Data for creating a new content block.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = content_blocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewContentBlock {
    pub organization_id: Uuid,
    pub block_type: String,
    pub content: Option<Value>,
    pub position: Option<i32>,
}

/// Data for updating a content block.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = content_blocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateContentBlock {
    pub block_type: Option<String>,
    pub content: Option<Value>,
    pub position: Option<i32>,
}

impl UpdateContentBlock {
    /// Returns whether the changeset would not modify any column.
    pub fn is_empty(&self) -> bool {
        self.block_type.is_none() && self.content.is_none() && self.position.is_none()
    }
}
