//! Content block response types.

use jiff::Timestamp;
use paws_postgres::model;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Content block response.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub id: Uuid,
    pub organization_id: Uuid,
    #[serde(rename = "type")]
    pub block_type: String,
    pub content: Value,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContentBlock {
    pub fn from_model(block: model::ContentBlock) -> Self {
        Self {
            id: block.id,
            organization_id: block.organization_id,
            block_type: block.block_type,
            content: block.content,
            position: block.position,
            created_at: block.created_at.into(),
            updated_at: block.updated_at.into(),
        }
    }

    pub fn from_models(blocks: Vec<model::ContentBlock>) -> ContentBlocks {
        blocks.into_iter().map(Self::from_model).collect()
    }
}

/// Response for listing the blocks of an organization page.
pub type ContentBlocks = Vec<ContentBlock>;
