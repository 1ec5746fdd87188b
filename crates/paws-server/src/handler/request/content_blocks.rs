//! Content block request types.

use paws_postgres::model::{NewContentBlock, UpdateContentBlock as UpdateContentBlockModel};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use super::validations::validate_not_blank;

/// Request payload for adding a block to an organization page.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentBlock {
    /// Organization the block belongs to. Organization accounts may omit it.
    pub organization_id: Option<Uuid>,
    /// Kind of block, e.g. `text`, `gallery` or `cta`.
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    #[serde(rename = "type")]
    pub block_type: String,
    /// Free-form block content.
    pub content: Option<Value>,
    /// Display order within the page.
    #[validate(range(min = 0, max = 10_000))]
    pub position: Option<i32>,
}

impl CreateContentBlock {
    pub fn into_model(self, organization_id: Uuid) -> NewContentBlock {
        NewContentBlock {
            organization_id,
            block_type: self.block_type.trim().to_owned(),
            content: self.content,
            position: self.position,
        }
    }
}

/// Request payload for editing a content block.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentBlock {
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    #[serde(rename = "type")]
    pub block_type: Option<String>,
    pub content: Option<Value>,
    #[validate(range(min = 0, max = 10_000))]
    pub position: Option<i32>,
}

impl UpdateContentBlock {
    pub fn into_model(self) -> UpdateContentBlockModel {
        UpdateContentBlockModel {
            block_type: self.block_type.map(|block_type| block_type.trim().to_owned()),
            content: self.content,
            position: self.position,
        }
    }
}

/// Query parameters of `GET /api/content-blocks`.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContentBlocksQuery {
    pub organization_id: Uuid,
}
