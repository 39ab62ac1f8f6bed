//! Tag vocabulary operations: listing and create-or-reuse.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use bespire_core::result::AppResult;
use bespire_database::repositories::tag::TagRepository;
use bespire_entity::tag::{CreateTag, Tag};

use crate::context::Principal;
use crate::file::service::validated_name;

/// Handles the per-workspace tag vocabulary.
#[derive(Debug, Clone)]
pub struct TagService {
    /// Tag repository.
    tags: Arc<TagRepository>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tags: Arc<TagRepository>) -> Self {
        Self { tags }
    }

    /// Lists tags in a workspace, optionally filtered by a substring.
    pub async fn list_tags(&self, workspace_id: Uuid, search: Option<&str>) -> AppResult<Vec<Tag>> {
        self.tags.list(workspace_id, search).await
    }

    /// Creates a tag, or returns the existing one with the same name.
    ///
    /// The name match is exact and case-sensitive. Check-before-insert with
    /// no database constraint behind it: two concurrent creates of the same
    /// name can both insert, and listing then shows the duplicate.
    pub async fn create_tag(
        &self,
        principal: &Principal,
        workspace_id: Uuid,
        name: &str,
    ) -> AppResult<Tag> {
        let name = validated_name(name)?;

        if let Some(existing) = self.tags.find_by_name(workspace_id, &name).await? {
            return Ok(existing);
        }

        let tag = self
            .tags
            .create(&CreateTag {
                workspace_id,
                name,
                created_by: Some(principal.user_id),
            })
            .await?;

        info!(user_id = %principal.user_id, tag_id = %tag.id, name = %tag.name, "Tag created");

        Ok(tag)
    }
}
