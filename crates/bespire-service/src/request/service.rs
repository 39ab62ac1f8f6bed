//! Request mutation with changelog snapshotting, and changelog reads.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use bespire_core::error::AppError;
use bespire_core::result::AppResult;
use bespire_database::repositories::changelog::ChangelogRepository;
use bespire_database::repositories::lookup::LookupRepository;
use bespire_database::repositories::request::RequestRepository;
use bespire_entity::request::{
    CreateRequest, NewRequestSnapshot, Request, RequestPatch, RequestPriority, RequestSnapshot,
    RequestStatus, changed_fields,
};

use crate::context::Principal;

/// An id paired with its resolved display name, when known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    /// The referenced id.
    pub id: Uuid,
    /// Display name, absent when the referenced row no longer exists.
    pub name: Option<String>,
}

/// A changelog entry with display names resolved for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogEntryView {
    /// Snapshot id.
    pub id: Uuid,
    /// Names of the fields the mutation changed.
    pub changed_fields: Vec<String>,
    /// Post-change title.
    pub title: String,
    /// Post-change status.
    pub status: RequestStatus,
    /// Post-change priority.
    pub priority: RequestPriority,
    /// Post-change client due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Post-change internal deadline.
    pub internal_due_date: Option<DateTime<Utc>>,
    /// Post-change assignees with names.
    pub assignees: Vec<NamedRef>,
    /// Post-change brand with name.
    pub brand: Option<NamedRef>,
    /// Post-change service line with name.
    pub service: Option<NamedRef>,
    /// Who performed the mutation.
    pub actor: Option<NamedRef>,
    /// When the snapshot was recorded.
    pub created_at: DateTime<Utc>,
}

/// Handles request updates and their append-only changelog.
#[derive(Debug, Clone)]
pub struct RequestService {
    /// Request repository.
    requests: Arc<RequestRepository>,
    /// Changelog repository.
    changelog: Arc<ChangelogRepository>,
    /// Display-name lookups.
    lookups: Arc<LookupRepository>,
}

impl RequestService {
    /// Creates a new request service.
    pub fn new(
        requests: Arc<RequestRepository>,
        changelog: Arc<ChangelogRepository>,
        lookups: Arc<LookupRepository>,
    ) -> Self {
        Self {
            requests,
            changelog,
            lookups,
        }
    }

    /// Gets a single request.
    pub async fn get_request(&self, id: Uuid) -> AppResult<Request> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Request not found"))
    }

    /// Creates a request in the `pending` state and records its first
    /// changelog snapshot.
    pub async fn create_request(
        &self,
        principal: &Principal,
        data: CreateRequest,
    ) -> AppResult<Request> {
        let created = self.requests.create(&data).await?;

        self.record_snapshot(
            &created,
            vec!["created".to_string()],
            Some(principal.user_id),
        )
        .await;

        info!(user_id = %principal.user_id, request_id = %created.id, "Request created");

        Ok(created)
    }

    /// Applies a partial update and appends a changelog snapshot.
    ///
    /// The diff is computed before writing. A patch that changes nothing
    /// returns the current row; no update is written and no snapshot is
    /// recorded.
    pub async fn update_request(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: RequestPatch,
    ) -> AppResult<Request> {
        let before = self.get_request(id).await?;
        let after = patch.apply_to(before.clone(), principal.request_time);

        let changed = changed_fields(&before, &after);
        if changed.is_empty() {
            return Ok(before);
        }

        let updated = self.requests.update(&after).await?;

        self.record_snapshot(&updated, changed, Some(principal.user_id))
            .await;

        info!(user_id = %principal.user_id, request_id = %id, "Request updated");

        Ok(updated)
    }

    /// Reads the changelog for a request, newest first, with assignee,
    /// brand, service, and actor names resolved in batch.
    pub async fn changelog(&self, request_id: Uuid) -> AppResult<Vec<ChangelogEntryView>> {
        self.get_request(request_id).await?;

        let snapshots = self.changelog.list_for_request(request_id).await?;

        let mut user_ids: Vec<Uuid> = Vec::new();
        let mut brand_ids: Vec<Uuid> = Vec::new();
        let mut service_ids: Vec<Uuid> = Vec::new();
        for snapshot in &snapshots {
            user_ids.extend(&snapshot.assignees);
            user_ids.extend(snapshot.created_by);
            brand_ids.extend(snapshot.brand_id);
            service_ids.extend(snapshot.service_id);
        }
        user_ids.sort();
        user_ids.dedup();
        brand_ids.sort();
        brand_ids.dedup();
        service_ids.sort();
        service_ids.dedup();

        let users = self.lookups.member_names(&user_ids).await?;
        let brands = self.lookups.brand_names(&brand_ids).await?;
        let services = self.lookups.service_names(&service_ids).await?;

        Ok(snapshots
            .into_iter()
            .map(|s| resolve_snapshot(s, &users, &brands, &services))
            .collect())
    }

    /// Append a snapshot; a failure is logged, not surfaced, since the
    /// mutation it records has already been committed.
    async fn record_snapshot(&self, request: &Request, changed: Vec<String>, actor: Option<Uuid>) {
        let snapshot = NewRequestSnapshot::capture(request, changed, actor);
        if let Err(e) = self.changelog.insert(&snapshot).await {
            warn!(request_id = %request.id, error = %e, "Failed to record changelog snapshot");
        }
    }
}

fn resolve_snapshot(
    snapshot: RequestSnapshot,
    users: &HashMap<Uuid, String>,
    brands: &HashMap<Uuid, String>,
    services: &HashMap<Uuid, String>,
) -> ChangelogEntryView {
    let named = |map: &HashMap<Uuid, String>, id: Uuid| NamedRef {
        id,
        name: map.get(&id).cloned(),
    };

    ChangelogEntryView {
        id: snapshot.id,
        changed_fields: snapshot.changed_fields,
        title: snapshot.title,
        status: snapshot.status,
        priority: snapshot.priority,
        due_date: snapshot.due_date,
        internal_due_date: snapshot.internal_due_date,
        assignees: snapshot
            .assignees
            .iter()
            .map(|&id| named(users, id))
            .collect(),
        brand: snapshot.brand_id.map(|id| named(brands, id)),
        service: snapshot.service_id.map(|id| named(services, id)),
        actor: snapshot.created_by.map(|id| named(users, id)),
        created_at: snapshot.created_at,
    }
}
