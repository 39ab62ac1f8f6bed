//! Principal identifying who performs an operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The acting user for the current request.
///
/// Identity is established upstream by the workspace gateway; this type
/// only carries who is acting so mutations can be attributed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// The acting user's ID.
    pub user_id: Uuid,
    /// Display name forwarded by the gateway, when available.
    pub display_name: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl Principal {
    /// Creates a new principal stamped with the current time.
    pub fn new(user_id: Uuid, display_name: Option<String>) -> Self {
        Self {
            user_id,
            display_name,
            request_time: Utc::now(),
        }
    }
}
