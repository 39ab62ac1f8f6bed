//! In-memory object store for tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use bespire_core::result::AppResult;
use bespire_core::traits::{ObjectStore, ObjectUpload, StoredObject};

/// Object store that keeps payloads in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Bytes>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a stored payload by object id. Test helper.
    pub fn get(&self, object_id: &str) -> Option<Bytes> {
        match self.objects.lock() {
            Ok(guard) => guard.get(object_id).cloned(),
            Err(poisoned) => poisoned.into_inner().get(object_id).cloned(),
        }
    }

    /// Number of stored objects. Test helper.
    pub fn len(&self) -> usize {
        match self.objects.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, upload: ObjectUpload) -> AppResult<StoredObject> {
        let object_id = Uuid::new_v4().to_string();
        match self.objects.lock() {
            Ok(mut guard) => {
                guard.insert(object_id.clone(), upload.data);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(object_id.clone(), upload.data);
            }
        }

        Ok(StoredObject {
            url: format!("memory://{object_id}"),
            object_id,
        })
    }
}
