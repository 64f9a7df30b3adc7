//! Resource store seam.
//!
//! Handlers reach data only through `ResourceStore`. The one implementation
//! here fabricates records and keeps nothing between calls.

use crate::resources::model::{EchoedRecord, NameFields, Record};

/// Backing store for one resource type.
pub trait ResourceStore: Send + Sync {
    fn list(&self) -> Vec<Record>;
    fn create(&self, fields: NameFields) -> Record;
    fn update(&self, id: &str, fields: NameFields) -> EchoedRecord;
    fn delete(&self, id: &str);
}

/// Stateless store returning fixed records.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    seed: Record,
    created_id: i64,
}

impl FixtureStore {
    pub const SEED_ID: i64 = 1;
    pub const CREATED_ID: i64 = 2;

    pub fn new(seed_name: impl Into<String>) -> Self {
        Self {
            seed: Record {
                id: Self::SEED_ID,
                name: seed_name.into(),
            },
            created_id: Self::CREATED_ID,
        }
    }
}

impl ResourceStore for FixtureStore {
    fn list(&self) -> Vec<Record> {
        vec![self.seed.clone()]
    }

    fn create(&self, fields: NameFields) -> Record {
        Record {
            id: self.created_id,
            name: fields.name,
        }
    }

    fn update(&self, id: &str, fields: NameFields) -> EchoedRecord {
        EchoedRecord {
            id: id.to_string(),
            name: fields.name,
        }
    }

    fn delete(&self, id: &str) {
        tracing::trace!(id, "Fixture delete is a no-op");
    }
}
