pub mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;

use crate::core::Result;
use crate::keys::{ConferenceKey, ProfileKey};
use crate::models::{Conference, Profile};
use crate::query::QueryPlan;

/// Contract of the durable record store the repositories run against.
///
/// Implementations must provide per-key strong consistency and strongly
/// consistent ancestor-scoped queries (`list_conferences_by_organizer`);
/// the global `query_conferences` path may be eventually consistent.
/// Infrastructure failures surface as `CoreError::Store` and are never
/// retried here. Repository operations are safe to retry whole, except
/// conference creation (see `allocate_conference_id`).
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get_profile(&self, key: &ProfileKey) -> Result<Option<Profile>>;

    /// Batch lookup, in key order. Absent profiles come back as `None`.
    async fn get_profiles(&self, keys: &[ProfileKey]) -> Result<Vec<Option<Profile>>>;

    async fn put_profile(&self, profile: &Profile) -> Result<()>;

    /// Consumes a fresh conference id from the sequence scoped under
    /// `parent`. No record is written; two calls never return the same id
    /// for the same parent. Callers must allocate before writing anything
    /// so an allocation failure leaves no half-created record.
    async fn allocate_conference_id(&self, parent: &ProfileKey) -> Result<i64>;

    async fn get_conference(&self, key: &ConferenceKey) -> Result<Option<Conference>>;

    async fn put_conference(&self, conference: &Conference) -> Result<()>;

    /// All conferences whose key is scoped under the organizer's profile
    /// key, in store order.
    async fn list_conferences_by_organizer(&self, organizer: &ProfileKey)
    -> Result<Vec<Conference>>;

    /// Executes a validated plan over all conference records.
    async fn query_conferences(&self, plan: &QueryPlan) -> Result<Vec<Conference>>;
}
