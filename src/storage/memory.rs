use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::core::Result;
use crate::keys::{ConferenceKey, ProfileKey};
use crate::models::{Conference, Profile};
use crate::query::QueryPlan;

/// In-memory reference implementation of [`RecordStore`].
///
/// Conferences live in a `BTreeMap` keyed by `(organizer, id)`, so an
/// ancestor query is a contiguous range scan over the organizer's slice of
/// the map. Conference id sequences are tracked per parent and start at 1;
/// allocation only bumps the sequence, it never writes a record.
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    /// Profiles keyed by user id.
    profiles: HashMap<String, Profile>,
    /// Conferences keyed by (organizer user id, conference id).
    conferences: BTreeMap<(String, i64), Conference>,
    /// Next conference id per organizer scope.
    sequences: HashMap<String, i64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn get_profile(&self, key: &ProfileKey) -> Result<Option<Profile>> {
        let inner = self.inner.read().await;
        Ok(inner.profiles.get(key.user_id()).cloned())
    }

    async fn get_profiles(&self, keys: &[ProfileKey]) -> Result<Vec<Option<Profile>>> {
        let inner = self.inner.read().await;
        Ok(keys
            .iter()
            .map(|key| inner.profiles.get(key.user_id()).cloned())
            .collect())
    }

    async fn put_profile(&self, profile: &Profile) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .profiles
            .insert(profile.user_id().to_string(), profile.clone());
        Ok(())
    }

    async fn allocate_conference_id(&self, parent: &ProfileKey) -> Result<i64> {
        let mut inner = self.inner.write().await;
        let next = inner
            .sequences
            .entry(parent.user_id().to_string())
            .or_insert(1);
        let id = *next;
        *next += 1;
        Ok(id)
    }

    async fn get_conference(&self, key: &ConferenceKey) -> Result<Option<Conference>> {
        let inner = self.inner.read().await;
        Ok(inner
            .conferences
            .get(&(key.parent().user_id().to_string(), key.id()))
            .cloned())
    }

    async fn put_conference(&self, conference: &Conference) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.conferences.insert(
            (conference.organizer_user_id().to_string(), conference.id()),
            conference.clone(),
        );
        Ok(())
    }

    async fn list_conferences_by_organizer(
        &self,
        organizer: &ProfileKey,
    ) -> Result<Vec<Conference>> {
        let inner = self.inner.read().await;
        let uid = organizer.user_id().to_string();
        Ok(inner
            .conferences
            .range((uid.clone(), i64::MIN)..=(uid, i64::MAX))
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn query_conferences(&self, plan: &QueryPlan) -> Result<Vec<Conference>> {
        let all: Vec<Conference> = {
            let inner = self.inner.read().await;
            inner.conferences.values().cloned().collect()
        };
        plan.apply(all)
    }
}
