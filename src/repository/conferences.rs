use std::sync::Arc;

use tracing::info;

use crate::core::Result;
use crate::keys::{ConferenceKey, ProfileKey};
use crate::models::{Conference, ConferenceForm};
use crate::query::{ConferenceQuery, QueryOutcome};
use crate::repository::ProfileRepository;
use crate::storage::RecordStore;

/// Conference persistence logic over an injected record store.
#[derive(Clone)]
pub struct ConferenceRepository {
    store: Arc<dyn RecordStore>,
    profiles: ProfileRepository,
}

impl ConferenceRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let profiles = ProfileRepository::new(store.clone());
        Self { store, profiles }
    }

    /// Creates a conference owned by the organizer's profile.
    ///
    /// Resolves the organizer profile first, creating it if this is the
    /// organizer's first interaction, so callers must expect a profile to
    /// exist afterward even if none did before. The conference id is
    /// allocated under the profile key before anything is written, so an
    /// allocation failure leaves no half-created record.
    pub async fn create(
        &self,
        organizer_user_id: &str,
        email: &str,
        form: ConferenceForm,
    ) -> Result<Conference> {
        let profile = self.profiles.get_or_create(organizer_user_id, email).await?;
        let parent = profile.key();

        let id = self.store.allocate_conference_id(&parent).await?;
        let key = ConferenceKey::new(parent, id);

        let conference = Conference::from_form(&key, form);
        self.store.put_conference(&conference).await?;
        info!(organizer = organizer_user_id, key = %key, "conference created");
        Ok(conference)
    }

    /// All conferences created by the given organizer.
    ///
    /// A single-ancestor query under the organizer's profile key, so the
    /// result is strongly consistent with preceding writes.
    pub async fn list_by_organizer(&self, user_id: &str) -> Result<Vec<Conference>> {
        self.store
            .list_conferences_by_organizer(&ProfileKey::new(user_id))
            .await
    }

    /// Runs a declarative query over all conferences.
    ///
    /// The outcome carries the distinct organizer keys of the result set so
    /// callers can batch-prefetch organizer profiles in one store call.
    pub async fn query(&self, query: ConferenceQuery) -> Result<QueryOutcome> {
        let plan = query.build()?;
        let conferences = self.store.query_conferences(&plan).await?;
        Ok(QueryOutcome::from_conferences(conferences))
    }
}
