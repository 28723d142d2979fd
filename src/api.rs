use std::sync::Arc;

use tracing::info;

use crate::core::{CoreError, Result};
use crate::gateway::CallerIdentity;
use crate::models::{Conference, ConferenceForm, Profile, ProfileForm, default_display_name};
use crate::query::{ConferenceQuery, QueryOutcome};
use crate::repository::{ConferenceRepository, ProfileRepository};
use crate::storage::RecordStore;

/// Transport-agnostic operation surface of the backend.
///
/// Every operation that touches caller-owned data takes the identity the
/// gateway resolved (or `None`) and rejects unauthenticated calls before
/// any repository work happens. The facade owns the optional-field policy
/// of the profile form; the repositories below it only ever see concrete
/// values.
///
/// ```
/// use std::sync::Arc;
/// use confcentral::{CallerIdentity, ConferenceApi, InMemoryStore, ProfileForm};
///
/// # tokio_test::block_on(async {
/// let api = ConferenceApi::new(Arc::new(InMemoryStore::new()));
/// let alice = CallerIdentity::new("u-1", "alice@example.com");
///
/// let profile = api
///     .save_profile(Some(&alice), ProfileForm::default())
///     .await
///     .unwrap();
/// assert_eq!(profile.display_name(), "alice");
/// # });
/// ```
pub struct ConferenceApi {
    profiles: ProfileRepository,
    conferences: ConferenceRepository,
}

impl ConferenceApi {
    /// Wires the facade to a store. The store handle is the only shared
    /// resource; there is no ambient global to reach for.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            profiles: ProfileRepository::new(store.clone()),
            conferences: ConferenceRepository::new(store),
        }
    }

    pub fn profiles(&self) -> &ProfileRepository {
        &self.profiles
    }

    /// Creates or updates the caller's profile.
    ///
    /// Field policy: a supplied field always overwrites; an absent field
    /// keeps its stored value, or defaults on first creation (display name
    /// from the email local-part, size `NOT_SPECIFIED`). The email is taken
    /// from the caller identity and is immutable after creation.
    pub async fn save_profile(
        &self,
        caller: Option<&CallerIdentity>,
        form: ProfileForm,
    ) -> Result<Profile> {
        let caller = require_auth(caller)?;
        let existing = self.profiles.get(&caller.user_id).await?;

        let display_name = form
            .display_name
            .or_else(|| existing.as_ref().map(|p| p.display_name().to_string()))
            .unwrap_or_else(|| default_display_name(&caller.email));
        let tee_shirt_size = form
            .tee_shirt_size
            .or_else(|| existing.as_ref().map(|p| p.tee_shirt_size()))
            .unwrap_or_default();

        info!(user_id = %caller.user_id, "saving profile");
        self.profiles
            .upsert(&caller.user_id, &caller.email, display_name, tee_shirt_size)
            .await
    }

    /// The caller's profile, if one exists. Absence is a result, not an
    /// error.
    pub async fn get_profile(&self, caller: Option<&CallerIdentity>) -> Result<Option<Profile>> {
        let caller = require_auth(caller)?;
        self.profiles.get(&caller.user_id).await
    }

    /// Creates a conference owned by the caller, creating the caller's
    /// profile as a side effect if it does not exist yet.
    pub async fn create_conference(
        &self,
        caller: Option<&CallerIdentity>,
        form: ConferenceForm,
    ) -> Result<Conference> {
        let caller = require_auth(caller)?;
        self.conferences
            .create(&caller.user_id, &caller.email, form)
            .await
    }

    /// All conferences the caller organizes.
    pub async fn get_conferences_created(
        &self,
        caller: Option<&CallerIdentity>,
    ) -> Result<Vec<Conference>> {
        let caller = require_auth(caller)?;
        self.conferences.list_by_organizer(&caller.user_id).await
    }

    /// Queries all conferences. Open to unauthenticated callers.
    pub async fn query_conferences(&self, query: ConferenceQuery) -> Result<QueryOutcome> {
        self.conferences.query(query).await
    }
}

fn require_auth(caller: Option<&CallerIdentity>) -> Result<&CallerIdentity> {
    caller.ok_or(CoreError::Unauthenticated)
}
