use std::sync::Arc;

use tracing::debug;

use crate::core::Result;
use crate::keys::ProfileKey;
use crate::models::{Profile, TeeShirtSize, default_display_name};
use crate::storage::RecordStore;

/// Profile persistence logic over an injected record store.
///
/// Callers are expected to have a resolved user id already; identity
/// enforcement happens in the API facade, never here. Read-then-write
/// sequences are not transactional, so concurrent calls for the same
/// user id are last-writer-wins.
#[derive(Clone)]
pub struct ProfileRepository {
    store: Arc<dyn RecordStore>,
}

impl ProfileRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Pure lookup, no writes.
    pub async fn get(&self, user_id: &str) -> Result<Option<Profile>> {
        self.store.get_profile(&ProfileKey::new(user_id)).await
    }

    /// Batch lookup for query callers prefetching organizer profiles.
    pub async fn get_many(&self, keys: &[ProfileKey]) -> Result<Vec<Option<Profile>>> {
        self.store.get_profiles(keys).await
    }

    /// Loads the profile, creating it on first access.
    ///
    /// A freshly created profile gets the email local-part as display name
    /// and `NOT_SPECIFIED` as tee shirt size. An existing profile is
    /// returned untouched.
    pub async fn get_or_create(&self, user_id: &str, email: &str) -> Result<Profile> {
        let key = ProfileKey::new(user_id);
        if let Some(profile) = self.store.get_profile(&key).await? {
            return Ok(profile);
        }

        debug!(user_id, "creating profile on first access");
        let profile = Profile::new(
            user_id,
            default_display_name(email),
            email,
            TeeShirtSize::NotSpecified,
        );
        self.store.put_profile(&profile).await?;
        Ok(profile)
    }

    /// Create-if-absent-else-update-in-place.
    ///
    /// Both mutable fields are required here; optional-field defaulting is
    /// the facade's concern. On an existing profile only `display_name` and
    /// `tee_shirt_size` are overwritten; the stored email and user id are
    /// never touched.
    pub async fn upsert(
        &self,
        user_id: &str,
        email: &str,
        display_name: impl Into<String>,
        tee_shirt_size: TeeShirtSize,
    ) -> Result<Profile> {
        let key = ProfileKey::new(user_id);
        let profile = match self.store.get_profile(&key).await? {
            Some(mut existing) => {
                existing.update(display_name, tee_shirt_size);
                existing
            }
            None => Profile::new(user_id, display_name, email, tee_shirt_size),
        };
        self.store.put_profile(&profile).await?;
        Ok(profile)
    }
}
