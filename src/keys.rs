use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of a `Profile` record.
///
/// A thin, deterministic wrapper around the externally issued user id:
/// the same user id always produces the same key, and distinct user ids
/// produce distinct keys. Constructing a key has no side effects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileKey(String);

impl ProfileKey {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self(user_id.into())
    }

    pub fn user_id(&self) -> &str {
        &self.0
    }

    /// Stable string form used in API payloads.
    pub fn web_safe(&self) -> String {
        format!("profiles/{}", self.0)
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.web_safe())
    }
}

/// Key of a `Conference` record.
///
/// Always a child of the organizer's `ProfileKey`. The numeric id is
/// allocated by the record store and is unique within the parent's scope;
/// the ancestor relationship is what makes "conferences created by user X"
/// a strongly consistent single-ancestor query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConferenceKey {
    parent: ProfileKey,
    id: i64,
}

impl ConferenceKey {
    pub fn new(parent: ProfileKey, id: i64) -> Self {
        Self { parent, id }
    }

    pub fn parent(&self) -> &ProfileKey {
        &self.parent
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Stable string form used in API payloads.
    pub fn web_safe(&self) -> String {
        format!("{}/conferences/{}", self.parent.web_safe(), self.id)
    }
}

impl fmt::Display for ConferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.web_safe())
    }
}
