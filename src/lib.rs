//! Conference Central backend library.
//!
//! Profiles and conferences are persisted through a pluggable
//! [`RecordStore`]; conference keys are scoped under their organizer's
//! profile key, which is what makes "conferences created by user X" a
//! strongly consistent ancestor query. The backend is used through
//! [`ConferenceApi`], wired to a store at construction time.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use confcentral::{
//!     CallerIdentity, ConferenceApi, ConferenceForm, ConferenceQuery, InMemoryStore,
//! };
//!
//! # tokio_test::block_on(async {
//! let api = ConferenceApi::new(Arc::new(InMemoryStore::new()));
//! let organizer = CallerIdentity::new("u-1", "alice@example.com");
//!
//! let form = ConferenceForm {
//!     name: "RustConf".to_string(),
//!     ..Default::default()
//! };
//! let conference = api
//!     .create_conference(Some(&organizer), form)
//!     .await
//!     .unwrap();
//! assert_eq!(conference.organizer_user_id(), "u-1");
//!
//! let outcome = api.query_conferences(ConferenceQuery::new()).await.unwrap();
//! assert_eq!(outcome.conferences.len(), 1);
//! # });
//! ```

pub mod api;
pub mod core;
pub mod gateway;
pub mod keys;
pub mod models;
pub mod query;
pub mod repository;
pub mod storage;
pub mod web;

// Re-export main types for convenience
pub use api::ConferenceApi;
pub use core::{CoreError, Result, Value};
pub use gateway::{CallerIdentity, IdentityGateway, TokenRegistry};
pub use keys::{ConferenceKey, ProfileKey};
pub use models::{Conference, ConferenceForm, Profile, ProfileForm, TeeShirtSize};
pub use query::{ConferenceQuery, Filter, FilterOp, QueryField, QueryOutcome};
pub use storage::{InMemoryStore, RecordStore};
