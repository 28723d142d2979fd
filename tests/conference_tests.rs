/// Conference repository and facade tests
///
/// Cover creation under the organizer's key scope, the profile-creation
/// side effect, ancestor-scoped listing, and query outcomes with organizer
/// key prefetch.
use std::sync::Arc;

use chrono::NaiveDate;
use confcentral::query::{ConferenceQuery, Filter, FilterOp, QueryField};
use confcentral::{
    CallerIdentity, ConferenceApi, ConferenceForm, CoreError, InMemoryStore, ProfileKey,
    RecordStore,
};

fn api_with_store() -> (ConferenceApi, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    (ConferenceApi::new(store.clone()), store)
}

fn form(name: &str, city: &str, month: u32, cap: i64) -> ConferenceForm {
    ConferenceForm {
        name: name.to_string(),
        city: Some(city.to_string()),
        start_date: NaiveDate::from_ymd_opt(2026, month, 1),
        max_attendees: Some(cap),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_then_list_includes_the_conference_exactly_once() {
    let (api, _) = api_with_store();
    let alice = CallerIdentity::new("u-1", "alice@example.com");

    let created = api
        .create_conference(Some(&alice), form("RustConf", "Portland", 9, 300))
        .await
        .unwrap();

    let listed = api.get_conferences_created(Some(&alice)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
}

#[tokio::test]
async fn create_auto_creates_the_organizer_profile() {
    let (api, _) = api_with_store();
    let newcomer = CallerIdentity::new("u-9", "carol@example.com");

    assert!(api.get_profile(Some(&newcomer)).await.unwrap().is_none());

    let conference = api
        .create_conference(Some(&newcomer), form("First Conf", "Oslo", 4, 50))
        .await
        .unwrap();
    assert_eq!(conference.organizer_user_id(), "u-9");

    let profile = api.get_profile(Some(&newcomer)).await.unwrap().unwrap();
    assert_eq!(profile.display_name(), "carol");
    assert_eq!(profile.main_email(), "carol@example.com");
}

#[tokio::test]
async fn create_does_not_disturb_an_existing_profile() {
    let (api, _) = api_with_store();
    let alice = CallerIdentity::new("u-1", "alice@example.com");

    api.save_profile(
        Some(&alice),
        confcentral::ProfileForm {
            display_name: Some("Alice".to_string()),
            tee_shirt_size: None,
        },
    )
    .await
    .unwrap();

    api.create_conference(Some(&alice), form("RustConf", "Portland", 9, 300))
        .await
        .unwrap();

    let profile = api.get_profile(Some(&alice)).await.unwrap().unwrap();
    assert_eq!(profile.display_name(), "Alice");
}

#[tokio::test]
async fn conference_ids_are_unique_within_an_organizer_scope() {
    let (api, store) = api_with_store();
    let alice = CallerIdentity::new("u-1", "alice@example.com");

    let first = api
        .create_conference(Some(&alice), form("One", "A", 1, 10))
        .await
        .unwrap();
    let second = api
        .create_conference(Some(&alice), form("Two", "B", 2, 20))
        .await
        .unwrap();
    assert_ne!(first.id(), second.id());

    // Allocation alone consumes ids without writing records.
    let allocated = store
        .allocate_conference_id(&ProfileKey::new("u-1"))
        .await
        .unwrap();
    assert!(allocated > second.id());
    assert_eq!(api.get_conferences_created(Some(&alice)).await.unwrap().len(), 2);
}

#[tokio::test]
async fn listing_is_scoped_to_the_organizer() {
    let (api, _) = api_with_store();
    let alice = CallerIdentity::new("u-1", "alice@example.com");
    let bob = CallerIdentity::new("u-2", "bob@example.com");

    api.create_conference(Some(&alice), form("Alice Conf", "London", 6, 100))
        .await
        .unwrap();

    assert!(api.get_conferences_created(Some(&bob)).await.unwrap().is_empty());

    let err = api.get_conferences_created(None).await.unwrap_err();
    assert!(matches!(err, CoreError::Unauthenticated));
}

#[tokio::test]
async fn query_returns_distinct_organizer_keys_for_prefetch() {
    let (api, _) = api_with_store();
    let alice = CallerIdentity::new("u-1", "alice@example.com");
    let bob = CallerIdentity::new("u-2", "bob@example.com");

    api.create_conference(Some(&alice), form("A1", "London", 6, 100))
        .await
        .unwrap();
    api.create_conference(Some(&alice), form("A2", "Berlin", 7, 100))
        .await
        .unwrap();
    api.create_conference(Some(&bob), form("B1", "London", 6, 100))
        .await
        .unwrap();

    let outcome = api.query_conferences(ConferenceQuery::new()).await.unwrap();
    assert_eq!(outcome.conferences.len(), 3);
    assert_eq!(outcome.organizer_keys.len(), 2);
    assert!(outcome.organizer_keys.contains(&ProfileKey::new("u-1")));
    assert!(outcome.organizer_keys.contains(&ProfileKey::new("u-2")));

    let profiles = api
        .profiles()
        .get_many(&outcome.organizer_keys)
        .await
        .unwrap();
    assert!(profiles.iter().all(|p| p.is_some()));
}

#[tokio::test]
async fn query_applies_filters_and_surfaces_invalid_combinations() {
    let (api, _) = api_with_store();
    let alice = CallerIdentity::new("u-1", "alice@example.com");

    api.create_conference(Some(&alice), form("Small", "London", 6, 10))
        .await
        .unwrap();
    api.create_conference(Some(&alice), form("Big", "London", 6, 500))
        .await
        .unwrap();

    let outcome = api
        .query_conferences(
            ConferenceQuery::new()
                .filter(Filter::new(QueryField::City, FilterOp::Eq, "London"))
                .filter(Filter::new(QueryField::MaxAttendees, FilterOp::Gt, 100i64)),
        )
        .await
        .unwrap();
    assert_eq!(outcome.conferences.len(), 1);
    assert_eq!(outcome.conferences[0].name(), "Big");

    let err = api
        .query_conferences(
            ConferenceQuery::new()
                .filter(Filter::new(QueryField::Month, FilterOp::Gt, 1i64))
                .filter(Filter::new(QueryField::SeatsAvailable, FilterOp::Lt, 50i64)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidFilterCombination { .. }));
}

#[tokio::test]
async fn create_requires_a_caller() {
    let (api, _) = api_with_store();
    let err = api
        .create_conference(None, form("Nope", "Nowhere", 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Unauthenticated));
}
