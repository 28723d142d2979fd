/// Query builder tests
///
/// Cover the operator-compatibility rules (one inequality field per query,
/// inequality-first sort injection) and plan evaluation over in-memory
/// records.
use confcentral::keys::{ConferenceKey, ProfileKey};
use confcentral::models::{Conference, ConferenceForm};
use confcentral::query::{ConferenceQuery, Filter, FilterOp, QueryField};
use confcentral::{CoreError, Value};
use chrono::NaiveDate;

fn conference(organizer: &str, id: i64, name: &str, city: &str, month: u32, cap: i64) -> Conference {
    let key = ConferenceKey::new(ProfileKey::new(organizer), id);
    let form = ConferenceForm {
        name: name.to_string(),
        city: Some(city.to_string()),
        topics: vec!["Programming Languages".to_string()],
        start_date: NaiveDate::from_ymd_opt(2026, month, 1),
        max_attendees: Some(cap),
        ..Default::default()
    };
    Conference::from_form(&key, form)
}

fn fixtures() -> Vec<Conference> {
    vec![
        conference("u-1", 1, "Medical Innovations", "London", 6, 100),
        conference("u-1", 2, "Rust Belt Rust", "Columbus", 10, 250),
        conference("u-2", 1, "AI Summit", "London", 3, 800),
        conference("u-2", 2, "Data Days", "Berlin", 6, 50),
    ]
}

#[test]
fn equality_filters_combine_freely() {
    let plan = ConferenceQuery::new()
        .filter(Filter::new(QueryField::City, FilterOp::Eq, "London"))
        .filter(Filter::new(QueryField::Month, FilterOp::Eq, 6i64))
        .build()
        .unwrap();

    let result = plan.apply(fixtures()).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name(), "Medical Innovations");
}

#[test]
fn one_inequality_with_equalities_succeeds() {
    let plan = ConferenceQuery::new()
        .filter(Filter::new(QueryField::City, FilterOp::Eq, "London"))
        .filter(Filter::new(QueryField::MaxAttendees, FilterOp::Gt, 200i64))
        .build()
        .unwrap();

    let result = plan.apply(fixtures()).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name(), "AI Summit");
}

#[test]
fn two_inequality_fields_fail() {
    let err = ConferenceQuery::new()
        .filter(Filter::new(QueryField::Month, FilterOp::Gt, 5i64))
        .filter(Filter::new(QueryField::MaxAttendees, FilterOp::Lt, 500i64))
        .build()
        .unwrap_err();

    match err {
        CoreError::InvalidFilterCombination { first, second } => {
            assert_eq!(first, "MONTH");
            assert_eq!(second, "MAX_ATTENDEES");
        }
        other => panic!("expected InvalidFilterCombination, got {other:?}"),
    }
}

#[test]
fn range_over_one_field_is_a_valid_combination() {
    let plan = ConferenceQuery::new()
        .filter(Filter::new(QueryField::Month, FilterOp::GtEq, 6i64))
        .filter(Filter::new(QueryField::Month, FilterOp::LtEq, 10i64))
        .build()
        .unwrap();

    let result = plan.apply(fixtures()).unwrap();
    let names: Vec<&str> = result.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec!["Data Days", "Medical Innovations", "Rust Belt Rust"]
    );
}

#[test]
fn inequality_field_leads_the_sort_order() {
    let plan = ConferenceQuery::new()
        .filter(Filter::new(QueryField::MaxAttendees, FilterOp::Gt, 0i64))
        .order_by(QueryField::Name)
        .build()
        .unwrap();

    assert_eq!(
        plan.sort_fields(),
        &[QueryField::MaxAttendees, QueryField::Name]
    );

    let result = plan.apply(fixtures()).unwrap();
    let caps: Vec<i64> = result.iter().filter_map(|c| c.max_attendees()).collect();
    assert_eq!(caps, vec![50, 100, 250, 800]);
}

#[test]
fn no_criteria_returns_everything_sorted_by_name() {
    let plan = ConferenceQuery::new().build().unwrap();

    let result = plan.apply(fixtures()).unwrap();
    let names: Vec<&str> = result.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec![
            "AI Summit",
            "Data Days",
            "Medical Innovations",
            "Rust Belt Rust"
        ]
    );
}

#[test]
fn topic_filter_matches_list_membership() {
    let plan = ConferenceQuery::new()
        .filter(Filter::new(
            QueryField::Topic,
            FilterOp::Eq,
            "Programming Languages",
        ))
        .build()
        .unwrap();

    let result = plan.apply(fixtures()).unwrap();
    assert_eq!(result.len(), 4);

    let plan = ConferenceQuery::new()
        .filter(Filter::new(QueryField::Topic, FilterOp::Eq, "Medicine"))
        .build()
        .unwrap();
    assert!(plan.apply(fixtures()).unwrap().is_empty());
}

#[test]
fn not_equal_is_an_inequality() {
    let err = ConferenceQuery::new()
        .filter(Filter::new(QueryField::City, FilterOp::Ne, "London"))
        .filter(Filter::new(QueryField::Month, FilterOp::Gt, 1i64))
        .build()
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidFilterCombination { .. }));

    let plan = ConferenceQuery::new()
        .filter(Filter::new(QueryField::City, FilterOp::Ne, "London"))
        .build()
        .unwrap();
    let result = plan.apply(fixtures()).unwrap();
    let names: Vec<&str> = result.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Data Days", "Rust Belt Rust"]);
}

#[test]
fn records_missing_a_field_never_match() {
    let key = ConferenceKey::new(ProfileKey::new("u-3"), 1);
    let bare = Conference::from_form(
        &key,
        ConferenceForm {
            name: "No Details Yet".to_string(),
            ..Default::default()
        },
    );

    let plan = ConferenceQuery::new()
        .filter(Filter::new(QueryField::Month, FilterOp::Gt, 0i64))
        .build()
        .unwrap();
    assert!(plan.apply(vec![bare.clone()]).unwrap().is_empty());

    // Missing values sort after present ones.
    let plan = ConferenceQuery::new().order_by(QueryField::City).build().unwrap();
    let mut records = fixtures();
    records.push(bare);
    let result = plan.apply(records).unwrap();
    assert_eq!(result.last().unwrap().name(), "No Details Yet");
}

#[test]
fn mismatched_value_types_are_an_error() {
    let plan = ConferenceQuery::new()
        .filter(Filter::new(
            QueryField::Month,
            FilterOp::Gt,
            Value::Text("June".to_string()),
        ))
        .build()
        .unwrap();

    let err = plan.apply(fixtures()).unwrap_err();
    assert!(matches!(err, CoreError::TypeMismatch(_)));
}
