use chrono::TimeZone;
use chrono::Utc;

use super::*;

fn source(n: usize) -> Source {
    return Source {
        title: format!("Title {n}"),
        snippet: format!("Snippet {n}"),
        url: format!("https://example.com/{n}"),
    };
}

#[test]
fn test_creates_user_messages() {
    let msg = Message::user("Hello");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "Hello");
    assert!(msg.id.starts_with("msg_"));
    assert!(!msg.used_search);
    assert!(msg.sources.is_none());
    assert!(msg.is_user());
}

#[test]
fn test_creates_fallback_messages() {
    let msg = Message::fallback();
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.content, FALLBACK_TEXT);
    assert!(msg.id.starts_with("error_"));
    assert!(!msg.used_search);
    assert!(msg.sources.is_none());
}

#[test]
fn test_generates_distinct_ids_in_the_same_millisecond() {
    let ids = (0..200).map(|_| local_id("msg")).collect::<Vec<_>>();
    let unique = ids.iter().collect::<std::collections::HashSet<_>>();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_drops_empty_source_lists() {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
    let msg = Message::assistant("a1", "Hi", ts, false, vec![]);
    assert!(msg.sources.is_none());
    assert!(msg.sources().is_empty());
}

#[test]
fn test_keeps_sources_in_order() {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
    let msg = Message::assistant("a1", "Hi", ts, true, vec![source(1), source(2)]);
    assert_eq!(msg.sources().len(), 2);
    assert_eq!(msg.sources()[0].title, "Title 1");
    assert_eq!(msg.sources()[1].title, "Title 2");
    assert!(msg.used_search);
}

#[test]
fn test_formats_time_as_hours_and_minutes() {
    let msg = Message::user("Hello");
    let formatted = msg.format_time();
    assert_eq!(formatted.len(), 5);
    assert_eq!(&formatted[2..3], ":");
}

#[test]
fn test_serializes_roles_lowercase() {
    let msg = Message::user("Hello");
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["role"], "user");
    assert!(value.get("sources").is_none());
    assert_eq!(Role::Assistant.to_string(), "assistant");
}
