//! Path sanitizer behaviour, including the traversal-containment property.

use beacon::static_files::PathSanitizer;
use proptest::prelude::*;
use std::path::Component;

fn sanitizer() -> PathSanitizer {
    PathSanitizer::new("/spiffs", "index.html", 255)
}

fn sanitize(path: &str) -> String {
    sanitizer().sanitize(path).to_str().unwrap().to_string()
}

#[test]
fn test_root_and_empty_map_to_index() {
    assert_eq!(sanitize("/"), "/spiffs/index.html");
    assert_eq!(sanitize(""), "/spiffs/index.html");
}

#[test]
fn test_traversal_dropped_and_slashes_collapsed() {
    assert_eq!(sanitize("/a//b/../c"), "/spiffs/a/b/c");
}

#[test]
fn test_plain_file() {
    assert_eq!(sanitize("/assets/app.js"), "/spiffs/assets/app.js");
}

#[test]
fn test_path_without_leading_slash() {
    assert_eq!(sanitize("style.css"), "/spiffs/style.css");
}

#[test]
fn test_only_traversal_maps_to_index() {
    assert_eq!(sanitize("/../../.."), "/spiffs/index.html");
    assert_eq!(sanitize("////"), "/spiffs/index.html");
}

#[test]
fn test_classic_escape_attempt() {
    assert_eq!(sanitize("/../../etc/passwd"), "/spiffs/etc/passwd");
}

#[test]
fn test_lookalike_segments_are_kept_literally() {
    assert_eq!(sanitize("/.../x"), "/spiffs/.../x");
    assert_eq!(sanitize("/..foo/x"), "/spiffs/..foo/x");
}

#[test]
fn test_trailing_slash() {
    assert_eq!(sanitize("/docs/"), "/spiffs/docs");
}

#[test]
fn test_overlong_path_is_truncated_silently() {
    let segment = "s".repeat(100);
    let request = format!("/{segment}/{segment}/{segment}/tail");

    // three 100-byte segments cannot fit in 255, so the third and the tail go
    assert_eq!(sanitize(&request), format!("/spiffs/{segment}/{segment}"));
}

#[test]
fn test_custom_root_and_index() {
    let sanitizer = PathSanitizer::new("/www", "app.html", 64);
    assert_eq!(sanitizer.sanitize("/").to_str(), Some("/www/app.html"));
    assert_eq!(sanitizer.sanitize("/..").to_str(), Some("/www/app.html"));
}

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("..".to_string()),
        Just("".to_string()),
        Just(".".to_string()),
        prop::string::string_regex("[a-zA-Z0-9_.-]{1,12}").expect("valid regex"),
    ]
}

fn request_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 0..40).prop_map(|parts| format!("/{}", parts.join("/")))
}

proptest! {
    #[test]
    fn prop_result_is_contained_in_root(request in request_path_strategy()) {
        let result = sanitizer().sanitize(&request);

        prop_assert!(result.starts_with("/spiffs"));
        prop_assert!(result.to_str().unwrap().starts_with("/spiffs/"));
        prop_assert!(!result.components().any(|c| c == Component::ParentDir));
        prop_assert!(!result.to_str().unwrap().contains("//"));
    }

    #[test]
    fn prop_arbitrary_input_never_escapes(request in "\\PC{0,300}") {
        let result = sanitizer().sanitize(&request);

        prop_assert!(result.to_str().unwrap().starts_with("/spiffs/"));
        prop_assert!(!result.components().any(|c| c == Component::ParentDir));
    }

    #[test]
    fn prop_joined_part_respects_bound(request in request_path_strategy()) {
        let result = sanitizer().sanitize(&request);
        let joined = result.to_str().unwrap().trim_start_matches("/spiffs/");

        prop_assert!(joined.len() <= 255);
    }
}
