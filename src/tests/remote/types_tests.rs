use super::*;

#[test]
fn long_bodies_truncate_to_one_hundred_chars() {
    let post = RemotePost {
        id: 1,
        title: "t".to_string(),
        body: "x".repeat(250),
    };
    let quote = post.into_quote();
    assert_eq!(quote.text.chars().count(), 103);
    assert!(quote.text.ends_with("..."));
}

#[test]
fn short_bodies_keep_full_text_plus_ellipsis() {
    let post = RemotePost {
        id: 2,
        title: "t".to_string(),
        body: "short".to_string(),
    };
    assert_eq!(post.into_quote().text, "short...");
}

#[test]
fn truncation_respects_char_boundaries() {
    let post = RemotePost {
        id: 3,
        title: "t".to_string(),
        body: "é".repeat(150),
    };
    let quote = post.into_quote();
    assert_eq!(quote.text.chars().count(), 103);
}

#[test]
fn mapped_quotes_carry_server_provenance() {
    let post = RemotePost {
        id: 42,
        title: "whatever".to_string(),
        body: "body".to_string(),
    };
    let quote = post.into_quote();
    assert_eq!(quote.category, "Server");
    assert_eq!(quote.server_id, Some(42));
    assert_eq!(quote.source, Some(QuoteSource::Server));
    assert!(!quote.resolved);
}

#[test]
fn posts_parse_with_extra_fields() {
    let posts: Vec<RemotePost> = serde_json::from_str(
        r#"[{"userId":1,"id":5,"title":"a","body":"b"},{"id":6}]"#,
    )
    .expect("parse posts");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, 5);
    assert_eq!(posts[1].body, "");
}
