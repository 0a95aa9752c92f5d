use super::*;

#[test]
fn matches_by_equal_text() {
    let a = Quote::local("same words", "x");
    let b = Quote::local("same words", "y");
    assert!(a.matches(&b));
}

#[test]
fn matches_by_server_id_when_both_present() {
    let mut a = Quote::local("one", "x");
    a.server_id = Some(7);
    let mut b = Quote::local("two", "y");
    b.server_id = Some(7);
    assert!(a.matches(&b));

    b.server_id = Some(8);
    assert!(!a.matches(&b));
}

#[test]
fn no_match_when_one_side_lacks_server_id() {
    let a = Quote::local("one", "x");
    let mut b = Quote::local("two", "y");
    b.server_id = Some(7);
    assert!(!a.matches(&b));
}

#[test]
fn quote_json_shape_uses_camel_case_server_id() {
    let mut q = Quote::local("t", "c");
    q.server_id = Some(3);
    q.resolved = true;
    let v = serde_json::to_value(&q).expect("serialize quote");
    assert_eq!(v["serverId"], 3);
    assert_eq!(v["source"], "local");
    assert_eq!(v["resolved"], true);
}

#[test]
fn optional_fields_are_omitted_when_unset() {
    let q = Quote {
        text: "t".to_string(),
        category: "c".to_string(),
        server_id: None,
        source: None,
        resolved: false,
    };
    let v = serde_json::to_value(&q).expect("serialize quote");
    let obj = v.as_object().expect("object");
    assert!(!obj.contains_key("serverId"));
    assert!(!obj.contains_key("source"));
    assert!(!obj.contains_key("resolved"));
}

#[test]
fn bare_text_category_pairs_deserialize() {
    let q: Quote =
        serde_json::from_str(r#"{"text":"t","category":"c"}"#).expect("parse bare quote");
    assert_eq!(q.text, "t");
    assert!(q.server_id.is_none());
    assert!(q.source.is_none());
    assert!(!q.resolved);
}

#[test]
fn seed_list_has_five_quotes() {
    let seed = seed_quotes();
    assert_eq!(seed.len(), 5);
    assert!(seed.iter().all(|q| !q.text.is_empty() && !q.category.is_empty()));
}
