use super::*;

use crate::model::QuoteSource;

fn server_quote(id: u64, text: &str) -> Quote {
    Quote {
        text: text.to_string(),
        category: "Server".to_string(),
        server_id: Some(id),
        source: Some(QuoteSource::Server),
        resolved: false,
    }
}

#[test]
fn unmatched_candidates_are_appended() {
    let mut quotes = vec![Quote::local("existing", "x")];
    let outcome = merge_candidates(
        &mut quotes,
        vec![server_quote(1, "fresh"), server_quote(2, "also fresh")],
        server_wins,
    );
    assert_eq!(outcome, MergeOutcome { added: 2, resolved: 0 });
    assert_eq!(quotes.len(), 3);
}

#[test]
fn merge_is_idempotent_for_unchanged_remote() {
    let mut quotes = Vec::new();
    let page = vec![server_quote(1, "one"), server_quote(2, "two")];

    let first = merge_candidates(&mut quotes, page.clone(), server_wins);
    assert_eq!(first.added, 2);

    let second = merge_candidates(&mut quotes, page, server_wins);
    assert_eq!(second, MergeOutcome::default());
    assert_eq!(quotes.len(), 2);
}

#[test]
fn server_id_conflict_replaces_local_in_place() {
    let mut local = Quote::local("A", "x");
    local.server_id = Some(1);
    let mut quotes = vec![local];

    let outcome = merge_candidates(&mut quotes, vec![server_quote(1, "B")], server_wins);
    assert_eq!(outcome, MergeOutcome { added: 0, resolved: 1 });
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].text, "B");
    assert_eq!(quotes[0].source, Some(QuoteSource::Server));
    assert!(quotes[0].resolved);
}

#[test]
fn keep_local_resolver_leaves_conflicts_untouched() {
    fn keep_local(_l: &Quote, _c: &Quote) -> ConflictResolution {
        ConflictResolution::KeepLocal
    }

    let mut local = Quote::local("A", "x");
    local.server_id = Some(1);
    let mut quotes = vec![local.clone()];

    let outcome = merge_candidates(&mut quotes, vec![server_quote(1, "B")], keep_local);
    assert_eq!(outcome, MergeOutcome::default());
    assert_eq!(quotes[0], local);
}

#[test]
fn server_origin_matches_are_not_conflicts() {
    // A quote we already took from the server is never re-resolved, even if
    // the remote body has since changed.
    let mut quotes = vec![server_quote(1, "old body")];
    let outcome = merge_candidates(&mut quotes, vec![server_quote(1, "new body")], server_wins);
    assert_eq!(outcome, MergeOutcome::default());
    assert_eq!(quotes[0].text, "old body");
}

#[test]
fn text_match_with_differing_category_is_ignored() {
    let mut quotes = vec![Quote::local("shared words", "Life")];
    let outcome = merge_candidates(
        &mut quotes,
        vec![server_quote(9, "shared words")],
        server_wins,
    );
    assert_eq!(outcome, MergeOutcome::default());
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].category, "Life");
}
