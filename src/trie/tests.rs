use super::*;
use crate::grammar::Domain;

fn hipaa() -> IdentifierGrammar {
    IdentifierGrammar::preset(Domain::Hipaa).unwrap()
}

fn build(entries: &[&str]) -> RegulationTrie {
    RegulationTrie::build(entries.iter().copied(), hipaa())
}

fn sample_trie() -> RegulationTrie {
    build(&[
        "164.502 Uses and disclosures of protected health information.\n\
         (a) Standard. A covered entity may not use or disclose.\n\
         (1) Permitted uses and disclosures.\n\
         (i) To the individual;",
        "164.506 Uses and disclosures to carry out treatment.\n\
         (a) Standard: Permitted uses and disclosures.\n\
         (b) Standard: Consent for uses and disclosures permitted.",
    ])
}

#[test]
fn test_scenario_root_and_sub_item() {
    let trie = build(&["1.1 Root text\n1.1(a) Sub text"]);

    assert_eq!(trie.children_of(""), vec!["1.1"]);
    assert_eq!(trie.children_of("1.1"), vec!["1.1(a)"]);
    assert_eq!(trie.content_of("1.1(a)"), vec!["Root text", "Sub text"]);
}

#[test]
fn test_multi_fragment_first_line_roots_at_leftmost_identifier() {
    let trie = build(&["1.1(a) Sub text"]);

    assert_eq!(trie.grammar().find("1.1(a) Sub text").unwrap().identifier, "1.1");
    assert_eq!(trie.children_of(""), vec!["1.1"]);
    assert_eq!(trie.children_of("1.1"), vec!["1.1(a)"]);
    assert_eq!(trie.content_of("1.1(a)"), vec!["", "Sub text"]);
    assert_eq!(trie.resolved_line("1.1(a)").as_deref(), Some("1.1(a): Sub text"));
    assert_eq!(trie.len(), 2);
}

#[test]
fn test_multi_fragment_lines_reuse_covered_path() {
    let trie = build(&[
        "1.1 Root text\n1.1(a) Sub text\n(a)(1) Deeper",
        "2.1(b) Other",
        "2.1 Late wording\n(c) Third",
    ]);

    assert_eq!(trie.children_of(""), vec!["1.1", "2.1"]);
    assert_eq!(trie.children_of("1.1(a)"), vec!["1.1(a)(1)"]);
    assert_eq!(
        trie.describe("1.1(a)(1)").as_deref(),
        Some("Root text Sub text Deeper")
    );
    // The intermediate node created for `2.1` keeps its empty content.
    assert_eq!(trie.children_of("2.1"), vec!["2.1(b)", "2.1(c)"]);
    assert_eq!(trie.content_of("2.1"), vec![""]);
    assert_eq!(trie.candidate_line("2.1(c)"), "2.1(c) - Third");
}

#[test]
fn test_folded_identifiers_resolve_through_parents() {
    let trie = RegulationTrie::build(
        ["164.502 Root text\n164.502(a) Sub text\n164.502(a)(1) Leaf text"],
        IdentifierGrammar::preset(Domain::Combined).unwrap(),
    );

    assert_eq!(trie.children_of(""), vec!["164.502"]);
    assert_eq!(trie.children_of("164.502"), vec!["164.502(a)"]);
    assert_eq!(trie.children_of("164.502(a)"), vec!["164.502(a)(1)"]);
    assert_eq!(
        trie.resolved_line("164.502(a)").as_deref(),
        Some("164.502(a): Root text Sub text")
    );
    assert_eq!(
        trie.content_of("164.502(a)(1)"),
        vec!["Root text", "Sub text", "Leaf text"]
    );
    assert_eq!(trie.content_of("164.502(z)"), vec!["Root text"]);
    assert!(trie.resolve("164.502(z)").is_none());
}

#[test]
fn test_prefix_descent_needs_identifier_boundary() {
    let trie = build(&["1.1 Root\n1.10 Next"]);

    assert_eq!(trie.children_of(""), vec!["1.1"]);
    assert!(trie.content_of("1.10").is_empty());
    assert!(!trie.contains("1.10"));
}

#[test]
fn test_empty_corpus() {
    let trie = build(&[]);

    assert!(trie.is_empty());
    assert_eq!(trie.len(), 0);
    assert!(trie.children_of("").is_empty());
    assert!(trie.content_of("1.1").is_empty());
}

#[test]
fn test_root_children_first_seen_order() {
    let trie = build(&[
        "2.1 Second first\n(a) Child",
        "1.1 First second",
        "2.1 Repeated root\n(b) Other child",
    ]);

    assert_eq!(trie.children_of(""), vec!["2.1", "1.1"]);
    assert_eq!(trie.children_of("2.1"), vec!["2.1(a)", "2.1(b)"]);
}

#[test]
fn test_document_order_nesting() {
    let trie = sample_trie();

    // Siblings in the numbering still nest under the preceding recognized line.
    assert_eq!(trie.children_of("164.506(a)"), vec!["164.506(a)(b)"]);
    assert_eq!(trie.children_of("164.502(a)(1)"), vec!["164.502(a)(1)(i)"]);
}

#[test]
fn test_insert_is_idempotent() {
    let entry = "1.1 Root text\n(a) Sub text";
    let once = build(&[entry]);
    let twice = build(&[entry, entry]);

    assert_eq!(once.len(), 2);
    assert_eq!(twice.len(), 2);
    assert_eq!(twice.children_of(""), vec!["1.1"]);
    assert_eq!(twice.children_of("1.1"), vec!["1.1(a)"]);
    assert_eq!(twice.stats().entries, 2);
}

#[test]
fn test_existing_node_keeps_first_content() {
    let trie = build(&["1.1 First wording", "1.1 Second wording"]);
    assert_eq!(trie.content_of("1.1"), vec!["First wording"]);
}

#[test]
fn test_unrecognized_lines_are_skipped() {
    let trie = build(&["1.1 Root\nheading without number\n(a) After gap"]);

    assert_eq!(trie.stats().skipped_lines, 1);
    assert_eq!(trie.children_of("1.1"), vec!["1.1(a)"]);
    assert_eq!(trie.content_of("1.1(a)"), vec!["Root", "After gap"]);
}

#[test]
fn test_blank_lines_are_ignored() {
    let trie = build(&["\n\n1.1 Root\n\n   \n(a) Child\n"]);

    assert_eq!(trie.stats().skipped_lines, 0);
    assert_eq!(trie.len(), 2);
}

#[test]
fn test_children_of_unknown_fragment_is_empty() {
    let trie = sample_trie();

    assert!(trie.children_of("999.999").is_empty());
    assert!(trie.children_of("164.502(z)").is_empty());
    assert!(trie.children_of("no identifier here").is_empty());
}

#[test]
fn test_children_of_leaf_is_empty() {
    let trie = sample_trie();
    assert!(trie.children_of("164.502(a)(1)(i)").is_empty());
}

#[test]
fn test_content_of_partial_match() {
    let trie = sample_trie();

    let contents = trie.content_of("164.502(a)(7)");
    assert_eq!(
        contents,
        vec![
            "Uses and disclosures of protected health information.",
            "Standard. A covered entity may not use or disclose.",
        ]
    );

    assert!(trie.content_of("200.1(a)").is_empty());
}

#[test]
fn test_content_of_is_prefix_consistent() {
    let trie = sample_trie();
    let full_path = "164.502(a)(1)(i)";
    let full = trie.content_of(full_path);
    assert_eq!(full.len(), 4);

    for prefix in ["164.502", "164.502(a)", "164.502(a)(1)", full_path] {
        let partial = trie.content_of(prefix);
        assert_eq!(partial.as_slice(), &full[..partial.len()], "prefix {prefix}");
    }
}

#[test]
fn test_describe_joins_contents() {
    let trie = build(&["1.1 Root text\n1.1(a) Sub text"]);

    assert_eq!(trie.describe("1.1(a)").as_deref(), Some("Root text Sub text"));
    assert_eq!(trie.describe("9.9"), None);
}

#[test]
fn test_rendered_lines() {
    let trie = build(&["1.1 Root text\n1.1(a) Sub text"]);

    assert_eq!(trie.candidate_line("1.1(a)"), "1.1(a) - Root text Sub text");
    assert_eq!(trie.candidate_line("7.7"), "7.7 - ");
    assert_eq!(
        trie.resolved_line("1.1(a)").as_deref(),
        Some("1.1(a): Root text Sub text")
    );
    assert_eq!(trie.resolved_line("7.7"), None);
}

#[test]
fn test_resolve_and_contains() {
    let trie = sample_trie();

    assert!(trie.contains("164.506(a)"));
    assert!(!trie.contains("164.506(c)"));
    assert!(!trie.contains(""));
    assert!(trie.resolve("").is_some());
    assert_eq!(
        trie.resolve("164.506(a)").map(|n| n.fragment()),
        Some("(a)")
    );
}

#[test]
fn test_trie_is_shareable_across_threads() {
    let trie = std::sync::Arc::new(sample_trie());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let trie = std::sync::Arc::clone(&trie);
            std::thread::spawn(move || trie.children_of("").len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}
