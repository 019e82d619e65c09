use super::state::SearchState;
use super::*;
use crate::grammar::{Domain, IdentifierGrammar};
use crate::oracle::{OracleError, ScriptedOracle};
use crate::trie::RegulationTrie;

fn trie() -> RegulationTrie {
    RegulationTrie::build(
        [
            "1.1 General provisions\n(a) Scope of the rule\n(1) Covered entities",
            "2.1 Uses and disclosures\n(a) Permitted uses",
            "3.1 Penalties",
        ],
        IdentifierGrammar::preset(Domain::Hipaa).unwrap(),
    )
}

fn config(max_law_items: usize, max_depth: usize, generation_steps: usize) -> BeamConfig {
    BeamConfig::new(max_law_items, max_depth, generation_steps)
}

const NONE: [&str; 0] = [];

#[test]
fn test_growing_pool_schedule() {
    let policy = GrowingPool;

    let first = policy.initial(3);
    assert_eq!(first, PoolSizes::new(1, 1));

    let second = policy.next(first, 1, 3);
    assert_eq!(second, PoolSizes::new(2, 2));

    let third = policy.next(second, 2, 3);
    assert_eq!(third, PoolSizes::new(3, 1));

    assert_eq!(policy.next(third, 3, 3), PoolSizes::new(3, 0));
    assert_eq!(policy.next(third, 5, 3), PoolSizes::new(3, 0));
}

#[test]
fn test_fixed_pool_never_changes() {
    let policy = FixedPool(PoolSizes::new(2, 4));
    assert_eq!(policy.initial(10), PoolSizes::new(2, 4));
    assert_eq!(policy.next(PoolSizes::new(2, 4), 3, 10), PoolSizes::new(2, 4));
}

#[test]
fn test_state_merge_respects_allowance_and_max() {
    let mut state = SearchState::new(PoolSizes::new(1, 1), Vec::new());

    let ids = |raw: &[&str]| raw.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    assert_eq!(state.merge_selected(ids(&["a", "b"]), 1, 3), 1);
    assert_eq!(state.merge_selected(ids(&[" a ", "", "c"]), 3, 3), 1);
    assert_eq!(state.merge_selected(ids(&["d", "e"]), 2, 3), 1);
    assert_eq!(state.merge_selected(ids(&["f"]), 1, 3), 0);
    assert_eq!(state.selected_count(), 3);
    assert_eq!(state.into_selected(), vec!["a", "c", "d"]);
}

#[test]
fn test_config_validate() {
    assert!(BeamConfig::default().validate().is_ok());
    assert!(config(3, 0, 5).validate().is_err());
    assert!(config(3, 5, 0).validate().is_err());
}

#[tokio::test]
async fn test_quota_reached_with_growing_pools() {
    let trie = trie();
    let oracle = ScriptedOracle::new()
        .then_propose(["1.1", "2.1"], ["3.1", "2.1"])
        .then_propose(["1.1(a)"], ["2.1(a)"])
        .then_propose(NONE, ["1.1(a)(1)", "1.1"]);

    let searcher = BeamSearcher::new(&trie, &oracle, config(3, 5, 1));
    let outcome = searcher.search("a clinic shares records").await;

    assert_eq!(outcome.termination, Termination::QuotaReached);
    assert_eq!(outcome.rounds, 3);
    assert_eq!(outcome.selected, vec!["3.1", "2.1(a)", "1.1(a)(1)"]);
    assert_eq!(
        outcome.resolved,
        vec![
            "3.1: Penalties",
            "2.1(a): Uses and disclosures Permitted uses",
            "1.1(a)(1): General provisions Scope of the rule Covered entities",
        ]
    );

    let requests = oracle.requests();
    let budgets: Vec<(usize, usize)> = requests
        .iter()
        .map(|r| (r.look_up_budget, r.selected_budget))
        .collect();
    assert_eq!(budgets, vec![(1, 1), (2, 2), (3, 1)]);

    assert_eq!(requests[0].scenario, "a clinic shares records");
    assert_eq!(
        requests[0].candidate_lines(),
        vec![
            "1.1 - General provisions",
            "2.1 - Uses and disclosures",
            "3.1 - Penalties"
        ]
    );
    assert_eq!(
        requests[1].candidates,
        "1.1(a) - General provisions Scope of the rule \n\
         2.1(a) - Uses and disclosures Permitted uses"
    );
    assert_eq!(
        requests[2].candidate_lines(),
        vec!["1.1(a)(1) - General provisions Scope of the rule Covered entities"]
    );
}

#[tokio::test]
async fn test_empty_look_up_stops() {
    let trie = trie();
    let oracle = ScriptedOracle::new().then_propose(NONE, ["1.1"]);

    let outcome = BeamSearcher::new(&trie, &oracle, config(3, 5, 1))
        .search("scenario")
        .await;

    assert_eq!(outcome.termination, Termination::NoLookUp);
    assert_eq!(outcome.rounds, 1);
    assert_eq!(outcome.resolved, vec!["1.1: General provisions"]);
    assert_eq!(outcome.reference_text(), "1.1: General provisions");
}

#[tokio::test]
async fn test_exhausted_attempts_degrade_to_empty_round() {
    let trie = trie();
    let oracle = ScriptedOracle::new()
        .then_fail(OracleError::transient("timeout"))
        .then_fail(OracleError::malformed("no lookup section"));

    let outcome = BeamSearcher::new(&trie, &oracle, config(3, 5, 2))
        .search("scenario")
        .await;

    assert_eq!(oracle.call_count(), 2);
    assert_eq!(outcome.termination, Termination::NoLookUp);
    assert_eq!(outcome.rounds, 1);
    assert!(outcome.selected.is_empty());
    assert!(outcome.resolved.is_empty());
}

#[tokio::test]
async fn test_failed_attempt_is_retried_within_round() {
    let trie = trie();
    let oracle = ScriptedOracle::new()
        .then_fail(OracleError::transient("rate limited"))
        .then_propose(NONE, ["2.1"]);

    let outcome = BeamSearcher::new(&trie, &oracle, config(3, 5, 2))
        .search("scenario")
        .await;

    assert_eq!(oracle.call_count(), 2);
    assert_eq!(outcome.rounds, 1);
    assert_eq!(outcome.selected, vec!["2.1"]);
}

#[tokio::test]
async fn test_unresolved_identifiers_are_dropped() {
    let trie = trie();
    let oracle = ScriptedOracle::new().then_propose(NONE, ["9.9"]);

    let outcome = BeamSearcher::new(&trie, &oracle, config(3, 5, 1))
        .search("scenario")
        .await;

    assert_eq!(outcome.selected, vec!["9.9"]);
    assert!(outcome.resolved.is_empty());
}

#[tokio::test]
async fn test_depth_exhausted() {
    let trie = trie();
    let oracle = ScriptedOracle::new()
        .then_propose(["1.1"], NONE)
        .then_propose(["1.1(a)"], NONE)
        .then_propose(["1.1(a)(1)"], NONE);

    let outcome = BeamSearcher::new(&trie, &oracle, config(3, 2, 1))
        .search("scenario")
        .await;

    assert_eq!(outcome.termination, Termination::DepthExhausted);
    assert_eq!(outcome.rounds, 2);
    assert_eq!(oracle.call_count(), 2);
    assert_eq!(oracle.remaining(), 1);
}

#[tokio::test]
async fn test_frontier_exhausted_after_leaf_expansion() {
    let trie = trie();
    let oracle = ScriptedOracle::new().then_propose(["3.1"], NONE);

    let outcome = BeamSearcher::new(&trie, &oracle, config(3, 5, 1))
        .search("scenario")
        .await;

    assert_eq!(outcome.termination, Termination::FrontierExhausted);
    assert_eq!(outcome.rounds, 1);
    assert_eq!(oracle.call_count(), 1);
}

#[tokio::test]
async fn test_empty_trie_never_calls_oracle() {
    let trie = RegulationTrie::build(
        Vec::<String>::new(),
        IdentifierGrammar::preset(Domain::Hipaa).unwrap(),
    );
    let oracle = ScriptedOracle::new();

    let outcome = BeamSearcher::new(&trie, &oracle, BeamConfig::default())
        .search("scenario")
        .await;

    assert_eq!(outcome.termination, Termination::FrontierExhausted);
    assert_eq!(outcome.rounds, 0);
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_zero_quota_returns_immediately() {
    let trie = trie();
    let oracle = ScriptedOracle::new();

    let outcome = BeamSearcher::new(&trie, &oracle, config(0, 5, 1))
        .search("scenario")
        .await;

    assert_eq!(outcome.termination, Termination::QuotaReached);
    assert!(outcome.selected.is_empty());
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_selected_never_exceeds_quota() {
    let trie = trie();
    let oracle = ScriptedOracle::new().then_propose(["1.1"], ["1.1", "2.1", "3.1"]);

    let outcome = BeamSearcher::new(&trie, &oracle, config(2, 5, 1))
        .with_policy(FixedPool(PoolSizes::new(5, 5)))
        .search("scenario")
        .await;

    assert_eq!(outcome.termination, Termination::QuotaReached);
    assert_eq!(outcome.selected, vec!["1.1", "2.1"]);
}

#[tokio::test]
async fn test_search_many_runs_independent_sessions() {
    let trie = trie();
    let oracle = ScriptedOracle::new()
        .then_propose(NONE, ["2.1"])
        .then_propose(NONE, ["2.1"]);

    let searcher = BeamSearcher::new(&trie, &oracle, config(3, 5, 1));
    let outcomes = searcher.search_many(&["first", "second"]).await;

    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        assert_eq!(outcome.resolved, vec!["2.1: Uses and disclosures"]);
    }

    let mut scenarios: Vec<String> = oracle.requests().into_iter().map(|r| r.scenario).collect();
    scenarios.sort();
    assert_eq!(scenarios, vec!["first", "second"]);
}

#[tokio::test]
async fn test_search_descends_under_every_preset() {
    let cases = [
        (Domain::Hipaa, "1.1 Root text\n(a) Child text", "1.1", "1.1(a)"),
        (
            Domain::Gdpr,
            "Article 6 Root text\nArticle 6(1) Child text",
            "Article 6",
            "Article 6(1)",
        ),
        (
            Domain::AiAct,
            "eu_ai_act.chapter2.article5 Root text\n\
             eu_ai_act.chapter2.article5.paragraph1 Child text",
            "eu_ai_act.chapter2.article5",
            "eu_ai_act.chapter2.article5.paragraph1",
        ),
        (
            Domain::Combined,
            "164.502 Root text\n164.502(a) Child text",
            "164.502",
            "164.502(a)",
        ),
    ];

    for (domain, entry, root, child) in cases {
        let trie = RegulationTrie::build([entry], IdentifierGrammar::preset(domain).unwrap());
        let oracle = ScriptedOracle::new()
            .then_propose([root], NONE)
            .then_propose(NONE, [child]);

        let outcome = BeamSearcher::new(&trie, &oracle, config(3, 5, 1))
            .search("scenario")
            .await;

        assert_eq!(
            oracle.requests()[1].candidate_lines(),
            vec![format!("{child} - Root text Child text")],
            "{domain}"
        );
        assert_eq!(
            outcome.resolved,
            vec![format!("{child}: Root text Child text")],
            "{domain}"
        );
    }
}

#[test]
fn test_outcome_serializes_termination_snake_case() {
    let outcome = BeamOutcome {
        resolved: vec!["1.1: General provisions".to_string()],
        selected: vec!["1.1".to_string()],
        rounds: 1,
        termination: Termination::NoLookUp,
    };

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["termination"], "no_look_up");
    assert_eq!(json["rounds"], 1);
}
