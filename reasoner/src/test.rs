use std::cell::RefCell;
use std::rc::Rc;

use entail_api::ns::{nrl, rdf, rdfs};
use entail_api::statement::{Statement, StatementMatcher};
use entail_api::store::Store;
use entail_api::term::Node;
use entail_inmem::MemoryStore;
use test_case::test_case;

use super::*;
use crate::pattern::{NodePattern, StatementPattern};
use crate::ruleset::RuleParseError;

fn ex(suffix: &str) -> Node {
    Node::iri_unchecked(format!("http://example.org/{suffix}"))
}

fn var(name: &str) -> NodePattern {
    NodePattern::var(name).unwrap()
}

fn sc(s: &str, o: &str) -> Statement {
    Statement::new(ex(s), rdfs::subClassOf, ex(o))
}

fn transitivity() -> Rule {
    let p = || NodePattern::from(rdfs::subClassOf);
    Rule::named(
        "transitivity",
        vec![
            StatementPattern::new(var("a"), p(), var("b")),
            StatementPattern::new(var("b"), p(), var("c")),
        ],
        StatementPattern::new(var("a"), p(), var("c")),
    )
    .unwrap()
}

fn model_with(config: InferenceConfig) -> InferenceModel<MemoryStore> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut model = InferenceModel::new_with_config(MemoryStore::new(), config);
    model.add_rule(transitivity());
    model
}

fn model(mode: ProvenanceMode) -> InferenceModel<MemoryStore> {
    model_with(InferenceConfig::new().with_provenance(mode))
}

fn holds<S: Store>(model: &InferenceModel<S>, st: &Statement) -> bool {
    model.store().contains_any_statement(st).unwrap()
}

const CHAIN: [(&str, &str); 7] = [
    ("F", "E"),
    ("E", "D"),
    ("D", "C"),
    ("C", "B"),
    ("B", "A"),
    ("X", "C"),
    ("X", "A"),
];

fn chain(mode: ProvenanceMode) -> InferenceModel<MemoryStore> {
    let mut m = model(mode);
    m.add_statements(CHAIN.iter().map(|(s, o)| sc(s, o))).unwrap();
    m
}

/// All the statements of the store, outside the metadata graph, as (s, o) pairs.
fn closure<S: Store>(model: &InferenceModel<S>) -> Vec<(String, String)> {
    let meta = provenance::metadata_graph();
    let mut ret: Vec<_> = model
        .store()
        .list_statements(&StatementMatcher::any())
        .map(Result::unwrap)
        .filter(|st| st.context.as_ref() != Some(&meta))
        .map(|st| (st.subject.to_string(), st.object.to_string()))
        .collect();
    ret.sort();
    ret.dedup();
    ret
}

#[test_case(ProvenanceMode::Compressed; "compressed")]
#[test_case(ProvenanceMode::Uncompressed; "uncompressed")]
fn transitive_closure(mode: ProvenanceMode) {
    let mut m = model(mode);
    assert_eq!(m.add_statement(sc("A", "B")).unwrap(), 0);
    assert_eq!(m.add_statement(sc("B", "C")).unwrap(), 1);
    assert!(holds(&m, &sc("A", "C")));
    assert_eq!(m.statement_count().unwrap(), 3);
    assert!(m.store().statement_count().unwrap() > 3);
}

#[test_case(ProvenanceMode::Compressed; "compressed")]
#[test_case(ProvenanceMode::Uncompressed; "uncompressed")]
fn multi_hop_chain(mode: ProvenanceMode) {
    let m = chain(mode);
    for (s, o) in [
        ("F", "A"),
        ("F", "B"),
        ("F", "C"),
        ("F", "D"),
        ("E", "A"),
        ("D", "A"),
        ("X", "B"),
    ] {
        assert!(holds(&m, &sc(s, o)), "{s} subClassOf {o}");
    }
    // X p A is inferred (through C p A) before being asserted,
    // so it is stored twice: 15 in the F..A chain, 3 above X, plus the asserted copy
    assert_eq!(m.statement_count().unwrap(), 19);
    assert_eq!(closure(&m).len(), 18);
}

#[test_case(ProvenanceMode::Compressed; "compressed")]
#[test_case(ProvenanceMode::Uncompressed; "uncompressed")]
fn retraction_cascade(mode: ProvenanceMode) {
    let mut m = chain(mode);
    let removed = m
        .remove_statements(&StatementMatcher::from(&sc("C", "B")))
        .unwrap();
    assert_eq!(removed, 1);
    for (s, o) in [
        ("C", "B"),
        ("F", "A"),
        ("F", "B"),
        ("E", "A"),
        ("E", "B"),
        ("D", "A"),
        ("D", "B"),
    ] {
        assert!(!holds(&m, &sc(s, o)), "{s} subClassOf {o}");
    }
    for (s, o) in [("F", "C"), ("F", "D"), ("E", "C"), ("X", "A"), ("B", "A")] {
        assert!(holds(&m, &sc(s, o)), "{s} subClassOf {o}");
    }
}

#[test_case(ProvenanceMode::Compressed; "compressed")]
#[test_case(ProvenanceMode::Uncompressed; "uncompressed")]
fn retraction_leaves_no_orphan_metadata(mode: ProvenanceMode) {
    let mut m = model(mode);
    m.add_statement(sc("A", "B")).unwrap();
    m.add_statement(sc("B", "C")).unwrap();
    m.remove_statements(&StatementMatcher::from(&sc("A", "B")))
        .unwrap();
    assert_eq!(m.statement_count().unwrap(), 1);
    assert_eq!(m.store().statement_count().unwrap(), 1);
}

#[test_case(ProvenanceMode::Compressed; "compressed")]
#[test_case(ProvenanceMode::Uncompressed; "uncompressed")]
fn perform_inference_is_idempotent(mode: ProvenanceMode) {
    let mut m = chain(mode);
    let before = m.store().statement_count().unwrap();
    assert_eq!(m.perform_inference().unwrap(), 0);
    assert_eq!(m.store().statement_count().unwrap(), before);
}

#[test_case(ProvenanceMode::Compressed; "compressed")]
#[test_case(ProvenanceMode::Uncompressed; "uncompressed")]
fn perform_inference_on_existing_data(mode: ProvenanceMode) {
    let mut m = InferenceModel::new_with_config(
        MemoryStore::new(),
        InferenceConfig::new().with_provenance(mode),
    );
    m.add_statements(CHAIN.iter().map(|(s, o)| sc(s, o))).unwrap();
    assert_eq!(m.statement_count().unwrap(), 7);
    m.add_rule(transitivity());
    assert_eq!(m.perform_inference().unwrap(), 11);
    assert_eq!(m.perform_inference().unwrap(), 0);
    assert_eq!(closure(&m), closure(&chain(mode)));
}

#[test_case(ProvenanceMode::Compressed; "compressed")]
#[test_case(ProvenanceMode::Uncompressed; "uncompressed")]
fn clear_inference(mode: ProvenanceMode) {
    let mut m = chain(mode);
    // X p A has both an asserted and an inferred copy
    assert_eq!(m.clear_inference().unwrap(), 12);
    assert_eq!(m.statement_count().unwrap(), 7);
    assert_eq!(m.store().statement_count().unwrap(), 7);
    for (s, o) in CHAIN {
        assert!(holds(&m, &sc(s, o)));
    }
    assert_eq!(m.clear_inference().unwrap(), 0);
    // starting from the asserted statements, X p A is not inferred again
    assert_eq!(m.perform_inference().unwrap(), 11);
    assert_eq!(closure(&m), closure(&chain(mode)));
}

#[test_case(ProvenanceMode::Compressed; "compressed")]
#[test_case(ProvenanceMode::Uncompressed; "uncompressed")]
fn rules_ignore_metadata(mode: ProvenanceMode) {
    let mut m = InferenceModel::new_with_config(
        MemoryStore::new(),
        InferenceConfig::new().with_provenance(mode),
    );
    m.load_rules("[tag: (?s ?p ?o) -> (?s <http://example.org/tag> <http://example.org/T>)]")
        .unwrap();
    assert_eq!(m.add_statement(Statement::new(ex("a"), ex("p"), ex("b"))).unwrap(), 1);
    assert_eq!(m.statement_count().unwrap(), 2);
    assert_eq!(m.perform_inference().unwrap(), 0);
    assert_eq!(m.perform_inference().unwrap(), 0);
    assert_eq!(m.statement_count().unwrap(), 2);
}

#[test_case(true; "optimized")]
#[test_case(false; "unoptimized")]
fn query_optimization_does_not_change_results(optimized: bool) {
    let mut m = model_with(InferenceConfig::new().with_optimized_queries(optimized));
    m.add_statements(CHAIN.iter().map(|(s, o)| sc(s, o))).unwrap();
    assert_eq!(closure(&m), closure(&chain(ProvenanceMode::Compressed)));
}

#[test]
fn literal_effect() {
    let mut m = InferenceModel::new(MemoryStore::new());
    let rule = RuleParser::new()
        .parse_rule("[literal1: (?s ?p 'Hello') -> (?s ?p 'Hello World' ) ]")
        .unwrap();
    m.add_rule(rule);
    assert_eq!(m.add_statement(Statement::new(ex("a"), ex("p"), "Hello")).unwrap(), 1);
    assert!(holds(&m, &Statement::new(ex("a"), ex("p"), "Hello World")));
}

#[test]
fn invalid_statements_are_rejected() {
    let mut m = model(ProvenanceMode::Compressed);
    let err = m
        .add_statement(Statement::new("lit", rdfs::subClassOf, ex("b")))
        .unwrap_err();
    assert!(matches!(err, InferenceError::InvalidStatement(_)));
    assert_eq!(m.statement_count().unwrap(), 0);
}

#[test]
fn invalid_inferred_statements_are_skipped() {
    let mut m = InferenceModel::new(MemoryStore::new());
    m.add_rule(
        Rule::new(
            vec![StatementPattern::new(var("s"), ex("p"), var("o"))],
            StatementPattern::new(var("o"), ex("p"), var("s")),
        )
        .unwrap(),
    );
    assert_eq!(m.add_statement(Statement::new(ex("a"), ex("p"), "lit")).unwrap(), 0);
    assert_eq!(m.add_statement(Statement::new(ex("a"), ex("p"), ex("b"))).unwrap(), 1);
    assert!(holds(&m, &Statement::new(ex("b"), ex("p"), ex("a"))));
}

#[test]
fn literal_trigger_in_predicate_position() {
    let mut m = InferenceModel::new(MemoryStore::new());
    m.load_rules(
        "[link: (?x <http://example.org/p> ?y), (?a ?y ?b) -> (?a <http://example.org/q> ?x)]",
    )
    .unwrap();
    assert_eq!(m.add_statement(Statement::new(ex("s"), ex("p"), "lit")).unwrap(), 0);
    assert_eq!(m.add_statement(Statement::new(ex("t"), ex("r"), ex("u"))).unwrap(), 0);
    assert_eq!(m.add_statement(Statement::new(ex("s"), ex("p"), ex("r"))).unwrap(), 1);
    assert!(holds(&m, &Statement::new(ex("t"), ex("q"), ex("s"))));
}

#[test]
fn blank_node_trigger() {
    let mut m = model(ProvenanceMode::Compressed);
    let b = Node::blank("b1").unwrap();
    m.add_statement(Statement::new(b.clone(), rdfs::subClassOf, ex("A")))
        .unwrap();
    assert_eq!(m.add_statement(sc("A", "B")).unwrap(), 1);
    assert!(holds(&m, &Statement::new(b, rdfs::subClassOf, ex("B"))));
}

#[test]
fn statements_in_named_graphs_are_triggers() {
    let mut m = model(ProvenanceMode::Uncompressed);
    m.add_statement(sc("A", "B").with_context(Some(ex("g1"))))
        .unwrap();
    m.add_statement(sc("B", "C").with_context(Some(ex("g2"))))
        .unwrap();
    assert!(holds(&m, &sc("A", "C")));
    m.remove_statements(&StatementMatcher::graph(ex("g1")))
        .unwrap();
    assert!(!holds(&m, &sc("A", "C")));
}

#[test]
fn non_recursive_inference() {
    let rules = RuleParser::new()
        .parse_str(
            "[r1: (?x <http://example.org/q> ?y) -> (?x <http://example.org/r> ?y)]\n\
             [r2: (?x <http://example.org/r> ?y) -> (?x <http://example.org/s> ?y)]\n",
        )
        .unwrap();
    let mut m = InferenceModel::new_with_config(
        MemoryStore::new(),
        InferenceConfig::new().with_recursive(false),
    );
    m.set_rules(rules.clone());
    let st = Statement::new(ex("a"), ex("q"), ex("b"));
    assert_eq!(m.add_statement(st.clone()).unwrap(), 1);
    assert_eq!(m.perform_inference().unwrap(), 1);

    let mut m = InferenceModel::new(MemoryStore::new());
    m.set_rules(rules);
    assert_eq!(m.add_statement(st.clone()).unwrap(), 2);
    assert_eq!(m.infer_statement(&st, true).unwrap(), 0);
}

#[test]
fn load_rules() {
    let mut m = InferenceModel::new(MemoryStore::new());
    assert_eq!(m.load_rules(StandardRuleSet::Nrl.source()).unwrap(), 3);
    let err = m.load_rules("[bad: (?a nrl:inverseProperty ?b) -> (?b nrl:inverseProperty ?a)]");
    assert!(matches!(
        err,
        Err(InferenceError::UnknownRule(RuleParseError::UnknownPrefix { .. }))
    ));
    assert_eq!(m.rules().len(), 3);
}

#[test]
fn nrl_rules() {
    let mut m = InferenceModel::new(MemoryStore::new());
    m.set_rules(RuleSet::standard(StandardRuleSet::Nrl));
    // symmetric
    m.add_statement(Statement::new(ex("knows"), rdf::type_, nrl::SymmetricProperty))
        .unwrap();
    m.add_statement(Statement::new(ex("a"), ex("knows"), ex("b")))
        .unwrap();
    assert!(holds(&m, &Statement::new(ex("b"), ex("knows"), ex("a"))));
    // transitive
    m.add_statement(Statement::new(ex("part"), rdf::type_, nrl::TransitiveProperty))
        .unwrap();
    m.add_statement(Statement::new(ex("a"), ex("part"), ex("b")))
        .unwrap();
    m.add_statement(Statement::new(ex("b"), ex("part"), ex("c")))
        .unwrap();
    m.add_statement(Statement::new(ex("c"), ex("part"), ex("d")))
        .unwrap();
    assert!(holds(&m, &Statement::new(ex("a"), ex("part"), ex("d"))));
    // inverse
    m.add_statement(Statement::new(ex("part"), nrl::inverseProperty, ex("whole")))
        .unwrap();
    assert!(holds(&m, &Statement::new(ex("d"), ex("whole"), ex("a"))));
    assert!(holds(&m, &Statement::new(ex("b"), ex("whole"), ex("a"))));
    assert_eq!(m.perform_inference().unwrap(), 0);
}

#[test]
fn symmetric_and_transitive_property() {
    let mut m = InferenceModel::new(MemoryStore::new());
    m.set_rules(RuleSet::standard(StandardRuleSet::Nrl));
    m.add_statement(Statement::new(ex("sibling"), rdf::type_, nrl::SymmetricProperty))
        .unwrap();
    m.add_statement(Statement::new(ex("sibling"), rdf::type_, nrl::TransitiveProperty))
        .unwrap();
    m.add_statement(Statement::new(ex("a"), ex("sibling"), ex("b")))
        .unwrap();
    m.add_statement(Statement::new(ex("b"), ex("sibling"), ex("c")))
        .unwrap();
    for (s, o) in [("b", "a"), ("c", "b"), ("a", "c"), ("c", "a"), ("a", "a")] {
        assert!(holds(&m, &Statement::new(ex(s), ex("sibling"), ex(o))), "{s} {o}");
    }
    m.remove_statements(&StatementMatcher::from(&Statement::new(ex("b"), ex("sibling"), ex("c"))))
        .unwrap();
    assert!(!holds(&m, &Statement::new(ex("a"), ex("sibling"), ex("c"))));
    assert!(holds(&m, &Statement::new(ex("b"), ex("sibling"), ex("a"))));
}

#[test]
fn rdfs_rules() {
    let mut m = InferenceModel::new(MemoryStore::new());
    m.set_rules(RuleSet::standard(StandardRuleSet::Rdfs));
    m.add_statements([
        sc("A", "B"),
        sc("B", "C"),
        Statement::new(ex("x"), rdf::type_, ex("A")),
        Statement::new(ex("name"), rdfs::domain, ex("Person")),
        Statement::new(ex("y"), ex("name"), "Y"),
    ])
    .unwrap();
    assert!(holds(&m, &sc("A", "C")));
    assert!(holds(&m, &Statement::new(ex("x"), rdf::type_, ex("B"))));
    assert!(holds(&m, &Statement::new(ex("x"), rdf::type_, ex("C"))));
    assert!(holds(&m, &Statement::new(ex("y"), rdf::type_, ex("Person"))));
}

#[test]
fn observers_are_notified() {
    let events = Rc::new(RefCell::new(vec![]));
    let mut m = model(ProvenanceMode::Compressed);
    let sink = Rc::clone(&events);
    m.add_observer(move |e: &InferenceEvent| sink.borrow_mut().push(e.clone()));
    m.add_statement(sc("A", "B")).unwrap();
    m.add_statement(sc("B", "C")).unwrap();
    m.remove_statements(&StatementMatcher::from(&sc("B", "C")))
        .unwrap();
    m.clear_inference().unwrap();
    assert_eq!(
        *events.borrow(),
        vec![
            InferenceEvent::StatementsAdded {
                asserted: 1,
                inferred: 0
            },
            InferenceEvent::StatementsAdded {
                asserted: 1,
                inferred: 1
            },
            InferenceEvent::StatementsRemoved {
                removed: 1,
                inference_graphs_dropped: 1
            },
            InferenceEvent::InferenceCleared { graphs: 0 },
        ]
    );
}

#[test]
fn cancellation() {
    let mut m = InferenceModel::new(MemoryStore::new());
    m.add_statements([sc("A", "B"), sc("B", "C")]).unwrap();
    m.add_rule(transitivity());
    let flag = CancellationFlag::new();
    flag.cancel();
    assert!(matches!(
        m.perform_inference_with(&flag),
        Err(InferenceError::Cancelled)
    ));
    assert!(!holds(&m, &sc("A", "C")));
    flag.reset();
    assert_eq!(m.perform_inference_with(&flag).unwrap(), 1);
}
