use super::*;
use entail_api::ns::{rdf, rdfs};
use test_case::test_case;

fn ex(suffix: &str) -> Node {
    Node::iri_unchecked(format!("http://example.org/{suffix}"))
}

fn var(name: &str) -> NodePattern {
    NodePattern::var(name).unwrap()
}

fn sc(s: NodePattern, o: NodePattern) -> StatementPattern {
    StatementPattern::new(s, rdfs::subClassOf, o)
}

fn transitivity() -> Rule {
    Rule::named(
        "trans",
        vec![sc(var("a"), var("b")), sc(var("b"), var("c"))],
        sc(var("a"), var("c")),
    )
    .unwrap()
}

fn row(pairs: &[(&str, Node)]) -> BindingSet {
    pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
}

#[test]
fn variables_are_interned_in_order() {
    let r = transitivity();
    let vars: Vec<_> = r.variables().iter().map(VarName::as_str).collect();
    assert_eq!(vars, vec!["a", "b", "c"]);
}

#[test]
fn no_precondition() {
    let err = Rule::new(vec![], sc(ex("a").into(), ex("b").into())).unwrap_err();
    assert!(matches!(err, RuleError::NoPrecondition { .. }));
}

#[test]
fn invalid_predicate() {
    let p = StatementPattern::new(var("a"), Node::literal("p"), var("b"));
    let err = Rule::named("bad", vec![p], sc(var("a"), var("b"))).unwrap_err();
    assert!(matches!(err, RuleError::InvalidPredicate { rule, .. } if rule == "bad"));
}

#[test]
fn unbound_effect_variable() {
    let err = Rule::named("bad", vec![sc(var("a"), var("b"))], sc(var("a"), var("z"))).unwrap_err();
    assert_eq!(
        err,
        RuleError::UnboundVariable {
            rule: "bad".into(),
            variable: "z".into()
        }
    );
}

#[test]
fn display() {
    let r = Rule::new(
        vec![StatementPattern::new(var("s"), var("p"), Node::literal("Hello"))],
        StatementPattern::new(var("s"), var("p"), Node::literal("Hello World")),
    )
    .unwrap();
    assert_eq!(
        r.to_string(),
        "[(?s, ?p, \"Hello\"^^<http://www.w3.org/2001/XMLSchema#string>) -> (?s, ?p, \"Hello World\"^^<http://www.w3.org/2001/XMLSchema#string>)]"
    );
    assert!(transitivity().to_string().starts_with("[trans: (?a, "));
}

#[test_case(Statement::new(ex("A"), rdfs::subClassOf, ex("B")), true; "subClassOf")]
#[test_case(Statement::in_graph(ex("A"), rdfs::subClassOf, ex("B"), ex("g")), true; "subClassOf in graph")]
#[test_case(Statement::new(ex("A"), rdf::type_, ex("B")), false; "type")]
fn matches(st: Statement, expected: bool) {
    assert_eq!(transitivity().matches(&st), expected);
}

#[test]
fn full_query() {
    let r = transitivity();
    let q = r.bind_to_statement(None).compile_query(true).unwrap();
    let sc = "<http://www.w3.org/2000/01/rdf-schema#subClassOf>";
    assert_eq!(
        q.to_string(),
        format!("SELECT * WHERE {{ ?a {sc} ?b . ?b {sc} ?c . }}")
    );
    let trigger = Statement::new(ex("A"), rdfs::subClassOf, ex("B"));
    let q2 = r.bind_to_statement(Some(&trigger)).compile_query(false).unwrap();
    assert_eq!(q, q2);
}

#[test]
fn optimized_query() {
    let r = transitivity();
    let trigger = Statement::new(ex("A"), rdfs::subClassOf, ex("B"));
    let q = r.bind_to_statement(Some(&trigger)).compile_query(true).unwrap();
    let sc = "<http://www.w3.org/2000/01/rdf-schema#subClassOf>";
    assert_eq!(
        q.to_string(),
        format!(
            "SELECT * WHERE {{ {{ <http://example.org/B> {sc} ?c . }} UNION {{ ?a {sc} <http://example.org/A> . }} }}"
        )
    );
}

#[test]
fn contradictory_trigger_is_dropped() {
    // ?x is used twice in the first precondition
    let r = Rule::new(
        vec![
            StatementPattern::new(var("x"), ex("p"), var("x")),
            StatementPattern::new(var("x"), ex("q"), var("y")),
        ],
        StatementPattern::new(var("y"), ex("r"), var("x")),
    )
    .unwrap();
    let trigger = Statement::new(ex("A"), ex("p"), ex("B"));
    let q = r.bind_to_statement(Some(&trigger)).compile_query(true).unwrap();
    assert!(q.is_unsatisfiable());
    let trigger = Statement::new(ex("A"), ex("p"), ex("A"));
    let q = r.bind_to_statement(Some(&trigger)).compile_query(true).unwrap();
    assert!(!q.is_unsatisfiable());
    assert_eq!(
        q.to_string(),
        "SELECT * WHERE { <http://example.org/A> <http://example.org/q> ?y . }"
    );
}

#[test]
fn literal_can_not_fix_a_predicate() {
    // ?y is the object of the first precondition, and the predicate of the second one
    let r = Rule::new(
        vec![
            StatementPattern::new(var("x"), ex("p"), var("y")),
            StatementPattern::new(var("a"), var("y"), var("b")),
        ],
        StatementPattern::new(var("a"), ex("q"), var("x")),
    )
    .unwrap();
    let trigger = Statement::new(ex("s"), ex("p"), "lit");
    let q = r.bind_to_statement(Some(&trigger)).compile_query(true).unwrap();
    assert_eq!(
        q.to_string(),
        "SELECT * WHERE { ?x <http://example.org/p> <http://example.org/p> . }"
    );
    let trigger = Statement::new(ex("s"), ex("p"), ex("o"));
    let q = r.bind_to_statement(Some(&trigger)).compile_query(true).unwrap();
    assert!(q.to_string().contains(" UNION "));
}

#[test]
fn trigger_mismatch() {
    let trigger = Statement::new(ex("A"), rdf::type_, ex("B"));
    let err = transitivity()
        .bind_to_statement(Some(&trigger))
        .compile_query(true)
        .unwrap_err();
    assert!(matches!(err, RuleError::TriggerMismatch { .. }));
}

#[test]
fn invalid_trigger_is_ignored() {
    let trigger = Statement::new(Node::literal("A"), rdfs::subClassOf, ex("B"));
    let bound = transitivity();
    let bound = bound.bind_to_statement(Some(&trigger));
    assert!(bound.trigger().is_none());
}

#[test]
fn blank_node_trigger_uses_full_query() {
    let r = transitivity();
    let trigger = Statement::new(Node::blank("b1").unwrap(), rdfs::subClassOf, ex("B"));
    let q = r.bind_to_statement(Some(&trigger)).compile_query(true).unwrap();
    assert_eq!(q, r.bind_to_statement(None).compile_query(true).unwrap());
}

#[test]
fn single_precondition_query_is_empty_group() {
    let r = Rule::new(
        vec![StatementPattern::new(var("s"), var("p"), Node::literal("Hello"))],
        StatementPattern::new(var("s"), var("p"), Node::literal("Hello World")),
    )
    .unwrap();
    let trigger = Statement::new(ex("a"), ex("p"), "Hello");
    let bound = r.bind_to_statement(Some(&trigger));
    assert_eq!(bound.compile_query(true).unwrap().to_string(), "SELECT * WHERE { }");
    let effect = bound.bind_effect(&BindingSet::from_iter(Vec::<(String, Node)>::new())).unwrap();
    assert_eq!(effect, Statement::new(ex("a"), ex("p"), "Hello World"));
}

#[test]
fn bind_complete_row() {
    let r = transitivity();
    let bound = r.bind_to_statement(None);
    let b = row(&[("a", ex("A")), ("b", ex("B")), ("c", ex("C"))]);
    assert_eq!(
        bound.bind_effect(&b).unwrap(),
        Statement::new(ex("A"), rdfs::subClassOf, ex("C"))
    );
    assert_eq!(
        bound.bind_preconditions(&b).unwrap(),
        vec![
            Statement::new(ex("A"), rdfs::subClassOf, ex("B")),
            Statement::new(ex("B"), rdfs::subClassOf, ex("C")),
        ]
    );
}

#[test]
fn bind_row_completed_by_trigger() {
    let r = transitivity();
    let trigger = Statement::in_graph(ex("A"), rdfs::subClassOf, ex("B"), ex("g"));
    let bound = r.bind_to_statement(Some(&trigger));
    // row of the first alternative: the trigger is the first precondition
    let inst = bound.instantiations(&row(&[("c", ex("C"))])).unwrap();
    assert_eq!(inst.len(), 1);
    assert_eq!(
        inst[0].effect(),
        &Statement::new(ex("A"), rdfs::subClassOf, ex("C"))
    );
    assert_eq!(inst[0].preconditions()[0], trigger);
    assert_eq!(
        inst[0].preconditions()[1],
        Statement::new(ex("B"), rdfs::subClassOf, ex("C"))
    );
    // row of the second alternative: the trigger is the second precondition
    let effect = bound.bind_effect(&row(&[("a", ex("Z"))])).unwrap();
    assert_eq!(effect, Statement::new(ex("Z"), rdfs::subClassOf, ex("B")));
}

#[test]
fn bind_without_trigger_fails_on_partial_row() {
    let r = transitivity();
    let err = r
        .bind_to_statement(None)
        .bind_effect(&row(&[("a", ex("A")), ("b", ex("B"))]))
        .unwrap_err();
    assert_eq!(
        err,
        RuleError::UnboundVariable {
            rule: "trans".into(),
            variable: "c".into()
        }
    );
}

#[test]
fn ambiguous_row() {
    // both preconditions are fully determined by a trigger
    let r = Rule::new(
        vec![
            StatementPattern::new(var("x"), ex("p"), var("y")),
            StatementPattern::new(var("y"), ex("p"), var("x")),
        ],
        StatementPattern::new(var("x"), ex("q"), var("y")),
    )
    .unwrap();
    let trigger = Statement::new(ex("A"), ex("p"), ex("B"));
    let bound = r.bind_to_statement(Some(&trigger));
    let empty = BindingSet::from_iter(Vec::<(String, Node)>::new());
    let inst = bound.instantiations(&empty).unwrap();
    assert_eq!(inst.len(), 2);
    assert_eq!(inst[0].effect(), &Statement::new(ex("A"), ex("q"), ex("B")));
    assert_eq!(inst[1].effect(), &Statement::new(ex("B"), ex("q"), ex("A")));
}
