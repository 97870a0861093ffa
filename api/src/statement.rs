//! I define [`Statement`], the unit of data of a [`Store`](crate::store::Store),
//! and [`StatementMatcher`], the wildcard pattern used to select statements in a store.
use crate::term::Node;
use std::fmt;

/// An RDF statement: a triple, optionally located in a named graph (its *context*).
///
/// A [`Statement`] can hold any [`Node`] in any position;
/// use [`is_valid`](Statement::is_valid) to check that it is a legal RDF statement.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct Statement {
    /// An IRI or a blank node, in a valid statement.
    pub subject: Node,
    /// An IRI, in a valid statement.
    pub predicate: Node,
    /// Any node.
    pub object: Node,
    /// `None` stands for the default graph.
    pub context: Option<Node>,
}

impl Statement {
    /// Build a statement in the default graph.
    pub fn new<S, P, O>(subject: S, predicate: P, object: O) -> Self
    where
        S: Into<Node>,
        P: Into<Node>,
        O: Into<Node>,
    {
        Statement {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            context: None,
        }
    }

    /// Build a statement in the given named graph.
    pub fn in_graph<S, P, O, C>(subject: S, predicate: P, object: O, context: C) -> Self
    where
        S: Into<Node>,
        P: Into<Node>,
        O: Into<Node>,
        C: Into<Node>,
    {
        Statement::new(subject, predicate, object).with_context(Some(context.into()))
    }

    /// Return this statement, moved to the given graph.
    pub fn with_context(mut self, context: Option<Node>) -> Self {
        self.context = context;
        self
    }

    /// A statement is valid iff its subject is an IRI or a blank node,
    /// its predicate is an IRI,
    /// and its context, if any, is an IRI or a blank node.
    pub fn is_valid(&self) -> bool {
        self.subject.is_resource()
            && self.predicate.is_iri()
            && self.context.as_ref().map(Node::is_resource).unwrap_or(true)
    }

    /// Whether `other` has the same subject, predicate and object as `self`,
    /// regardless of their contexts.
    pub fn same_triple(&self, other: &Statement) -> bool {
        self.subject == other.subject
            && self.predicate == other.predicate
            && self.object == other.object
    }
}

impl fmt::Display for Statement {
    /// N-Quads form, without the final dot.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if let Some(c) = &self.context {
            write!(f, " {}", c)?;
        }
        Ok(())
    }
}

/// A pattern selecting statements in a store.
///
/// Each component is either a concrete [`Node`], or `None` which matches anything.
/// NB: a `None` context matches statements in every graph,
/// including the default graph.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct StatementMatcher {
    /// The required subject, if any.
    pub subject: Option<Node>,
    /// The required predicate, if any.
    pub predicate: Option<Node>,
    /// The required object, if any.
    pub object: Option<Node>,
    /// The required graph, if any (the default graph can not be singled out).
    pub context: Option<Node>,
}

impl StatementMatcher {
    /// A matcher accepting every statement.
    pub fn any() -> Self {
        Self::default()
    }

    /// A matcher on subject, predicate and object, in any graph.
    pub fn new(subject: Option<Node>, predicate: Option<Node>, object: Option<Node>) -> Self {
        StatementMatcher {
            subject,
            predicate,
            object,
            context: None,
        }
    }

    /// A matcher accepting every statement of the given graph.
    pub fn graph(context: Node) -> Self {
        Self::any().in_graph(context)
    }

    /// Return this matcher, restricted to the given graph.
    pub fn in_graph(mut self, context: Node) -> Self {
        self.context = Some(context);
        self
    }

    /// Whether subject, predicate and object are all concrete
    /// (the context may still be a wildcard).
    pub fn is_concrete(&self) -> bool {
        self.subject.is_some() && self.predicate.is_some() && self.object.is_some()
    }

    /// Whether `st` has the required nodes in every constrained position.
    pub fn matches(&self, st: &Statement) -> bool {
        fn ok(pattern: &Option<Node>, node: &Node) -> bool {
            pattern.as_ref().map(|p| p == node).unwrap_or(true)
        }
        ok(&self.subject, &st.subject)
            && ok(&self.predicate, &st.predicate)
            && ok(&self.object, &st.object)
            && match &self.context {
                None => true,
                Some(c) => st.context.as_ref() == Some(c),
            }
    }
}

impl From<&Statement> for StatementMatcher {
    /// The matcher selecting exactly this statement,
    /// in its own graph (or in any graph, if it has no context).
    fn from(st: &Statement) -> Self {
        StatementMatcher {
            subject: Some(st.subject.clone()),
            predicate: Some(st.predicate.clone()),
            object: Some(st.object.clone()),
            context: st.context.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ns::{rdf, rdfs};

    fn ex(suffix: &str) -> Node {
        Node::iri_unchecked(format!("http://example.org/{suffix}"))
    }

    #[test]
    fn validity() {
        assert!(Statement::new(ex("a"), rdf::type_, ex("b")).is_valid());
        assert!(Statement::new(Node::blank("x").unwrap(), rdf::type_, "lit").is_valid());
        assert!(!Statement::new("lit", rdf::type_, ex("b")).is_valid());
        assert!(!Statement::new(ex("a"), Node::blank("x").unwrap(), ex("b")).is_valid());
        assert!(!Statement::in_graph(ex("a"), rdf::type_, ex("b"), "lit").is_valid());
        assert!(Statement::in_graph(ex("a"), rdf::type_, ex("b"), ex("g")).is_valid());
    }

    #[test]
    fn matcher() {
        let st = Statement::in_graph(ex("a"), rdfs::subClassOf, ex("b"), ex("g"));
        assert!(StatementMatcher::any().matches(&st));
        assert!(StatementMatcher::new(Some(ex("a")), None, None).matches(&st));
        assert!(!StatementMatcher::new(Some(ex("b")), None, None).matches(&st));
        assert!(StatementMatcher::graph(ex("g")).matches(&st));
        assert!(!StatementMatcher::graph(ex("h")).matches(&st));
        assert!(StatementMatcher::from(&st).matches(&st));
        assert!(StatementMatcher::from(&st).is_concrete());
        assert!(!StatementMatcher::graph(ex("g")).is_concrete());
        let default = Statement::new(ex("a"), rdfs::subClassOf, ex("b"));
        assert!(StatementMatcher::from(&default).matches(&st));
    }

    #[test]
    fn display() {
        let st = Statement::in_graph(ex("a"), rdfs::subClassOf, ex("b"), ex("g"));
        assert_eq!(
            st.to_string(),
            "<http://example.org/a> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <http://example.org/b> <http://example.org/g>"
        );
    }
}
