//! I define the patterns that [rules](crate::rule::Rule) are made of.
use entail_api::statement::Statement;
use entail_api::term::{Node, TermError, VarName};
use std::fmt;

/// One position of a [`StatementPattern`]:
/// either a variable, matching any node, or a fixed node, matching only itself.
///
/// NB: in compiled queries, a fixed blank node behaves as a variable;
/// rules should only contain fixed IRIs and literals.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum NodePattern {
    /// A variable
    Variable(VarName),
    /// A fixed node
    Fixed(Node),
}

impl NodePattern {
    /// Build a variable pattern, checking that `name` (without the leading `?`) is a valid variable name.
    pub fn var<T: Into<String>>(name: T) -> Result<Self, TermError> {
        Ok(NodePattern::Variable(VarName::new(name)?))
    }

    /// Is this pattern a variable?
    pub fn is_variable(&self) -> bool {
        matches!(self, NodePattern::Variable(_))
    }

    /// The variable of this pattern, if any.
    pub fn variable(&self) -> Option<&VarName> {
        match self {
            NodePattern::Variable(v) => Some(v),
            NodePattern::Fixed(_) => None,
        }
    }

    /// The fixed node of this pattern, if any.
    pub fn fixed(&self) -> Option<&Node> {
        match self {
            NodePattern::Variable(_) => None,
            NodePattern::Fixed(n) => Some(n),
        }
    }

    /// A variable matches any node; a fixed node matches only itself
    /// (so a fixed literal never matches a resource, and vice versa).
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            NodePattern::Variable(_) => true,
            NodePattern::Fixed(n) => n == node,
        }
    }

    /// Render this pattern as a SPARQL term,
    /// replacing variables by their value in `subst` when they have one.
    pub fn to_sparql<'a, F>(&self, subst: F) -> String
    where
        F: Fn(&VarName) -> Option<&'a Node>,
    {
        match self {
            NodePattern::Variable(v) => match subst(v) {
                Some(n) => n.to_string(),
                None => format!("?{v}"),
            },
            NodePattern::Fixed(n) => n.to_string(),
        }
    }
}

impl fmt::Display for NodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodePattern::Variable(v) => write!(f, "?{v}"),
            NodePattern::Fixed(n) => n.fmt(f),
        }
    }
}

impl From<Node> for NodePattern {
    fn from(n: Node) -> Self {
        NodePattern::Fixed(n)
    }
}

impl From<VarName> for NodePattern {
    fn from(v: VarName) -> Self {
        NodePattern::Variable(v)
    }
}

impl From<entail_api::ns::NsTerm> for NodePattern {
    fn from(t: entail_api::ns::NsTerm) -> Self {
        NodePattern::Fixed(t.to_node())
    }
}

/// A triple of [`NodePattern`]s.
///
/// Statement patterns have no context: they match statements in any graph.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct StatementPattern {
    /// The subject pattern
    pub subject: NodePattern,
    /// The predicate pattern
    pub predicate: NodePattern,
    /// The object pattern
    pub object: NodePattern,
}

impl StatementPattern {
    /// Build a statement pattern.
    pub fn new<S, P, O>(subject: S, predicate: P, object: O) -> Self
    where
        S: Into<NodePattern>,
        P: Into<NodePattern>,
        O: Into<NodePattern>,
    {
        StatementPattern {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// The three positions of this pattern, in subject-predicate-object order.
    pub fn positions(&self) -> [&NodePattern; 3] {
        [&self.subject, &self.predicate, &self.object]
    }

    /// True iff every position of this pattern matches the corresponding node of `st`.
    ///
    /// NB: a variable repeated in this pattern is not required to match the same node twice.
    pub fn matches(&self, st: &Statement) -> bool {
        self.subject.matches(&st.subject)
            && self.predicate.matches(&st.predicate)
            && self.object.matches(&st.object)
    }

    /// Iterate over the variables of this pattern (with repetition).
    pub fn variables(&self) -> impl Iterator<Item = &VarName> + '_ {
        self.positions().into_iter().filter_map(NodePattern::variable)
    }

    /// Render this pattern as a SPARQL triple pattern (with its final dot),
    /// replacing variables by their value in `subst` when they have one.
    pub fn to_sparql<'a, F>(&self, subst: F) -> String
    where
        F: Fn(&VarName) -> Option<&'a Node> + Copy,
    {
        format!(
            "{} {} {} .",
            self.subject.to_sparql(subst),
            self.predicate.to_sparql(subst),
            self.object.to_sparql(subst)
        )
    }
}

impl fmt::Display for StatementPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}
