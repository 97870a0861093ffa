//! I define the results of queries executed by a [`Store`](crate::store::Store).
//!
//! A [`QueryResult`] is a cursor:
//! [`next`](QueryResult::next) advances it,
//! and the accessors ([`binding`](QueryResult::binding), [`current_statement`](QueryResult::current_statement)...)
//! read the current row.
//! Unlike the underlying iterators, every accessor is well defined for every kind of result:
//! asking a boolean result for its bindings simply yields nothing.
use crate::statement::Statement;
use crate::store::StatementIter;
use crate::term::Node;
use std::sync::Arc;

/// The languages in which a query can be submitted to a store.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum QueryLanguage {
    /// [SPARQL 1.1](https://www.w3.org/TR/sparql11-query/)
    Sparql,
    /// Any other language, identified by name
    User(String),
}

/// One row of a SELECT result: a value (or none) for each selected variable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BindingSet {
    variables: Arc<[String]>,
    values: Vec<Option<Node>>,
}

impl BindingSet {
    /// Build a row from the list of variables and their values, in the same order.
    ///
    /// `values` is padded with `None` (or truncated) to the length of `variables`.
    pub fn new(variables: Arc<[String]>, mut values: Vec<Option<Node>>) -> Self {
        values.resize(variables.len(), None);
        BindingSet { variables, values }
    }

    /// The (ordered) names of the variables of this row.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// The value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.variables
            .iter()
            .position(|v| v == name)
            .and_then(|i| self.get_at(i))
    }

    /// The value bound to the `i`-th variable, if any.
    pub fn get_at(&self, i: usize) -> Option<&Node> {
        self.values.get(i).and_then(Option::as_ref)
    }

    /// Whether `name` is bound in this row.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of variables (bound or not) in this row.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether this row has no variable.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate over the bound variables and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> + '_ {
        self.variables
            .iter()
            .zip(self.values.iter())
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }
}

impl<S: Into<String>> FromIterator<(S, Node)> for BindingSet {
    fn from_iter<T: IntoIterator<Item = (S, Node)>>(iter: T) -> Self {
        let (variables, values): (Vec<String>, Vec<Option<Node>>) =
            iter.into_iter().map(|(k, v)| (k.into(), Some(v))).unzip();
        BindingSet {
            variables: variables.into(),
            values,
        }
    }
}

/// An iterator over the rows of a SELECT result.
pub type BindingsIter<'a, E> = Box<dyn Iterator<Item = Result<BindingSet, E>> + 'a>;

enum Rows<'a, E> {
    Bindings(BindingsIter<'a, E>),
    Boolean(bool),
    Graph(StatementIter<'a, E>),
}

enum Row {
    None,
    Bindings(BindingSet),
    Statement(Statement),
}

/// The result of executing a query against a [`Store`](crate::store::Store).
pub struct QueryResult<'a, E> {
    rows: Rows<'a, E>,
    current: Row,
}

impl<'a, E> QueryResult<'a, E> {
    /// The result of a SELECT query.
    pub fn from_bindings<I>(rows: I) -> Self
    where
        I: Iterator<Item = Result<BindingSet, E>> + 'a,
    {
        QueryResult {
            rows: Rows::Bindings(Box::new(rows)),
            current: Row::None,
        }
    }

    /// The result of an ASK query.
    pub fn from_bool(value: bool) -> Self {
        QueryResult {
            rows: Rows::Boolean(value),
            current: Row::None,
        }
    }

    /// The result of a CONSTRUCT or DESCRIBE query.
    pub fn from_statements(statements: StatementIter<'a, E>) -> Self {
        QueryResult {
            rows: Rows::Graph(statements),
            current: Row::None,
        }
    }

    /// Advance to the next row, returning `false` once the result is exhausted.
    ///
    /// A boolean result has no rows: this always returns `false`.
    pub fn next(&mut self) -> Result<bool, E> {
        self.current = match &mut self.rows {
            Rows::Boolean(_) => Row::None,
            Rows::Bindings(it) => match it.next().transpose()? {
                Some(b) => Row::Bindings(b),
                None => Row::None,
            },
            Rows::Graph(it) => match it.next().transpose()? {
                Some(st) => Row::Statement(st),
                None => Row::None,
            },
        };
        Ok(!matches!(self.current, Row::None))
    }

    /// The value bound to `name` in the current row.
    pub fn binding(&self, name: &str) -> Option<&Node> {
        self.current_bindings().and_then(|b| b.get(name))
    }

    /// The value bound to the `offset`-th variable in the current row.
    pub fn binding_at(&self, offset: usize) -> Option<&Node> {
        self.current_bindings().and_then(|b| b.get_at(offset))
    }

    /// The current row of a SELECT result.
    pub fn current_bindings(&self) -> Option<&BindingSet> {
        match &self.current {
            Row::Bindings(b) => Some(b),
            _ => None,
        }
    }

    /// The current statement of a graph result.
    pub fn current_statement(&self) -> Option<&Statement> {
        match &self.current {
            Row::Statement(st) => Some(st),
            _ => None,
        }
    }

    /// Whether this is the result of a SELECT query.
    pub fn is_bindings(&self) -> bool {
        matches!(self.rows, Rows::Bindings(_))
    }

    /// Whether this is the result of a CONSTRUCT or DESCRIBE query.
    pub fn is_graph(&self) -> bool {
        matches!(self.rows, Rows::Graph(_))
    }

    /// Whether this is the result of an ASK query.
    pub fn is_bool(&self) -> bool {
        matches!(self.rows, Rows::Boolean(_))
    }

    /// The value of an ASK result, `None` for other kinds of results.
    pub fn bool_value(&self) -> Option<bool> {
        match self.rows {
            Rows::Boolean(b) => Some(b),
            _ => None,
        }
    }

    /// Consume the remaining rows of a SELECT result.
    ///
    /// Any other kind of result yields an empty vector.
    pub fn all_bindings(mut self) -> Result<Vec<BindingSet>, E> {
        let mut ret = vec![];
        if let Row::Bindings(b) = std::mem::replace(&mut self.current, Row::None) {
            ret.push(b);
        }
        if let Rows::Bindings(it) = self.rows {
            for b in it {
                ret.push(b?);
            }
        }
        Ok(ret)
    }
}

impl<E> std::fmt::Debug for QueryResult<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.rows {
            Rows::Bindings(_) => "bindings",
            Rows::Boolean(_) => "boolean",
            Rows::Graph(_) => "graph",
        };
        f.debug_struct("QueryResult").field("kind", &kind).finish()
    }
}
