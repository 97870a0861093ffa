//! I define the [`Store`] trait,
//! the minimal interface that a quad store must offer to the inference engine.
use crate::query::{QueryLanguage, QueryResult};
use crate::statement::{Statement, StatementMatcher};
use crate::term::Node;
use std::collections::BTreeSet;
use std::error::Error;

/// A lazy, one-shot iterator over the statements of a store.
///
/// Each item may fail, with the error type of the store.
pub struct StatementIter<'a, E>(Box<dyn Iterator<Item = Result<Statement, E>> + 'a>);

impl<'a, E> StatementIter<'a, E> {
    /// Wrap any iterator of fallible statements.
    pub fn new<I>(it: I) -> Self
    where
        I: Iterator<Item = Result<Statement, E>> + 'a,
    {
        StatementIter(Box::new(it))
    }

    /// Collect all the remaining statements,
    /// stopping at the first error.
    pub fn all_statements(self) -> Result<Vec<Statement>, E> {
        self.collect()
    }

    /// Collect the distinct subjects of the remaining statements.
    pub fn all_subjects(self) -> Result<BTreeSet<Node>, E> {
        self.map(|r| r.map(|st| st.subject)).collect()
    }

    /// Collect the distinct objects of the remaining statements.
    pub fn all_objects(self) -> Result<BTreeSet<Node>, E> {
        self.map(|r| r.map(|st| st.object)).collect()
    }

    /// Collect the distinct contexts of the remaining statements
    /// (the default graph is ignored).
    pub fn all_contexts(self) -> Result<BTreeSet<Node>, E> {
        let mut ret = BTreeSet::new();
        for st in self {
            if let Some(c) = st?.context {
                ret.insert(c);
            }
        }
        Ok(ret)
    }
}

impl<E> Iterator for StatementIter<'_, E> {
    type Item = Result<Statement, E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// A mutable quad store.
///
/// Statements are unique within a graph:
/// adding a statement that is already present in its graph has no effect.
pub trait Store {
    /// The error type that this store may raise.
    type Error: Error + 'static;

    /// Insert a statement.
    ///
    /// Implementations must reject statements that are not [valid](Statement::is_valid).
    fn add_statement(&mut self, statement: Statement) -> Result<(), Self::Error>;

    /// Remove every statement matching `matcher`, returning how many were removed.
    fn remove_statements(&mut self, matcher: &StatementMatcher) -> Result<usize, Self::Error>;

    /// Iterate over every statement matching `matcher`.
    fn list_statements(&self, matcher: &StatementMatcher) -> StatementIter<'_, Self::Error>;

    /// Whether a statement with the subject, predicate and object of `statement`
    /// exists in *any* graph of the store (the context of `statement` is ignored).
    fn contains_any_statement(&self, statement: &Statement) -> Result<bool, Self::Error> {
        let matcher = StatementMatcher::new(
            Some(statement.subject.clone()),
            Some(statement.predicate.clone()),
            Some(statement.object.clone()),
        );
        match self.list_statements(&matcher).next() {
            None => Ok(false),
            Some(r) => r.map(|_| true),
        }
    }

    /// Whether at least one statement matches `matcher`.
    fn contains_statements(&self, matcher: &StatementMatcher) -> Result<bool, Self::Error> {
        match self.list_statements(matcher).next() {
            None => Ok(false),
            Some(r) => r.map(|_| true),
        }
    }

    /// Parse and evaluate `query`.
    fn execute_query(
        &self,
        query: &str,
        language: QueryLanguage,
    ) -> Result<QueryResult<'_, Self::Error>, Self::Error>;

    /// Total number of statements, in all graphs.
    fn statement_count(&self) -> Result<usize, Self::Error>;
}
