//! This crate is part of Entail,
//! an incremental rule-based inference engine over [RDF] quad stores.
//!
//! It provides [`MemoryStore`], an in-memory implementation of
//! [`Store`](entail_api::store::Store),
//! able to evaluate the subset of [SPARQL] used by the inference engine:
//! `SELECT` and `ASK` queries made of basic graph patterns,
//! combined with `UNION`, `GRAPH`, `DISTINCT`, `LIMIT` and `OFFSET`.
//!
//! The default graph of a query is the union of all the graphs of the store.
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/
//! [SPARQL]: https://www.w3.org/TR/sparql11-query/
use entail_api::statement::Statement;
use thiserror::Error;

pub mod index;
mod sparql;
mod store;
pub use store::*;

/// The errors raised by [`MemoryStore`].
#[derive(Debug, Error)]
pub enum MemoryStoreError {
    #[error("Invalid statement: {0}")]
    InvalidStatement(Statement),
    #[error("Query parse error: {0}")]
    Parse(#[from] spargebra::SparqlSyntaxError),
    #[error("Unsupported query language: {0}")]
    UnsupportedLanguage(String),
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("The term index is full")]
    TermIndexFull,
}
