//! I define the core API of Entail,
//! an incremental rule-based inference engine over [RDF] quad stores:
//! [terms](term), [statements](statement), [vocabularies](ns),
//! [query results](query) and the [`Store`](store::Store) trait.
//!
//! The engine itself lives in the `entail_reasoner` crate,
//! and an in-memory store in the `entail_inmem` crate.
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/

pub mod ns;
pub mod prelude;
pub mod query;
pub mod statement;
pub mod store;
pub mod term;
