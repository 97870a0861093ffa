//! I provide a forward-chaining inference engine on top of any [`Store`](entail_api::store::Store).
//!
//! Rules are Horn clauses over statement patterns
//! (see [`Rule`], and [`RuleParser`] for their textual syntax).
//! An [`InferenceModel`] wraps a store and a [`RuleSet`],
//! materializes the statements entailed by every added statement,
//! and records where each inferred statement comes from,
//! so that it can be retracted when one of its sources is removed.
//!
//! ```
//! # use entail_api::ns::rdfs;
//! # use entail_api::statement::Statement;
//! # use entail_api::store::Store;
//! # use entail_api::term::Node;
//! # use entail_inmem::MemoryStore;
//! # use entail_reasoner::{InferenceModel, RuleSet, StandardRuleSet};
//! let ex = |s: &str| Node::iri_unchecked(format!("http://example.org/{s}"));
//! let mut model = InferenceModel::new(MemoryStore::new());
//! model.set_rules(RuleSet::standard(StandardRuleSet::Rdfs));
//! model.add_statement(Statement::new(ex("Cat"), rdfs::subClassOf, ex("Mammal")))?;
//! model.add_statement(Statement::new(ex("Mammal"), rdfs::subClassOf, ex("Animal")))?;
//! assert!(model
//!     .store()
//!     .contains_any_statement(&Statement::new(ex("Cat"), rdfs::subClassOf, ex("Animal")))?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod model;
pub mod observer;
pub mod pattern;
pub mod provenance;
pub mod rule;
pub mod ruleset;

pub use config::InferenceConfig;
pub use error::{InferenceError, InferenceResult};
pub use model::InferenceModel;
pub use observer::{CancellationFlag, InferenceEvent, InferenceObserver};
pub use provenance::ProvenanceMode;
pub use rule::Rule;
pub use ruleset::{RuleParser, RuleSet, StandardRuleSet};

#[cfg(test)]
mod test;
