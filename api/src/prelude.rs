//! General-use types and traits from the Entail API.

pub use crate::query::{BindingSet, QueryLanguage, QueryResult};
pub use crate::statement::{Statement, StatementMatcher};
pub use crate::store::{StatementIter, Store};
pub use crate::term::{BnodeId, Iri, LanguageTag, Literal, Node, NodeKind, VarName};
