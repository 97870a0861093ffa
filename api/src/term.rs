//! I define how RDF terms
//! (such as [IRIs](https://www.w3.org/TR/rdf11-concepts/#section-IRIs),
//! [blank nodes](https://www.w3.org/TR/rdf11-concepts/#section-blank-nodes)
//! and [literals](https://www.w3.org/TR/rdf11-concepts/#section-Graph-Literal))
//! are represented in Entail.
//!
//! I provide the main type [`Node`],
//! and its constituents [`Iri`], [`BnodeId`] and [`Literal`].
//! Variables never appear in a [`Node`]:
//! they only live in rule patterns, which are named with a [`VarName`].
use std::fmt;
use thiserror::Error;

#[macro_use]
mod _macro;
mod _iri;
pub use _iri::*;
mod _literal;
pub use _literal::*;

pub mod bnode_id;
pub mod language_tag;
pub mod var_name;

pub use bnode_id::BnodeId;
pub use language_tag::LanguageTag;
pub use var_name::VarName;

/// The different kinds of nodes that a [`Node`] can represent.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum NodeKind {
    /// An [RDF IRI](https://www.w3.org/TR/rdf11-concepts/#section-IRIs)
    Iri,
    /// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#section-blank-nodes)
    BlankNode,
    /// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#section-Graph-Literal)
    Literal,
}

/// A concrete RDF term, as stored in a [`Store`](crate::store::Store).
///
/// Cloning a [`Node`] is cheap: the underlying strings are reference-counted.
///
/// The [`Display`](fmt::Display) implementation produces the N-Triples form of the node,
/// which is also the form in which nodes are embedded in compiled SPARQL queries.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum Node {
    /// An IRI, i.e. a resource
    Iri(Iri),
    /// A blank node
    BlankNode(BnodeId),
    /// A literal
    Literal(Literal),
}

impl Node {
    /// Build an IRI node, checking that `iri` is a valid absolute IRI.
    pub fn iri<T: Into<String>>(iri: T) -> Result<Self, TermError> {
        Ok(Node::Iri(Iri::new(iri)?))
    }

    /// Build an IRI node without checking the validity of `iri`.
    pub fn iri_unchecked<T: Into<String>>(iri: T) -> Self {
        Node::Iri(Iri::new_unchecked(iri))
    }

    /// Build a blank node, checking that `id` is a valid blank node label.
    pub fn blank<T: Into<String>>(id: T) -> Result<Self, TermError> {
        Ok(Node::BlankNode(BnodeId::new(id)?))
    }

    /// Build a plain (`xsd:string`) literal node.
    pub fn literal<T: Into<String>>(lex: T) -> Self {
        Node::Literal(Literal::new(lex))
    }

    /// Build a datatyped literal node.
    pub fn typed_literal<T: Into<String>>(lex: T, datatype: Iri) -> Self {
        Node::Literal(Literal::new_typed(lex, datatype))
    }

    /// Build a language-tagged literal node, checking the language tag.
    pub fn lang_literal<T: Into<String>, U: Into<String>>(lex: T, tag: U) -> Result<Self, TermError> {
        Ok(Node::Literal(Literal::new_lang(lex, LanguageTag::new(tag)?)))
    }

    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Iri(_) => NodeKind::Iri,
            Node::BlankNode(_) => NodeKind::BlankNode,
            Node::Literal(_) => NodeKind::Literal,
        }
    }

    /// Whether this node is an IRI.
    #[inline]
    pub fn is_iri(&self) -> bool {
        self.kind() == NodeKind::Iri
    }

    /// Whether this node is a blank node.
    #[inline]
    pub fn is_blank_node(&self) -> bool {
        self.kind() == NodeKind::BlankNode
    }

    /// Whether this node is a literal.
    #[inline]
    pub fn is_literal(&self) -> bool {
        self.kind() == NodeKind::Literal
    }

    /// Return true if this node can be used as the subject (or graph name) of a statement,
    /// i.e. if it is an IRI or a blank node.
    #[inline]
    pub fn is_resource(&self) -> bool {
        !self.is_literal()
    }

    /// If this node is an IRI, return it.
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// If this node is a literal, return it.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// The raw string value of this node:
    /// the IRI, the blank node label or the lexical form of the literal.
    pub fn value(&self) -> &str {
        match self {
            Node::Iri(iri) => iri.as_str(),
            Node::BlankNode(id) => id.as_str(),
            Node::Literal(lit) => lit.lexical_form(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{}>", iri.as_str()),
            Node::BlankNode(id) => write!(f, "_:{}", id.as_str()),
            Node::Literal(lit) => lit.fmt(f),
        }
    }
}

impl From<Iri> for Node {
    fn from(iri: Iri) -> Self {
        Node::Iri(iri)
    }
}

impl From<BnodeId> for Node {
    fn from(id: BnodeId) -> Self {
        Node::BlankNode(id)
    }
}

impl From<Literal> for Node {
    fn from(lit: Literal) -> Self {
        Node::Literal(lit)
    }
}

impl From<&str> for Node {
    /// Plain literal
    fn from(lex: &str) -> Self {
        Node::literal(lex)
    }
}

/// Any error raised when building a [`Node`] or one of its constituents.
#[derive(Debug, Error)]
pub enum TermError {
    #[error(transparent)]
    InvalidIri(#[from] InvalidIri),
    #[error(transparent)]
    InvalidBnodeId(#[from] bnode_id::InvalidBnodeId),
    #[error(transparent)]
    InvalidLanguageTag(#[from] language_tag::InvalidLanguageTag),
    #[error(transparent)]
    InvalidVarName(#[from] var_name::InvalidVarName),
}
