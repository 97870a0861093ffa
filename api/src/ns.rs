//! Standard and custom namespaces.
//!
//! This module provides:
//! * the [`Namespace`](struct.Namespace.html) type for defining custom dynamic namespace;
//! * the [`namespace`] macro, for defning custom static namespaces;
//! * modules corresponding to the namespaces used by the inference engine
//!   (generated via the [`namespace`] macro).
//!
//! # Example use
//! ```
//! use entail_api::ns::{Namespace, rdf, rdfs};
//! use entail_api::term::Node;
//!
//! let schema = Namespace::new("http://schema.org/").unwrap();
//! let s_name = Node::from(schema.get("name").unwrap());
//! assert_eq!(s_name.to_string(), "<http://schema.org/name>");
//! assert!(rdfs::subClassOf == rdfs::subClassOf.to_node());
//! assert_eq!(rdf::type_.to_string(), "http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
//! ```
use crate::term::{InvalidIri, Iri, Node};
use std::fmt;

#[macro_use]
mod _macro;
pub use _macro::*;
mod _namespace;
pub use _namespace::*;
mod _term;
pub use _term::*;

/// The standard `rdf:` namespace.
///
/// NB: since `type` is a reserved keyword in Rust,
/// the term `rdf:type` spells `rdf::type_` (with a trailing underscore).
pub mod rdf {
    namespace!(
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
        // classes
        Property,
        Statement,
        // datatypes
        langString,
        XMLLiteral,
        // properties
        first,
        object,
        predicate,
        rest,
        subject,
        value,
        // individuals
        nil;
        // 'type' is a Rust keyword, so we use 'type_' instead
        type_ = "type"
    );
}

/// The standard `xsd:` namespace.
#[rustfmt::skip]
pub mod xsd {
    namespace!(
        "http://www.w3.org/2001/XMLSchema#",
        anyURI,
        boolean,
        date,
        dateTime,
        decimal,
        double,
        float,
        integer,
        string
    );
}

/// The standard `rdfs:` namespace.
pub mod rdfs {
    namespace!(
        "http://www.w3.org/2000/01/rdf-schema#",
        // types
        Class,
        Container,
        ContainerMembershipProperty,
        Datatype,
        Literal,
        Resource,
        // semantic properties
        domain,
        range,
        subClassOf,
        subPropertyOf,
        // documentation properties
        comment,
        isDefinedBy,
        label,
        member,
        seeAlso
    );
}

/// The [NEPOMUK Representational Language](http://www.semanticdesktop.org/ontologies/nrl/) namespace.
pub mod nrl {
    namespace!(
        "http://www.semanticdesktop.org/ontologies/2007/08/15/nrl#",
        // property classes
        AsymmetricProperty,
        DefiningProperty,
        ReflexiveProperty,
        SymmetricProperty,
        TransitiveProperty,
        // graph classes
        Graph,
        InstanceBase,
        KnowledgeBase,
        Ontology,
        // properties
        cardinality,
        inverseProperty,
        maxCardinality,
        minCardinality
    );
}

/// The vocabulary of the inference engine itself,
/// used to describe inference graphs and their provenance.
pub mod entail {
    namespace!(
        "urn:x-entail:",
        // classes
        InferenceGraph,
        // graphs
        InferenceMetadata,
        // properties
        context,
        sourceStatement
    );
}
