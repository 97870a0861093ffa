use super::*;

/// A custom namespace, as declared by a `PREFIX` line of a rule file.
///
/// The [`get`](Namespace::get) method can be used to create a new IRI by concatenating a suffix to this namespace's IRI.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Namespace(Iri);

impl Namespace {
    /// Build a custom namespace based on the given IRI.
    ///
    /// `iri` must be a valid IRI, otherwise this constructor returns an error.
    pub fn new<T: Into<String>>(iri: T) -> Result<Self, InvalidIri> {
        Iri::new(iri).map(Namespace)
    }

    /// Build an IRI by appending `suffix` to this namespace.
    ///
    /// Return an error if the concatenation produces an invalid IRI.
    pub fn get(&self, suffix: &str) -> Result<Iri, InvalidIri> {
        Iri::new(format!("{}{}", self.0.as_str(), suffix))
    }

    /// The IRI of this namespace.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
