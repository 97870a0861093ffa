use super::*;

/// A term produced by the [`namespace!`](crate::namespace) macro.
///
/// It stores the IRI in two parts (namespace and suffix),
/// so that it can be built in a `static`.
#[derive(Clone, Copy, Debug)]
pub struct NsTerm {
    pub(crate) ns: &'static str,
    /// NB: suffix must satisfy that ns+suffix is still a valid IRI
    pub(crate) suffix: &'static str,
}

impl fmt::Display for NsTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.ns, self.suffix)
    }
}

impl NsTerm {
    /// Make an NsTerm without checking that it produces a valid IRI.
    pub const fn new_unchecked(ns: &'static str, suffix: &'static str) -> Self {
        NsTerm { ns, suffix }
    }

    /// Return an [`Iri`] representing this term.
    pub fn to_iri(&self) -> Iri {
        Iri::new_unchecked(self.to_string())
    }

    /// Return a [`Node`] representing this term.
    pub fn to_node(&self) -> Node {
        Node::Iri(self.to_iri())
    }

    /// Check whether `iri` is this term, without allocating.
    pub fn is(&self, iri: &str) -> bool {
        iri.len() == self.ns.len() + self.suffix.len()
            && iri.starts_with(self.ns)
            && iri.ends_with(self.suffix)
    }
}

impl PartialEq<Node> for NsTerm {
    fn eq(&self, other: &Node) -> bool {
        other.as_iri().map(|iri| self.is(iri.as_str())).unwrap_or(false)
    }
}

impl PartialEq<NsTerm> for Node {
    fn eq(&self, other: &NsTerm) -> bool {
        other == self
    }
}

impl From<NsTerm> for Node {
    fn from(t: NsTerm) -> Self {
        t.to_node()
    }
}

impl From<&NsTerm> for Node {
    fn from(t: &NsTerm) -> Self {
        t.to_node()
    }
}
