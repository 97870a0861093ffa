use thiserror::Error;

wrap_str! {
    /// This wrapper guarantees that the underlying `str`
    /// is a valid absolute [IRI](https://www.ietf.org/rfc/rfc3987.txt).
    ///
    /// Relative IRI references are not accepted:
    /// every resource stored by Entail is named by an absolute IRI.
    Iri
}

impl Iri {
    /// Build a new [`Iri`] from `iri`,
    /// returning an error if it is not a valid absolute IRI.
    pub fn new<T: Into<String>>(iri: T) -> Result<Self, InvalidIri> {
        let iri = iri.into();
        let res = oxiri::Iri::parse(iri.as_str())
            .map(|_| ())
            .map_err(|e| e.to_string());
        match res {
            Ok(()) => Ok(Self::new_unchecked(iri)),
            Err(reason) => Err(InvalidIri(iri, reason)),
        }
    }
}

/// This error is raised when trying to build an invalid IRI.
#[derive(Debug, Error)]
#[error("The given IRI '{0}' is not valid: {1}")]
pub struct InvalidIri(pub String, pub String);
