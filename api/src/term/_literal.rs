use super::{Iri, LanguageTag};
use crate::ns::{rdf, xsd};
use std::fmt;
use std::sync::Arc;

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#section-Graph-Literal).
///
/// Every literal has a datatype:
/// simple literals are `xsd:string` literals,
/// and language-tagged literals have the datatype `rdf:langString`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct Literal {
    lexical: Arc<str>,
    datatype: Iri,
    language: Option<LanguageTag>,
}

impl Literal {
    /// Build a simple (`xsd:string`) literal.
    pub fn new<T: Into<String>>(lex: T) -> Self {
        Self::new_typed(lex, xsd::string.to_iri())
    }

    /// Build a datatyped literal.
    pub fn new_typed<T: Into<String>>(lex: T, datatype: Iri) -> Self {
        Literal {
            lexical: Arc::from(lex.into()),
            datatype,
            language: None,
        }
    }

    /// Build a language-tagged literal.
    pub fn new_lang<T: Into<String>>(lex: T, tag: LanguageTag) -> Self {
        Literal {
            lexical: Arc::from(lex.into()),
            datatype: rdf::langString.to_iri(),
            language: Some(tag),
        }
    }

    /// The lexical form of this literal, without quotes or escapes.
    pub fn lexical_form(&self) -> &str {
        &self.lexical
    }

    /// The datatype IRI (`rdf:langString` for language-tagged literals).
    pub fn datatype(&self) -> &Iri {
        &self.datatype
    }

    /// The language tag, if any.
    pub fn language_tag(&self) -> Option<&LanguageTag> {
        self.language.as_ref()
    }
}

impl fmt::Display for Literal {
    /// N-Triples form; the datatype is always explicit, except for language-tagged strings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        write_escaped(f, &self.lexical)?;
        f.write_str("\"")?;
        match &self.language {
            Some(tag) => write!(f, "@{}", tag.as_str()),
            None => write!(f, "^^<{}>", self.datatype.as_str()),
        }
    }
}

/// Write `txt` escaped as the content of an N-Triples `STRING_LITERAL_QUOTE`.
pub(crate) fn write_escaped<W: fmt::Write>(w: &mut W, txt: &str) -> fmt::Result {
    for c in txt.chars() {
        match c {
            '"' => w.write_str("\\\"")?,
            '\\' => w.write_str("\\\\")?,
            '\n' => w.write_str("\\n")?,
            '\r' => w.write_str("\\r")?,
            '\t' => w.write_str("\\t")?,
            c => w.write_char(c)?,
        }
    }
    Ok(())
}
