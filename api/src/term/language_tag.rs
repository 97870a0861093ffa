//! I define the [`LanguageTag`] wrapper type,
//! which guarantees that the underlying `str`
//! is a valid [BCP47](https://tools.ietf.org/search/bcp47) language tag.
//!
//! Language tags are case-insensitive;
//! they are normalized to lower case when built,
//! so that two [`LanguageTag`]s are equal iff they denote the same tag.
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref LANG_TAG: Regex = Regex::new(LANG_TAG_SRC).unwrap();
}

wrap_str! {
    /// This wrapper guarantees that the underlying `str`
    /// is a valid [BCP47](https://tools.ietf.org/search/bcp47) language tag, in lower case.
    ///
    /// NB: it is actually slightly more permissive than BCP47,
    /// as it does not check that the different subtags are registered (language, country...) codes.
    LanguageTag
}

impl LanguageTag {
    /// Build a new [`LanguageTag`] from `tag`,
    /// returning an error if it is not a valid BCP47 language tag.
    pub fn new<T: Into<String>>(tag: T) -> Result<Self, InvalidLanguageTag> {
        let mut tag = tag.into();
        if LANG_TAG.is_match(&tag) {
            tag.make_ascii_lowercase();
            Ok(Self::new_unchecked(tag))
        } else {
            Err(InvalidLanguageTag(tag))
        }
    }
}

/// This error is raised when trying to parse an invalid language tag.
#[derive(Debug, Error)]
#[error("The given language tag '{0}' does not comply with BCP47")]
pub struct InvalidLanguageTag(pub String);

/// Match a valid BCP47 language tag
static LANG_TAG_SRC: &str = r"(?xi-u)^
(
  (?:
    (?: #language
      (?:
        [A-Z]{2,3}
        (?: #extlang
          (?:
            -[A-Z]{3}
          ){0,3}
        )
      )
    |
      [A-Z]{4,8}
    )
    (?: #script
      -[A-Z]{4}
    )?
    (?: #region
      -
      (?:
        [A-Z]{2}
      |
        [0-9]{3}
      )
    )?
    (?: #variant
      -
      (?:
        [A-Z0-9]{5,8}
      |
        [0-9][A-Z0-9]{3}
      )
    )*
    (?: #extension
      -[0-9A-WY-Z]
      (?:
        -[A-Z0-9]{2,8}
      )+
    )*
    (?: #privateUse
      -X
      (?:
        -[A-Z0-9]{1,8}
      )+
    )?
  )
|
  (?: #privateUse
    X
    (?:
      -[A-Z0-9]{1,8}
    )+
  )
|
  (?: #grandfathered
    en-GB-oed|i-ami|i-bnn|i-default|i-enochian|i-hak|i-klingon|i-lux|i-mingo|i-navajo|i-pwn|i-tao|i-tay|i-tsu|sgn-BE-FR|sgn-BE-NL|sgn-CH-DE
    # NB regular grandfathered tags are not included,
    # as they will be matched by the normal case
  )
)$";
