/// Define a validated wrapper around a reference-counted `str`.
///
/// The generated type gets `new_unchecked`, `as_str` and a few standard traits;
/// the checking constructor `new` is written by hand,
/// next to the rule it enforces.
macro_rules! wrap_str {
    ($(#[$attrs:meta])* $wid:ident) => {
        $(#[$attrs])*
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
        pub struct $wid(std::sync::Arc<str>);

        impl $wid {
            /// Build a new value without checking that `txt` is valid.
            pub fn new_unchecked<T: Into<String>>(txt: T) -> Self {
                $wid(std::sync::Arc::from(txt.into()))
            }

            /// Gets a reference to the underlying `str`.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::convert::AsRef<str> for $wid {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $wid {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $wid {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl PartialEq<str> for $wid {
            fn eq(&self, other: &str) -> bool {
                &*self.0 == other
            }
        }

        impl PartialEq<&str> for $wid {
            fn eq(&self, other: &&str) -> bool {
                &*self.0 == *other
            }
        }
    };
}
