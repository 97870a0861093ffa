/// Declare, in the current module, a static [`NsTerm`](crate::ns::NsTerm)
/// for each listed suffix of the IRI prefix `$iri_prefix`.
///
/// Suffixes that are not valid Rust identifiers are given as `ident = "suffix"` pairs,
/// after a semicolon:
/// ```
/// mod ex {
///     entail_api::namespace!("http://example.org/", Person, name; type_ = "type");
/// }
/// assert_eq!(ex::type_.to_string(), "http://example.org/type");
/// ```
///
/// The terms are not checked at runtime;
/// instead, a test is generated for each of them, checking that it is a valid IRI.
#[macro_export]
macro_rules! namespace {
    ($iri_prefix:expr, $($suffix:ident),* $(; $($r_id:ident = $r_sf:expr),*)?) => {
        /// IRI prefix of this namespace.
        pub static PREFIX: &str = $iri_prefix;
        $(
            $crate::ns_iri!(PREFIX, $suffix, stringify!($suffix));
        )*
        $($(
            $crate::ns_iri!(PREFIX, $r_id, $r_sf);
        )*)?

        #[cfg(test)]
        mod test_valid_iri {
            $(
                #[allow(non_snake_case)]
                #[test]
                fn $suffix() {
                    let iri = super::$suffix.to_string();
                    assert!($crate::term::Iri::new(iri.as_str()).is_ok(), "{iri}");
                    assert!(super::$suffix.is(&iri));
                }
            )*
            $($(
                #[allow(non_snake_case)]
                #[test]
                fn $r_id() {
                    let iri = super::$r_id.to_string();
                    assert!($crate::term::Iri::new(iri.as_str()).is_ok(), "{iri}");
                    assert!(iri.ends_with($r_sf));
                }
            )*)?
        }
    };
}

/// Declare one term of a [`namespace!`](crate::namespace).
///
/// The concatenation of `$prefix` and `$suffix` is assumed to be a valid IRI.
#[doc(hidden)]
#[macro_export]
macro_rules! ns_iri {
    ($prefix:expr, $ident:ident, $suffix:expr) => {
        #[allow(non_upper_case_globals)]
        /// Generated term.
        pub static $ident: $crate::ns::NsTerm = $crate::ns::NsTerm::new_unchecked($prefix, $suffix);
    };
}
