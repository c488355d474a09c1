use proc_macro2::Span;
use syn::{Error, Ident};

// Identifiers that cannot be written even as raw identifiers.
const UNRAWABLE: &[&str] = &["_", "crate", "self", "Self", "super"];

fn is_ident_shaped(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name.chars().next().is_some_and(|c| !c.is_ascii_digit())
        && !UNRAWABLE.contains(&name)
}

/// `UPPER_SNAKE` constant identifier.
pub fn const_ident(name: &str, span: Span) -> Result<Ident, Error> {
    if is_ident_shaped(name) {
        Ok(Ident::new(name, span))
    } else {
        Err(not_an_ident("constant", name, span))
    }
}

/// Function identifier; keywords are emitted as raw identifiers.
pub fn fn_ident(name: &str, span: Span) -> Result<Ident, Error> {
    if !is_ident_shaped(name) {
        return Err(not_an_ident("function", name, span));
    }

    match syn::parse_str::<Ident>(name) {
        Ok(ident) => Ok(Ident::new(&ident.to_string(), span)),
        Err(_) => Ok(Ident::new_raw(name, span)),
    }
}

fn not_an_ident(kind: &str, name: &str, span: Span) -> Error {
    Error::new(
        span,
        format!("derived {kind} name `{name}` is not a valid Rust identifier; use a prefix"),
    )
}

///
/// TESTS
///
