use proc_macro::TokenStream;

mod enum_fields;
mod ident;

/// Generate constants, predicates, scopes, `Record` and `EnumModel` for
/// fields annotated with `#[enum_field(values(...))]`.
#[proc_macro_derive(EnumFields, attributes(enum_field))]
pub fn derive_enum_fields(input: TokenStream) -> TokenStream {
    enum_fields::derive_enum_fields(input.into()).into()
}
