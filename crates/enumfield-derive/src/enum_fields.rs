use crate::ident::{const_ident, fn_ident};
use darling::{FromDeriveInput, FromField, FromMeta, ast::NestedMeta, util::Override};
use enumfield_core::naming;
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashSet;
use syn::{DeriveInput, Error, Generics, Ident, Lit, LitStr, Type, ext::IdentExt};

///
/// EnumFieldsInput
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(enum_field), supports(struct_named))]
struct EnumFieldsInput {
    ident: Ident,
    generics: Generics,
    data: darling::ast::Data<(), FieldInput>,

    /// Model path, defaults to the struct name.
    #[darling(default)]
    path: Option<String>,
}

///
/// FieldInput
///

#[derive(Debug, FromField)]
#[darling(attributes(enum_field))]
struct FieldInput {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    values: Option<ValueList>,

    #[darling(default)]
    message: Option<String>,

    #[darling(default)]
    allow_nil: Option<bool>,

    #[darling(default)]
    allow_blank: Option<bool>,

    #[darling(default)]
    prefix: Option<Override<PrefixArg>>,
}

///
/// ValueList
///

#[derive(Debug)]
struct ValueList(Vec<LitStr>);

impl FromMeta for ValueList {
    fn from_list(items: &[NestedMeta]) -> darling::Result<Self> {
        items
            .iter()
            .map(|item| match item {
                NestedMeta::Lit(Lit::Str(lit)) => Ok(lit.clone()),
                other => {
                    Err(darling::Error::unexpected_type("non-string literal").with_span(other))
                }
            })
            .collect::<darling::Result<Vec<_>>>()
            .map(Self)
    }
}

///
/// PrefixArg
///

#[derive(Debug)]
enum PrefixArg {
    Off,
    Field,
    Custom(String),
}

impl FromMeta for PrefixArg {
    fn from_bool(value: bool) -> darling::Result<Self> {
        Ok(if value { Self::Field } else { Self::Off })
    }

    fn from_string(value: &str) -> darling::Result<Self> {
        Ok(Self::Custom(value.to_string()))
    }
}

// ============================================================================
// Declared fields
// ============================================================================

///
/// EnumField
/// One annotated struct field with its resolved options.
///

struct EnumField {
    ident: Ident,
    name: String,
    optional: bool,
    values: Vec<LitStr>,
    message: Option<String>,
    allow_nil: Option<bool>,
    allow_blank: Option<bool>,
    prefix: Option<PrefixArg>,
}

impl EnumField {
    fn from_input(field: FieldInput) -> Result<Option<Self>, Error> {
        let Some(ident) = field.ident else {
            return Ok(None);
        };

        let Some(values) = field.values else {
            let has_options = field.message.is_some()
                || field.allow_nil.is_some()
                || field.allow_blank.is_some()
                || field.prefix.is_some();

            if has_options {
                return Err(Error::new_spanned(
                    &ident,
                    "enum_field options require `values(...)`",
                ));
            }

            return Ok(None);
        };

        let prefix = field.prefix.map(|prefix| match prefix {
            Override::Inherit => PrefixArg::Field,
            Override::Explicit(prefix) => prefix,
        });

        Ok(Some(Self {
            name: ident.unraw().to_string(),
            optional: is_option(&field.ty),
            ident,
            values: values.0,
            message: field.message,
            allow_nil: field.allow_nil,
            allow_blank: field.allow_blank,
            prefix,
        }))
    }

    fn resolved_prefix(&self) -> Option<String> {
        let prefix = match &self.prefix {
            None | Some(PrefixArg::Off) => naming::Prefix::None,
            Some(PrefixArg::Field) => naming::Prefix::Field,
            Some(PrefixArg::Custom(prefix)) => naming::Prefix::Custom(prefix.clone()),
        };

        prefix.resolve(&self.name)
    }

    fn value_access(&self) -> TokenStream {
        let ident = &self.ident;

        if self.optional {
            quote! {
                self.#ident.as_ref().map(|value| ::core::convert::AsRef::<str>::as_ref(value))
            }
        } else {
            quote! {
                ::core::option::Option::Some(::core::convert::AsRef::<str>::as_ref(&self.#ident))
            }
        }
    }

    fn options_expr(&self) -> TokenStream {
        let message = quote_option(
            self.message
                .as_ref()
                .map(|m| quote!(::std::string::String::from(#m))),
        );
        let allow_nil = quote_option(self.allow_nil.map(|b| quote!(#b)));
        let allow_blank = quote_option(self.allow_blank.map(|b| quote!(#b)));
        let prefix = match &self.prefix {
            None | Some(PrefixArg::Off) => quote!(::enumfield::core::naming::Prefix::None),
            Some(PrefixArg::Field) => quote!(::enumfield::core::naming::Prefix::Field),
            Some(PrefixArg::Custom(prefix)) => {
                quote!(::enumfield::core::naming::Prefix::Custom(
                    ::std::string::String::from(#prefix)
                ))
            }
        };

        quote! {
            ::enumfield::core::declare::EnumFieldOptions {
                message: #message,
                allow_nil: #allow_nil,
                allow_blank: #allow_blank,
                prefix: #prefix,
            }
        }
    }
}

fn quote_option(value: Option<TokenStream>) -> TokenStream {
    value.map_or_else(
        || quote!(::core::option::Option::None),
        |value| quote!(::core::option::Option::Some(#value)),
    )
}

fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "Option")
}

// ============================================================================
// Generated names
// ============================================================================

///
/// Names
///
/// Tracks generated names across the whole struct. The first definition of
/// a constant, predicate or scope wins; later duplicates are skipped.
///

#[derive(Default)]
struct Names {
    constants: HashSet<String>,
    predicates: HashSet<String>,
    scopes: HashSet<String>,
}

impl Names {
    fn claim(set: &mut HashSet<String>, name: &str) -> bool {
        set.insert(name.to_string())
    }
}

///
/// Generated
///

#[derive(Default)]
struct Generated {
    items: Vec<TokenStream>,
    fn_names: HashSet<String>,
}

impl Generated {
    fn push_fn(&mut self, ident: &Ident, item: TokenStream) -> Result<(), Error> {
        if !self.fn_names.insert(ident.to_string()) {
            return Err(Error::new(
                ident.span(),
                format!("generated function `{ident}` clashes with another generated function"),
            ));
        }

        self.items.push(item);

        Ok(())
    }
}

fn expand_field(field: &EnumField, names: &mut Names, out: &mut Generated) -> Result<(), Error> {
    let prefix = field.resolved_prefix();
    let prefix = prefix.as_deref();
    let field_name = &field.name;

    for lit in &field.values {
        let value = lit.value();
        let span = lit.span();

        if naming::verify_format(&value).is_err() {
            return Err(Error::new(span, format!("invalid enum value: {value}")));
        }

        let method = naming::methodize(&value);

        let constant = naming::constant_name(prefix, &method);
        if Names::claim(&mut names.constants, &constant) {
            let ident = const_ident(&constant, span)?;
            out.items.push(quote! {
                pub const #ident: &'static str = #lit;
            });
        }

        let predicate = naming::predicate_name(prefix, &method);
        if Names::claim(&mut names.predicates, &predicate) {
            let base = predicate.trim_end_matches('?');
            let ident = fn_ident(&format!("is_{base}"), span)?;
            let doc = format!("True when `{field_name}` is `{value}`.");
            out.push_fn(
                &ident,
                quote! {
                    #[doc = #doc]
                    #[must_use]
                    pub fn #ident(&self) -> bool {
                        ::enumfield::core::traits::Record::field_value(self, #field_name)
                            == ::core::option::Option::Some(#lit)
                    }
                },
            )?;
        }

        let scope = naming::scope_name(&method);
        if Names::claim(&mut names.scopes, &scope) {
            let ident = fn_ident(&scope, span)?;
            let doc = format!("Scope restricting `{field_name}` to `{value}`.");
            out.push_fn(
                &ident,
                quote! {
                    #[doc = #doc]
                    #[must_use]
                    pub fn #ident() -> ::enumfield::core::query::Filter {
                        ::enumfield::core::query::Filter::eq(#field_name, #lit)
                    }
                },
            )?;
        }
    }

    let aggregate = naming::aggregate_constant_name(field_name);
    if Names::claim(&mut names.constants, &aggregate) {
        let ident = const_ident(&aggregate, field.ident.span())?;
        let values = &field.values;
        out.items.push(quote! {
            pub const #ident: &'static [&'static str] = &[#(#values),*];
        });
    }

    Ok(())
}

// ============================================================================
// Derive
// ============================================================================

pub fn derive_enum_fields(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let input = match EnumFieldsInput::from_derive_input(&input) {
        Ok(input) => input,
        Err(err) => return err.write_errors(),
    };

    match expand(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: EnumFieldsInput) -> Result<TokenStream, Error> {
    let ident = &input.ident;
    let model_path = input.path.clone().unwrap_or_else(|| ident.to_string());
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = input
        .data
        .take_struct()
        .map(|fields| fields.fields)
        .unwrap_or_default();

    let mut enum_fields = Vec::new();
    for field in fields {
        if let Some(field) = EnumField::from_input(field)? {
            enum_fields.push(field);
        }
    }

    if enum_fields.is_empty() {
        return Err(Error::new_spanned(
            ident,
            "EnumFields requires at least one field with #[enum_field(values(...))]",
        ));
    }

    let mut names = Names::default();
    let mut generated = Generated::default();
    for field in &enum_fields {
        expand_field(field, &mut names, &mut generated)?;
    }
    let items = &generated.items;

    let record_arms = enum_fields.iter().map(|field| {
        let name = &field.name;
        let access = field.value_access();

        quote! {
            #name => #access,
        }
    });

    let declarations = enum_fields.iter().map(|field| {
        let name = &field.name;
        let values = &field.values;
        let options = field.options_expr();

        quote! {
            ::enumfield::core::declare::declare_enum_field(host, #name, [#(#values),*], &#options)?;
        }
    });

    Ok(quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#items)*
        }

        impl #impl_generics ::enumfield::core::traits::Record for #ident #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::core::option::Option<&str> {
                match field {
                    #(#record_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::enumfield::core::traits::EnumModel for #ident #ty_generics #where_clause {
            const MODEL_PATH: &'static str = #model_path;

            fn declare_enum_fields<H: ::enumfield::core::host::EnumHost + ?Sized>(
                host: &mut H,
            ) -> ::core::result::Result<(), ::enumfield::core::error::EnumFieldError> {
                #(#declarations)*

                ::core::result::Result::Ok(())
            }
        }
    })
}
