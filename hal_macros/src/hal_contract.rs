//! `HalContract` derive macro implementation

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, FieldsNamed, Ident, LitStr, Type, WherePredicate,
    parse_macro_input, parse_quote,
};

use crate::serde_attrs::{self, ContainerAttrs};

/// One field that ends up in the serialized object
struct ContractField<'a> {
    ident:           &'a Ident,
    ty:              &'a Type,
    native_name:     String,
    serialized_name: String,
}

pub fn derive_hal_contract_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "HalContract can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            name,
            "HalContract can only be derived for structs with named fields",
        ));
    };

    let container = serde_attrs::container_attrs(&input.attrs)?;
    let fields = contract_fields(named, &container)?;
    let elements = elements_field(input)?;

    let members = fields.iter().map(|field| {
        let ident = field.ident;
        let native_name = &field.native_name;
        let serialized_name = &field.serialized_name;
        quote! {
            ::hal_transform::Member::renamed(#native_name, #serialized_name, &self.#ident)
        }
    });

    // field types that must be resources, as serde bounds field types by `Serialize`
    let mut bounded: Vec<&Type> = fields.iter().map(|field| field.ty).collect();

    let contract = match elements {
        Some(field) => {
            let Some(ty) = named
                .named
                .iter()
                .find(|candidate| candidate.ident.as_ref() == Some(&field))
                .map(|candidate| &candidate.ty)
            else {
                return Err(syn::Error::new_spanned(
                    &field,
                    format!("`{name}` has no field named `{field}`"),
                ));
            };
            bounded.push(ty);
            quote! { <#ty as ::hal_transform::Resource>::contract(&self.#field) }
        }
        None => quote! {
            ::hal_transform::Contract::Object(<Self as ::hal_transform::HalContract>::members(self))
        },
    };

    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for ty in bounded {
            let predicate: WherePredicate = parse_quote! { #ty: ::hal_transform::Resource };
            where_clause.predicates.push(predicate);
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::hal_transform::HalContract for #name #ty_generics #where_clause {
            fn contract(&self) -> ::hal_transform::Contract<'_> {
                #contract
            }

            fn members(&self) -> ::std::vec::Vec<::hal_transform::Member<'_>> {
                ::std::vec![#(#members),*]
            }
        }
    })
}

/// Fields serde writes, with their native and serialized names
fn contract_fields<'a>(
    named: &'a FieldsNamed,
    container: &ContainerAttrs,
) -> syn::Result<Vec<ContractField<'a>>> {
    let mut fields = Vec::new();
    for field in &named.named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = serde_attrs::field_attrs(&field.attrs)?;
        // flattened members have no name of their own in the serialized object
        if attrs.skipped || attrs.flatten {
            continue;
        }

        let ident_string = ident.to_string();
        let native_name = ident_string
            .strip_prefix("r#")
            .unwrap_or(&ident_string)
            .to_string();
        let serialized_name = attrs.rename.unwrap_or_else(|| {
            container
                .rename_all
                .map_or_else(|| native_name.clone(), |rule| rule.apply(&native_name))
        });

        fields.push(ContractField {
            ident,
            ty: &field.ty,
            native_name,
            serialized_name,
        });
    }
    Ok(fields)
}

/// Field named by `#[hal(elements = "...")]`
fn elements_field(input: &DeriveInput) -> syn::Result<Option<Ident>> {
    let mut elements = None;
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("hal")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("elements") {
                let literal: LitStr = meta.value()?.parse()?;
                elements = Some(literal.parse::<Ident>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported hal attribute, expected `elements`"))
            }
        })?;
    }
    Ok(elements)
}
