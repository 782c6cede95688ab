use quote::quote;
use syn::Data;

pub(crate) fn flat_error(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(item as syn::DeriveInput);
    let type_identifier = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    match &input.data {
        Data::Enum(data) => {
            let match_arms = data.variants.iter().map(|variant| {
                let variant_ident = &variant.ident;
                let variant_name = variant_ident.to_string();
                match variant.fields {
                    syn::Fields::Unit => quote! {
                        #type_identifier::#variant_ident => #variant_name
                    },
                    syn::Fields::Named(_) => quote! {
                        #type_identifier::#variant_ident { .. } => #variant_name
                    },
                    syn::Fields::Unnamed(_) => quote! {
                        #type_identifier::#variant_ident(..) => #variant_name
                    },
                }
            });

            quote! {
                #[automatically_derived]
                impl #impl_generics ::vnconnector_error::FlatError for #type_identifier #type_generics #where_clause {
                    fn error_variant(&self) -> &'static str {
                        match &self {
                            #(#match_arms), *
                        }
                    }
                }
            }
            .into()
        }
        _ => syn::Error::new_spanned(input, "vnconnector_error can only be used with enums")
            .to_compile_error()
            .into(),
    }
}
