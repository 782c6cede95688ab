use quote::quote;

pub(crate) fn vnconnector_error_flat(input: &syn::DeriveInput) -> proc_macro::TokenStream {
    let type_identifier = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        #[derive(::vnconnector_error::FlatError)]
        #input

        #[automatically_derived]
        impl #impl_generics ::vnconnector_error::VnConnectorError for #type_identifier #type_generics #where_clause {}
    }
    .into()
}
