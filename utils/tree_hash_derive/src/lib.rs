extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields};

/// Implements `tree_hash::TreeHash` for a struct as an SSZ container: the
/// root is the Merkle root of the field roots in declaration order.
#[proc_macro_derive(TreeHash, attributes(tree_hash))]
pub fn tree_hash_derive(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = syn::parse(input).expect("AST should be correct");

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = &ast.generics.split_for_impl();
    let fields = hashable_fields(&ast.data);

    let field_count = fields.len();
    let field_idents: Vec<_> = fields
        .iter()
        .map(|field| match &field.ident {
            Some(ident) => ident,
            _ => panic!("All fields must have names"),
        })
        .collect();

    let generated = quote! {
        impl #impl_generics tree_hash::TreeHash for #name #ty_generics #where_clause {
            fn tree_hash_type() -> tree_hash::TreeHashType {
                tree_hash::TreeHashType::Container
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                unreachable!("Container should never be packed")
            }

            fn tree_hash_packing_factor() -> usize {
                unreachable!("Container should never be packed")
            }

            fn tree_hash_root(&self) -> Vec<u8> {
                let mut leaves = Vec::with_capacity(#field_count * tree_hash::BYTES_PER_CHUNK);
                #(
                    leaves.extend_from_slice(&tree_hash::TreeHash::tree_hash_root(
                        &self.#field_idents,
                    ));
                )*

                tree_hash::merkle_root(&leaves)
            }
        }
    };

    generated.into()
}

fn hashable_fields(data: &Data) -> Vec<&Field> {
    let fields = match data {
        Data::Struct(struct_data) => &struct_data.fields,
        _ => panic!("TreeHash is only available for structs"),
    };

    match fields {
        Fields::Named(named) => named.named.iter().filter(|f| !should_skip(f)).collect(),
        _ => panic!("All fields must have names"),
    }
}

fn should_skip(field: &Field) -> bool {
    field.attrs.iter().any(|attr| {
        attr.path.is_ident("tree_hash")
            && attr.tokens.to_string().replace(' ', "") == "(skip_hashing)"
    })
}
