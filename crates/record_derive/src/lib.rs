//! `#[record]` prepends the columns every table in the app shares (a UUID
//! primary key plus `created_at`/`updated_at`) to a sea-orm `Model` and wires
//! the active model into the DAO stamping traits.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Fields, ItemStruct, Path, parse_macro_input, parse_quote};

const RESERVED: [&str; 3] = ["id", "created_at", "updated_at"];

#[proc_macro_attribute]
pub fn record(attr: TokenStream, item: TokenStream) -> TokenStream {
    let traits_path: Path = if attr.is_empty() {
        parse_quote!(crate::db::dao::base_traits)
    } else {
        parse_macro_input!(attr as Path)
    };

    let mut input = parse_macro_input!(item as ItemStruct);
    let Fields::Named(fields) = &mut input.fields else {
        return syn::Error::new_spanned(&input, "#[record] requires a struct with named fields")
            .to_compile_error()
            .into();
    };

    if let Some(clash) = fields.named.iter().find(|field| {
        field
            .ident
            .as_ref()
            .is_some_and(|ident| RESERVED.contains(&ident.to_string().as_str()))
    }) {
        return syn::Error::new_spanned(clash, "#[record] adds this column itself; remove it")
            .to_compile_error()
            .into();
    }

    let shared: [syn::Field; 3] = [
        parse_quote! {
            #[sea_orm(primary_key, auto_increment = false)]
            pub id: uuid::Uuid
        },
        parse_quote! {
            #[sea_orm(default_expr = "Expr::current_timestamp()")]
            pub created_at: sea_orm::entity::prelude::DateTimeWithTimeZone
        },
        parse_quote! {
            #[sea_orm(default_expr = "Expr::current_timestamp()")]
            pub updated_at: sea_orm::entity::prelude::DateTimeWithTimeZone
        },
    ];

    let own = std::mem::take(&mut fields.named);
    fields.named.extend(shared);
    fields.named.extend(own);

    let expanded = quote! {
        #input

        impl #traits_path::HasIdActiveModel for ActiveModel {
            fn set_id(&mut self, id: uuid::Uuid) {
                self.id = sea_orm::ActiveValue::Set(id);
            }
        }

        impl #traits_path::TimestampedActiveModel for ActiveModel {
            fn set_created_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone) {
                self.created_at = sea_orm::ActiveValue::Set(ts);
            }

            fn set_updated_at(&mut self, ts: sea_orm::entity::prelude::DateTimeWithTimeZone) {
                self.updated_at = sea_orm::ActiveValue::Set(ts);
            }
        }

        impl #traits_path::HasCreatedAtColumn for Entity {
            fn created_at_column() -> Column {
                Column::CreatedAt
            }

            fn id_column() -> Column {
                Column::Id
            }
        }
    };

    expanded.into()
}
