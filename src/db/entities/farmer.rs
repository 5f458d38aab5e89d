use record_derive::record;
use sea_orm::entity::prelude::*;

#[record]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "farmers")]
pub struct Model {
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub farmer_name: String,
    pub contact_no: String,
    #[sea_orm(belongs_to, from = "user_id", to = "id", on_delete = "Cascade")]
    pub user: HasOne<super::user::Entity>,
    #[sea_orm(has_many)]
    pub produce: HasMany<super::produce::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
