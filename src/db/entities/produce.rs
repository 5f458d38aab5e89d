use record_derive::record;
use sea_orm::entity::prelude::*;

#[record]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "produce")]
pub struct Model {
    #[sea_orm(indexed)]
    pub farmer_id: Uuid,
    pub crop_name: String,
    pub quantity: f64,
    pub quality: String,
    pub harvest_date: Date,
    #[sea_orm(belongs_to, from = "farmer_id", to = "id", on_delete = "Cascade")]
    pub farmer: HasOne<super::farmer::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
