use record_derive::record;
use sea_orm::entity::prelude::*;

#[record]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    /// Stored form of [`crate::auth::Role`].
    pub role: String,
    pub last_login_at: Option<DateTimeWithTimeZone>,
    #[sea_orm(has_one)]
    pub farmer: HasOne<super::farmer::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
