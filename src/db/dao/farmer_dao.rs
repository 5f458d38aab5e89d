use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, Set};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::{farmer, prelude::Farmer, user};

/// Contact number recorded when a farmer has not supplied one.
pub const PLACEHOLDER_CONTACT_NO: &str = "Not provided";

/// The only place a farmer profile row is shaped, whether it is written at
/// registration or lazily at login.
pub fn profile_active_model(user: &user::Model, contact_no: Option<&str>) -> farmer::ActiveModel {
    let contact_no = contact_no
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(PLACEHOLDER_CONTACT_NO);

    farmer::ActiveModel {
        user_id: Set(user.id),
        farmer_name: Set(user.name.clone()),
        contact_no: Set(contact_no.to_string()),
        ..Default::default()
    }
}

#[derive(Clone)]
pub struct FarmerDao {
    db: DatabaseConnection,
}

impl DaoBase for FarmerDao {
    type Entity = Farmer;
    const ENTITY: &'static str = "Farmer profile";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl FarmerDao {
    pub async fn find_by_user_id(&self, user_id: &Uuid) -> DaoResult<Option<farmer::Model>> {
        let user_id = *user_id;
        self.find(1, 1, None, move |query| {
            query.filter(farmer::Column::UserId.eq(user_id))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    pub async fn create_profile(
        &self,
        user: &user::Model,
        contact_no: Option<&str>,
    ) -> DaoResult<farmer::Model> {
        self.create(profile_active_model(user, contact_no)).await
    }
}
