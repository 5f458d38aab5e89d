use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{
    DaoBase, DaoLayerError, DaoResult, FarmerDao, base_traits::stamp_new, farmer_dao,
};
use crate::auth::Role;
use crate::db::entities::{farmer, prelude::User, user};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    fn into_active_model(self) -> user::ActiveModel {
        user::ActiveModel {
            name: Set(self.name),
            email: Set(self.email),
            password_hash: Set(self.password_hash),
            role: Set(self.role.as_str().to_string()),
            last_login_at: Set(None),
            ..Default::default()
        }
    }
}

#[derive(Clone)]
pub struct UserDao {
    db: DatabaseConnection,
}

impl DaoBase for UserDao {
    type Entity = User;
    const ENTITY: &'static str = "User";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl UserDao {
    pub async fn find_by_email(&self, email: &str) -> DaoResult<Option<user::Model>> {
        let email = email.to_string();
        self.find(1, 1, None, move |query| {
            query.filter(user::Column::Email.eq(email))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    pub async fn create_user(&self, new_user: NewUser) -> DaoResult<user::Model> {
        self.create(new_user.into_active_model()).await
    }

    /// Inserts the user and its farmer profile in one transaction; if the
    /// profile insert fails the user row is rolled back too.
    pub async fn create_user_with_farmer_profile(
        &self,
        new_user: NewUser,
        contact_no: Option<&str>,
    ) -> DaoResult<(user::Model, farmer::Model)> {
        let txn = self.db.begin().await.map_err(DaoLayerError::Db)?;

        let mut active = new_user.into_active_model();
        stamp_new(&mut active);
        let user = active
            .insert(&txn)
            .await
            .map_err(|err| DaoLayerError::from_write(Self::ENTITY, err))?;

        let mut profile = farmer_dao::profile_active_model(&user, contact_no);
        stamp_new(&mut profile);
        let profile = profile
            .insert(&txn)
            .await
            .map_err(|err| DaoLayerError::from_write(FarmerDao::ENTITY, err))?;

        txn.commit().await.map_err(DaoLayerError::Db)?;
        Ok((user, profile))
    }

    pub async fn set_last_login(
        &self,
        id: &Uuid,
        at: &chrono::DateTime<chrono::FixedOffset>,
    ) -> DaoResult<()> {
        let at = *at;
        self.update(*id, move |active| {
            active.last_login_at = Set(Some(at));
        })
        .await
        .map(|_| ())
    }
}
