use sea_orm::DatabaseConnection;

use super::{DaoBase, FarmerDao, ProduceDao, UserDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db)
    }

    pub fn farmer(&self) -> FarmerDao {
        DaoBase::new(&self.db)
    }

    pub fn produce(&self) -> ProduceDao {
        DaoBase::new(&self.db)
    }
}
