use sea_orm::DatabaseConnection;

use crate::{
    db::dao::DaoContext,
    services::{account_service::AccountService, farmer_service::FarmerService},
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn account(&self) -> AccountService {
        AccountService::new(self.daos.user(), self.farmer())
    }

    pub fn farmer(&self) -> FarmerService {
        FarmerService::new(self.daos.farmer(), self.daos.produce())
    }
}
