use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult, PaginatedResponse};
use crate::db::entities::{prelude::Produce, produce};

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduce {
    pub crop_name: String,
    pub quantity: f64,
    pub quality: String,
    pub harvest_date: NaiveDate,
}

#[derive(Clone)]
pub struct ProduceDao {
    db: DatabaseConnection,
}

impl DaoBase for ProduceDao {
    type Entity = Produce;
    const ENTITY: &'static str = "Produce";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ProduceDao {
    pub async fn create_produce(
        &self,
        farmer_id: &Uuid,
        new_produce: NewProduce,
    ) -> DaoResult<produce::Model> {
        let model = produce::ActiveModel {
            farmer_id: Set(*farmer_id),
            crop_name: Set(new_produce.crop_name),
            quantity: Set(new_produce.quantity),
            quality: Set(new_produce.quality),
            harvest_date: Set(new_produce.harvest_date),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn list_for_farmer(
        &self,
        farmer_id: &Uuid,
        page: u64,
        page_size: u64,
    ) -> DaoResult<PaginatedResponse<produce::Model>> {
        let farmer_id = *farmer_id;
        self.find(page, page_size, None, move |query| {
            query.filter(produce::Column::FarmerId.eq(farmer_id))
        })
        .await
    }

    pub async fn count_for_farmer(&self, farmer_id: &Uuid) -> DaoResult<u64> {
        Produce::find()
            .filter(produce::Column::FarmerId.eq(*farmer_id))
            .count(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }
}
