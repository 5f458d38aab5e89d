use tracing::info;
use uuid::Uuid;

use crate::{
    db::dao::{DaoLayerError, FarmerDao, NewProduce, PaginatedResponse, ProduceDao},
    db::entities::{farmer, produce, user},
    error::AppError,
};

pub const NO_FARMER_PROFILE: &str = "Farmer profile not found. Please log in again.";
pub const PRODUCE_PAGE_SIZE: u64 = 20;

#[derive(Clone)]
pub struct FarmerService {
    farmers: FarmerDao,
    produce: ProduceDao,
}

impl FarmerService {
    pub fn new(farmers: FarmerDao, produce: ProduceDao) -> Self {
        Self { farmers, produce }
    }

    pub async fn profile_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<farmer::Model>, AppError> {
        Ok(self.farmers.find_by_user_id(user_id).await?)
    }

    /// Returns the user's farmer profile, creating it when absent. A
    /// concurrent creator winning the unique constraint is not an error.
    pub async fn ensure_profile(&self, user: &user::Model) -> Result<farmer::Model, AppError> {
        if let Some(profile) = self.farmers.find_by_user_id(&user.id).await? {
            return Ok(profile);
        }
        self.create_or_reread_profile(user).await
    }

    /// Inserts the profile; when a concurrent login already created it the
    /// unique constraint rejects this insert and the existing row is returned.
    async fn create_or_reread_profile(
        &self,
        user: &user::Model,
    ) -> Result<farmer::Model, AppError> {
        match self.farmers.create_profile(user, None).await {
            Ok(profile) => {
                info!(user_id = %user.id, farmer_id = %profile.id, "created missing farmer profile at login");
                Ok(profile)
            }
            Err(DaoLayerError::UniqueViolation { .. }) => self
                .farmers
                .find_by_user_id(&user.id)
                .await?
                .ok_or_else(|| AppError::internal("farmer profile missing after unique conflict")),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn add_produce(
        &self,
        user_id: &Uuid,
        new_produce: NewProduce,
    ) -> Result<produce::Model, AppError> {
        let profile = self.require_profile(user_id).await?;
        let record = self.produce.create_produce(&profile.id, new_produce).await?;
        info!(
            farmer_id = %profile.id,
            produce_id = %record.id,
            crop = %record.crop_name,
            "produce recorded"
        );
        Ok(record)
    }

    /// One page of the farmer's produce, newest first. Pages start at 1.
    pub async fn list_produce(
        &self,
        user_id: &Uuid,
        page: u64,
    ) -> Result<(farmer::Model, PaginatedResponse<produce::Model>), AppError> {
        let profile = self.require_profile(user_id).await?;
        let listing = self
            .produce
            .list_for_farmer(&profile.id, page, PRODUCE_PAGE_SIZE)
            .await?;
        Ok((profile, listing))
    }

    pub async fn produce_count(&self, farmer_id: &Uuid) -> Result<u64, AppError> {
        Ok(self.produce.count_for_farmer(farmer_id).await?)
    }

    async fn require_profile(&self, user_id: &Uuid) -> Result<farmer::Model, AppError> {
        self.farmers
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(NO_FARMER_PROFILE))
    }
}
