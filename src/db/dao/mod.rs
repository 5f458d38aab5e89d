pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod farmer_dao;
pub mod produce_dao;
pub mod user_dao;

pub use base::{DaoBase, PaginatedResponse};
pub use base_traits::{HasCreatedAtColumn, HasIdActiveModel, TimestampedActiveModel};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use farmer_dao::FarmerDao;
pub use produce_dao::{NewProduce, ProduceDao};
pub use user_dao::{NewUser, UserDao};
