pub mod account_service;
pub mod context;
pub mod farmer_service;

pub use account_service::{AccountService, Authenticated, Registration};
pub use context::ServiceContext;
pub use farmer_service::FarmerService;
