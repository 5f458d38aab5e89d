pub mod guards;
pub mod password;
pub mod session;
mod types;

pub use guards::RoleGuard;
pub use session::{Flash, FlashKind, Session, SessionCookie, SessionKeys};
pub use types::{
    FarmerRole, LogisticsOperatorRole, RequiredRole, RetailerRole, Role, UnknownRole,
    WarehouseManagerRole,
};
