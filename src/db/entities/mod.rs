#[allow(unused_imports)]
pub mod prelude {
    pub use super::farmer::Entity as Farmer;
    pub use super::produce::Entity as Produce;
    pub use super::user::Entity as User;
}

pub mod farmer;
pub mod produce;
pub mod user;
