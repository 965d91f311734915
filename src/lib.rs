pub mod allocator;
pub mod inventory;
pub mod provider;
pub mod route;
