pub mod crud;
pub mod maintenance;
pub mod model;
pub mod repair;
pub mod store;
