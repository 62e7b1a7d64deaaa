pub mod clock;
pub mod config;
pub mod domain;
pub mod forms;
pub mod ids;
pub mod repository;
pub mod services;
pub mod storage;

/// Identity assigned to the merchant account behind the admin console.
pub const ADMIN_USER_ID: &str = "admin_master";
