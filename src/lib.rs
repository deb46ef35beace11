// Library for tests to access modules

pub mod backup_service;
pub mod config;
pub mod controller;
pub mod models;
pub mod players;
pub mod routes;
pub mod save_store;
pub mod server_repo;
pub mod version;
