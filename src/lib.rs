pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pages;
pub mod routes;
pub mod services;
pub mod state;
