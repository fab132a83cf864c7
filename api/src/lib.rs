//! HTTP surface of the ClaveCompás reservations backend.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
