//! HTTP route handlers

pub mod reservations;
