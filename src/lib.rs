//! Desktop client for a phone-number OTP login backend.

pub mod api;
pub mod config;
pub mod controller;
pub mod gui;
pub mod models;
