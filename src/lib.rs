//! Nutrition Tracker Library
//!
//! Nutrient aggregation over foods, recipes and meals, in-memory list
//! filtering, and a client for the remote nutrition API.

pub mod api;
pub mod build_info;
pub mod commands;
pub mod config;
pub mod filter;
pub mod models;
pub mod services;
