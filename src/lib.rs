//! Filtered listing pipeline for the field-service dashboard.
//!
//! Filters are compiled into a [`repository::QuerySpec`], executed against a
//! [`repository::QueryPort`], normalized, mapped into display rows and handed
//! to the [`table`] renderer alongside a [`pagination::Paginator`].

pub mod columns;
pub mod controller;
pub mod db;
pub mod domain;
pub mod dto;
pub mod mapper;
pub mod models;
pub mod normalizer;
pub mod pagination;
pub mod repository;
pub mod schema;
pub mod services;
pub mod table;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
pub const DEFAULT_GROUP_SIZE: usize = 4;
