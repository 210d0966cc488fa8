//! DTOs exchanged between the listing services and their callers.

pub mod listing;
