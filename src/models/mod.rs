//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! decoding query parameters and serializing HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{AddQuery, AddWithTtlQuery, KeyQuery, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
pub use responses::{
    AddResponse, CapacityResponse, ClearResponse, EntriesResponse, EntryView, ErrorResponse,
    GetResponse, HealthResponse, RemoveResponse,
};
