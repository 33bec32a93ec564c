//! Shared utilities and common types for the bookstore backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Token hashing and generation for invitations and password resets
//! - Session tokens (JWT, HS256)
//! - Password hashing with Argon2id
//! - Field validation used by request DTOs

pub mod crypto;
pub mod jwt;
pub mod password;
pub mod validation;
