//! Jobwire Core
//!
//! Core types for the jobwire announcement bot.
//!
//! This crate contains:
//! - Domain types: the job record announced into chat, plus its rendering
//! - DTOs: wire representations of the Adzuna search response

pub mod domain;
pub mod dto;
