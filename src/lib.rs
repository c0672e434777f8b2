//! Snooze - a Hack or Snooze client
//!
//! This crate provides an async client for the Hack or Snooze story API.
//! It keeps a local model of the front page, the logged-in user, and their
//! favorite and submitted stories, and syncs that model after every
//! mutating request.

pub mod api;
pub mod app;
pub mod config;
pub mod credentials;
pub mod error;
pub mod session;
pub mod store;
pub mod story;
