//! Startpage - a personal start-page dashboard
//!
//! This crate serves a page of bookmark tiles and RSS preview cards. The
//! dashboard keeps client-side copies of bookmarks and feeds that it syncs
//! against a REST backend, which the same binary also provides.

pub mod api;
pub mod backend;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod notifier;
pub mod parser;
pub mod render;
pub mod store;
pub mod web;
