//! shelf application library
//!
//! The books catalog and todo list modules, plus the bootstrap sequence shared by the
//! `shelf-app` binary and the `shelf` CLI.

pub mod app;
pub mod modules;

pub use app::{build_registry, migrate, serve};
