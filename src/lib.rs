// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;

pub mod csv;
pub mod data;
pub mod format;
pub mod table;
pub mod tabs;
pub mod widget;

pub mod html;
pub mod fetch;
pub mod routing;

pub mod file;
pub mod progress;
pub mod store;

pub mod gui;

#[cfg(feature = "cli")]
pub mod cli;
