// src/gui/components/mod.rs
pub mod data_table;
pub mod source_bar;
pub mod tabs;
