// src/fetch/mod.rs
//! Retrieval of unit pages, always going through the local page cache.

pub mod pages;

pub use pages::PageCache;
