//! HTTP request handlers.

pub(crate) mod api;
pub(crate) mod pages;
