//! classicube.net web API adapter.

mod client;
mod dto;

pub use client::{ClassiCubeClient, build_file};
