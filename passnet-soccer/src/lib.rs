pub mod adjacency;
pub mod config;
pub mod data;
pub mod event;
pub mod fixture;
pub mod metrics;
pub mod naming;
pub mod network;
pub mod pair;
pub mod pipeline;
pub mod print;
pub mod sink;
pub mod window;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
