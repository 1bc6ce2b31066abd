//! Types shared between the bookstore server and anything that talks to it:
//! request/response bodies, JWT claims, and the TOML configuration model.

pub mod config;
pub mod types;
