#![deny(warnings)]
#![warn(unused_extern_crates)]

#[macro_use]
extern crate log;

pub mod assertion;
pub mod config;
pub mod constants;
pub mod context;
pub mod validation;
