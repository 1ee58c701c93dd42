#![deny(warnings)]
#![warn(unused_extern_crates)]

#[macro_use]
extern crate serde_derive;

pub mod v1;
