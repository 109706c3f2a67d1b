#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

#[macro_use]
extern crate num_derive;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

pub mod api;
pub(crate) mod com;
mod enc;
