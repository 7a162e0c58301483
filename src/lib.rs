#![allow(non_camel_case_types)]

pub mod aggregator;
pub mod configuration;
pub mod error;
pub mod helpers;
pub mod model;
pub mod provider;
pub mod types;
