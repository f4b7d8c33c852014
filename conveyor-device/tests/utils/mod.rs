#![allow(dead_code)]

pub mod observer;
pub mod sinks;
