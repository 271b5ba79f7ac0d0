#![allow(dead_code)]

pub mod utils;
pub mod tournament_helpers;
