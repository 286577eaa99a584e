pub mod audit;
pub mod lean;
