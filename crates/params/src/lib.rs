//! Constant values for the isopair pairing engine
//!
//! This crate carries no code, only the literal domain parameters and
//! encoded sizes shared by the arithmetic crate and its callers.

#![no_std]

pub mod pairing;
