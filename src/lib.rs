//! mcu-pool-import: import microcontroller pin tables into a component pool
//!
//! This library turns a vendor pin table (`STM32CubeMX` MCU XML) and an
//! existing package record into three linked pool records:
//!
//! - **Unit**: one pin per pin table row, with direction and alternate names
//! - **Entity**: a single gate "Main" wrapping the unit
//! - **Part**: the orderable component, mapping every package pad to a pin
//!
//! # Architecture
//!
//! The import is a pure, single-pass pipeline over in-memory data. File
//! reading and configuration happen before it; writing happens after it,
//! only once all three records exist.
//!
//! # Modules
//!
//! - [`config`] — Settings file loading and run option resolution
//! - [`error`] — Configuration error types
//! - [`import`] — Loading, alignment and record synthesis
//! - [`pool`] — Pool record types and the pool writer

pub mod config;
pub mod error;
pub mod import;
pub mod pool;
