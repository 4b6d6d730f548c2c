// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! C ABI definitions for the SysPro native engine
//!
//! This crate provides the stable C ABI shared by the host bridge and the native
//! engine: struct layouts for every object shape the host serializes, function
//! pointer types for callbacks into the host, and the signatures of the entry
//! points exported by the engine.

pub mod capability;
pub mod constants;
pub mod data;
pub mod engine;
pub mod handle;

pub use capability::*;
pub use constants::*;
pub use data::*;
pub use engine::*;
pub use handle::*;
