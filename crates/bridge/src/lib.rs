// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Bridge between language implementations and the SysPro native engine
//!
//! Host objects cross the boundary as integer handles issued by the
//! [`handle::HandleRegistry`]. When the engine needs the contents of objects it
//! asks the host through the registrar callback, and the host answers with a
//! flat array of fixed-layout structs written by the [`descriptor`] catalog
//! into the arena of a per-crossing [`context::CallContext`]. Polymorphic
//! capabilities (lexing, parsing, building semantic models, type lookup and
//! construction) are exposed to native code as [`trampoline`]s.
//!
//! Nothing unwinds into native code: every crossing converts errors and panics
//! into the process-wide fatal flag, and every public entry point terminates
//! the process once the flag is raised.

mod bridge;
pub mod arena;
pub mod context;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod fatal;
pub mod global;
pub mod handle;
pub mod object;
pub mod tasks;
pub mod trampoline;
pub mod web_server;

pub use bridge::{Bridge, BridgeScope};
pub use descriptor::DescriptorKind;
pub use engine::{Engine, EngineVTable};
pub use error::{BridgeError, Result};
pub use global::{BridgeConfig, Global, global, init};
pub use object::{Object, ObjectKey, ObjectList};
