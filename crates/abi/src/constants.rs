// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// First token kind code used by keywords
pub const KEYWORD_KIND_BASE: i32 = 100;

/// First token kind code used by symbols
pub const SYMBOL_KIND_BASE: i32 = 200;

/// First kind code used by non-terminal syntax kinds
pub const NON_TERMINAL_KIND_BASE: i32 = 2000;

/// Size of the element count written in front of every flat array
pub const FLAT_ARRAY_HEADER_SIZE: usize = size_of::<i64>();

/// Alignment of every flat array and of every slot inside it
pub const FLAT_ARRAY_ALIGN: usize = 8;

/// Bits of `TestModeFFI`
pub const TEST_MODE_REPEATED: i32 = 1;
pub const TEST_MODE_SHUFFLED: i32 = 2;
pub const TEST_MODE_PARALLEL: i32 = 4;

/// Test filter kinds accepted by `AddTestFilter`
pub const TEST_FILTER_INCLUDE: i32 = 1;
pub const TEST_FILTER_EXCLUDE: i32 = 2;

/// Port the inspection web server binds to when none is given
pub const DEFAULT_WEB_SERVER_PORT: i32 = 15412;

/// Symbol flag bits for functions
pub const FUNCTION_FLAG_NATIVE: i32 = 1 << 0;
pub const FUNCTION_FLAG_VIRTUAL: i32 = 1 << 1;
pub const FUNCTION_FLAG_ABSTRACT: i32 = 1 << 2;
pub const FUNCTION_FLAG_OVERRIDE: i32 = 1 << 3;

/// Symbol flag bits for types
pub const TYPE_FLAG_ABSTRACT: i32 = 1 << 0;
