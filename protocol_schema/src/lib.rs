// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

//! # Measurement Protocol schema
//!
//! This crate is a shared dependency of the crates in the `uatrack` workspace. It
//! describes the static schema of the Measurement Protocol wire format: every
//! supported parameter code (`"v"`, `"tid"`, `"ec"`, `"ea"`, ...), its value type,
//! its declared maximum byte length, and the hit types it applies to.
//!
//! The schema is a pure compile-time lookup table. There is no runtime
//! registration and no mutation: asking for a parameter that does not exist is a
//! compile error, not a runtime condition. The [`tracker`] crate builds its typed
//! hit builders on top of these definitions.
//!
//! [`tracker`]: https://github.com/uatrack/uatrack/tree/main/tracker

/// Inline capacity sized so that a typical hit's parameter map never spills to
/// the heap. Real hits carry well under 32 parameters.
pub const DEFAULT_TINY_VEC_SIZE: usize = 32;
/// Backing store for small per-hit collections.
pub type TinyVecBackingStore<T> = smallvec::SmallVec<[T; DEFAULT_TINY_VEC_SIZE]>;
/// Inline string for parameter values; most values are short keys, names, or
/// identifiers.
pub type InlineText = smallstr::SmallString<[u8; 64]>;

// Attach.
pub mod hit_type;
pub mod parameter;
pub mod value;

// Re-export.
pub use hit_type::*;
pub use parameter::*;
pub use value::*;
