//! ARM NEON backend: 128-bit vectors, 4 x f32 lanes.
//!
//! Compiled only when `build.rs` selects `cfg(neon)` (any AArch64 target —
//! NEON is baseline there, no runtime detection needed).

pub mod f32x4;
