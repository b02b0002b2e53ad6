//! SSE backend: 128-bit vectors, 4 x f32 lanes.
//!
//! Compiled only when `build.rs` selects `cfg(sse)` (any x86-64 target —
//! SSE2 is baseline there). Multiply-accumulate is expressed as mul+add
//! rather than FMA, which x86-64 does not guarantee; the kernels tolerate
//! the extra rounding.

pub mod f32x4;
