//! Architecture-gated SIMD vector types.
//!
//! `build.rs` emits exactly one of `cfg(neon)`, `cfg(sse)`, or
//! `cfg(fallback)` for the compilation target; the matching submodule
//! provides [`F32x4`], and the microkernels compile against the
//! [`traits::SimdVec`] contract without caring which backend is in play.

pub mod traits;

#[cfg(neon)]
pub mod neon;

#[cfg(sse)]
pub mod sse;

#[cfg(fallback)]
pub mod fallback;

#[cfg(neon)]
pub use neon::f32x4::F32x4;

#[cfg(sse)]
pub use sse::f32x4::F32x4;

#[cfg(fallback)]
pub use fallback::f32x4::F32x4;

/// Number of f32 elements per vector register.
pub const LANE_COUNT: usize = 4;
