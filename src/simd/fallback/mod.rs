//! Scalar fallback backend for targets without a supported vector unit.
//!
//! Same contract as the NEON and SSE backends, four lanes wide, so the
//! kernel family compiles and runs everywhere.

pub mod f32x4;
