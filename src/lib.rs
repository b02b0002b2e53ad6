//! Cache-blocked, SIMD-accelerated f32 matrix multiplication.
//!
//! This crate computes `C = A * B` for dense row-major single-precision
//! matrices through a family of progressively optimized kernels, from a
//! naive triple loop up to a packed, vectorized, multi-threaded variant.
//! The packed variants draw their scratch memory from a [`Workspace`]: one
//! aligned allocation holding an A panel, a B panel, and a small
//! accumulator region, pre-touched page by page so no page faults land in
//! the compute loop.
//!
//! ## Usage
//!
//! ```
//! use tilemul::{gemm, GemmConfig, Strategy};
//!
//! let (m, n, k) = (64, 64, 64);
//! let a = vec![1.0f32; m * k];
//! let b = vec![1.0f32; k * n];
//! let mut c = vec![0.0f32; m * n];
//!
//! let cfg = GemmConfig::contiguous(m, n, k);
//! gemm(Strategy::Vector4x4, &a, &b, &mut c, &cfg);
//! assert_eq!(c[0], k as f32);
//! ```
//!
//! Strategies that accumulate (`PackedVector`, `Parallel`) require the
//! caller to zero `C` first; query [`Strategy::output_mode`] when driving
//! variants generically.
//!
//! ## What's inside
//!
//! - 4x4 and 8x8 broadcast/fmadd microkernels over `F32x4` lanes
//!   (NEON, SSE, or a scalar fallback, selected at build time)
//! - Cache blocking with runtime-validated [`BlockConfig`] parameters
//! - Panel packing into the aligned workspace
//! - A lock-free dynamic tile scheduler over a fixed worker pool

pub mod config;
pub mod error;
pub mod kernels;
pub mod layout;
pub mod packing;
pub mod simd;
pub mod workspace;

pub use config::{BlockConfig, GemmConfig, MatrixView, MatrixViewMut};
pub use error::{GemmError, Result};
pub use kernels::{gemm, gemm_views, try_gemm, OutputMode, Strategy};
pub use layout::{compute_layout, Layout, Region};
pub use workspace::Workspace;

/// Alignment of every workspace sub-buffer, in bytes.
pub const SIMD_ALIGNMENT: usize = 128;

/// Page granularity of the workspace pre-touch pass.
pub const PAGE_SIZE: usize = 16 * 1024;

pub const BM: usize = 256;
pub const BN: usize = 256;
pub const BK: usize = 256;

pub const MR: usize = 8;
pub const NR: usize = 8;

/// Hard ceiling on a single workspace allocation.
pub const MAX_WORKSPACE_BYTES: usize = 512 * 1024 * 1024;
