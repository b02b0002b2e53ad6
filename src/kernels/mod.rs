//! The kernel family and its dispatch point.
//!
//! Every tiling strategy computes the same `C = A * B`; they differ in
//! loop structure, memory traffic, and output convention. [`Strategy`]
//! closes over the set so callers, tests, and benches can drive every
//! variant uniformly; [`gemm`] dispatches under each variant's documented
//! convention, and [`try_gemm`] validates the caller's buffers first.

pub mod blocked;
pub mod naive;
pub mod packed;
pub mod parallel;
pub mod reorder;
pub mod tiled;
pub mod vector;

use crate::config::{GemmConfig, MatrixView, MatrixViewMut};
use crate::error::{validation_error, Result};

/// What a variant does to C's prior contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// The variant fully determines C (zeroing internally if its loop
    /// structure needs it).
    Overwrite,
    /// The variant adds `A * B` to C's existing values; the caller must
    /// zero C first for a plain product.
    Accumulate,
}

/// The closed set of tiling strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Triple loop, k innermost.
    Naive,
    /// i-k-j order, streaming writes along C rows.
    LoopReorder,
    /// 64x64x64 cache blocks.
    Blocked,
    /// Cache blocks split into 4x4 register tiles.
    RegisterTiled,
    /// 4x4 vector microkernel over unpacked operands.
    Vector4x4,
    /// 8x8 vector microkernel over unpacked operands.
    Vector8x8,
    /// Workspace-packed panels + 8x8 vector microkernel.
    PackedVector,
    /// Packed path driven per-tile by a worker pool.
    Parallel,
}

impl Strategy {
    /// Every variant, in optimization order.
    pub const ALL: [Strategy; 8] = [
        Strategy::Naive,
        Strategy::LoopReorder,
        Strategy::Blocked,
        Strategy::RegisterTiled,
        Strategy::Vector4x4,
        Strategy::Vector8x8,
        Strategy::PackedVector,
        Strategy::Parallel,
    ];

    /// The variant's output convention.
    pub fn output_mode(self) -> OutputMode {
        match self {
            Strategy::PackedVector | Strategy::Parallel => OutputMode::Accumulate,
            _ => OutputMode::Overwrite,
        }
    }

    /// Short stable name, for logs and bench labels.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::LoopReorder => "loop_reorder",
            Strategy::Blocked => "blocked",
            Strategy::RegisterTiled => "register_tiled",
            Strategy::Vector4x4 => "vector_4x4",
            Strategy::Vector8x8 => "vector_8x8",
            Strategy::PackedVector => "packed_vector",
            Strategy::Parallel => "parallel",
        }
    }
}

/// Runs `strategy` on the given operands under its documented output
/// convention (see [`Strategy::output_mode`]).
///
/// # Panics
///
/// Panics if a slice is too short for the problem described by `cfg` —
/// use [`try_gemm`] to get an error instead.
pub fn gemm(strategy: Strategy, a: &[f32], b: &[f32], c: &mut [f32], cfg: &GemmConfig) {
    match strategy {
        Strategy::Naive => naive::gemm(a, b, c, cfg),
        Strategy::LoopReorder => reorder::gemm(a, b, c, cfg),
        Strategy::Blocked => blocked::gemm(a, b, c, cfg),
        Strategy::RegisterTiled => tiled::gemm(a, b, c, cfg),
        Strategy::Vector4x4 => vector::gemm_4x4(a, b, c, cfg),
        Strategy::Vector8x8 => vector::gemm_8x8(a, b, c, cfg),
        Strategy::PackedVector => packed::gemm(a, b, c, cfg),
        Strategy::Parallel => parallel::gemm(a, b, c, cfg),
    }
}

/// Checked dispatch: validates strides and buffer capacities against
/// `cfg`, then runs [`gemm`]. The accumulate-convention variants still
/// expect a pre-zeroed C; validation cannot see intent, only extents.
pub fn try_gemm(
    strategy: Strategy,
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    cfg: &GemmConfig,
) -> Result<()> {
    cfg.validate(a.len(), b.len(), c.len())?;
    gemm(strategy, a, b, c, cfg);
    Ok(())
}

/// View-based dispatch: the problem shape comes from the views, whose
/// constructors already proved each buffer covers its extent. Only the
/// cross-operand dimension agreement remains to check here.
pub fn gemm_views(
    strategy: Strategy,
    a: &MatrixView<'_>,
    b: &MatrixView<'_>,
    c: &mut MatrixViewMut<'_>,
) -> Result<()> {
    if a.cols() != b.rows() || c.rows() != a.rows() || c.cols() != b.cols() {
        return Err(validation_error(format!(
            "incompatible shapes: A is {}x{}, B is {}x{}, C is {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols(),
            c.rows(),
            c.cols()
        )));
    }

    let cfg = GemmConfig {
        m: a.rows(),
        n: b.cols(),
        k: a.cols(),
        lda: a.ld(),
        ldb: b.ld(),
        ldc: c.ld(),
    };

    let (a_data, b_data) = (a.data(), b.data());
    gemm(strategy, a_data, b_data, c.data_mut(), &cfg);
    Ok(())
}

/// Entry-point capacity assertions shared by every variant. One-time cost,
/// keeps the unchecked inner loops honest about what they may touch.
pub(crate) fn check_operands(a: &[f32], b: &[f32], c: &[f32], cfg: &GemmConfig) {
    assert!(
        cfg.lda >= cfg.k && cfg.ldb >= cfg.n && cfg.ldc >= cfg.n,
        "leading dimensions must cover the logical widths (lda={} k={}, ldb={} n={}, ldc={} n={})",
        cfg.lda,
        cfg.k,
        cfg.ldb,
        cfg.n,
        cfg.ldc,
        cfg.n
    );
    assert!(
        a.len() >= cfg.required_a_len(),
        "A: expected at least {} elements, got {}",
        cfg.required_a_len(),
        a.len()
    );
    assert!(
        b.len() >= cfg.required_b_len(),
        "B: expected at least {} elements, got {}",
        cfg.required_b_len(),
        b.len()
    );
    assert!(
        c.len() >= cfg.required_c_len(),
        "C: expected at least {} elements, got {}",
        cfg.required_c_len(),
        c.len()
    );
}

/// Zeroes the logical M x N window of C, honoring `ldc`.
pub(crate) fn zero_output(c: &mut [f32], cfg: &GemmConfig) {
    for i in 0..cfg.m {
        c[i * cfg.ldc..i * cfg.ldc + cfg.n].fill(0.0);
    }
}
