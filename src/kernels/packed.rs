//! Packed vector variant: every (M, N, K) block is copied into the
//! workspace panels before the microkernel consumes it, so the inner loop
//! streams contiguous, aligned memory regardless of the caller's strides.
//!
//! Output convention: accumulates into C's existing values over the K
//! blocks — callers must pre-zero C (or deliberately exploit `C += A * B`).

use std::cmp::min;

use crate::config::{BlockConfig, GemmConfig};
use crate::packing::{pack_a, pack_b};
use crate::simd::traits::SimdVec;
use crate::simd::F32x4;
use crate::workspace::Workspace;

/// `C += A * B` with default blocking. Caller pre-zeroes C.
pub fn gemm(a: &[f32], b: &[f32], c: &mut [f32], cfg: &GemmConfig) {
    gemm_with(a, b, c, cfg, &BlockConfig::default());
}

/// `C += A * B` with caller-supplied blocking parameters.
///
/// # Panics
///
/// Panics if `params` describes an invalid or oversized workspace; that is
/// a configuration error caught before any compute begins.
pub fn gemm_with(a: &[f32], b: &[f32], c: &mut [f32], cfg: &GemmConfig, params: &BlockConfig) {
    super::check_operands(a, b, c, cfg);
    if cfg.m == 0 || cfg.n == 0 {
        return;
    }

    let mut ws = Workspace::new(params).expect("workspace setup failed");

    for ii in (0..cfg.m).step_by(params.bm) {
        for jj in (0..cfg.n).step_by(params.bn) {
            // SAFETY: operand extents checked above; each (ii, jj) tile
            // writes a disjoint region of C.
            unsafe {
                compute_tile(a, b, c.as_mut_ptr(), cfg, params, &mut ws, ii, jj);
            }
        }
    }
}

/// Computes one BMxBN output tile at (`ii`, `jj`): iterates K in BK-sized
/// chunks, packs the A and B blocks for each chunk, and accumulates into
/// C through the 8x8 microkernel or the scalar tail.
///
/// Shared with the parallel variant, whose workers drive it per claimed
/// tile.
///
/// # Safety
///
/// `c` must be valid for `cfg.required_c_len()` elements, and no other
/// writer may touch rows `ii..ii+BM` x cols `jj..jj+BN` concurrently.
pub(crate) unsafe fn compute_tile(
    a: &[f32],
    b: &[f32],
    c: *mut f32,
    cfg: &GemmConfig,
    params: &BlockConfig,
    ws: &mut Workspace,
    ii: usize,
    jj: usize,
) {
    let mb = min(params.bm, cfg.m - ii);
    let nb = min(params.bn, cfg.n - jj);

    for kk in (0..cfg.k).step_by(params.bk) {
        let kb = min(params.bk, cfg.k - kk);

        pack_a(ws.a_panel_mut(), &a[ii * cfg.lda + kk..], mb, kb, cfg.lda);
        pack_b(ws.b_panel_mut(), &b[kk * cfg.ldb + jj..], kb, nb, cfg.ldb);

        let ap = ws.a_panel();
        let bp = ws.b_panel();

        for i in (0..mb).step_by(params.mr) {
            for j in (0..nb).step_by(params.nr) {
                let mr = min(params.mr, mb - i);
                let nr = min(params.nr, nb - j);

                let cp = c.add((ii + i) * cfg.ldc + (jj + j));

                if mr == 8 && nr == 8 {
                    microkernel_8x8(ap.as_ptr().add(i * kb), bp.as_ptr().add(j), cp, kb, nb, cfg.ldc);
                } else {
                    // Scalar tail for clipped tiles; same accumulate
                    // convention as the microkernel.
                    for ti in 0..mr {
                        for tj in 0..nr {
                            let mut sum = 0.0f32;
                            for kx in 0..kb {
                                sum += ap[(i + ti) * kb + kx] * bp[kx * nb + (j + tj)];
                            }
                            *cp.add(ti * cfg.ldc + tj) += sum;
                        }
                    }
                }
            }
        }
    }
}

/// 8x8 microkernel over packed panels: loads the existing C tile,
/// accumulates across the whole K chunk, stores back once.
///
/// # Safety
///
/// `a` points at a packed 8-row strip with row stride `kb`; `b` at a
/// packed row-major block with row stride `nb` (8 columns readable); `c`
/// at an 8x8 tile with row stride `ldc`.
unsafe fn microkernel_8x8(
    a: *const f32,
    b: *const f32,
    c: *mut f32,
    kb: usize,
    nb: usize,
    ldc: usize,
) {
    let mut acc = [[F32x4::splat(0.0); 2]; 8];

    for (i, row) in acc.iter_mut().enumerate() {
        row[0] = F32x4::load(c.add(i * ldc));
        row[1] = F32x4::load(c.add(i * ldc + 4));
    }

    for k in 0..kb {
        let b0 = F32x4::load(b.add(k * nb));
        let b1 = F32x4::load(b.add(k * nb + 4));

        for (i, row) in acc.iter_mut().enumerate() {
            let av = F32x4::splat(*a.add(i * kb + k));
            row[0] = row[0].fmadd(av, b0);
            row[1] = row[1].fmadd(av, b1);
        }
    }

    for (i, row) in acc.iter().enumerate() {
        row[0].store_at(c.add(i * ldc));
        row[1].store_at(c.add(i * ldc + 4));
    }
}
