//! Vector microkernel variants over unpacked, strided operands.
//!
//! Both microkernels broadcast one A element across the lanes and fmadd it
//! against a vector-loaded row of B, keeping the whole C tile in registers
//! for the duration of the K loop. Tiles clipped at the matrix edge fall
//! back to a scalar triple loop.

use std::cmp::min;

use crate::config::GemmConfig;
use crate::simd::traits::SimdVec;
use crate::simd::F32x4;

/// Rows and columns of one 4x4 microkernel tile.
const MR4: usize = 4;
const NR4: usize = 4;

/// Rows and columns of one 8x8 microkernel tile (two vectors per row).
const MR8: usize = 8;
const NR8: usize = 8;

/// `C = A * B` with a 4x4 vector microkernel. Overwrites C.
pub fn gemm_4x4(a: &[f32], b: &[f32], c: &mut [f32], cfg: &GemmConfig) {
    super::check_operands(a, b, c, cfg);

    for i in (0..cfg.m).step_by(MR4) {
        for j in (0..cfg.n).step_by(NR4) {
            let im = min(MR4, cfg.m - i);
            let jm = min(NR4, cfg.n - j);

            if im == MR4 && jm == NR4 {
                unsafe {
                    microkernel_4x4(
                        a.as_ptr().add(i * cfg.lda),
                        b.as_ptr().add(j),
                        c.as_mut_ptr().add(i * cfg.ldc + j),
                        cfg.lda,
                        cfg.ldb,
                        cfg.ldc,
                        cfg.k,
                    );
                }
            } else {
                scalar_edge(a, b, c, cfg, i, j, im, jm);
            }
        }
    }
}

/// `C = A * B` with an 8x8 vector microkernel. Overwrites C.
pub fn gemm_8x8(a: &[f32], b: &[f32], c: &mut [f32], cfg: &GemmConfig) {
    super::check_operands(a, b, c, cfg);

    for i in (0..cfg.m).step_by(MR8) {
        for j in (0..cfg.n).step_by(NR8) {
            let im = min(MR8, cfg.m - i);
            let jm = min(NR8, cfg.n - j);

            if im == MR8 && jm == NR8 {
                unsafe {
                    microkernel_8x8(
                        a.as_ptr().add(i * cfg.lda),
                        b.as_ptr().add(j),
                        c.as_mut_ptr().add(i * cfg.ldc + j),
                        cfg.lda,
                        cfg.ldb,
                        cfg.ldc,
                        cfg.k,
                    );
                }
            } else {
                scalar_edge(a, b, c, cfg, i, j, im, jm);
            }
        }
    }
}

/// Full 4x4 tile: four accumulator vectors, one per C row.
///
/// # Safety
///
/// `a` must point at row 0 of a 4-row strip (stride `lda`, `kdim` columns
/// readable), `b` at column 0 of a 4-column strip (stride `ldb`), `c` at a
/// 4x4 tile (stride `ldc`), all in-bounds for those extents.
unsafe fn microkernel_4x4(
    a: *const f32,
    b: *const f32,
    c: *mut f32,
    lda: usize,
    ldb: usize,
    ldc: usize,
    kdim: usize,
) {
    let mut c0 = F32x4::splat(0.0);
    let mut c1 = F32x4::splat(0.0);
    let mut c2 = F32x4::splat(0.0);
    let mut c3 = F32x4::splat(0.0);

    for k in 0..kdim {
        let bv = F32x4::load(b.add(k * ldb));

        let a0 = F32x4::splat(*a.add(k));
        let a1 = F32x4::splat(*a.add(lda + k));
        let a2 = F32x4::splat(*a.add(2 * lda + k));
        let a3 = F32x4::splat(*a.add(3 * lda + k));

        c0 = c0.fmadd(a0, bv);
        c1 = c1.fmadd(a1, bv);
        c2 = c2.fmadd(a2, bv);
        c3 = c3.fmadd(a3, bv);
    }

    c0.store_at(c);
    c1.store_at(c.add(ldc));
    c2.store_at(c.add(2 * ldc));
    c3.store_at(c.add(3 * ldc));
}

/// Full 8x8 tile: eight rows of two accumulator vectors each.
///
/// # Safety
///
/// Same contract as [`microkernel_4x4`] with 8-row/8-column extents.
unsafe fn microkernel_8x8(
    a: *const f32,
    b: *const f32,
    c: *mut f32,
    lda: usize,
    ldb: usize,
    ldc: usize,
    kdim: usize,
) {
    let mut acc = [[F32x4::splat(0.0); 2]; MR8];

    for k in 0..kdim {
        let b0 = F32x4::load(b.add(k * ldb));
        let b1 = F32x4::load(b.add(k * ldb + 4));

        for (i, row) in acc.iter_mut().enumerate() {
            let av = F32x4::splat(*a.add(i * lda + k));
            row[0] = row[0].fmadd(av, b0);
            row[1] = row[1].fmadd(av, b1);
        }
    }

    for (i, row) in acc.iter().enumerate() {
        row[0].store_at(c.add(i * ldc));
        row[1].store_at(c.add(i * ldc + 4));
    }
}

/// Scalar fallback for tiles clipped at the matrix edge. Overwrites its
/// part of C, matching the microkernel convention.
fn scalar_edge(
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    cfg: &GemmConfig,
    i0: usize,
    j0: usize,
    im: usize,
    jm: usize,
) {
    for ti in 0..im {
        for tj in 0..jm {
            let mut sum = 0.0f32;
            for k in 0..cfg.k {
                sum += a[(i0 + ti) * cfg.lda + k] * b[k * cfg.ldb + (j0 + tj)];
            }
            c[(i0 + ti) * cfg.ldc + (j0 + tj)] = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_against_naive(m: usize, n: usize, k: usize, kernel: fn(&[f32], &[f32], &mut [f32], &GemmConfig)) {
        let cfg = GemmConfig::contiguous(m, n, k);
        let a: Vec<f32> = (0..m * k).map(|x| ((x % 9) as f32) - 4.0).collect();
        let b: Vec<f32> = (0..k * n).map(|x| ((x % 6) as f32) - 2.0).collect();

        let mut c_naive = vec![0.0f32; m * n];
        let mut c_vec = vec![55.0f32; m * n]; // stale values must be overwritten

        super::super::naive::gemm(&a, &b, &mut c_naive, &cfg);
        kernel(&a, &b, &mut c_vec, &cfg);

        for idx in 0..m * n {
            assert!(
                (c_naive[idx] - c_vec[idx]).abs() < 1e-4,
                "{}x{}x{} mismatch at {}: naive={}, vector={}",
                m,
                n,
                k,
                idx,
                c_naive[idx],
                c_vec[idx]
            );
        }
    }

    #[test]
    fn test_4x4_exact_tiles() {
        check_against_naive(8, 8, 8, gemm_4x4);
    }

    #[test]
    fn test_4x4_edge_tiles() {
        check_against_naive(7, 9, 5, gemm_4x4);
        check_against_naive(1, 1, 1, gemm_4x4);
        check_against_naive(3, 17, 12, gemm_4x4);
    }

    #[test]
    fn test_8x8_exact_tiles() {
        check_against_naive(16, 16, 16, gemm_8x8);
    }

    #[test]
    fn test_8x8_edge_tiles() {
        check_against_naive(13, 11, 9, gemm_8x8);
        check_against_naive(8, 9, 8, gemm_8x8);
        check_against_naive(2, 3, 40, gemm_8x8);
    }
}
