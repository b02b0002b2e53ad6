//! Cache-blocked variant: M, N, K partitioned into fixed 64-wide blocks,
//! i-k-j accumulation inside each block.

use std::cmp::min;

use crate::config::GemmConfig;

const BM: usize = 64;
const BN: usize = 64;
const BK: usize = 64;

/// `C = A * B` over 64x64x64 blocks. Zeroes C, then accumulates.
pub fn gemm(a: &[f32], b: &[f32], c: &mut [f32], cfg: &GemmConfig) {
    super::check_operands(a, b, c, cfg);
    super::zero_output(c, cfg);

    for ii in (0..cfg.m).step_by(BM) {
        for kk in (0..cfg.k).step_by(BK) {
            for jj in (0..cfg.n).step_by(BN) {
                let i_max = min(ii + BM, cfg.m);
                let k_max = min(kk + BK, cfg.k);
                let j_max = min(jj + BN, cfg.n);

                for i in ii..i_max {
                    for k in kk..k_max {
                        let aik = a[i * cfg.lda + k];
                        let b_row = &b[k * cfg.ldb..k * cfg.ldb + j_max];
                        let c_row = &mut c[i * cfg.ldc..i * cfg.ldc + j_max];
                        for j in jj..j_max {
                            c_row[j] += aik * b_row[j];
                        }
                    }
                }
            }
        }
    }
}
