//! Register-tiled variant: cache blocks split into 4x4 micro-tiles whose
//! accumulator lives outside the K loop and is flushed once per tile.

use std::cmp::min;

use crate::config::GemmConfig;

const BM: usize = 64;
const BN: usize = 64;
const BK: usize = 64;
const MR: usize = 4;
const NR: usize = 4;

/// `C = A * B` with a local MRxNR accumulator per micro-tile. Zeroes C,
/// then accumulates.
pub fn gemm(a: &[f32], b: &[f32], c: &mut [f32], cfg: &GemmConfig) {
    super::check_operands(a, b, c, cfg);
    super::zero_output(c, cfg);

    for ii in (0..cfg.m).step_by(BM) {
        for kk in (0..cfg.k).step_by(BK) {
            for jj in (0..cfg.n).step_by(BN) {
                let i_max = min(ii + BM, cfg.m);
                let k_max = min(kk + BK, cfg.k);
                let j_max = min(jj + BN, cfg.n);

                for i in (ii..i_max).step_by(MR) {
                    for j in (jj..j_max).step_by(NR) {
                        let im = min(MR, i_max - i);
                        let jm = min(NR, j_max - j);

                        let mut acc = [[0.0f32; NR]; MR];

                        for k in kk..k_max {
                            for (ti, acc_row) in acc.iter_mut().enumerate().take(im) {
                                let aik = a[(i + ti) * cfg.lda + k];
                                let b_row = &b[k * cfg.ldb + j..k * cfg.ldb + j + jm];
                                for tj in 0..jm {
                                    acc_row[tj] += aik * b_row[tj];
                                }
                            }
                        }

                        for (ti, acc_row) in acc.iter().enumerate().take(im) {
                            let c_row = &mut c[(i + ti) * cfg.ldc + j..(i + ti) * cfg.ldc + j + jm];
                            for tj in 0..jm {
                                c_row[tj] += acc_row[tj];
                            }
                        }
                    }
                }
            }
        }
    }
}
