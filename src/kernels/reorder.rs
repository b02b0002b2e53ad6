//! Loop-reordered variant: i-k-j order streams writes along C's rows
//! instead of striding down B's columns.

use crate::config::GemmConfig;

/// `C = A * B` with i-k-j loop order. Zeroes C, then accumulates.
pub fn gemm(a: &[f32], b: &[f32], c: &mut [f32], cfg: &GemmConfig) {
    super::check_operands(a, b, c, cfg);
    super::zero_output(c, cfg);

    for i in 0..cfg.m {
        for k in 0..cfg.k {
            let aik = a[i * cfg.lda + k];
            let b_row = &b[k * cfg.ldb..k * cfg.ldb + cfg.n];
            let c_row = &mut c[i * cfg.ldc..i * cfg.ldc + cfg.n];
            for j in 0..cfg.n {
                c_row[j] += aik * b_row[j];
            }
        }
    }
}
