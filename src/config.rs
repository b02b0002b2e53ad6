//! Problem descriptors and runtime-validated tuning parameters.
//!
//! The original constants (alignment, page size, block and microkernel
//! dimensions, workspace ceiling) live in [`BlockConfig`], constructed once
//! and passed to the layout, workspace, and packed kernels. [`GemmConfig`]
//! describes one multiplication problem; [`MatrixView`] is the checked form
//! of a raw (pointer, rows, cols, leading-dimension) descriptor.

use crate::error::{validation_error, Result};
use crate::{BK, BM, BN, MAX_WORKSPACE_BYTES, MR, NR, PAGE_SIZE, SIMD_ALIGNMENT};

/// Blocking and workspace tuning parameters.
///
/// All fields are plain data; [`BlockConfig::validate`] enforces the
/// invariants the layout and kernels rely on. The defaults reproduce the
/// tuned values for a 128-byte-vector machine with 16 KiB pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockConfig {
    /// Cache block height (rows of A / C per block).
    pub bm: usize,
    /// Cache block width (columns of B / C per block).
    pub bn: usize,
    /// Cache block depth (K extent per block).
    pub bk: usize,
    /// Microkernel tile height.
    pub mr: usize,
    /// Microkernel tile width.
    pub nr: usize,
    /// Byte alignment of every workspace sub-buffer.
    pub alignment: usize,
    /// Page granularity used by the workspace pre-touch pass.
    pub page_size: usize,
    /// Hard ceiling on the workspace allocation, in bytes.
    pub max_workspace_bytes: usize,
}

impl Default for BlockConfig {
    fn default() -> Self {
        BlockConfig {
            bm: BM,
            bn: BN,
            bk: BK,
            mr: MR,
            nr: NR,
            alignment: SIMD_ALIGNMENT,
            page_size: PAGE_SIZE,
            max_workspace_bytes: MAX_WORKSPACE_BYTES,
        }
    }
}

impl BlockConfig {
    /// Builds a config with custom block and microkernel dimensions and
    /// default alignment/page/ceiling values, validated.
    pub fn new(bm: usize, bn: usize, bk: usize, mr: usize, nr: usize) -> Result<Self> {
        let config = BlockConfig {
            bm,
            bn,
            bk,
            mr,
            nr,
            ..BlockConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the structural invariants: non-zero dimensions, power-of-two
    /// alignment and page size, alignment large enough for one vector, and
    /// microkernel tiles no larger than their cache block.
    ///
    /// Whether the implied workspace fits under `max_workspace_bytes` is
    /// checked where the layout is computed, at workspace construction.
    pub fn validate(&self) -> Result<()> {
        if self.bm == 0 || self.bn == 0 || self.bk == 0 {
            return Err(validation_error("block dimensions must be non-zero"));
        }
        if self.mr == 0 || self.nr == 0 {
            return Err(validation_error("microkernel dimensions must be non-zero"));
        }
        if self.mr > self.bm || self.nr > self.bn {
            return Err(validation_error(format!(
                "microkernel tile {}x{} exceeds cache block {}x{}",
                self.mr, self.nr, self.bm, self.bn
            )));
        }
        if !self.alignment.is_power_of_two() || self.alignment < core::mem::size_of::<f32>() * 4 {
            return Err(validation_error(format!(
                "alignment {} must be a power of two covering one vector",
                self.alignment
            )));
        }
        if !self.page_size.is_power_of_two() {
            return Err(validation_error(format!(
                "page size {} must be a power of two",
                self.page_size
            )));
        }
        if self.max_workspace_bytes == 0 {
            return Err(validation_error("maximum workspace size must be non-zero"));
        }
        Ok(())
    }
}

/// One GEMM problem: `C[m x n] = A[m x k] * B[k x n]`, row-major, with
/// explicit leading dimensions (row strides).
///
/// Invariant: every leading dimension is at least the corresponding
/// logical width. The unchecked kernels assume it; [`GemmConfig::validate`]
/// enforces it for the checked entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GemmConfig {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub lda: usize,
    pub ldb: usize,
    pub ldc: usize,
}

impl GemmConfig {
    /// Config for tightly packed operands (leading dimension == width).
    pub fn contiguous(m: usize, n: usize, k: usize) -> Self {
        GemmConfig {
            m,
            n,
            k,
            lda: k,
            ldb: n,
            ldc: n,
        }
    }

    /// Minimum element count of the A operand.
    pub fn required_a_len(&self) -> usize {
        required_len(self.m, self.k, self.lda)
    }

    /// Minimum element count of the B operand.
    pub fn required_b_len(&self) -> usize {
        required_len(self.k, self.n, self.ldb)
    }

    /// Minimum element count of the C operand.
    pub fn required_c_len(&self) -> usize {
        required_len(self.m, self.n, self.ldc)
    }

    /// Checks strides and buffer capacities against this problem.
    pub fn validate(&self, a_len: usize, b_len: usize, c_len: usize) -> Result<()> {
        if self.lda < self.k {
            return Err(validation_error(format!(
                "lda ({}) must be >= k ({})",
                self.lda, self.k
            )));
        }
        if self.ldb < self.n {
            return Err(validation_error(format!(
                "ldb ({}) must be >= n ({})",
                self.ldb, self.n
            )));
        }
        if self.ldc < self.n {
            return Err(validation_error(format!(
                "ldc ({}) must be >= n ({})",
                self.ldc, self.n
            )));
        }
        if a_len < self.required_a_len() {
            return Err(validation_error(format!(
                "A holds {} elements, problem needs {}",
                a_len,
                self.required_a_len()
            )));
        }
        if b_len < self.required_b_len() {
            return Err(validation_error(format!(
                "B holds {} elements, problem needs {}",
                b_len,
                self.required_b_len()
            )));
        }
        if c_len < self.required_c_len() {
            return Err(validation_error(format!(
                "C holds {} elements, problem needs {}",
                c_len,
                self.required_c_len()
            )));
        }
        Ok(())
    }
}

/// Elements a rows x cols matrix with row stride `ld` spans: full strides
/// for all rows but the last, which only needs its logical width.
fn required_len(rows: usize, cols: usize, ld: usize) -> usize {
    if rows == 0 || cols == 0 {
        0
    } else {
        (rows - 1) * ld + cols
    }
}

/// Borrowed dense row-major matrix descriptor.
///
/// Does not own its data; the constructor validates the stride and extent
/// so every `(row, col)` within bounds maps inside the slice.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    data: &'a [f32],
    rows: usize,
    cols: usize,
    ld: usize,
}

impl<'a> MatrixView<'a> {
    pub fn new(data: &'a [f32], rows: usize, cols: usize, ld: usize) -> Result<Self> {
        check_view(data.len(), rows, cols, ld)?;
        Ok(MatrixView {
            data,
            rows,
            cols,
            ld,
        })
    }

    pub fn data(&self) -> &'a [f32] {
        self.data
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn ld(&self) -> usize {
        self.ld
    }

    /// Element at `(i, j)`. Panics if out of bounds.
    pub fn at(&self, i: usize, j: usize) -> f32 {
        assert!(i < self.rows && j < self.cols);
        self.data[i * self.ld + j]
    }
}

/// Mutable counterpart of [`MatrixView`].
#[derive(Debug)]
pub struct MatrixViewMut<'a> {
    data: &'a mut [f32],
    rows: usize,
    cols: usize,
    ld: usize,
}

impl<'a> MatrixViewMut<'a> {
    pub fn new(data: &'a mut [f32], rows: usize, cols: usize, ld: usize) -> Result<Self> {
        check_view(data.len(), rows, cols, ld)?;
        Ok(MatrixViewMut {
            data,
            rows,
            cols,
            ld,
        })
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut *self.data
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn ld(&self) -> usize {
        self.ld
    }
}

fn check_view(len: usize, rows: usize, cols: usize, ld: usize) -> Result<()> {
    if ld < cols {
        return Err(validation_error(format!(
            "leading dimension ({}) smaller than column count ({})",
            ld, cols
        )));
    }
    let required = required_len(rows, cols, ld);
    if len < required {
        return Err(validation_error(format!(
            "matrix of {}x{} with stride {} needs {} elements, slice holds {}",
            rows, cols, ld, required, len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_block_config_is_valid() {
        let config = BlockConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bm, 256);
        assert_eq!(config.alignment, 128);
        assert_eq!(config.max_workspace_bytes, 512 * 1024 * 1024);
    }

    #[test]
    fn test_block_config_rejects_zero_dims() {
        assert!(BlockConfig::new(0, 64, 64, 4, 4).is_err());
        assert!(BlockConfig::new(64, 64, 64, 0, 4).is_err());
    }

    #[test]
    fn test_block_config_rejects_oversized_microkernel() {
        assert!(BlockConfig::new(4, 64, 64, 8, 4).is_err());
    }

    #[test]
    fn test_block_config_rejects_bad_alignment() {
        let config = BlockConfig {
            alignment: 100,
            ..BlockConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gemm_config_validation() {
        let cfg = GemmConfig::contiguous(4, 5, 6);
        assert!(cfg.validate(24, 30, 20).is_ok());
        assert!(cfg.validate(23, 30, 20).is_err());

        let bad = GemmConfig {
            lda: 3,
            ..GemmConfig::contiguous(4, 5, 6)
        };
        assert!(bad.validate(24, 30, 20).is_err());
    }

    #[test]
    fn test_required_len_with_stride() {
        let cfg = GemmConfig {
            m: 4,
            n: 5,
            k: 6,
            lda: 10,
            ldb: 7,
            ldc: 9,
        };
        assert_eq!(cfg.required_a_len(), 3 * 10 + 6);
        assert_eq!(cfg.required_b_len(), 5 * 7 + 5);
        assert_eq!(cfg.required_c_len(), 3 * 9 + 5);
    }

    #[test]
    fn test_matrix_view_bounds() {
        let data = vec![0.0f32; 26];
        assert!(MatrixView::new(&data, 4, 5, 7).is_ok());
        assert!(MatrixView::new(&data, 4, 5, 4).is_err());
        assert!(MatrixView::new(&data[..20], 4, 5, 7).is_err());
    }

    #[test]
    fn test_matrix_view_at() {
        let data: Vec<f32> = (0..28).map(|x| x as f32).collect();
        let view = MatrixView::new(&data, 4, 5, 7).unwrap();
        assert_eq!(view.at(0, 0), 0.0);
        assert_eq!(view.at(2, 3), 17.0);
    }
}
