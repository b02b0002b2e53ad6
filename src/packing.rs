//! Panel packing: strided sub-matrix to contiguous buffer copies.
//!
//! `pack_a` and `pack_b` are plain value copies — no transpose, no
//! scaling. The destination stores each source row contiguously with row
//! stride exactly `cols`, the layout the packed microkernels stream
//! through. The `try_` variants validate capacities and strides up front
//! and report violations instead of faulting.

use crate::error::{validation_error, Result};

/// Packs a `rows x cols` block of A (row stride `ld`) into `dst` with row
/// stride `cols`, so `dst[i * cols + k] == src[i * ld + k]`.
///
/// Preconditions (debug-checked only): `ld >= cols`, `dst` holds at least
/// `rows * cols` elements, `src` covers the last row.
pub fn pack_a(dst: &mut [f32], src: &[f32], rows: usize, cols: usize, ld: usize) {
    debug_assert!(ld >= cols);
    debug_assert!(dst.len() >= rows * cols);

    for i in 0..rows {
        let s = &src[i * ld..i * ld + cols];
        dst[i * cols..(i + 1) * cols].copy_from_slice(s);
    }
}

/// Packs a `rows x cols` block of B, where `rows` runs along K and `cols`
/// along N. Identical copy contract to [`pack_a`]:
/// `dst[p * cols + j] == src[p * ld + j]`.
pub fn pack_b(dst: &mut [f32], src: &[f32], rows: usize, cols: usize, ld: usize) {
    debug_assert!(ld >= cols);
    debug_assert!(dst.len() >= rows * cols);

    for p in 0..rows {
        let s = &src[p * ld..p * ld + cols];
        dst[p * cols..(p + 1) * cols].copy_from_slice(s);
    }
}

/// Checked form of [`pack_a`]: validates stride, destination capacity, and
/// source extent, then packs.
pub fn try_pack_a(dst: &mut [f32], src: &[f32], rows: usize, cols: usize, ld: usize) -> Result<()> {
    check_pack(dst.len(), src.len(), rows, cols, ld)?;
    pack_a(dst, src, rows, cols, ld);
    Ok(())
}

/// Checked form of [`pack_b`].
pub fn try_pack_b(dst: &mut [f32], src: &[f32], rows: usize, cols: usize, ld: usize) -> Result<()> {
    check_pack(dst.len(), src.len(), rows, cols, ld)?;
    pack_b(dst, src, rows, cols, ld);
    Ok(())
}

fn check_pack(dst_len: usize, src_len: usize, rows: usize, cols: usize, ld: usize) -> Result<()> {
    if ld < cols {
        return Err(validation_error(format!(
            "pack stride ({}) smaller than panel width ({})",
            ld, cols
        )));
    }
    if dst_len < rows * cols {
        return Err(validation_error(format!(
            "pack destination holds {} elements, panel needs {}",
            dst_len,
            rows * cols
        )));
    }
    let src_needed = if rows == 0 || cols == 0 {
        0
    } else {
        (rows - 1) * ld + cols
    };
    if src_len < src_needed {
        return Err(validation_error(format!(
            "pack source holds {} elements, panel needs {}",
            src_len, src_needed
        )));
    }
    Ok(())
}
