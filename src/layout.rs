//! Workspace memory plan: three aligned sub-regions and a total size.
//!
//! A [`Layout`] maps blocking parameters to byte offsets before any memory
//! exists: an A panel of `BM x BK` floats, a B panel of `BK x BN`, and an
//! accumulator of `MR x NR`, laid back-to-back with each start rounded up
//! to the vector alignment.

use crate::config::BlockConfig;
use crate::error::{layout_error, Result};

/// A sub-range of the workspace buffer. `offset` is always a multiple of
/// the configured alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub offset: usize,
    pub bytes: usize,
}

impl Region {
    /// One past the last byte of this region.
    pub fn end(&self) -> usize {
        self.offset + self.bytes
    }
}

/// Memory plan for one workspace: A panel, B panel, accumulator, and the
/// aligned total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub a: Region,
    pub b: Region,
    pub accum: Region,
    pub total_bytes: usize,
}

impl Layout {
    /// Computes the plan for `config`, rejecting totals at or above the
    /// configured ceiling. This is the validated path [`crate::Workspace`]
    /// construction uses.
    pub fn for_config(config: &BlockConfig) -> Result<Layout> {
        config.validate()?;

        let align = config.alignment;
        let elem = core::mem::size_of::<f32>();

        let mut offset = 0;

        let a = Region {
            offset: align_up(offset, align),
            bytes: config.bm * config.bk * elem,
        };
        offset = a.end();

        let b = Region {
            offset: align_up(offset, align),
            bytes: config.bk * config.bn * elem,
        };
        offset = b.end();

        let accum = Region {
            offset: align_up(offset, align),
            bytes: config.mr * config.nr * elem,
        };
        offset = accum.end();

        let total_bytes = align_up(offset, align);

        if total_bytes >= config.max_workspace_bytes {
            return Err(layout_error(
                total_bytes,
                align,
                format!(
                    "blocking {}x{}x{} implies a workspace above the {} byte maximum",
                    config.bm, config.bn, config.bk, config.max_workspace_bytes
                ),
            ));
        }

        Ok(Layout {
            a,
            b,
            accum,
            total_bytes,
        })
    }
}

/// Computes the plan for the given block and microkernel dimensions under
/// the default alignment and ceiling.
///
/// # Panics
///
/// Panics if the dimensions are invalid or the total exceeds the default
/// maximum workspace size; both are configuration errors that belong to
/// setup, not to the compute path.
pub fn compute_layout(bm: usize, bn: usize, bk: usize, mr: usize, nr: usize) -> Layout {
    let config = BlockConfig {
        bm,
        bn,
        bk,
        mr,
        nr,
        ..BlockConfig::default()
    };
    Layout::for_config(&config).expect("invalid workspace layout")
}

pub(crate) fn align_up(x: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (x + align - 1) & !(align - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 128), 0);
        assert_eq!(align_up(1, 128), 128);
        assert_eq!(align_up(128, 128), 128);
        assert_eq!(align_up(129, 128), 256);
    }

    #[test]
    fn test_layout_math_default_blocks() {
        let layout = compute_layout(256, 256, 256, 8, 8);

        assert_eq!(layout.a.bytes, 256 * 256 * 4);
        assert_eq!(layout.b.bytes, 256 * 256 * 4);
        assert_eq!(layout.accum.bytes, 8 * 8 * 4);
    }

    #[test]
    fn test_layout_rejects_oversized_blocks() {
        let config = BlockConfig {
            bm: 8192,
            bn: 8192,
            bk: 8192,
            ..BlockConfig::default()
        };
        let err = Layout::for_config(&config).unwrap_err();
        assert!(matches!(err, crate::error::GemmError::Layout { .. }));
    }

    #[test]
    fn test_regions_do_not_overlap() {
        let layout = compute_layout(100, 50, 30, 4, 4);
        assert!(layout.a.end() <= layout.b.offset);
        assert!(layout.b.end() <= layout.accum.offset);
        assert!(layout.accum.end() <= layout.total_bytes);
    }
}
