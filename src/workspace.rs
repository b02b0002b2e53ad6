//! Aligned scratch memory for the packed kernels.
//!
//! One allocation per [`Workspace`], carved into the three regions of a
//! [`Layout`]. Construction zero-touches every page so the physical pages
//! are resolved before the compute loop runs; `Drop` releases the
//! allocation on every exit path.

use std::alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout as AllocLayout};
use std::ptr::NonNull;

use tracing::debug;

use crate::config::BlockConfig;
use crate::error::{allocation_error, Result};
use crate::layout::Layout;

const ELEM: usize = core::mem::size_of::<f32>();

/// Owns one aligned buffer holding the A panel, B panel, and accumulator.
///
/// Not `Clone`: the buffer addresses are identity, and two workspaces must
/// never alias. Allocation failure is fatal (`handle_alloc_error`); a
/// workspace is a setup-time resource, not something to negotiate at
/// runtime.
pub struct Workspace {
    base: NonNull<u8>,
    alloc_layout: AllocLayout,
    layout: Layout,
    a_ptr: NonNull<f32>,
    b_ptr: NonNull<f32>,
    accum_ptr: NonNull<f32>,
}

impl Workspace {
    /// Allocates and pre-touches a workspace sized for `config`.
    ///
    /// Returns a configuration error if the blocking parameters are invalid
    /// or the implied total exceeds the configured maximum. Out-of-memory
    /// aborts via `handle_alloc_error`.
    pub fn new(config: &BlockConfig) -> Result<Self> {
        let layout = Layout::for_config(config)?;

        let alloc_layout = AllocLayout::from_size_align(layout.total_bytes, config.alignment)
            .map_err(|_| {
                allocation_error(
                    layout.total_bytes,
                    config.alignment,
                    "cannot describe aligned allocation",
                )
            })?;

        let base = unsafe { alloc_zeroed(alloc_layout) };
        let base = match NonNull::new(base) {
            Some(p) => p,
            None => handle_alloc_error(alloc_layout),
        };

        // Write one byte per page so faults are taken here, not inside the
        // packing or microkernel loops.
        unsafe {
            let raw = base.as_ptr();
            let mut off = 0;
            while off < layout.total_bytes {
                raw.add(off).write(0);
                off += config.page_size;
            }
        }

        let a_ptr = unsafe { region_ptr(base, layout.a.offset) };
        let b_ptr = unsafe { region_ptr(base, layout.b.offset) };
        let accum_ptr = unsafe { region_ptr(base, layout.accum.offset) };

        debug!(
            total_bytes = layout.total_bytes,
            a_bytes = layout.a.bytes,
            b_bytes = layout.b.bytes,
            accum_bytes = layout.accum.bytes,
            "workspace allocated"
        );

        Ok(Workspace {
            base,
            alloc_layout,
            layout,
            a_ptr,
            b_ptr,
            accum_ptr,
        })
    }

    /// Workspace for the default blocking parameters.
    ///
    /// # Panics
    ///
    /// Panics if the default layout is rejected, which cannot happen for
    /// the shipped defaults.
    pub fn with_defaults() -> Self {
        Workspace::new(&BlockConfig::default()).expect("default workspace layout is valid")
    }

    /// The A-panel sub-buffer, `a_capacity() / 4` floats.
    pub fn a_panel(&self) -> &[f32] {
        unsafe { std::slice::from_raw_parts(self.a_ptr.as_ptr(), self.layout.a.bytes / ELEM) }
    }

    pub fn a_panel_mut(&mut self) -> &mut [f32] {
        unsafe { std::slice::from_raw_parts_mut(self.a_ptr.as_ptr(), self.layout.a.bytes / ELEM) }
    }

    /// The B-panel sub-buffer, `b_capacity() / 4` floats.
    pub fn b_panel(&self) -> &[f32] {
        unsafe { std::slice::from_raw_parts(self.b_ptr.as_ptr(), self.layout.b.bytes / ELEM) }
    }

    pub fn b_panel_mut(&mut self) -> &mut [f32] {
        unsafe { std::slice::from_raw_parts_mut(self.b_ptr.as_ptr(), self.layout.b.bytes / ELEM) }
    }

    /// The accumulator sub-buffer, `accum_capacity() / 4` floats.
    pub fn accum(&self) -> &[f32] {
        unsafe {
            std::slice::from_raw_parts(self.accum_ptr.as_ptr(), self.layout.accum.bytes / ELEM)
        }
    }

    pub fn accum_mut(&mut self) -> &mut [f32] {
        unsafe {
            std::slice::from_raw_parts_mut(self.accum_ptr.as_ptr(), self.layout.accum.bytes / ELEM)
        }
    }

    /// Byte capacity of the A panel.
    pub fn a_capacity(&self) -> usize {
        self.layout.a.bytes
    }

    /// Byte capacity of the B panel.
    pub fn b_capacity(&self) -> usize {
        self.layout.b.bytes
    }

    /// Byte capacity of the accumulator region.
    pub fn accum_capacity(&self) -> usize {
        self.layout.accum.bytes
    }

    /// Byte size of the whole allocation, padding included.
    pub fn total_capacity(&self) -> usize {
        self.layout.total_bytes
    }

    /// Zeroes the accumulator region only. Cost is proportional to
    /// `MR x NR`, not to the workspace size; the panels are untouched.
    pub fn reset(&mut self) {
        self.accum_mut().fill(0.0);
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.alloc_layout.size() > 0 {
            unsafe {
                dealloc(self.base.as_ptr(), self.alloc_layout);
            }
        }
    }
}

unsafe fn region_ptr(base: NonNull<u8>, offset: usize) -> NonNull<f32> {
    NonNull::new_unchecked(base.as_ptr().add(offset).cast::<f32>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacities_match_layout() {
        let config = BlockConfig::new(128, 128, 128, 8, 8).unwrap();
        let ws = Workspace::new(&config).unwrap();

        assert_eq!(ws.a_capacity(), 128 * 128 * 4);
        assert_eq!(ws.b_capacity(), 128 * 128 * 4);
        assert_eq!(ws.accum_capacity(), 8 * 8 * 4);
        assert_eq!(ws.a_panel().len() * 4, ws.a_capacity());
    }

    #[test]
    fn test_sub_buffers_are_aligned() {
        let ws = Workspace::with_defaults();

        assert_eq!(ws.a_panel().as_ptr() as usize % 128, 0);
        assert_eq!(ws.b_panel().as_ptr() as usize % 128, 0);
        assert_eq!(ws.accum().as_ptr() as usize % 128, 0);
    }

    #[test]
    fn test_buffer_starts_zeroed() {
        let config = BlockConfig::new(64, 64, 64, 4, 4).unwrap();
        let ws = Workspace::new(&config).unwrap();
        assert!(ws.a_panel().iter().all(|&x| x == 0.0));
        assert!(ws.accum().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_reset_touches_only_accumulator() {
        let config = BlockConfig::new(32, 32, 32, 4, 4).unwrap();
        let mut ws = Workspace::new(&config).unwrap();

        ws.a_panel_mut().fill(1.5);
        ws.b_panel_mut().fill(2.5);
        ws.accum_mut().fill(123.456);

        ws.reset();

        assert!(ws.accum().iter().all(|&x| x == 0.0));
        assert!(ws.a_panel().iter().all(|&x| x == 1.5));
        assert!(ws.b_panel().iter().all(|&x| x == 2.5));
    }

    #[test]
    fn test_oversized_config_is_a_setup_error() {
        let config = BlockConfig {
            bm: 16384,
            bn: 16384,
            bk: 4096,
            ..BlockConfig::default()
        };
        assert!(Workspace::new(&config).is_err());
    }
}
