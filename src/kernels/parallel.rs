//! Parallel packed variant: the M x N output is partitioned into a
//! row-major grid of BM x BN tiles, and a fixed pool of workers claims
//! tiles dynamically from one shared atomic counter.
//!
//! Each worker owns a private [`Workspace`], so packing and compute need
//! no locks; tiles are disjoint regions of C, so the claim counter is the
//! only synchronization in the whole call. Same output convention as the
//! packed variant: accumulates, caller pre-zeroes C.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::ThreadPoolBuilder;
use tracing::debug;

use crate::config::{BlockConfig, GemmConfig};
use crate::workspace::Workspace;

use super::packed::compute_tile;

/// Raw C pointer shared across workers.
///
/// Safety: tile geometry statically partitions C, so no two workers ever
/// write the same element, and nobody reads C regions another worker
/// writes.
struct SendPtr(*mut f32);

unsafe impl Send for SendPtr {}
unsafe impl Sync for SendPtr {}

/// `C += A * B` on the default pool (host parallelism, fallback 4) with
/// default blocking. Caller pre-zeroes C.
pub fn gemm(a: &[f32], b: &[f32], c: &mut [f32], cfg: &GemmConfig) {
    gemm_with(a, b, c, cfg, &BlockConfig::default(), None);
}

/// `C += A * B` with explicit blocking and worker count.
///
/// `threads: None` sizes the pool to the host's reported parallelism
/// (fallback 4). The tile grid depends only on the problem and blocking
/// parameters, never on the pool size, so results are bit-identical for
/// any worker count. Blocks until every worker has finished.
///
/// # Panics
///
/// Panics if `params` describes an invalid workspace or the pool cannot
/// be built; both are setup-time failures.
pub fn gemm_with(
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    cfg: &GemmConfig,
    params: &BlockConfig,
    threads: Option<usize>,
) {
    super::check_operands(a, b, c, cfg);
    params.validate().expect("invalid blocking parameters");
    if cfg.m == 0 || cfg.n == 0 {
        return;
    }

    let threads = threads
        .filter(|&t| t > 0)
        .unwrap_or_else(default_thread_count);

    let tiles_m = cfg.m.div_ceil(params.bm);
    let tiles_n = cfg.n.div_ceil(params.bn);
    let total_tiles = tiles_m * tiles_n;

    let tile_counter = AtomicUsize::new(0);
    let c_out = SendPtr(c.as_mut_ptr());

    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("failed to build worker thread pool");

    debug!(threads, total_tiles, "dispatching tile workers");

    // broadcast runs one worker per pool thread and doubles as the join
    // barrier: it returns only when every worker has drained the counter.
    pool.broadcast(|_| {
        worker(a, b, &c_out, cfg, params, &tile_counter, total_tiles);
    });
}

fn worker(
    a: &[f32],
    b: &[f32],
    c: &SendPtr,
    cfg: &GemmConfig,
    params: &BlockConfig,
    tile_counter: &AtomicUsize,
    total_tiles: usize,
) {
    let mut ws = Workspace::new(params).expect("workspace setup failed");

    let tiles_per_row = cfg.n.div_ceil(params.bn);

    loop {
        let tile_id = tile_counter.fetch_add(1, Ordering::Relaxed);
        if tile_id >= total_tiles {
            break;
        }

        let ii = (tile_id / tiles_per_row) * params.bm;
        let jj = (tile_id % tiles_per_row) * params.bn;

        // SAFETY: operands were length-checked at dispatch; the claimed
        // tile is exclusively this worker's region of C.
        unsafe {
            compute_tile(a, b, c.0, cfg, params, &mut ws, ii, jj);
        }
    }
}

fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
