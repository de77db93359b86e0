//! Fork-join range partitioning.
//!
//! Every call spawns one task per block inside a [`rayon::scope`] and blocks
//! until all of them finish. Blocks are contiguous and disjoint, so tasks
//! never need to synchronize with each other. A panic in any task resurfaces
//! on the calling thread when the scope ends.

use core::ops::Range;
use std::sync::OnceLock;

/// Worker count derived from host CPU concurrency, computed once.
pub fn num_threads() -> usize {
    static THREADS: OnceLock<usize> = OnceLock::new();
    *THREADS.get_or_init(|| rayon::current_num_threads().max(1))
}

/// Split `[start, end)` into contiguous blocks, one per worker.
///
/// The worker count is `num_threads` clamped to `1..=end - start`, so no
/// block is ever empty. Every block but the last holds
/// `(end - start) / workers` indices; the last absorbs the remainder.
/// An empty range yields no blocks.
pub fn partition(start: usize, end: usize, num_threads: usize) -> Vec<Range<usize>> {
    if end <= start {
        return Vec::new();
    }
    let len = end - start;
    let workers = num_threads.clamp(1, len);
    let block_size = len / workers;

    (0..workers)
        .map(|i| {
            let block_start = start + i * block_size;
            let block_end = if i == workers - 1 {
                end
            } else {
                block_start + block_size
            };
            block_start..block_end
        })
        .collect()
}

/// Run `func(block_start, block_end)` for every block of `[start, end)` as its
/// own task and wait for all of them.
pub fn parallel_for<F>(start: usize, end: usize, num_threads: usize, func: F)
where
    F: Fn(usize, usize) + Sync,
{
    let blocks = partition(start, end, num_threads);
    log::trace!("parallel_for {start}..{end}: {} blocks", blocks.len());

    let func = &func;
    rayon::scope(|s| {
        for block in blocks {
            s.spawn(move |_| func(block.start, block.end));
        }
    });
}

/// Row-banded variant of [`parallel_for`] for writing into a shared buffer.
///
/// `out` is viewed as rows of `row_len` bytes. The range `rows` is
/// partitioned like [`parallel_for`] and each worker receives its row range
/// plus the matching mutable band of `out`, starting at row `block.start`.
/// Rows outside `rows` are left untouched.
///
/// # Panics
///
/// Panics if `rows.end * row_len` exceeds `out.len()`.
pub fn parallel_rows<F>(
    out: &mut [u8],
    row_len: usize,
    rows: Range<usize>,
    num_threads: usize,
    func: F,
) where
    F: Fn(Range<usize>, &mut [u8]) + Sync,
{
    let blocks = partition(rows.start, rows.end, num_threads);
    if blocks.is_empty() {
        return;
    }
    log::trace!(
        "parallel_rows {}..{} x {row_len}: {} blocks",
        rows.start,
        rows.end,
        blocks.len()
    );

    let mut rest = &mut out[rows.start * row_len..rows.end * row_len];
    let func = &func;
    rayon::scope(|s| {
        for block in blocks {
            let (band, tail) = core::mem::take(&mut rest).split_at_mut(block.len() * row_len);
            rest = tail;
            s.spawn(move |_| func(block, band));
        }
    });
}
