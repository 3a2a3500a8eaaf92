// Frame-to-frame change detection. A panel refresh is slow, so the driver
// only pushes the row ranges that actually changed since the last frame.

use log::debug;

use crate::framebuffer::Framebuffer;

/// Contiguous run of changed rows, `[y_start, y_end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyRegion {
    pub y_start: i32,
    pub y_end: i32,
}

impl DirtyRegion {
    pub fn rows(&self) -> i32 {
        self.y_end - self.y_start
    }
}

/// Row ranges that differ between `current` and `previous`.
///
/// When a dirty run ends, the next `min_gap` rows are checked; if any of them
/// is dirty again the run keeps going, so nearby regions come back merged.
pub fn dirty_rows(current: &Framebuffer, previous: &Framebuffer, min_gap: i32) -> Vec<DirtyRegion> {
    let height = current.height();
    let row_dirty = |y: i32| current.row(y) != previous.row(y);

    let mut regions = Vec::new();
    let mut start: Option<i32> = None;

    for y in 0..height {
        let dirty = row_dirty(y);
        match start {
            None if dirty => start = Some(y),
            Some(y_start) if !dirty => {
                let merge = (y..(y + min_gap).min(height)).any(row_dirty);
                if !merge {
                    regions.push(DirtyRegion { y_start, y_end: y });
                    start = None;
                }
            }
            _ => {}
        }
    }
    if let Some(y_start) = start {
        regions.push(DirtyRegion { y_start, y_end: height });
    }

    debug!(
        "dirty rows: {} region(s), {} row(s)",
        regions.len(),
        regions.iter().map(DirtyRegion::rows).sum::<i32>()
    );
    regions
}

/// True when nothing changed.
pub fn is_clean(current: &Framebuffer, previous: &Framebuffer) -> bool {
    current.as_bytes() == previous.as_bytes()
}
