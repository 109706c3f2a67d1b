use super::*;

use std::cmp::*;

/* clipping within min and max */
pub(crate) fn VP8_CLIP3<T: Ord>(min_x: T, max_x: T, value: T) -> T {
    max(min_x, min(max_x, value))
}

lazy_static! {
    /* clip to [0, 255] for values in [-255, 510] */
    static ref vp8_clip1: [pel; 255 + 511] = {
        let mut tbl = [0 as pel; 255 + 511];
        for (i, v) in tbl.iter_mut().enumerate() {
            *v = VP8_CLIP3(0, 255, i as i32 - 255) as pel;
        }
        tbl
    };
}

#[inline]
pub(crate) fn clip_8b(v: i32) -> pel {
    if v & !0xff == 0 {
        v as pel
    } else if v < 0 {
        0
    } else {
        255
    }
}

/* table-driven clip of top[x] + left[y] - top_left style sums */
#[inline]
pub(crate) fn clip_tm(v: i32) -> pel {
    vp8_clip1[(v + 255) as usize]
}
