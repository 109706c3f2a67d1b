use crate::com::ipred::*;
use crate::com::*;

/*****************************************************************************
 * reconstructed edges carried between macroblocks in raster order
 *****************************************************************************/
pub(crate) struct BoundaryState {
    mb_w: usize,

    /* per column: bottom row of the macroblock above */
    y_top: Vec<[pel; MB_SIZE]>,
    /* U in 0..8, V in 8..16 */
    uv_top: Vec<[pel; MB_SIZE]>,
    top_derr: Vec<[[i8; 2]; N_UV]>,

    /* right column of the previous macroblock in the row */
    y_left: [pel; MB_SIZE],
    u_left: [pel; UV_SIZE],
    v_left: [pel; UV_SIZE],
    y_top_left: pel,
    u_top_left: pel,
    v_top_left: pel,
    left_derr: [[i8; 2]; N_UV],
}

impl BoundaryState {
    pub(crate) fn new(mb_w: usize) -> Self {
        let mut bnd = BoundaryState {
            mb_w,
            y_top: vec![[TOP_MISSING; MB_SIZE]; mb_w],
            uv_top: vec![[TOP_MISSING; MB_SIZE]; mb_w],
            top_derr: vec![[[0; 2]; N_UV]; mb_w],
            y_left: [LEFT_MISSING; MB_SIZE],
            u_left: [LEFT_MISSING; UV_SIZE],
            v_left: [LEFT_MISSING; UV_SIZE],
            y_top_left: TOP_MISSING,
            u_top_left: TOP_MISSING,
            v_top_left: TOP_MISSING,
            left_derr: [[0; 2]; N_UV],
        };
        bnd.reset_frame();
        bnd
    }

    pub(crate) fn reset_frame(&mut self) {
        for top in self.y_top.iter_mut().chain(self.uv_top.iter_mut()) {
            *top = [TOP_MISSING; MB_SIZE];
        }
        for derr in self.top_derr.iter_mut() {
            *derr = [[0; 2]; N_UV];
        }
        self.start_row(0);
    }

    /* left edge of a new macroblock row */
    pub(crate) fn start_row(&mut self, y: usize) {
        let corner = if y > 0 { LEFT_MISSING } else { TOP_MISSING };
        self.y_top_left = corner;
        self.u_top_left = corner;
        self.v_top_left = corner;
        self.y_left = [LEFT_MISSING; MB_SIZE];
        self.u_left = [LEFT_MISSING; UV_SIZE];
        self.v_left = [LEFT_MISSING; UV_SIZE];
        self.left_derr = [[0; 2]; N_UV];
    }

    pub(crate) fn neighbors(&self, x: usize, y: usize) -> Vp8Neighbors {
        let mut nb = Vp8Neighbors::default();
        nb.has_left = x > 0;
        nb.has_top = y > 0;

        nb.y_left = self.y_left;
        nb.u_left = self.u_left;
        nb.v_left = self.v_left;
        nb.y_top_left = self.y_top_left;
        nb.u_top_left = self.u_top_left;
        nb.v_top_left = self.v_top_left;

        nb.y_top[..MB_SIZE].copy_from_slice(&self.y_top[x]);
        if x + 1 < self.mb_w {
            nb.y_top[MB_SIZE..].copy_from_slice(&self.y_top[x + 1][..4]);
        } else {
            /* past the right edge: repeat the last top sample */
            let last = self.y_top[x][MB_SIZE - 1];
            for v in nb.y_top[MB_SIZE..].iter_mut() {
                *v = last;
            }
        }
        nb.u_top.copy_from_slice(&self.uv_top[x][..UV_SIZE]);
        nb.v_top.copy_from_slice(&self.uv_top[x][UV_SIZE..]);

        nb
    }

    /* (top, left) diffusion errors seen by column x */
    pub(crate) fn diffusion(&self, x: usize) -> ([[i8; 2]; N_UV], [[i8; 2]; N_UV]) {
        (self.top_derr[x], self.left_derr)
    }

    pub(crate) fn store_diffusion(&mut self, x: usize, derr: &[[i8; 3]; N_UV]) {
        for ch in 0..N_UV {
            let left1 = ((3 * derr[ch][2] as i32) >> 2) as i8;
            self.left_derr[ch] = [derr[ch][0], left1];
            self.top_derr[x][ch] = [derr[ch][1], (derr[ch][2] as i32 - left1 as i32) as i8];
        }
    }

    /* keeps the edges of the reconstructed macroblock at column x */
    pub(crate) fn save(&mut self, x: usize, rec_y: &[pel; MB_DIM], rec_uv: &[pel; UV_DIM]) {
        for j in 0..MB_SIZE {
            self.y_left[j] = rec_y[j * BPS + MB_SIZE - 1];
        }
        for j in 0..UV_SIZE {
            self.u_left[j] = rec_uv[j * BPS + UV_SIZE - 1];
            self.v_left[j] = rec_uv[j * BPS + BPS - 1];
        }
        /* corner comes from the old top row */
        self.y_top_left = self.y_top[x][MB_SIZE - 1];
        self.u_top_left = self.uv_top[x][UV_SIZE - 1];
        self.v_top_left = self.uv_top[x][MB_SIZE - 1];

        self.y_top[x].copy_from_slice(&rec_y[(MB_SIZE - 1) * BPS..]);
        self.uv_top[x].copy_from_slice(&rec_uv[(UV_SIZE - 1) * BPS..]);
    }
}

/*****************************************************************************
 * 4x4 edges inside one macroblock
 *
 * buf: 16 left samples bottom to top, the corner, 16 top and 4 top-right
 * samples. Each decided block writes its bottom row and right column back
 * so the following blocks read their edges from the same array.
 *****************************************************************************/
const I4_BOUNDARY_LEN: usize = 37;

/* position of the first top sample of each 4x4 block in buf */
#[rustfmt::skip]
const vp8_tbl_top_left_i4: [usize; 16] = [
    17, 21, 25, 29,
    13, 17, 21, 25,
    9, 13, 17, 21,
    5, 9, 13, 17,
];

pub(crate) struct I4Boundary {
    buf: [pel; I4_BOUNDARY_LEN],
    i4: usize,
}

impl I4Boundary {
    pub(crate) fn new(nb: &Vp8Neighbors) -> Self {
        let mut buf = [0; I4_BOUNDARY_LEN];
        for i in 0..MB_SIZE {
            buf[i] = nb.y_left[MB_SIZE - 1 - i];
        }
        buf[MB_SIZE] = nb.y_top_left;
        buf[MB_SIZE + 1..].copy_from_slice(&nb.y_top);
        I4Boundary { buf, i4: 0 }
    }

    pub(crate) fn edge(&self) -> [pel; EDGE_LEN] {
        let top = vp8_tbl_top_left_i4[self.i4];
        let mut edge = [0; EDGE_LEN];
        edge.copy_from_slice(&self.buf[top - EDGE_X - 1..top + 8]);
        edge
    }

    /* blk: decided block at its top-left sample, stride BPS */
    pub(crate) fn rotate(&mut self, blk: &[pel]) -> bool {
        let top = vp8_tbl_top_left_i4[self.i4];
        for i in 0..4 {
            self.buf[top - 4 + i] = blk[i + 3 * BPS];
        }
        if self.i4 & 3 != 3 {
            for i in 0..3 {
                self.buf[top + i] = blk[3 + (2 - i) * BPS];
            }
        } else {
            /* right column blocks keep the macroblock top-right */
            for i in 0..4 {
                self.buf[top + i] = self.buf[top + i + 4];
            }
        }
        self.i4 += 1;
        self.i4 < 16
    }
}
