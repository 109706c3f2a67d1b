use super::*;
use crate::com::*;

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaneConfig {
    pub stride: usize,
    pub width: usize,
    pub height: usize,
    pub xdec: usize,
    pub ydec: usize,
}

/// One sample plane, rows packed at `cfg.stride`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Plane {
    pub data: Vec<pel>,
    pub cfg: PlaneConfig,
}

impl fmt::Debug for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Plane {}x{} (dec {}/{})",
            self.cfg.width, self.cfg.height, self.cfg.xdec, self.cfg.ydec
        )
    }
}

impl Plane {
    pub fn new(width: usize, height: usize, xdec: usize, ydec: usize) -> Self {
        Plane {
            data: vec![0; width * height],
            cfg: PlaneConfig {
                stride: width,
                width,
                height,
                xdec,
                ydec,
            },
        }
    }

    #[inline(always)]
    pub fn p(&self, x: usize, y: usize) -> pel {
        self.data[y * self.cfg.stride + x]
    }

    pub fn row(&self, y: usize) -> &[pel] {
        let start = y * self.cfg.stride;
        &self.data[start..start + self.cfg.width]
    }

    /* copies a w x h block of src (stride s_src) to (x, y) */
    fn put(&mut self, x: usize, y: usize, w: usize, h: usize, src: &[pel], s_src: usize) {
        let stride = self.cfg.stride;
        for j in 0..h {
            let dst = &mut self.data[(y + j) * stride + x..(y + j) * stride + x + w];
            dst.copy_from_slice(&src[j * s_src..j * s_src + w]);
        }
    }

    /* reads a w x h block at (x, y) into dst (stride s_dst) */
    fn get(&self, x: usize, y: usize, w: usize, h: usize, dst: &mut [pel], s_dst: usize) {
        let stride = self.cfg.stride;
        for j in 0..h {
            dst[j * s_dst..j * s_dst + w]
                .copy_from_slice(&self.data[(y + j) * stride + x..(y + j) * stride + x + w]);
        }
    }
}

/// 4:2:0 picture whose dimensions are whole macroblocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub planes: [Plane; N_C],
    pub mb_w: usize,
    pub mb_h: usize,
}

impl Frame {
    pub fn new(mb_w: usize, mb_h: usize) -> Result<Self, Vp8Error> {
        let (w, h) = frame_size(mb_w, mb_h)?;
        Ok(Frame {
            planes: [
                Plane::new(w, h, 0, 0),
                Plane::new(w >> 1, h >> 1, 1, 1),
                Plane::new(w >> 1, h >> 1, 1, 1),
            ],
            mb_w,
            mb_h,
        })
    }

    /// Source samples of macroblock (x, y).
    pub fn macroblock(&self, x: usize, y: usize) -> MacroblockInput {
        let mut mb = MacroblockInput::default();
        self.planes[0].get(x * MB_SIZE, y * MB_SIZE, MB_SIZE, MB_SIZE, &mut mb.y, MB_SIZE);
        self.planes[1].get(x * UV_SIZE, y * UV_SIZE, UV_SIZE, UV_SIZE, &mut mb.u, UV_SIZE);
        self.planes[2].get(x * UV_SIZE, y * UV_SIZE, UV_SIZE, UV_SIZE, &mut mb.v, UV_SIZE);
        mb
    }

    /// Writes macroblock (x, y) from the BPS-strided work layout, chroma as U|V.
    pub(crate) fn store_macroblock(
        &mut self,
        x: usize,
        y: usize,
        rec_y: &[pel; MB_DIM],
        rec_uv: &[pel; UV_DIM],
    ) {
        self.planes[0].put(x * MB_SIZE, y * MB_SIZE, MB_SIZE, MB_SIZE, rec_y, BPS);
        self.planes[1].put(x * UV_SIZE, y * UV_SIZE, UV_SIZE, UV_SIZE, rec_uv, BPS);
        self.planes[2].put(x * UV_SIZE, y * UV_SIZE, UV_SIZE, UV_SIZE, &rec_uv[UV_SIZE..], BPS);
    }

    /// Writes source macroblock (x, y).
    pub fn set_macroblock(&mut self, x: usize, y: usize, mb: &MacroblockInput) {
        self.planes[0].put(x * MB_SIZE, y * MB_SIZE, MB_SIZE, MB_SIZE, &mb.y, MB_SIZE);
        self.planes[1].put(x * UV_SIZE, y * UV_SIZE, UV_SIZE, UV_SIZE, &mb.u, UV_SIZE);
        self.planes[2].put(x * UV_SIZE, y * UV_SIZE, UV_SIZE, UV_SIZE, &mb.v, UV_SIZE);
    }

    /// Macroblocks in raster order.
    pub fn macroblocks(&self) -> Vec<MacroblockInput> {
        let mut mbs = Vec::with_capacity(self.mb_w * self.mb_h);
        for y in 0..self.mb_h {
            for x in 0..self.mb_w {
                mbs.push(self.macroblock(x, y));
            }
        }
        mbs
    }

    /// Returns a `PixelIter` over (Y, U, V) triples in luma raster order.
    pub fn iter(&self) -> PixelIter<'_> {
        PixelIter::new(&self.planes)
    }
}

#[derive(Debug)]
pub struct PixelIter<'a> {
    planes: &'a [Plane; N_C],
    y: usize,
    x: usize,
}

impl<'a> PixelIter<'a> {
    pub fn new(planes: &'a [Plane; N_C]) -> Self {
        PixelIter { planes, y: 0, x: 0 }
    }

    fn width(&self) -> usize {
        self.planes[0].cfg.width
    }

    fn height(&self) -> usize {
        self.planes[0].cfg.height
    }
}

impl<'a> Iterator for PixelIter<'a> {
    type Item = (pel, pel, pel);

    fn next(&mut self) -> Option<<Self as Iterator>::Item> {
        if self.y >= self.height() || self.width() == 0 {
            return None;
        }
        let pixel = (
            self.planes[0].p(self.x, self.y),
            self.planes[1].p(
                self.x >> self.planes[1].cfg.xdec,
                self.y >> self.planes[1].cfg.ydec,
            ),
            self.planes[2].p(
                self.x >> self.planes[2].cfg.xdec,
                self.y >> self.planes[2].cfg.ydec,
            ),
        );
        if self.x == self.width() - 1 {
            self.x = 0;
            self.y += 1;
        } else {
            self.x += 1;
        }
        Some(pixel)
    }
}
