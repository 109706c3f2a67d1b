use super::*;
use crate::com::*;

/* weight of the distortion against rate * lambda */
pub(crate) const RD_DISTO_MULT: i64 = 256;
pub(crate) const MAX_COST: i64 = i64::max_value() / 2;
/* levels are squared then scaled by this shift to stand in for bits */
const RATE_SHIFT: u32 = 10;

/* non-zero bitmap layout */
pub(crate) const NZ_Y_AC: u32 = 0x0000ffff;
pub(crate) const NZ_UV_SHIFT: u32 = 16;
pub(crate) const NZ_Y_DC: u32 = 1 << 24;

/// Score and levels of one candidate, or of the final choice of a macroblock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeScore {
    // distortion
    pub d: i64,
    // spectral distortion
    pub sd: i64,
    // header bits
    pub h: i64,
    // rate
    pub r: i64,
    pub score: i64,

    // second-order luma dc levels, zig-zag order
    pub y_dc_levels: [i16; BLK_DIM],
    // luma levels per 4x4 block, zig-zag order
    pub y_ac_levels: [[i16; BLK_DIM]; 16],
    // 4 U then 4 V blocks
    pub uv_levels: [[i16; BLK_DIM]; 8],

    pub mode_i16: PredMode,
    pub modes_i4: [IntraBMode; 16],
    pub mode_uv: PredMode,

    // bits 0-15: luma blocks, 16-23: chroma blocks, 24: luma dc
    pub nz: u32,
    // chroma dc diffusion carry
    pub derr: [[i8; 3]; N_UV],
}

impl ModeScore {
    pub(crate) fn init_score(&mut self) {
        self.d = 0;
        self.sd = 0;
        self.r = 0;
        self.h = 0;
        self.nz = 0;
        self.score = MAX_COST;
    }

    pub(crate) fn set_rd_score(&mut self, lambda: i32) {
        self.score = (self.r + self.h) * lambda as i64 + RD_DISTO_MULT * (self.d + self.sd);
    }

    pub(crate) fn add_score(&mut self, src: &ModeScore) {
        self.d += src.d;
        self.sd += src.sd;
        self.h += src.h;
        self.r += src.r;
        self.nz |= src.nz;
        self.score += src.score;
    }

    pub(crate) fn copy_score(&mut self, src: &ModeScore) {
        self.d = src.d;
        self.sd = src.sd;
        self.h = src.h;
        self.r = src.r;
        self.nz = src.nz;
        self.score = src.score;
    }
}

/// Decision emitted for one macroblock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MacroblockResult {
    pub info: ModeScore,
    // 16x16 luma (true) or 4x4 luma (false)
    pub is_i16: bool,
    // no non-zero level anywhere
    pub skip: bool,
    // segment max_edge after this macroblock
    pub max_edge: i32,
}

#[inline]
fn sum_sq(levels: &[i16]) -> i64 {
    levels.iter().map(|&l| l as i64 * l as i64).sum()
}

/* 16x16: ac levels past position 0 plus the second-order dc levels */
pub(crate) fn vp8e_rate_i16(rd: &ModeScore) -> i64 {
    let ac: i64 = rd.y_ac_levels.iter().map(|blk| sum_sq(&blk[1..])).sum();
    (ac + sum_sq(&rd.y_dc_levels)) << RATE_SHIFT
}

pub(crate) fn vp8e_rate_i4(levels: &[i16; BLK_DIM]) -> i64 {
    sum_sq(levels) << RATE_SHIFT
}

pub(crate) fn vp8e_rate_uv(rd: &ModeScore) -> i64 {
    rd.uv_levels.iter().map(|blk| sum_sq(blk)).sum::<i64>() << RATE_SHIFT
}

impl Vp8eCtx {
    /* decides the current macroblock and leaves its reconstruction in core */
    pub(crate) fn mode_analyze_mb(&mut self) -> MacroblockResult {
        let mut rd = ModeScore::default();
        rd.init_score();

        self.pintra_16(&mut rd);
        let is_i16 = !self.pintra_4(&mut rd);
        self.core.rec_y = if is_i16 {
            self.core.rec_i16
        } else {
            self.core.rec_i4
        };
        self.pintra_uv(&mut rd);

        if is_i16 {
            TRACE_COEF(&mut self.tracer, 24, &rd.y_dc_levels);
        }
        for (n, levels) in rd.y_ac_levels.iter().chain(rd.uv_levels.iter()).enumerate() {
            TRACE_COEF(&mut self.tracer, n, levels);
        }
        TRACE_RECO(&mut self.tracer, "y", &self.core.rec_y);
        TRACE_RECO(&mut self.tracer, "uv", &self.core.rec_uv);
        TRACE_MB(
            &mut self.tracer,
            self.core.x,
            self.core.y,
            is_i16,
            rd.nz,
            rd.score,
        );

        MacroblockResult {
            info: rd,
            is_i16,
            skip: rd.nz == 0,
            max_edge: self.sinfo.max_edge,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rd_score_formula() {
        let mut rd = ModeScore::default();
        rd.d = 10;
        rd.sd = 2;
        rd.h = 663;
        rd.r = 1024;
        rd.set_rd_score(5);
        assert_eq!(rd.score, (1024 + 663) * 5 + 256 * 12);
    }

    #[test]
    fn scores_accumulate() {
        let mut total = ModeScore::default();
        total.init_score();
        total.score = 0;
        let mut a = ModeScore::default();
        a.d = 1;
        a.h = 2;
        a.nz = 1 << 3;
        a.score = 7;
        total.add_score(&a);
        total.add_score(&a);
        assert_eq!(total.d, 2);
        assert_eq!(total.h, 4);
        assert_eq!(total.nz, 1 << 3);
        assert_eq!(total.score, 14);
    }

    #[test]
    fn rate_of_levels() {
        let mut rd = ModeScore::default();
        rd.y_dc_levels[0] = 3;
        rd.y_ac_levels[2][5] = -2;
        assert_eq!(vp8e_rate_i16(&rd), (9 + 4) << 10);

        rd.uv_levels[7][15] = 1;
        assert_eq!(vp8e_rate_uv(&rd), 1 << 10);

        let mut levels = [0; BLK_DIM];
        levels[0] = -1;
        levels[1] = 2;
        assert_eq!(vp8e_rate_i4(&levels), 5 << 10);
    }
}
