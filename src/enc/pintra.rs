use super::*;
use crate::com::itdq::*;
use crate::com::tbl::*;

use super::sad::*;
use super::tq::*;

use std::cmp::max;

#[inline(always)]
fn MULT_8B(a: i32, b: i64) -> i64 {
    (a as i64 * b + 128) >> 8
}

/*****************************************************************************
 * candidate reconstruction
 *****************************************************************************/
/* transforms, quantizes and rebuilds one 16x16 candidate; returns its nz bits */
fn recon_intra16(
    src: &[pel; MB_DIM],
    pred: &[pel; MB_DIM],
    sinfo: &SegmentInfo,
    rd: &mut ModeScore,
    rec: &mut [pel; MB_DIM],
) -> u32 {
    let mut tmp = [[0i16; BLK_DIM]; 16];
    let mut dc_tmp = [0i16; BLK_DIM];
    let mut nz = 0;

    for (n, &off) in vp8_tbl_scan.iter().enumerate() {
        vp8_ftrans(&src[off..], BPS, &pred[off..], BPS, &mut tmp[n]);
    }
    vp8_ftrans_wht(&tmp, &mut dc_tmp);
    if vp8_quantize_block(&mut dc_tmp, &mut rd.y_dc_levels, &sinfo.y2) {
        nz |= NZ_Y_DC;
    }

    for n in 0..16 {
        /* dc goes through the second-order transform */
        tmp[n][0] = 0;
        if vp8_quantize_block(&mut tmp[n], &mut rd.y_ac_levels[n], &sinfo.y1) {
            nz |= 1 << n;
        }
    }

    vp8_itrans_wht(&dc_tmp, &mut tmp);
    vp8_recon_16(pred, &tmp, rec);
    nz
}

/* same for both chroma planes, with dc error diffusion */
fn recon_uv(
    src: &[pel; UV_DIM],
    pred: &[pel; UV_DIM],
    sinfo: &SegmentInfo,
    diffusion: &([[i8; 2]; N_UV], [[i8; 2]; N_UV]),
    rd: &mut ModeScore,
    rec: &mut [pel; UV_DIM],
) -> u32 {
    let mut tmp = [[0i16; BLK_DIM]; 8];
    let mut nz = 0;

    for (n, &off) in vp8_tbl_scan_uv.iter().enumerate() {
        vp8_ftrans(&src[off..], BPS, &pred[off..], BPS, &mut tmp[n]);
    }
    vp8_correct_dc_values(&diffusion.0, &diffusion.1, &sinfo.uv, &mut tmp, &mut rd.derr);

    for n in 0..8 {
        if vp8_quantize_block(&mut tmp[n], &mut rd.uv_levels[n], &sinfo.uv) {
            nz |= 1 << n;
        }
    }

    vp8_recon_uv(pred, &tmp, rec);
    nz << NZ_UV_SHIFT
}

/* flat 16x16 macroblock: only the second-order dc carries levels */
pub(crate) fn is_dc_only(nz: u32) -> bool {
    nz & (NZ_Y_AC | NZ_Y_DC) == NZ_Y_DC
}

pub(crate) fn store_max_delta(sinfo: &mut SegmentInfo, dc_levels: &[i16; BLK_DIM]) {
    /* first horizontal, vertical and diagonal terms in zig-zag order */
    let v0 = (dc_levels[1] as i32).abs();
    let v1 = (dc_levels[2] as i32).abs();
    let v2 = (dc_levels[4] as i32).abs();
    let max_v = max(v0, max(v1, v2));
    if max_v > sinfo.max_edge {
        sinfo.max_edge = max_v;
    }
}

/*****************************************************************************
 * mode searches
 *****************************************************************************/
impl Vp8eCtx {
    /* fills rd with the best 16x16 mode, rescored with lambda_mode */
    pub(crate) fn pintra_16(&mut self, rd: &mut ModeScore) {
        let lambda = self.sinfo.lambda_i16;
        let tlambda = self.sinfo.tlambda;
        let mut pred = [0; MB_DIM];
        let mut rec = [0; MB_DIM];
        let mut rd_cur = ModeScore::default();

        for (i, &mode) in PredMode::ALL.iter().enumerate() {
            vp8_ipred_16(&mut pred, mode, &self.core.nb);
            TRACE_PRED(&mut self.tracer, mode, &pred);

            rd_cur.mode_i16 = mode;
            rd_cur.nz = recon_intra16(&self.core.src_y, &pred, &self.sinfo, &mut rd_cur, &mut rec);

            rd_cur.d = vp8e_ssd_16x16(&self.core.src_y, &rec);
            rd_cur.sd = if tlambda != 0 {
                MULT_8B(tlambda, vp8e_disto_16x16(&self.core.src_y, &rec))
            } else {
                0
            };
            rd_cur.h = vp8_tbl_fixed_cost_i16[mode as usize] as i64;
            rd_cur.r = vp8e_rate_i16(&rd_cur);
            rd_cur.set_rd_score(lambda);

            if i == 0 || rd_cur.score < rd.score {
                *rd = rd_cur;
                self.core.rec_i16 = rec;
            }
        }

        rd.set_rd_score(self.sinfo.lambda_mode);

        if is_dc_only(rd.nz) && rd.d > self.sinfo.min_disto as i64 {
            store_max_delta(&mut self.sinfo, &rd.y_dc_levels);
        }
    }

    /* tries 4x4 against the 16x16 result in rd; true if 4x4 wins and rd was replaced */
    pub(crate) fn pintra_4(&mut self, rd: &mut ModeScore) -> bool {
        let lambda = self.sinfo.lambda_i4;
        let tlambda = self.sinfo.tlambda;
        let mut rd_best = ModeScore::default();
        let mut bnd4 = I4Boundary::new(&self.core.nb);
        let mut pred = [0; BLK_DIM];
        let mut rec = [0; BLK_DIM];

        rd_best.init_score();
        rd_best.h = I4_BASE_COST;
        rd_best.set_rd_score(self.sinfo.lambda_mode);

        for i4 in 0..16 {
            let off = vp8_tbl_scan[i4];
            let src = &self.core.src_y[off..];
            let edge = bnd4.edge();
            let mut rd_i4 = ModeScore::default();
            let mut rd_tmp = ModeScore::default();
            let mut levels = [0i16; BLK_DIM];
            let mut best_levels = [0i16; BLK_DIM];
            let mut best_rec = [0; BLK_DIM];
            let mut best_mode = IntraBMode::default();
            rd_i4.init_score();

            for (m, &mode) in IntraBMode::ALL.iter().enumerate() {
                let mut coef = [0i16; BLK_DIM];
                vp8_ipred_4(&mut pred, mode, &edge);
                vp8_ftrans(src, BPS, &pred, BLK_SIZE, &mut coef);
                let nz = vp8_quantize_block(&mut coef, &mut levels, &self.sinfo.y1);
                vp8_itrans(&pred, BLK_SIZE, &coef, &mut rec, BLK_SIZE);

                rd_tmp.nz = (nz as u32) << i4;
                rd_tmp.d = vp8e_ssd(BLK_SIZE, BLK_SIZE, src, BPS, &rec, BLK_SIZE);
                rd_tmp.sd = if tlambda != 0 {
                    MULT_8B(tlambda, vp8e_disto_4x4(src, BPS, &rec, BLK_SIZE))
                } else {
                    0
                };
                rd_tmp.h = vp8_tbl_fixed_cost_i4[mode as usize] as i64;
                rd_tmp.r = vp8e_rate_i4(&levels);
                rd_tmp.set_rd_score(lambda);

                if m == 0 || rd_tmp.score < rd_i4.score {
                    rd_i4.copy_score(&rd_tmp);
                    best_mode = mode;
                    best_levels = levels;
                    best_rec = rec;
                }
            }

            TRACE_PRED(&mut self.tracer, best_mode, &best_rec);
            rd_i4.set_rd_score(self.sinfo.lambda_mode);
            rd_best.add_score(&rd_i4);
            if self.cfg.i4_early_exit && rd_best.score >= rd.score {
                return false;
            }

            rd_best.modes_i4[i4] = best_mode;
            rd_best.y_ac_levels[i4] = best_levels;
            for j in 0..BLK_SIZE {
                self.core.rec_i4[off + j * BPS..off + j * BPS + BLK_SIZE]
                    .copy_from_slice(&best_rec[j * BLK_SIZE..(j + 1) * BLK_SIZE]);
            }
            bnd4.rotate(&self.core.rec_i4[off..]);
        }

        if rd_best.score >= rd.score {
            return false;
        }

        rd.copy_score(&rd_best);
        rd.modes_i4 = rd_best.modes_i4;
        rd.y_ac_levels = rd_best.y_ac_levels;
        rd.y_dc_levels = [0; BLK_DIM];
        true
    }

    /* adds the best chroma mode to rd and carries its diffusion errors */
    pub(crate) fn pintra_uv(&mut self, rd: &mut ModeScore) {
        let lambda = self.sinfo.lambda_uv;
        let diffusion = self.bnd.diffusion(self.core.x);
        let mut pred = [0; UV_DIM];
        let mut rec = [0; UV_DIM];
        let mut rd_best = ModeScore::default();
        let mut rd_uv = ModeScore::default();
        rd_best.init_score();

        for (i, &mode) in PredMode::ALL.iter().enumerate() {
            vp8_ipred_uv(&mut pred, mode, &self.core.nb);
            TRACE_PRED(&mut self.tracer, mode, &pred);

            rd_uv.nz = recon_uv(
                &self.core.src_uv,
                &pred,
                &self.sinfo,
                &diffusion,
                &mut rd_uv,
                &mut rec,
            );
            rd_uv.d = vp8e_ssd_16x8(&self.core.src_uv, &rec);
            rd_uv.sd = 0;
            rd_uv.h = vp8_tbl_fixed_cost_uv[mode as usize] as i64;
            rd_uv.r = vp8e_rate_uv(&rd_uv);
            rd_uv.set_rd_score(lambda);

            if i == 0 || rd_uv.score < rd_best.score {
                rd_best.copy_score(&rd_uv);
                rd.mode_uv = mode;
                rd.uv_levels = rd_uv.uv_levels;
                rd.derr = rd_uv.derr;
                self.core.rec_uv = rec;
            }
        }

        rd.add_score(&rd_best);
        self.bnd.store_diffusion(self.core.x, &rd.derr);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx_with(sinfo: SegmentInfo, mb: &MacroblockInput) -> Vp8eCtx {
        let mut ctx = Vp8eCtx::new(&EncoderConfig::new(1, 1), sinfo).unwrap();
        ctx.core.load_src(mb);
        ctx.core.nb = ctx.bnd.neighbors(0, 0);
        ctx
    }

    fn flat_mb(v: pel) -> MacroblockInput {
        MacroblockInput {
            y: [v; MB_DIM],
            u: [v; UV_BLK_DIM],
            v: [v; UV_BLK_DIM],
        }
    }

    #[test]
    fn flat_128_is_lossless_dc() {
        let mut ctx = ctx_with(SegmentInfo::from_quant(40, 50), &flat_mb(128));
        let mut rd = ModeScore::default();
        ctx.pintra_16(&mut rd);
        assert_eq!(rd.mode_i16, PredMode::DC_PRED);
        assert_eq!(rd.nz, 0);
        assert_eq!(rd.d, 0);
        assert_eq!(ctx.core.rec_i16, [128; MB_DIM]);
        assert!(!ctx.pintra_4(&mut rd));

        ctx.pintra_uv(&mut rd);
        assert_eq!(rd.mode_uv, PredMode::DC_PRED);
        assert_eq!(rd.nz, 0);
        assert_eq!(ctx.core.rec_uv, [128; UV_DIM]);
        assert_eq!(rd.derr, [[0; 3]; N_UV]);
    }

    #[test]
    fn i16_ties_keep_the_first_mode() {
        /* with every neighbor at 128 all four predictions coincide */
        let mut ctx = ctx_with(SegmentInfo::from_quant(40, 0), &flat_mb(128));
        ctx.core.nb.y_top = [128; MB_SIZE + 4];
        ctx.core.nb.y_left = [128; MB_SIZE];
        ctx.core.nb.y_top_left = 128;
        ctx.core.nb.has_left = true;
        ctx.core.nb.has_top = true;
        ctx.sinfo.lambda_i16 = 0;
        let mut rd = ModeScore::default();
        ctx.pintra_16(&mut rd);
        assert_eq!(rd.mode_i16, PredMode::DC_PRED);
    }

    #[test]
    fn header_cost_breaks_equal_distortion() {
        let mut ctx = ctx_with(SegmentInfo::from_quant(40, 0), &flat_mb(128));
        ctx.core.nb.y_top = [128; MB_SIZE + 4];
        ctx.core.nb.y_left = [128; MB_SIZE];
        ctx.core.nb.y_top_left = 128;
        ctx.core.nb.has_left = true;
        ctx.core.nb.has_top = true;
        let mut rd = ModeScore::default();
        ctx.pintra_16(&mut rd);
        /* DC carries the lowest fixed cost of the four */
        assert_eq!(rd.mode_i16, PredMode::DC_PRED);
        assert_eq!(rd.h, 663);
        assert_eq!(rd.score, 663 * ctx.sinfo.lambda_mode as i64);
    }

    /* no level survives quantization, so every reconstruction equals its prediction */
    fn frozen_segment() -> SegmentInfo {
        let mut sinfo = SegmentInfo::from_quant(10, 0);
        for mtx in [&mut sinfo.y1, &mut sinfo.y2, &mut sinfo.uv].iter_mut() {
            mtx.zthresh = [u32::max_value(); BLK_DIM];
        }
        sinfo
    }

    #[test]
    fn exact_sub_block_predictions_pick_i4() {
        /* a 200 stripe on the left four columns, 50 elsewhere */
        let mut mb = flat_mb(50);
        for j in 0..MB_SIZE {
            for i in 0..4 {
                mb.y[j * MB_SIZE + i] = 200;
            }
        }
        let mut sinfo = frozen_segment();
        sinfo.lambda_i4 = 0;
        sinfo.lambda_mode = 0;
        let mut ctx = ctx_with(sinfo, &mb);
        ctx.core.nb.y_top = [50; MB_SIZE + 4];
        ctx.core.nb.y_left = [200; MB_SIZE];
        ctx.core.nb.y_top_left = 50;
        ctx.core.nb.has_left = true;
        ctx.core.nb.has_top = true;

        let mut rd = ModeScore::default();
        ctx.pintra_16(&mut rd);
        /* DC (125) and V (50) miss by the same amount, DC is cheaper */
        assert_eq!(rd.mode_i16, PredMode::DC_PRED);
        assert_eq!(rd.d, 64 * 150 * 150);

        assert!(ctx.pintra_4(&mut rd));
        assert_eq!(rd.d, 0);
        assert_eq!(rd.score, 0);
        assert_eq!(rd.modes_i4[0], IntraBMode::B_TM_PRED);
        assert_eq!(rd.modes_i4[1], IntraBMode::B_VE_PRED);
        assert_eq!(rd.y_dc_levels, [0; BLK_DIM]);
        for j in 0..MB_SIZE {
            assert_eq!(
                &ctx.core.rec_i4[j * BPS..(j + 1) * BPS],
                &mb.y[j * MB_SIZE..(j + 1) * MB_SIZE]
            );
        }
    }

    #[test]
    fn early_exit_never_picks_a_worse_i4() {
        let mut mb = flat_mb(128);
        for (i, v) in mb.y.iter_mut().enumerate() {
            *v = (i * 7 % 251) as pel;
        }
        let sinfo = SegmentInfo::from_quant(60, 50);

        let mut full = ctx_with(sinfo, &mb);
        let mut rd_full = ModeScore::default();
        full.pintra_16(&mut rd_full);
        let full_i4 = full.pintra_4(&mut rd_full);

        let mut fast = ctx_with(sinfo, &mb);
        fast.cfg.i4_early_exit = true;
        let mut rd_fast = ModeScore::default();
        fast.pintra_16(&mut rd_fast);
        let fast_i4 = fast.pintra_4(&mut rd_fast);

        /* the running total only grows, so both agree on the winner */
        assert_eq!(full_i4, fast_i4);
        assert_eq!(rd_full.score, rd_fast.score);
    }

    #[test]
    fn max_edge_tracks_dc_only_macroblocks() {
        let mut sinfo = SegmentInfo::default();
        let mut levels = [0i16; BLK_DIM];
        levels[1] = -5;
        levels[2] = 3;
        levels[4] = 4;
        levels[3] = 100;
        store_max_delta(&mut sinfo, &levels);
        assert_eq!(sinfo.max_edge, 5);
        levels[1] = 2;
        store_max_delta(&mut sinfo, &levels);
        assert_eq!(sinfo.max_edge, 5);

        assert!(is_dc_only(NZ_Y_DC));
        assert!(is_dc_only(NZ_Y_DC | (1 << NZ_UV_SHIFT)));
        assert!(!is_dc_only(NZ_Y_DC | 1));
        assert!(!is_dc_only(0));
    }

    /* left half 168, right half 88: every 4x4 residual is flat */
    fn split_mb() -> MacroblockInput {
        let mut mb = flat_mb(128);
        for (i, v) in mb.y.iter_mut().enumerate() {
            *v = if i % MB_SIZE < 8 { 168 } else { 88 };
        }
        mb
    }

    #[test]
    fn i16_search_records_edges_of_distorted_dc_only_blocks() {
        let mut sinfo = SegmentInfo::from_quant(40, 0);
        sinfo.min_disto = -1;
        let mut ctx = ctx_with(sinfo, &split_mb());
        let mut rd = ModeScore::default();
        ctx.pintra_16(&mut rd);

        assert!(is_dc_only(rd.nz));
        assert_ne!(rd.y_dc_levels[1], 0);
        let l = &rd.y_dc_levels;
        let expected = max((l[1] as i32).abs(), max((l[2] as i32).abs(), (l[4] as i32).abs()));
        assert!(expected > 0);
        assert_eq!(ctx.sinfo.max_edge, expected);
    }

    #[test]
    fn i16_search_skips_edges_below_min_disto() {
        let mut sinfo = SegmentInfo::from_quant(40, 0);
        sinfo.min_disto = i32::max_value();
        let mut ctx = ctx_with(sinfo, &split_mb());
        let mut rd = ModeScore::default();
        ctx.pintra_16(&mut rd);

        assert!(is_dc_only(rd.nz));
        assert_eq!(ctx.sinfo.max_edge, 0);
    }

    #[test]
    fn i16_search_skips_edges_with_ac_levels() {
        let mut mb = flat_mb(128);
        for (i, v) in mb.y.iter_mut().enumerate() {
            *v = (i * 7 % 251) as pel;
        }
        let mut sinfo = SegmentInfo::from_quant(0, 0);
        sinfo.min_disto = -1;
        let mut ctx = ctx_with(sinfo, &mb);
        let mut rd = ModeScore::default();
        ctx.pintra_16(&mut rd);

        assert!(!is_dc_only(rd.nz));
        assert_eq!(ctx.sinfo.max_edge, 0);
    }
}
