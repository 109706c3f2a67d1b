use super::segment::*;
use crate::com::tbl::*;
use crate::com::*;

/* chroma dc error diffusion: 7/16 from above, 8/16 from the left */
const C1: i32 = 7;
const C2: i32 = 8;
const DSHIFT: u32 = 4;
/* errors are stored halved */
const DSCALE: u32 = 1;

/* forward 4x4 transform of src - pred */
pub(crate) fn vp8_ftrans(
    src: &[pel],
    s_src: usize,
    pred: &[pel],
    s_pred: usize,
    out: &mut [i16; BLK_DIM],
) {
    let mut tmp = [0i32; BLK_DIM];

    for i in 0..4 {
        let d = |k: usize| src[i * s_src + k] as i32 - pred[i * s_pred + k] as i32;
        let (d0, d1, d2, d3) = (d(0), d(1), d(2), d(3));
        let a0 = d0 + d3;
        let a1 = d1 + d2;
        let a2 = d1 - d2;
        let a3 = d0 - d3;
        tmp[0 + i * 4] = (a0 + a1) * 8;
        tmp[1 + i * 4] = (a2 * 2217 + a3 * 5352 + 1812) >> 9;
        tmp[2 + i * 4] = (a0 - a1) * 8;
        tmp[3 + i * 4] = (a3 * 2217 - a2 * 5352 + 937) >> 9;
    }

    for i in 0..4 {
        let a0 = tmp[0 + i] + tmp[12 + i];
        let a1 = tmp[4 + i] + tmp[8 + i];
        let a2 = tmp[4 + i] - tmp[8 + i];
        let a3 = tmp[0 + i] - tmp[12 + i];
        out[0 + i] = ((a0 + a1 + 7) >> 4) as i16;
        out[4 + i] = (((a2 * 2217 + a3 * 5352 + 12000) >> 16) + (a3 != 0) as i32) as i16;
        out[8 + i] = ((a0 - a1 + 7) >> 4) as i16;
        out[12 + i] = ((a3 * 2217 - a2 * 5352 + 51000) >> 16) as i16;
    }
}

/* forward transform of the 16 block DCs of a luma macroblock, blocks in raster order */
pub(crate) fn vp8_ftrans_wht(coef: &[[i16; BLK_DIM]; 16], out: &mut [i16; BLK_DIM]) {
    let mut tmp = [0i32; BLK_DIM];

    for i in 0..4 {
        let dc = |k: usize| coef[i * 4 + k][0] as i32;
        let a0 = dc(0) + dc(2);
        let a1 = dc(1) + dc(3);
        let a2 = dc(1) - dc(3);
        let a3 = dc(0) - dc(2);
        tmp[0 + i * 4] = a0 + a1;
        tmp[1 + i * 4] = a3 + a2;
        tmp[2 + i * 4] = a3 - a2;
        tmp[3 + i * 4] = a0 - a1;
    }

    for i in 0..4 {
        let a0 = tmp[0 + i] + tmp[8 + i];
        let a1 = tmp[4 + i] + tmp[12 + i];
        let a2 = tmp[4 + i] - tmp[12 + i];
        let a3 = tmp[0 + i] - tmp[8 + i];
        out[0 + i] = ((a0 + a1) >> 1) as i16;
        out[4 + i] = ((a3 + a2) >> 1) as i16;
        out[8 + i] = ((a3 - a2) >> 1) as i16;
        out[12 + i] = ((a0 - a1) >> 1) as i16;
    }
}

#[inline]
fn quant_div(coeff: u32, iq: u16, bias: u32) -> i32 {
    ((coeff as u64 * iq as u64 + bias as u64) >> QFIX) as i32
}

/* quantizes coef in place to its dequantized value, levels come out in zig-zag order */
pub(crate) fn vp8_quantize_block(
    coef: &mut [i16; BLK_DIM],
    levels: &mut [i16; BLK_DIM],
    mtx: &QuantMatrix,
) -> bool {
    let mut nz = false;

    for (n, &j) in vp8_tbl_zigzag.iter().enumerate() {
        let sign = coef[j] < 0;
        let coeff = (coef[j] as i32).abs() as u32 + mtx.sharpen[j] as u32;
        if coeff > mtx.zthresh[j] {
            let mut level = std::cmp::min(quant_div(coeff, mtx.iq[j], mtx.bias[j]), MAX_LEVEL);
            if sign {
                level = -level;
            }
            coef[j] = (level * mtx.q[j] as i32) as i16;
            levels[n] = level as i16;
            nz |= level != 0;
        } else {
            coef[j] = 0;
            levels[n] = 0;
        }
    }

    nz
}

/* quantizes a single dc value in place, returns the halved rounding error */
fn quantize_single(v: &mut i16, mtx: &QuantMatrix) -> i32 {
    let sign = *v < 0;
    let mag = (*v as i32).abs();
    if mag as i64 > mtx.zthresh[0] as i64 {
        let qv = quant_div(mag as u32, mtx.iq[0], mtx.bias[0]) * mtx.q[0] as i32;
        let err = mag - qv;
        *v = (if sign { -qv } else { qv }) as i16;
        (if sign { -err } else { err }) >> DSCALE
    } else {
        *v = 0;
        (if sign { -mag } else { mag }) >> DSCALE
    }
}

// diffuses the dc rounding error of the four 4x4 blocks of each chroma channel
//
//         | top[0] | top[1]
// --------+--------+--------
// left[0] | c[0]   | c[1]
// left[1] | c[2]   | c[3]
//
// derr keeps {err1, err2, err3} of each channel for the next macroblocks.
pub(crate) fn vp8_correct_dc_values(
    top: &[[i8; 2]; N_UV],
    left: &[[i8; 2]; N_UV],
    mtx: &QuantMatrix,
    coef: &mut [[i16; BLK_DIM]; 8],
    derr: &mut [[i8; 3]; N_UV],
) {
    let shift = DSHIFT - DSCALE;
    for ch in 0..N_UV {
        let top = [top[ch][0] as i32, top[ch][1] as i32];
        let left = [left[ch][0] as i32, left[ch][1] as i32];
        let c = &mut coef[ch * 4..ch * 4 + 4];

        c[0][0] = (c[0][0] as i32 + ((C1 * top[0] + C2 * left[0]) >> shift)) as i16;
        let err0 = quantize_single(&mut c[0][0], mtx);
        c[1][0] = (c[1][0] as i32 + ((C1 * top[1] + C2 * err0) >> shift)) as i16;
        let err1 = quantize_single(&mut c[1][0], mtx);
        c[2][0] = (c[2][0] as i32 + ((C1 * err0 + C2 * left[1]) >> shift)) as i16;
        let err2 = quantize_single(&mut c[2][0], mtx);
        c[3][0] = (c[3][0] as i32 + ((C1 * err1 + C2 * err2) >> shift)) as i16;
        let err3 = quantize_single(&mut c[3][0], mtx);

        derr[ch] = [err1 as i8, err2 as i8, err3 as i8];
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::com::itdq::*;
    use pretty_assertions::assert_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    #[test]
    fn zero_residual_reconstructs_to_zero() {
        let blk = [77; BLK_DIM];
        let mut coef = [9; BLK_DIM];
        vp8_ftrans(&blk, 4, &blk, 4, &mut coef);
        /* only the rounding terms survive */
        assert!(coef.iter().all(|&c| c.abs() <= 1));

        let mut rec = [0; BLK_DIM];
        let zero = [0; BLK_DIM];
        vp8_itrans(&zero, 4, &coef, &mut rec, 4);
        assert_eq!(rec, [0; BLK_DIM]);
    }

    #[test]
    fn flat_residual_concentrates_in_dc() {
        let src = [110; BLK_DIM];
        let pred = [100; BLK_DIM];
        let mut coef = [0; BLK_DIM];
        vp8_ftrans(&src, 4, &pred, 4, &mut coef);
        assert_eq!(coef[0], 80);
        assert!(coef[1..].iter().all(|&c| c.abs() <= 1));
    }

    #[test]
    fn wht_round_trip() {
        let mut ra = ChaChaRng::from_seed([0; 32]);
        let mut coef = [[0i16; BLK_DIM]; 16];
        for blk in coef.iter_mut() {
            blk[0] = ra.gen_range(-2040, 2040) & !7;
        }
        let mut dc = [0; BLK_DIM];
        vp8_ftrans_wht(&coef, &mut dc);
        let mut out = [[0i16; BLK_DIM]; 16];
        vp8_itrans_wht(&dc, &mut out);
        for n in 0..16 {
            assert!((out[n][0] - coef[n][0]).abs() <= 1, "{} {}", out[n][0], coef[n][0]);
        }
    }

    #[test]
    fn quantizer_is_monotonic() {
        let mtx = QuantMatrix::new(30, 36, MatrixType::Y2);
        let mut prev = 0;
        for v in 0..4096 {
            let mut coef = [0; BLK_DIM];
            let mut levels = [0; BLK_DIM];
            coef[5] = v as i16;
            vp8_quantize_block(&mut coef, &mut levels, &mtx);
            let level = levels[4].abs();
            assert!(level >= prev, "{} {} {}", v, level, prev);
            prev = level;
        }
    }

    #[test]
    fn quantizer_is_sign_symmetric() {
        let mtx = QuantMatrix::new(12, 20, MatrixType::UV);
        let mut ra = ChaChaRng::from_seed([0; 32]);
        for _ in 0..256 {
            let mut coef = [0i16; BLK_DIM];
            for c in coef.iter_mut() {
                *c = ra.gen_range(0, 2000);
            }
            let mut neg = coef;
            for c in neg.iter_mut() {
                *c = -*c;
            }
            let mut lp = [0; BLK_DIM];
            let mut ln = [0; BLK_DIM];
            vp8_quantize_block(&mut coef, &mut lp, &mtx);
            vp8_quantize_block(&mut neg, &mut ln, &mtx);
            for i in 0..BLK_DIM {
                assert_eq!(lp[i], -ln[i]);
                assert_eq!(coef[i], -neg[i]);
            }
        }
    }

    #[test]
    fn quantizer_reports_non_zero() {
        let mtx = QuantMatrix::new(20, 20, MatrixType::Y2);
        let mut coef = [0; BLK_DIM];
        let mut levels = [0; BLK_DIM];
        coef[0] = 5;
        assert!(!vp8_quantize_block(&mut coef, &mut levels, &mtx));
        assert_eq!(coef[0], 0);

        coef[15] = -400;
        assert!(vp8_quantize_block(&mut coef, &mut levels, &mtx));
        assert_eq!(levels[15], -20);
        assert_eq!(coef[15], -400);
    }

    #[test]
    fn level_is_clamped() {
        let mut mtx = QuantMatrix::new(4, 4, MatrixType::UV);
        mtx.zthresh = [0; BLK_DIM];
        let mut coef = [i16::max_value(); BLK_DIM];
        let mut levels = [0; BLK_DIM];
        vp8_quantize_block(&mut coef, &mut levels, &mtx);
        assert!(levels.iter().all(|&l| l as i32 == MAX_LEVEL));
    }

    #[test]
    fn first_block_diffusion_matches_plain_quantization() {
        let mtx = QuantMatrix::new(24, 28, MatrixType::UV);
        let mut ra = ChaChaRng::from_seed([0; 32]);
        for _ in 0..128 {
            let mut coef = [[0i16; BLK_DIM]; 8];
            for blk in coef.iter_mut() {
                for c in blk.iter_mut() {
                    *c = ra.gen_range(-1000, 1000);
                }
            }
            let mut plain = coef;
            let mut derr = [[0i8; 3]; N_UV];
            vp8_correct_dc_values(&[[0; 2]; N_UV], &[[0; 2]; N_UV], &mtx, &mut coef, &mut derr);

            for ch in 0..N_UV {
                let n = ch * 4;
                let mut lv = [0; BLK_DIM];
                let mut lp = [0; BLK_DIM];
                vp8_quantize_block(&mut coef[n], &mut lv, &mtx);
                vp8_quantize_block(&mut plain[n], &mut lp, &mtx);
                assert_eq!(lv, lp);
                assert_eq!(coef[n], plain[n]);
            }
        }
    }

    #[test]
    fn diffusion_carries_rounding_error() {
        let mtx = QuantMatrix::new(40, 40, MatrixType::UV);
        let mut coef = [[0i16; BLK_DIM]; 8];
        /* 50 quantizes to 40 with an error of 10, stored halved */
        coef[0][0] = 50;
        let mut derr = [[0i8; 3]; N_UV];
        vp8_correct_dc_values(&[[0; 2]; N_UV], &[[0; 2]; N_UV], &mtx, &mut coef, &mut derr);
        assert_eq!(coef[0][0], 40);
        /* block 1 receives (8 * 5) >> 3 and rounds to zero */
        assert_eq!(coef[1][0], 0);
        assert_eq!(derr[0][0], 2);
        assert_eq!(derr[1], [0; 3]);
    }
}
