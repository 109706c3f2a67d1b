use super::util::*;
use super::*;

const kC1: i32 = 20091 + (1 << 16);
const kC2: i32 = 35468;

#[inline]
fn MUL(a: i32, b: i32) -> i32 {
    ((a as i64 * b as i64) >> 16) as i32
}

/* reconstructs one 4x4 block: dst = clip(pred + idct(coef)) */
pub(crate) fn vp8_itrans(
    pred: &[pel],
    s_pred: usize,
    coef: &[i16; BLK_DIM],
    dst: &mut [pel],
    s_dst: usize,
) {
    let mut tmp = [0i32; BLK_DIM];

    /* vertical pass */
    for i in 0..4 {
        let a = coef[i] as i32 + coef[8 + i] as i32;
        let b = coef[i] as i32 - coef[8 + i] as i32;
        let c = MUL(coef[4 + i] as i32, kC2) - MUL(coef[12 + i] as i32, kC1);
        let d = MUL(coef[4 + i] as i32, kC1) + MUL(coef[12 + i] as i32, kC2);
        tmp[i * 4 + 0] = a + d;
        tmp[i * 4 + 1] = b + c;
        tmp[i * 4 + 2] = b - c;
        tmp[i * 4 + 3] = a - d;
    }

    /* horizontal pass */
    for i in 0..4 {
        let dc = tmp[i] + 4;
        let a = dc + tmp[8 + i];
        let b = dc - tmp[8 + i];
        let c = MUL(tmp[4 + i], kC2) - MUL(tmp[12 + i], kC1);
        let d = MUL(tmp[4 + i], kC1) + MUL(tmp[12 + i], kC2);
        let row = [a + d, b + c, b - c, a - d];
        for x in 0..4 {
            dst[i * s_dst + x] = clip_8b(pred[i * s_pred + x] as i32 + (row[x] >> 3));
        }
    }
}

/* inverse second-order transform: writes the DC of each of the 16 luma blocks */
pub(crate) fn vp8_itrans_wht(dc: &[i16; BLK_DIM], out: &mut [[i16; BLK_DIM]; 16]) {
    let mut tmp = [0i32; BLK_DIM];

    for i in 0..4 {
        let a0 = dc[i] as i32 + dc[12 + i] as i32;
        let a1 = dc[4 + i] as i32 + dc[8 + i] as i32;
        let a2 = dc[4 + i] as i32 - dc[8 + i] as i32;
        let a3 = dc[i] as i32 - dc[12 + i] as i32;
        tmp[0 + i] = a0 + a1;
        tmp[8 + i] = a0 - a1;
        tmp[4 + i] = a3 + a2;
        tmp[12 + i] = a3 - a2;
    }

    for i in 0..4 {
        let dc = tmp[i * 4] + 3;
        let a0 = dc + tmp[i * 4 + 3];
        let a1 = tmp[i * 4 + 1] + tmp[i * 4 + 2];
        let a2 = tmp[i * 4 + 1] - tmp[i * 4 + 2];
        let a3 = dc - tmp[i * 4 + 3];
        out[i * 4 + 0][0] = ((a0 + a1) >> 3) as i16;
        out[i * 4 + 1][0] = ((a3 + a2) >> 3) as i16;
        out[i * 4 + 2][0] = ((a0 - a1) >> 3) as i16;
        out[i * 4 + 3][0] = ((a3 - a2) >> 3) as i16;
    }
}

/* reconstructs a 16x16 luma macroblock from its 16 dequantized blocks */
pub(crate) fn vp8_recon_16(
    pred: &[pel; MB_DIM],
    coef: &[[i16; BLK_DIM]; 16],
    rec: &mut [pel; MB_DIM],
) {
    for (n, &off) in tbl::vp8_tbl_scan.iter().enumerate() {
        vp8_itrans(&pred[off..], BPS, &coef[n], &mut rec[off..], BPS);
    }
}

/* reconstructs the combined 16x8 chroma block from its 8 dequantized blocks */
pub(crate) fn vp8_recon_uv(
    pred: &[pel; UV_DIM],
    coef: &[[i16; BLK_DIM]; 8],
    rec: &mut [pel; UV_DIM],
) {
    for (n, &off) in tbl::vp8_tbl_scan_uv.iter().enumerate() {
        vp8_itrans(&pred[off..], BPS, &coef[n], &mut rec[off..], BPS);
    }
}
