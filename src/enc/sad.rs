use crate::com::tbl::*;
use crate::com::*;

/* sum of squared differences of a w x h block */
pub(crate) fn vp8e_ssd(
    w: usize,
    h: usize,
    src1: &[pel],
    s_src1: usize,
    src2: &[pel],
    s_src2: usize,
) -> i64 {
    let mut sum = 0i64;
    for j in 0..h {
        for i in 0..w {
            let d = src1[j * s_src1 + i] as i32 - src2[j * s_src2 + i] as i32;
            sum += (d * d) as i64;
        }
    }
    sum
}

pub(crate) fn vp8e_ssd_16x16(src: &[pel; MB_DIM], rec: &[pel; MB_DIM]) -> i64 {
    vp8e_ssd(MB_SIZE, MB_SIZE, src, BPS, rec, BPS)
}

/* both chroma planes of the combined 16x8 layout */
pub(crate) fn vp8e_ssd_16x8(src: &[pel; UV_DIM], rec: &[pel; UV_DIM]) -> i64 {
    vp8e_ssd(BPS, UV_SIZE, src, BPS, rec, BPS)
}

/* weighted sum of the 4x4 hadamard magnitudes */
fn vp8e_ttrans(blk: &[pel], s_blk: usize) -> i32 {
    let mut tmp = [0i32; BLK_DIM];
    let mut sum = 0;

    for i in 0..4 {
        let p = &blk[i * s_blk..];
        let a0 = p[0] as i32 + p[2] as i32;
        let a1 = p[1] as i32 + p[3] as i32;
        let a2 = p[1] as i32 - p[3] as i32;
        let a3 = p[0] as i32 - p[2] as i32;
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
        sum += vp8_tbl_weight_y[0 + i] * (a0 + a1).abs();
        sum += vp8_tbl_weight_y[4 + i] * (a3 + a2).abs();
        sum += vp8_tbl_weight_y[8 + i] * (a3 - a2).abs();
        sum += vp8_tbl_weight_y[12 + i] * (a0 - a1).abs();
    }

    sum
}

/* spectral distortion of one 4x4 block */
pub(crate) fn vp8e_disto_4x4(src1: &[pel], s_src1: usize, src2: &[pel], s_src2: usize) -> i64 {
    let sum1 = vp8e_ttrans(src1, s_src1);
    let sum2 = vp8e_ttrans(src2, s_src2);
    ((sum2 - sum1).abs() >> 5) as i64
}

pub(crate) fn vp8e_disto_16x16(src: &[pel; MB_DIM], rec: &[pel; MB_DIM]) -> i64 {
    vp8_tbl_scan
        .iter()
        .map(|&off| vp8e_disto_4x4(&src[off..], BPS, &rec[off..], BPS))
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    #[test]
    fn ssd_of_identical_blocks_is_zero() {
        let mut ra = ChaChaRng::from_seed([0; 32]);
        let mut blk = [0; MB_DIM];
        for v in blk.iter_mut() {
            *v = ra.gen();
        }
        assert_eq!(vp8e_ssd_16x16(&blk, &blk), 0);
        assert_eq!(vp8e_disto_16x16(&blk, &blk), 0);
    }

    #[test]
    fn ssd_counts_every_sample() {
        let a = [10; UV_DIM];
        let b = [13; UV_DIM];
        assert_eq!(vp8e_ssd_16x8(&a, &b), 9 * UV_DIM as i64);
        assert_eq!(vp8e_ssd(4, 4, &a, BPS, &b, BPS), 9 * 16);
    }

    #[test]
    fn disto_weights_dc() {
        let a = [0; BLK_DIM];
        let b = [1; BLK_DIM];
        /* flat difference only hits the dc weight: 38 * 16 >> 5 */
        assert_eq!(vp8e_disto_4x4(&a, 4, &b, 4), 19);
    }
}
