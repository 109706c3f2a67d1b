use super::*;

/* zig-zag scan of a 4x4 block: level index -> raster coefficient index */
#[rustfmt::skip]
pub(crate) const vp8_tbl_zigzag: [usize; BLK_DIM] = [
    0, 1, 4, 8, 5, 2, 3, 6, 9, 12, 13, 10, 7, 11, 14, 15,
];

/* top-left offsets of the 16 luma 4x4 blocks inside a macroblock buffer */
#[rustfmt::skip]
pub(crate) const vp8_tbl_scan: [usize; 16] = [
    0 + 0 * BPS,  4 + 0 * BPS,  8 + 0 * BPS, 12 + 0 * BPS,
    0 + 4 * BPS,  4 + 4 * BPS,  8 + 4 * BPS, 12 + 4 * BPS,
    0 + 8 * BPS,  4 + 8 * BPS,  8 + 8 * BPS, 12 + 8 * BPS,
    0 + 12 * BPS, 4 + 12 * BPS, 8 + 12 * BPS, 12 + 12 * BPS,
];

/* U blocks 0..3 then V blocks 4..7 of the combined 16x8 chroma buffer */
#[rustfmt::skip]
pub(crate) const vp8_tbl_scan_uv: [usize; 8] = [
    0 + 0 * BPS, 4 + 0 * BPS, 0 + 4 * BPS, 4 + 4 * BPS,
    8 + 0 * BPS, 12 + 0 * BPS, 8 + 4 * BPS, 12 + 4 * BPS,
];

/* VP8 dequantization steps indexed by quantizer index */
#[rustfmt::skip]
pub(crate) const vp8_tbl_dc: [u16; MAX_QINDEX + 1] = [
    4, 5, 6, 7, 8, 9, 10, 10, 11, 12, 13, 14, 15, 16, 17, 17,
    18, 19, 20, 20, 21, 21, 22, 22, 23, 23, 24, 25, 25, 26, 27, 28,
    29, 30, 31, 32, 33, 34, 35, 36, 37, 37, 38, 39, 40, 41, 42, 43,
    44, 45, 46, 46, 47, 48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58,
    59, 60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 72, 73, 74,
    75, 76, 76, 77, 78, 79, 80, 81, 82, 83, 84, 85, 86, 87, 88, 89,
    91, 93, 95, 96, 98, 100, 101, 102, 104, 106, 108, 110, 112, 114, 116, 118,
    122, 124, 126, 128, 130, 132, 134, 136, 138, 140, 143, 145, 148, 151, 154, 157,
];

#[rustfmt::skip]
pub(crate) const vp8_tbl_ac: [u16; MAX_QINDEX + 1] = [
    4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
    20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35,
    36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51,
    52, 53, 54, 55, 56, 57, 58, 60, 62, 64, 66, 68, 70, 72, 74, 76,
    78, 80, 82, 84, 86, 88, 90, 92, 94, 96, 98, 100, 102, 104, 106, 108,
    110, 112, 114, 116, 119, 122, 125, 128, 131, 134, 137, 140, 143, 146, 149, 152,
    155, 158, 161, 164, 167, 170, 173, 177, 181, 185, 189, 193, 197, 201, 205, 209,
    213, 217, 221, 225, 229, 234, 239, 245, 249, 254, 259, 264, 269, 274, 279, 284,
];

lazy_static! {
    /* second-order luma AC steps: AC * 155 / 100, at least 8 */
    pub(crate) static ref vp8_tbl_ac2: [u16; MAX_QINDEX + 1] = {
        let mut tbl = [0u16; MAX_QINDEX + 1];
        for (i, v) in tbl.iter_mut().enumerate() {
            *v = std::cmp::max(vp8_tbl_ac[i] as u32 * 155 / 100, 8) as u16;
        }
        tbl
    };
}

/* rounding bias of each matrix kind, [dc, ac], in 1/256 units */
pub(crate) const vp8_tbl_bias: [[u32; 2]; 3] = [[96, 110], [96, 108], [110, 115]];

/* extra magnitude added to luma AC coefficients before quantization */
#[rustfmt::skip]
pub(crate) const vp8_tbl_freq_sharpening: [u16; BLK_DIM] = [
    0, 30, 60, 90,
    30, 60, 90, 90,
    60, 90, 90, 90,
    90, 90, 90, 90,
];
pub(crate) const SHARPEN_BITS: u32 = 11;

/* perceptual weights of the spectral distortion, raster order */
#[rustfmt::skip]
pub(crate) const vp8_tbl_weight_y: [i32; BLK_DIM] = [
    38, 32, 20, 9,
    32, 28, 17, 7,
    20, 17, 10, 4,
    9, 7, 4, 2,
];

/* header bits of each mode, indexed by mode */
pub(crate) const vp8_tbl_fixed_cost_i16: [u16; NUM_PRED_MODES] = [663, 919, 872, 919];
pub(crate) const vp8_tbl_fixed_cost_uv: [u16; NUM_PRED_MODES] = [302, 984, 439, 642];
#[rustfmt::skip]
pub(crate) const vp8_tbl_fixed_cost_i4: [u16; NUM_BMODES] = [
    300, 800, 600, 650, 1000, 1000, 1000, 1000, 1000, 1000,
];
/* base cost of signalling the 4x4 partition */
pub(crate) const I4_BASE_COST: i64 = 211;
