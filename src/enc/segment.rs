use crate::com::tbl::*;
use crate::com::util::*;
use crate::com::*;

use std::cmp::max;

/* which coefficients a matrix quantizes */
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum MatrixType {
    /* luma AC, and luma DC of 4x4 macroblocks */
    Y1 = 0,
    /* second-order luma DC */
    Y2 = 1,
    UV = 2,
}

/* per-frequency quantization parameters, raster order */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuantMatrix {
    // quantizer step
    pub q: [u16; BLK_DIM],
    // reciprocal, (1 << 17) / q
    pub iq: [u16; BLK_DIM],
    // rounding bias
    pub bias: [u32; BLK_DIM],
    // values at or below are quantized to zero
    pub zthresh: [u32; BLK_DIM],
    // magnitude boost before quantization
    pub sharpen: [u16; BLK_DIM],
}

impl QuantMatrix {
    /// Builds a matrix from its DC and AC steps. Steps below 3 are raised to 3
    /// so the reciprocal fits 16 bits.
    pub fn new(q_dc: u16, q_ac: u16, typ: MatrixType) -> Self {
        let mut mtx = QuantMatrix::default();
        let bias = vp8_tbl_bias[typ as usize];

        for i in 0..BLK_DIM {
            let (q, b) = if i == 0 { (q_dc, bias[0]) } else { (q_ac, bias[1]) };
            let q = max(q, 3) as u32;
            let iq = (1u32 << QFIX) / q;
            mtx.q[i] = q as u16;
            mtx.iq[i] = iq as u16;
            mtx.bias[i] = b << (QFIX - 8);
            mtx.zthresh[i] = ((1 << QFIX) - 1 - mtx.bias[i]) / iq;
            mtx.sharpen[i] = if typ == MatrixType::Y1 {
                ((vp8_tbl_freq_sharpening[i] as u32 * q) >> SHARPEN_BITS) as u16
            } else {
                0
            };
        }

        mtx
    }

    /* rounded average step */
    pub(crate) fn average_q(&self) -> i32 {
        let sum: u32 = self.q.iter().map(|&q| q as u32).sum();
        ((sum + 8) >> 4) as i32
    }
}

/* quantization and tuning parameters shared by all macroblocks of a segment */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SegmentInfo {
    pub y1: QuantMatrix,
    pub y2: QuantMatrix,
    pub uv: QuantMatrix,

    // running maximum dc edge of flat 16x16 macroblocks
    pub max_edge: i32,
    // distortion above which max_edge is tracked
    pub min_disto: i32,

    pub lambda_i16: i32,
    pub lambda_i4: i32,
    pub lambda_uv: i32,
    pub lambda_mode: i32,
    // spectral distortion weight, 0 disables it
    pub tlambda: i32,
}

impl SegmentInfo {
    /// Derives the matrices and lambdas of quantizer index `q` (0..=127).
    /// `sns_strength` (0..=100) scales the spectral distortion weight.
    pub fn from_quant(q: u8, sns_strength: u8) -> Self {
        let q = VP8_CLIP3(0, MAX_QINDEX, q as usize);

        let y1 = QuantMatrix::new(vp8_tbl_dc[q], vp8_tbl_ac[q], MatrixType::Y1);
        let y2 = QuantMatrix::new(vp8_tbl_dc[q] * 2, vp8_tbl_ac2[q], MatrixType::Y2);
        let uv = QuantMatrix::new(
            vp8_tbl_dc[VP8_CLIP3(0, 117, q)],
            vp8_tbl_ac[q],
            MatrixType::UV,
        );

        let q_i4 = y1.average_q();
        let q_i16 = y2.average_q();
        let q_uv = uv.average_q();

        SegmentInfo {
            max_edge: 0,
            min_disto: 20 * y1.q[0] as i32,
            lambda_i16: max(3 * q_i16 * q_i16, 1),
            lambda_i4: max((3 * q_i4 * q_i4) >> 7, 1),
            lambda_uv: max((3 * q_uv * q_uv) >> 6, 1),
            lambda_mode: max((q_i4 * q_i4) >> 7, 1),
            tlambda: (VP8_CLIP3(0, 100, sns_strength as i32) * q_i4) >> 5,
            y1,
            y2,
            uv,
        }
    }
}
