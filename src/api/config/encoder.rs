use crate::api::*;

/* VP8 frames are at most 16383 samples on a side */
pub const MAX_MB_DIM: usize = 1024;

/* luma size in samples of a valid macroblock grid */
pub(crate) fn frame_size(mb_w: usize, mb_h: usize) -> Result<(usize, usize), Vp8Error> {
    let invalid = || Vp8Error::InvalidDimensions {
        mb_w: mb_w as i64,
        mb_h: mb_h as i64,
    };
    if mb_w == 0 || mb_h == 0 || mb_w > MAX_MB_DIM || mb_h > MAX_MB_DIM {
        return Err(invalid());
    }
    let w = mb_w.checked_mul(MB_SIZE).ok_or_else(invalid)?;
    let h = mb_h.checked_mul(MB_SIZE).ok_or_else(invalid)?;
    w.checked_mul(h).ok_or_else(invalid)?;
    Ok((w, h))
}

// Encoder settings which impact the produced decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    // frame size
    // Width of the frames in macroblocks.
    pub mb_w: usize,
    // Height of the frames in macroblocks.
    pub mb_h: usize,

    // mode decision
    // Stop the 4x4 search once its running score can no longer beat 16x16.
    pub i4_early_exit: bool,
    // Weight of the spectral distortion when deriving segment parameters, 0..=100.
    pub sns_strength: u8,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            mb_w: 0,
            mb_h: 0,
            i4_early_exit: false,
            sns_strength: 50,
        }
    }
}

impl EncoderConfig {
    pub fn new(mb_w: usize, mb_h: usize) -> Self {
        EncoderConfig {
            mb_w,
            mb_h,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), Vp8Error> {
        frame_size(self.mb_w, self.mb_h).map(|_| ())
    }

    /// Segment parameters of quantizer index `q` under this configuration.
    pub fn segment(&self, q: u8) -> SegmentInfo {
        SegmentInfo::from_quant(q, self.sns_strength)
    }
}
