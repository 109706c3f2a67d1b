use std::convert::TryFrom;
use std::ops::Range;

use thiserror::Error;

pub mod config;
pub mod frame;
pub mod record;

pub use crate::com::{pel, IntraBMode, PredMode, MB_DIM, MB_SIZE, N_C, UV_DIM, UV_SIZE};
pub use crate::enc::mode::{MacroblockResult, ModeScore};
pub use crate::enc::segment::{MatrixType, QuantMatrix, SegmentInfo};
pub use config::*;
pub use frame::*;
pub use record::*;

use crate::enc::*;

/*****************************************************************************
 * return values and error code
 *****************************************************************************/
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Vp8Error {
    #[error("invalid macroblock grid {mb_w}x{mb_h}")]
    InvalidDimensions { mb_w: i64, mb_h: i64 },
    #[error("{what} at {addr:#x} (+{len} bytes) is outside the memory image")]
    OutOfBounds {
        what: &'static str,
        addr: u64,
        len: usize,
    },
    #[error("{what} at {addr:#x} is not aligned to {} bytes", RECORD_ALIGN)]
    Misaligned { what: &'static str, addr: u64 },
    #[error("{what} needs {expected} bytes, got {actual}")]
    BufferTooSmall {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid {0} in record")]
    InvalidRecord(&'static str),
}

/*****************************************************************************
 * status after encoding a frame
 *****************************************************************************/
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /* macroblocks coded with one 16x16 luma prediction */
    pub mb_i16: usize,
    /* macroblocks coded with 4x4 luma predictions */
    pub mb_i4: usize,
    /* macroblocks without any non-zero level */
    pub mb_skip: usize,
    /* segment max_edge after the last macroblock */
    pub max_edge: i32,
}

/* byte range of a record inside the memory image */
fn record_range(
    what: &'static str,
    addr: u64,
    len: usize,
    mem_len: usize,
) -> Result<Range<usize>, Vp8Error> {
    if addr % RECORD_ALIGN as u64 != 0 {
        return Err(Vp8Error::Misaligned { what, addr });
    }
    let start = usize::try_from(addr).ok();
    match start.and_then(|s| s.checked_add(len).map(|e| s..e)) {
        Some(range) if range.end <= mem_len => Ok(range),
        _ => Err(Vp8Error::OutOfBounds { what, addr, len }),
    }
}

/// Intra mode decision and reconstruction for a fixed macroblock grid.
pub struct Encoder {
    vp8e_ctx: Vp8eCtx,
}

impl Encoder {
    pub fn new(cfg: &EncoderConfig, segment: SegmentInfo) -> Result<Self, Vp8Error> {
        cfg.validate()?;
        Ok(Encoder {
            vp8e_ctx: Vp8eCtx::new(cfg, segment)?,
        })
    }

    pub fn config(&self) -> &EncoderConfig {
        self.vp8e_ctx.cfg()
    }

    /// Segment state after the last frame; `max_edge` reflects that frame.
    pub fn segment(&self) -> &SegmentInfo {
        self.vp8e_ctx.segment()
    }

    /// Replaces the segment used from the next frame on.
    pub fn set_segment(&mut self, segment: SegmentInfo) {
        self.vp8e_ctx.set_segment(segment)
    }

    /// Reconstruction of the last frame.
    pub fn reconstruction(&self) -> &Frame {
        self.vp8e_ctx.reconstruction()
    }

    pub fn stats(&self) -> FrameStats {
        self.vp8e_ctx.stat()
    }

    /// Decides every macroblock of one frame. `input` is in raster order.
    pub fn encode_frame(
        &mut self,
        input: &[MacroblockInput],
    ) -> Result<Vec<MacroblockResult>, Vp8Error> {
        let cfg = self.vp8e_ctx.cfg();
        let num_mbs = cfg.mb_w * cfg.mb_h;
        if input.len() < num_mbs {
            return Err(Vp8Error::BufferTooSmall {
                what: "macroblock inputs",
                expected: num_mbs,
                actual: input.len(),
            });
        }
        Ok(self.vp8e_ctx.encode_frm(&input[..num_mbs]))
    }

    /// Same as `encode_frame`, reading the macroblocks out of a source frame.
    pub fn encode(&mut self, frm: &Frame) -> Result<Vec<MacroblockResult>, Vp8Error> {
        let cfg = self.vp8e_ctx.cfg();
        if frm.mb_w != cfg.mb_w || frm.mb_h != cfg.mb_h {
            return Err(Vp8Error::InvalidDimensions {
                mb_w: frm.mb_w as i64,
                mb_h: frm.mb_h as i64,
            });
        }
        self.encode_frame(&frm.macroblocks())
    }

    /// Runs one job over a host memory image with the default settings.
    pub fn run_job(mem: &mut [u8], job: &JobDescriptor) -> Result<FrameStats, Vp8Error> {
        Self::run_job_with(&EncoderConfig::default(), mem, job)
    }

    /// Runs one job over a host memory image: reads the segment record and the
    /// input records, writes one output record per macroblock. The grid comes
    /// from the descriptor, the remaining settings from `cfg`.
    pub fn run_job_with(
        cfg: &EncoderConfig,
        mem: &mut [u8],
        job: &JobDescriptor,
    ) -> Result<FrameStats, Vp8Error> {
        let ranges = Self::check_job(job, mem.len()).map_err(|err| {
            error!("job rejected: {}", err);
            err
        })?;
        let (seg_range, in_range, out_range) = ranges;

        let segment = SegmentInfo::from_bytes(&mem[seg_range])?;
        let input = mem[in_range]
            .chunks_exact(MB_INPUT_RECORD_SIZE)
            .map(MacroblockInput::from_bytes)
            .collect::<Result<Vec<_>, _>>()?;

        let cfg = EncoderConfig {
            mb_w: job.mb_w as usize,
            mb_h: job.mb_h as usize,
            ..*cfg
        };
        let mut enc = Encoder::new(&cfg, segment)?;
        let out = enc.encode_frame(&input)?;

        for (res, dst) in out
            .iter()
            .zip(mem[out_range].chunks_exact_mut(MB_OUTPUT_RECORD_SIZE))
        {
            dst.copy_from_slice(&res.to_bytes());
        }
        Ok(enc.stats())
    }

    fn check_job(
        job: &JobDescriptor,
        mem_len: usize,
    ) -> Result<(Range<usize>, Range<usize>, Range<usize>), Vp8Error> {
        let num_mbs = job.num_mbs();
        if num_mbs == 0 {
            return Err(Vp8Error::InvalidDimensions {
                mb_w: job.mb_w as i64,
                mb_h: job.mb_h as i64,
            });
        }
        let too_big = |what: &'static str| Vp8Error::OutOfBounds {
            what,
            addr: 0,
            len: usize::max_value(),
        };
        let in_len = num_mbs
            .checked_mul(MB_INPUT_RECORD_SIZE)
            .ok_or_else(|| too_big("macroblock inputs"))?;
        let out_len = num_mbs
            .checked_mul(MB_OUTPUT_RECORD_SIZE)
            .ok_or_else(|| too_big("macroblock outputs"))?;

        Ok((
            record_range("segment record", job.segment_addr, SEGMENT_RECORD_SIZE, mem_len)?,
            record_range("macroblock inputs", job.input_addr, in_len, mem_len)?,
            record_range("macroblock outputs", job.output_addr, out_len, mem_len)?,
        ))
    }
}
