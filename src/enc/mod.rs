pub(crate) mod boundary;
pub(crate) mod mode;
pub(crate) mod pintra;
pub(crate) mod sad;
pub(crate) mod segment;
pub(crate) mod tq;

use crate::api::*;
use crate::com::ipred::*;
use crate::com::tracer::*;
use crate::com::*;

use boundary::*;
use mode::*;

/*****************************************************************************
 * CORE information used for encoding process.
 *
 * Buffers of the macroblock being decided, all with stride BPS.
 *****************************************************************************/
pub(crate) struct Vp8eCore {
    /* position of the current macroblock */
    x: usize,
    y: usize,

    /* source samples, chroma as U|V */
    src_y: [pel; MB_DIM],
    src_uv: [pel; UV_DIM],
    /* prediction edges */
    nb: Vp8Neighbors,

    /* best 16x16 and 4x4 luma reconstructions */
    rec_i16: [pel; MB_DIM],
    rec_i4: [pel; MB_DIM],
    /* winning reconstruction */
    rec_y: [pel; MB_DIM],
    rec_uv: [pel; UV_DIM],
}

impl Vp8eCore {
    pub(crate) fn new() -> Self {
        Vp8eCore {
            x: 0,
            y: 0,
            src_y: [0; MB_DIM],
            src_uv: [0; UV_DIM],
            nb: Vp8Neighbors::default(),
            rec_i16: [0; MB_DIM],
            rec_i4: [0; MB_DIM],
            rec_y: [0; MB_DIM],
            rec_uv: [0; UV_DIM],
        }
    }

    fn load_src(&mut self, mb: &MacroblockInput) {
        for j in 0..MB_SIZE {
            self.src_y[j * BPS..j * BPS + MB_SIZE]
                .copy_from_slice(&mb.y[j * MB_SIZE..(j + 1) * MB_SIZE]);
        }
        for j in 0..UV_SIZE {
            let row = j * UV_SIZE..(j + 1) * UV_SIZE;
            self.src_uv[j * BPS..j * BPS + UV_SIZE].copy_from_slice(&mb.u[row.clone()]);
            self.src_uv[j * BPS + UV_SIZE..(j + 1) * BPS].copy_from_slice(&mb.v[row]);
        }
    }
}

/******************************************************************************
 * CONTEXT used for encoding process.
 *
 * All have to be stored are in this structure.
 *****************************************************************************/
pub(crate) struct Vp8eCtx {
    cfg: EncoderConfig,

    /* segment as loaded; every frame starts from it */
    sinfo_init: SegmentInfo,
    /* working copy, max_edge grows during the frame */
    sinfo: SegmentInfo,

    /* edges and diffusion errors carried across macroblocks */
    bnd: BoundaryState,
    core: Vp8eCore,

    /* reconstruction of the last frame */
    rec: Frame,
    stat: FrameStats,

    tracer: Option<Tracer>,
}

impl Vp8eCtx {
    pub(crate) fn new(cfg: &EncoderConfig, sinfo: SegmentInfo) -> Result<Self, Vp8Error> {
        let rec = Frame::new(cfg.mb_w, cfg.mb_h)?;
        Ok(Vp8eCtx {
            cfg: *cfg,
            sinfo_init: sinfo,
            sinfo,
            bnd: BoundaryState::new(cfg.mb_w),
            core: Vp8eCore::new(),
            rec,
            stat: FrameStats::default(),
            tracer: OPEN_TRACE(),
        })
    }

    pub(crate) fn cfg(&self) -> &EncoderConfig {
        &self.cfg
    }

    pub(crate) fn segment(&self) -> &SegmentInfo {
        &self.sinfo
    }

    pub(crate) fn set_segment(&mut self, sinfo: SegmentInfo) {
        self.sinfo_init = sinfo;
        self.sinfo = sinfo;
    }

    pub(crate) fn reconstruction(&self) -> &Frame {
        &self.rec
    }

    pub(crate) fn stat(&self) -> FrameStats {
        self.stat
    }

    /* input holds mb_w * mb_h macroblocks in raster order */
    pub(crate) fn encode_frm(&mut self, input: &[MacroblockInput]) -> Vec<MacroblockResult> {
        let (mb_w, mb_h) = (self.cfg.mb_w, self.cfg.mb_h);
        debug!("frame start: {}x{} macroblocks", mb_w, mb_h);

        self.enc_frm_prepare();

        let mut out = Vec::with_capacity(mb_w * mb_h);
        for y in 0..mb_h {
            self.bnd.start_row(y);
            for x in 0..mb_w {
                let res = self.encode_mb(x, y, &input[y * mb_w + x]);
                out.push(res);
            }
        }

        self.stat.max_edge = self.sinfo.max_edge;
        debug!(
            "frame done: {} i16, {} i4, {} skipped, max_edge {}",
            self.stat.mb_i16, self.stat.mb_i4, self.stat.mb_skip, self.stat.max_edge
        );
        out
    }

    fn enc_frm_prepare(&mut self) {
        self.sinfo = self.sinfo_init;
        self.bnd.reset_frame();
        self.stat = FrameStats::default();
    }

    fn encode_mb(&mut self, x: usize, y: usize, mb: &MacroblockInput) -> MacroblockResult {
        self.core.x = x;
        self.core.y = y;
        self.core.load_src(mb);
        self.core.nb = self.bnd.neighbors(x, y);

        let res = self.mode_analyze_mb();

        self.bnd.save(x, &self.core.rec_y, &self.core.rec_uv);
        self.rec.store_macroblock(x, y, &self.core.rec_y, &self.core.rec_uv);

        if res.is_i16 {
            self.stat.mb_i16 += 1;
        } else {
            self.stat.mb_i4 += 1;
        }
        if res.skip {
            self.stat.mb_skip += 1;
        }
        res
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    /* every level is zeroed and every mode but the cheapest is too expensive */
    fn frozen_segment() -> SegmentInfo {
        let mut sinfo = SegmentInfo::from_quant(10, 0);
        for mtx in [&mut sinfo.y1, &mut sinfo.y2, &mut sinfo.uv].iter_mut() {
            mtx.zthresh = [u32::max_value(); BLK_DIM];
        }
        sinfo.lambda_i16 = 1 << 20;
        sinfo.lambda_i4 = 1 << 20;
        sinfo.lambda_uv = 1 << 20;
        sinfo.lambda_mode = 1 << 20;
        sinfo.tlambda = 0;
        sinfo
    }

    #[test]
    fn uniform_frame_settles_on_dc() {
        let cfg = EncoderConfig::new(2, 2);
        let mut ctx = Vp8eCtx::new(&cfg, frozen_segment()).unwrap();
        let mb = MacroblockInput {
            y: [0x63; MB_DIM],
            u: [0x63; UV_SIZE * UV_SIZE],
            v: [0x63; UV_SIZE * UV_SIZE],
        };
        let out = ctx.encode_frm(&[mb; 4]);

        assert_eq!(out.len(), 4);
        for res in out.iter() {
            assert!(res.is_i16);
            assert!(res.skip);
            assert_eq!(res.info.mode_i16, PredMode::DC_PRED);
            assert_eq!(res.info.mode_uv, PredMode::DC_PRED);
            assert_eq!(res.info.nz, 0);
            assert_eq!(res.max_edge, 0);
        }
        /* nothing is coded, so the 128 default propagates everywhere */
        assert!(ctx.reconstruction().iter().all(|p| p == (128, 128, 128)));
        assert_eq!(
            ctx.stat(),
            FrameStats {
                mb_i16: 4,
                mb_i4: 0,
                mb_skip: 4,
                max_edge: 0,
            }
        );
    }

    #[test]
    fn frames_are_independent() {
        let cfg = EncoderConfig::new(3, 2);
        let mut ctx = Vp8eCtx::new(&cfg, SegmentInfo::from_quant(30, 50)).unwrap();
        let mut input = Vec::new();
        for n in 0..6 {
            let mut mb = MacroblockInput::default();
            for (i, v) in mb.y.iter_mut().enumerate() {
                *v = ((i * (n + 3)) % 256) as pel;
            }
            for (i, v) in mb.u.iter_mut().chain(mb.v.iter_mut()).enumerate() {
                *v = ((i * 5 + n * 40) % 256) as pel;
            }
            input.push(mb);
        }

        let first = ctx.encode_frm(&input);
        let rec = ctx.reconstruction().clone();
        let second = ctx.encode_frm(&input);
        assert_eq!(first, second);
        assert_eq!(&rec, ctx.reconstruction());
    }

    #[test]
    fn source_is_loaded_in_work_layout() {
        let mut core = Vp8eCore::new();
        let mut mb = MacroblockInput::default();
        mb.y[17] = 1;
        mb.u[9] = 2;
        mb.v[63] = 3;
        core.load_src(&mb);
        assert_eq!(core.src_y[BPS + 1], 1);
        assert_eq!(core.src_uv[BPS + 1], 2);
        assert_eq!(core.src_uv[7 * BPS + 15], 3);
    }
}
