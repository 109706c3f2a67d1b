pub(crate) mod ipred;
pub(crate) mod itdq;
pub(crate) mod tbl;
pub(crate) mod tracer;
pub(crate) mod util;

use std::fmt;

/*****************************************************************************
 * types
 *****************************************************************************/
pub type pel = u8;

/* stride of every macroblock-local pixel buffer */
pub(crate) const BPS: usize = 16;

pub const MB_SIZE: usize = 16;
pub const MB_DIM: usize = MB_SIZE * MB_SIZE;
pub const UV_SIZE: usize = 8;
/* U and V side by side: 16x8 */
pub const UV_DIM: usize = UV_SIZE * BPS;

pub(crate) const BLK_SIZE: usize = 4;
pub(crate) const BLK_DIM: usize = BLK_SIZE * BLK_SIZE;

pub(crate) const NUM_PRED_MODES: usize = 4;
pub(crate) const NUM_BMODES: usize = 10;

pub(crate) const N_UV: usize = 2;
/* planes of a frame: Y, U, V */
pub const N_C: usize = 3;

/* fixed-point precision of quantizer reciprocals */
pub(crate) const QFIX: u32 = 17;
pub(crate) const MAX_LEVEL: i32 = 2047;
pub(crate) const MAX_QINDEX: usize = 127;

/* defaults used when the top or the left neighbor is missing */
pub(crate) const TOP_MISSING: pel = 127;
pub(crate) const LEFT_MISSING: pel = 129;

/* 16x16 luma and 8x8 chroma prediction modes */
#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, ToPrimitive, PartialEq, Eq, Clone, Copy)]
pub enum PredMode {
    DC_PRED = 0,
    TM_PRED = 1,
    V_PRED = 2,
    H_PRED = 3,
}

impl Default for PredMode {
    fn default() -> Self {
        PredMode::DC_PRED
    }
}

impl fmt::Display for PredMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::PredMode::*;
        match *self {
            DC_PRED => write!(f, "DC"),
            TM_PRED => write!(f, "TM"),
            V_PRED => write!(f, "V"),
            H_PRED => write!(f, "H"),
        }
    }
}

impl PredMode {
    pub(crate) const ALL: [PredMode; NUM_PRED_MODES] = [
        PredMode::DC_PRED,
        PredMode::TM_PRED,
        PredMode::V_PRED,
        PredMode::H_PRED,
    ];
}

/* 4x4 luma sub-block prediction modes */
#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, ToPrimitive, PartialEq, Eq, Clone, Copy)]
pub enum IntraBMode {
    B_DC_PRED = 0, /* 4 */
    B_TM_PRED = 1,
    B_VE_PRED = 2,
    B_HE_PRED = 3,
    B_RD_PRED = 4,
    B_VR_PRED = 5,
    B_LD_PRED = 6,
    B_VL_PRED = 7,
    B_HD_PRED = 8,
    B_HU_PRED = 9,
}

impl Default for IntraBMode {
    fn default() -> Self {
        IntraBMode::B_DC_PRED
    }
}

impl fmt::Display for IntraBMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::IntraBMode::*;
        match *self {
            B_DC_PRED => write!(f, "B_DC"),
            B_TM_PRED => write!(f, "B_TM"),
            B_VE_PRED => write!(f, "B_VE"),
            B_HE_PRED => write!(f, "B_HE"),
            B_RD_PRED => write!(f, "B_RD"),
            B_VR_PRED => write!(f, "B_VR"),
            B_LD_PRED => write!(f, "B_LD"),
            B_VL_PRED => write!(f, "B_VL"),
            B_HD_PRED => write!(f, "B_HD"),
            B_HU_PRED => write!(f, "B_HU"),
        }
    }
}

impl IntraBMode {
    pub(crate) const ALL: [IntraBMode; NUM_BMODES] = [
        IntraBMode::B_DC_PRED,
        IntraBMode::B_TM_PRED,
        IntraBMode::B_VE_PRED,
        IntraBMode::B_HE_PRED,
        IntraBMode::B_RD_PRED,
        IntraBMode::B_VR_PRED,
        IntraBMode::B_LD_PRED,
        IntraBMode::B_VL_PRED,
        IntraBMode::B_HD_PRED,
        IntraBMode::B_HU_PRED,
    ];
}
