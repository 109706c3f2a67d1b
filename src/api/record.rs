use super::*;
use crate::com::*;

use num_traits::FromPrimitive;

/*****************************************************************************
 * packed little-endian records exchanged with the host
 *
 * every record is a whole number of 64-byte memory words, fields packed
 * tightly in declaration order and the tail zero-filled
 *****************************************************************************/
pub const RECORD_ALIGN: usize = 64;

/* 12 words, 700 bytes used */
pub const SEGMENT_RECORD_SIZE: usize = 12 * RECORD_ALIGN;
/* 14 words, 840 bytes used */
pub const MB_OUTPUT_RECORD_SIZE: usize = 14 * RECORD_ALIGN;
/* 6 words, all used */
pub const MB_INPUT_RECORD_SIZE: usize = 6 * RECORD_ALIGN;
pub const JOB_DESCRIPTOR_SIZE: usize = 32;

pub const UV_BLK_DIM: usize = UV_SIZE * UV_SIZE;

fn check_len(what: &'static str, buf: &[u8], expected: usize) -> Result<(), Vp8Error> {
    if buf.len() < expected {
        return Err(Vp8Error::BufferTooSmall {
            what,
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

/* sequential field writer; the caller sizes buf for the whole record */
struct RecordWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> RecordWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        RecordWriter { buf, pos: 0 }
    }

    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    fn u8(&mut self, v: u8) {
        self.put(&[v]);
    }

    fn i8(&mut self, v: i8) {
        self.put(&v.to_le_bytes());
    }

    fn u16(&mut self, v: u16) {
        self.put(&v.to_le_bytes());
    }

    fn i16(&mut self, v: i16) {
        self.put(&v.to_le_bytes());
    }

    fn u32(&mut self, v: u32) {
        self.put(&v.to_le_bytes());
    }

    fn i32(&mut self, v: i32) {
        self.put(&v.to_le_bytes());
    }

    fn u64(&mut self, v: u64) {
        self.put(&v.to_le_bytes());
    }
}

/* sequential field reader; the caller checks the length up front */
struct RecordReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        RecordReader { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut bytes = [0; N];
        bytes.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        bytes
    }

    fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    fn i8(&mut self) -> i8 {
        i8::from_le_bytes(self.take())
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn i16(&mut self) -> i16 {
        i16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }

    fn u64(&mut self) -> u64 {
        u64::from_le_bytes(self.take())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
fn put_matrix(w: &mut RecordWriter, mtx: &QuantMatrix) {
    mtx.q.iter().for_each(|&v| w.u16(v));
    mtx.iq.iter().for_each(|&v| w.u16(v));
    mtx.bias.iter().for_each(|&v| w.u32(v));
    mtx.zthresh.iter().for_each(|&v| w.u32(v));
    mtx.sharpen.iter().for_each(|&v| w.u16(v));
}

fn get_matrix(r: &mut RecordReader) -> QuantMatrix {
    let mut mtx = QuantMatrix::default();
    mtx.q.iter_mut().for_each(|v| *v = r.u16());
    mtx.iq.iter_mut().for_each(|v| *v = r.u16());
    mtx.bias.iter_mut().for_each(|v| *v = r.u32());
    mtx.zthresh.iter_mut().for_each(|v| *v = r.u32());
    mtx.sharpen.iter_mut().for_each(|v| *v = r.u16());
    mtx
}

impl SegmentInfo {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0; SEGMENT_RECORD_SIZE];
        let mut w = RecordWriter::new(&mut buf);
        put_matrix(&mut w, &self.y1);
        put_matrix(&mut w, &self.y2);
        put_matrix(&mut w, &self.uv);
        for &v in [
            self.max_edge,
            self.min_disto,
            self.lambda_i16,
            self.lambda_i4,
            self.lambda_uv,
            self.lambda_mode,
            self.tlambda,
        ]
        .iter()
        {
            w.i32(v);
        }
        buf
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, Vp8Error> {
        check_len("segment record", buf, SEGMENT_RECORD_SIZE)?;
        let mut r = RecordReader::new(buf);
        let y1 = get_matrix(&mut r);
        let y2 = get_matrix(&mut r);
        let uv = get_matrix(&mut r);
        Ok(SegmentInfo {
            y1,
            y2,
            uv,
            max_edge: r.i32(),
            min_disto: r.i32(),
            lambda_i16: r.i32(),
            lambda_i4: r.i32(),
            lambda_uv: r.i32(),
            lambda_mode: r.i32(),
            tlambda: r.i32(),
        })
    }
}

impl MacroblockResult {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0; MB_OUTPUT_RECORD_SIZE];
        let mut w = RecordWriter::new(&mut buf);
        let info = &self.info;
        info.y_dc_levels.iter().for_each(|&v| w.i16(v));
        for blk in info.y_ac_levels.iter().chain(info.uv_levels.iter()) {
            blk.iter().for_each(|&v| w.i16(v));
        }
        w.u32(info.mode_i16 as u32);
        info.modes_i4.iter().for_each(|&m| w.u8(m as u8));
        w.u32(info.mode_uv as u32);
        w.u32(info.nz);
        for ch in info.derr.iter() {
            ch.iter().for_each(|&v| w.i8(v));
        }
        w.u8(self.is_i16 as u8);
        w.u8(self.skip as u8);
        w.i32(self.max_edge);
        buf
    }

    /// Reads an output record back. Score terms are not part of the record and come back as 0.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, Vp8Error> {
        check_len("macroblock output record", buf, MB_OUTPUT_RECORD_SIZE)?;
        let mut r = RecordReader::new(buf);
        let mut info = ModeScore::default();
        info.y_dc_levels.iter_mut().for_each(|v| *v = r.i16());
        for blk in info.y_ac_levels.iter_mut().chain(info.uv_levels.iter_mut()) {
            blk.iter_mut().for_each(|v| *v = r.i16());
        }
        info.mode_i16 = PredMode::from_u32(r.u32()).ok_or(Vp8Error::InvalidRecord("mode_i16"))?;
        for m in info.modes_i4.iter_mut() {
            *m = IntraBMode::from_u8(r.u8()).ok_or(Vp8Error::InvalidRecord("modes_i4"))?;
        }
        info.mode_uv = PredMode::from_u32(r.u32()).ok_or(Vp8Error::InvalidRecord("mode_uv"))?;
        info.nz = r.u32();
        for ch in info.derr.iter_mut() {
            ch.iter_mut().for_each(|v| *v = r.i8());
        }
        let is_i16 = match r.u8() {
            0 => false,
            1 => true,
            _ => return Err(Vp8Error::InvalidRecord("is_i16")),
        };
        let skip = match r.u8() {
            0 => false,
            1 => true,
            _ => return Err(Vp8Error::InvalidRecord("skip")),
        };
        Ok(MacroblockResult {
            info,
            is_i16,
            skip,
            max_edge: r.i32(),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Source samples of one macroblock, each plane row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MacroblockInput {
    pub y: [pel; MB_DIM],
    pub u: [pel; UV_BLK_DIM],
    pub v: [pel; UV_BLK_DIM],
}

impl Default for MacroblockInput {
    fn default() -> Self {
        MacroblockInput {
            y: [0; MB_DIM],
            u: [0; UV_BLK_DIM],
            v: [0; UV_BLK_DIM],
        }
    }
}

impl MacroblockInput {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(MB_INPUT_RECORD_SIZE);
        buf.extend_from_slice(&self.y);
        buf.extend_from_slice(&self.u);
        buf.extend_from_slice(&self.v);
        buf
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, Vp8Error> {
        check_len("macroblock input record", buf, MB_INPUT_RECORD_SIZE)?;
        let mut mb = MacroblockInput::default();
        let (y, uv) = buf.split_at(MB_DIM);
        mb.y.copy_from_slice(y);
        mb.u.copy_from_slice(&uv[..UV_BLK_DIM]);
        mb.v.copy_from_slice(&uv[UV_BLK_DIM..2 * UV_BLK_DIM]);
        Ok(mb)
    }
}

/// Where one frame's records live in the host memory image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JobDescriptor {
    pub input_addr: u64,
    pub output_addr: u64,
    pub segment_addr: u64,
    pub mb_w: i32,
    pub mb_h: i32,
}

impl JobDescriptor {
    pub fn to_bytes(&self) -> [u8; JOB_DESCRIPTOR_SIZE] {
        let mut buf = [0; JOB_DESCRIPTOR_SIZE];
        let mut w = RecordWriter::new(&mut buf);
        w.u64(self.input_addr);
        w.u64(self.output_addr);
        w.u64(self.segment_addr);
        w.i32(self.mb_w);
        w.i32(self.mb_h);
        buf
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, Vp8Error> {
        check_len("job descriptor", buf, JOB_DESCRIPTOR_SIZE)?;
        let mut r = RecordReader::new(buf);
        Ok(JobDescriptor {
            input_addr: r.u64(),
            output_addr: r.u64(),
            segment_addr: r.u64(),
            mb_w: r.i32(),
            mb_h: r.i32(),
        })
    }

    pub fn num_mbs(&self) -> usize {
        if self.mb_w <= 0 || self.mb_h <= 0 {
            0
        } else {
            self.mb_w as usize * self.mb_h as usize
        }
    }
}
