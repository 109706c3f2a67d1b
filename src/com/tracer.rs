#![allow(unused_variables)]

use std::fmt::Display;
#[cfg(feature = "trace")]
use std::fs::OpenOptions;
use std::io::Write;

use super::*;

pub(crate) type Tracer = (Box<dyn Write>, isize);

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(feature = "trace")]
pub(crate) fn OPEN_TRACE() -> Option<Tracer> {
    let fp_trace = OpenOptions::new()
        .append(true)
        .create(true)
        .open("enc_trace.txt");
    if let Ok(fp) = fp_trace {
        Some((Box::new(fp), 0))
    } else {
        None
    }
}

#[cfg(feature = "trace")]
pub(crate) fn VP8_TRACE_COUNTER(tracer: &mut Option<Tracer>) {
    if let Some((writer, counter)) = tracer {
        let _ = writer.write_fmt(format_args!("{} \t", *counter));
        *counter += 1;
    }
}

#[cfg(feature = "trace")]
pub(crate) fn VP8_TRACE<T: Display>(tracer: &mut Option<Tracer>, name: T) {
    if let Some((writer, _)) = tracer {
        let _ = writer.write_fmt(format_args!("{}", name));
    }
}

#[cfg(feature = "trace")]
fn VP8_TRACE_BLOCK<T: Display>(tracer: &mut Option<Tracer>, vals: &[T]) {
    for (i, v) in vals.iter().enumerate() {
        if i != 0 {
            VP8_TRACE(tracer, " , ");
        }
        VP8_TRACE(tracer, v);
    }
    VP8_TRACE(tracer, " \n");
}

#[cfg(feature = "trace_coef")]
pub(crate) fn TRACE_COEF(tracer: &mut Option<Tracer>, blk: usize, levels: &[i16]) {
    VP8_TRACE_COUNTER(tracer);
    VP8_TRACE(tracer, "Coef for ");
    VP8_TRACE(tracer, blk);
    VP8_TRACE(tracer, " : ");
    VP8_TRACE_BLOCK(tracer, levels);
}

#[cfg(feature = "trace_pred")]
pub(crate) fn TRACE_PRED<M: Display>(tracer: &mut Option<Tracer>, mode: M, pred: &[pel]) {
    VP8_TRACE_COUNTER(tracer);
    VP8_TRACE(tracer, "Pred for ");
    VP8_TRACE(tracer, mode);
    VP8_TRACE(tracer, " : ");
    VP8_TRACE_BLOCK(tracer, pred);
}

#[cfg(feature = "trace_reco")]
pub(crate) fn TRACE_RECO(tracer: &mut Option<Tracer>, ch: &str, rec: &[pel]) {
    VP8_TRACE_COUNTER(tracer);
    VP8_TRACE(tracer, "Reco for ");
    VP8_TRACE(tracer, ch);
    VP8_TRACE(tracer, " : ");
    VP8_TRACE_BLOCK(tracer, rec);
}

#[cfg(feature = "trace_mb")]
pub(crate) fn TRACE_MB(
    tracer: &mut Option<Tracer>,
    x: usize,
    y: usize,
    is_i16: bool,
    nz: u32,
    score: i64,
) {
    VP8_TRACE_COUNTER(tracer);
    VP8_TRACE(tracer, "mb (");
    VP8_TRACE(tracer, x);
    VP8_TRACE(tracer, ", ");
    VP8_TRACE(tracer, y);
    VP8_TRACE(tracer, ") ");
    VP8_TRACE(tracer, if is_i16 { "i16" } else { "i4" });
    VP8_TRACE(tracer, " nz ");
    VP8_TRACE(tracer, format!("0x{:x}", nz));
    VP8_TRACE(tracer, " score ");
    VP8_TRACE(tracer, score);
    VP8_TRACE(tracer, " \n");
}

#[cfg(not(feature = "trace"))]
pub(crate) fn OPEN_TRACE() -> Option<Tracer> {
    None
}

#[cfg(not(feature = "trace_coef"))]
pub(crate) fn TRACE_COEF(tracer: &mut Option<Tracer>, blk: usize, levels: &[i16]) {}

#[cfg(not(feature = "trace_pred"))]
pub(crate) fn TRACE_PRED<M: Display>(tracer: &mut Option<Tracer>, mode: M, pred: &[pel]) {}

#[cfg(not(feature = "trace_reco"))]
pub(crate) fn TRACE_RECO(tracer: &mut Option<Tracer>, ch: &str, rec: &[pel]) {}

#[cfg(not(feature = "trace_mb"))]
pub(crate) fn TRACE_MB(
    tracer: &mut Option<Tracer>,
    x: usize,
    y: usize,
    is_i16: bool,
    nz: u32,
    score: i64,
) {
}
