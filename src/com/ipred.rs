use super::util::*;
use super::*;

/*****************************************************************************
 * reconstructed samples around one macroblock
 *****************************************************************************/
#[derive(Clone, Copy, Default)]
pub(crate) struct Vp8Neighbors {
    pub(crate) y_left: [pel; MB_SIZE],
    pub(crate) u_left: [pel; UV_SIZE],
    pub(crate) v_left: [pel; UV_SIZE],
    pub(crate) y_top_left: pel,
    pub(crate) u_top_left: pel,
    pub(crate) v_top_left: pel,
    /* 16 top samples followed by 4 top-right samples */
    pub(crate) y_top: [pel; MB_SIZE + 4],
    pub(crate) u_top: [pel; UV_SIZE],
    pub(crate) v_top: [pel; UV_SIZE],
    /* x > 0 */
    pub(crate) has_left: bool,
    /* y > 0 */
    pub(crate) has_top: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// 16x16 and chroma generators, all written with stride BPS

fn fill(dst: &mut [pel], size: usize, value: pel) {
    for j in 0..size {
        for v in &mut dst[j * BPS..j * BPS + size] {
            *v = value;
        }
    }
}

fn vertical_pred(dst: &mut [pel], top: Option<&[pel]>, size: usize) {
    if let Some(top) = top {
        for j in 0..size {
            dst[j * BPS..j * BPS + size].copy_from_slice(&top[..size]);
        }
    } else {
        fill(dst, size, TOP_MISSING);
    }
}

fn horizontal_pred(dst: &mut [pel], left: Option<&[pel]>, size: usize) {
    if let Some(left) = left {
        for j in 0..size {
            for v in &mut dst[j * BPS..j * BPS + size] {
                *v = left[j];
            }
        }
    } else {
        fill(dst, size, LEFT_MISSING);
    }
}

fn true_motion(
    dst: &mut [pel],
    left: Option<&[pel]>,
    top: Option<&[pel]>,
    top_left: pel,
    size: usize,
) {
    match (left, top) {
        (Some(left), Some(top)) => {
            for j in 0..size {
                let l = left[j] as i32 - top_left as i32;
                for i in 0..size {
                    dst[j * BPS + i] = clip_tm(top[i] as i32 + l);
                }
            }
        }
        /* no top: copy left */
        (Some(_), None) => horizontal_pred(dst, left, size),
        /* no left: copy top, or flat 129 with neither */
        (None, Some(_)) => vertical_pred(dst, top, size),
        (None, None) => horizontal_pred(dst, None, size),
    }
}

fn dc_mode(
    dst: &mut [pel],
    left: Option<&[pel]>,
    top: Option<&[pel]>,
    size: usize,
    round: u32,
    shift: u32,
) {
    let sum = |s: &[pel]| s[..size].iter().map(|&v| v as u32).sum::<u32>();
    let dc = match (left, top) {
        (Some(left), Some(top)) => (sum(top) + sum(left) + round) >> shift,
        /* one side only: count it twice */
        (None, Some(edge)) | (Some(edge), None) => (2 * sum(edge) + round) >> shift,
        (None, None) => 0x80,
    };
    fill(dst, size, dc as pel);
}

fn pred_one(
    dst: &mut [pel],
    mode: PredMode,
    left: Option<&[pel]>,
    top: Option<&[pel]>,
    top_left: pel,
    size: usize,
) {
    /* round/shift of the dc average: 2 * size samples */
    let (round, shift) = if size == MB_SIZE { (16, 5) } else { (8, 4) };
    match mode {
        PredMode::DC_PRED => dc_mode(dst, left, top, size, round, shift),
        PredMode::TM_PRED => true_motion(dst, left, top, top_left, size),
        PredMode::V_PRED => vertical_pred(dst, top, size),
        PredMode::H_PRED => horizontal_pred(dst, left, size),
    }
}

pub(crate) fn vp8_ipred_16(dst: &mut [pel; MB_DIM], mode: PredMode, nb: &Vp8Neighbors) {
    let left = if nb.has_left { Some(&nb.y_left[..]) } else { None };
    let top = if nb.has_top { Some(&nb.y_top[..MB_SIZE]) } else { None };
    pred_one(&mut dst[..], mode, left, top, nb.y_top_left, MB_SIZE);
}

/* U into columns 0..8 and V into columns 8..16 */
pub(crate) fn vp8_ipred_uv(dst: &mut [pel; UV_DIM], mode: PredMode, nb: &Vp8Neighbors) {
    let (u_left, v_left) = if nb.has_left {
        (Some(&nb.u_left[..]), Some(&nb.v_left[..]))
    } else {
        (None, None)
    };
    let (u_top, v_top) = if nb.has_top {
        (Some(&nb.u_top[..]), Some(&nb.v_top[..]))
    } else {
        (None, None)
    };
    pred_one(&mut dst[..], mode, u_left, u_top, nb.u_top_left, UV_SIZE);
    pred_one(&mut dst[UV_SIZE..], mode, v_left, v_top, nb.v_top_left, UV_SIZE);
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// 4x4 generators
//
// edge layout: [L, K, J, I, X, A, B, C, D, E, F, G, H]
//   I..L: left column top to bottom (stored reversed), X: top-left,
//   A..D: top row, E..H: top-right

pub(crate) const EDGE_X: usize = 4;
pub(crate) const EDGE_LEN: usize = 13;

#[inline]
fn AVG3(a: pel, b: pel, c: pel) -> pel {
    ((a as u32 + 2 * b as u32 + c as u32 + 2) >> 2) as pel
}

#[inline]
fn AVG2(a: pel, b: pel) -> pel {
    ((a as u32 + b as u32 + 1) >> 1) as pel
}

/* dst(x, y) */
#[inline]
fn DST(dst: &mut [pel; BLK_DIM], x: usize, y: usize, v: pel) {
    dst[x + y * BLK_SIZE] = v;
}

fn ve4(dst: &mut [pel; BLK_DIM], e: &[pel; EDGE_LEN]) {
    let top = &e[EDGE_X..];
    let vals = [
        AVG3(top[0], top[1], top[2]),
        AVG3(top[1], top[2], top[3]),
        AVG3(top[2], top[3], top[4]),
        AVG3(top[3], top[4], top[5]),
    ];
    for j in 0..BLK_SIZE {
        dst[j * BLK_SIZE..(j + 1) * BLK_SIZE].copy_from_slice(&vals);
    }
}

fn he4(dst: &mut [pel; BLK_DIM], e: &[pel; EDGE_LEN]) {
    let (X, I, J, K, L) = (e[4], e[3], e[2], e[1], e[0]);
    let vals = [AVG3(X, I, J), AVG3(I, J, K), AVG3(J, K, L), AVG3(K, L, L)];
    for j in 0..BLK_SIZE {
        for v in &mut dst[j * BLK_SIZE..(j + 1) * BLK_SIZE] {
            *v = vals[j];
        }
    }
}

fn dc4(dst: &mut [pel; BLK_DIM], e: &[pel; EDGE_LEN]) {
    let mut dc = 4u32;
    for i in 0..4 {
        dc += e[EDGE_X + 1 + i] as u32 + e[i] as u32;
    }
    for v in dst.iter_mut() {
        *v = (dc >> 3) as pel;
    }
}

fn tm4(dst: &mut [pel; BLK_DIM], e: &[pel; EDGE_LEN]) {
    let X = e[EDGE_X] as i32;
    for y in 0..BLK_SIZE {
        let l = e[EDGE_X - 1 - y] as i32 - X;
        for x in 0..BLK_SIZE {
            DST(dst, x, y, clip_tm(e[EDGE_X + 1 + x] as i32 + l));
        }
    }
}

fn rd4(dst: &mut [pel; BLK_DIM], e: &[pel; EDGE_LEN]) {
    let (I, J, K, L, X) = (e[3], e[2], e[1], e[0], e[4]);
    let (A, B, C, D) = (e[5], e[6], e[7], e[8]);
    DST(dst, 0, 3, AVG3(J, K, L));
    let v = AVG3(I, J, K);
    DST(dst, 0, 2, v);
    DST(dst, 1, 3, v);
    let v = AVG3(X, I, J);
    DST(dst, 0, 1, v);
    DST(dst, 1, 2, v);
    DST(dst, 2, 3, v);
    let v = AVG3(A, X, I);
    DST(dst, 0, 0, v);
    DST(dst, 1, 1, v);
    DST(dst, 2, 2, v);
    DST(dst, 3, 3, v);
    let v = AVG3(B, A, X);
    DST(dst, 1, 0, v);
    DST(dst, 2, 1, v);
    DST(dst, 3, 2, v);
    let v = AVG3(C, B, A);
    DST(dst, 2, 0, v);
    DST(dst, 3, 1, v);
    DST(dst, 3, 0, AVG3(D, C, B));
}

fn ld4(dst: &mut [pel; BLK_DIM], e: &[pel; EDGE_LEN]) {
    let (A, B, C, D) = (e[5], e[6], e[7], e[8]);
    let (E, F, G, H) = (e[9], e[10], e[11], e[12]);
    DST(dst, 0, 0, AVG3(A, B, C));
    let v = AVG3(B, C, D);
    DST(dst, 1, 0, v);
    DST(dst, 0, 1, v);
    let v = AVG3(C, D, E);
    DST(dst, 2, 0, v);
    DST(dst, 1, 1, v);
    DST(dst, 0, 2, v);
    let v = AVG3(D, E, F);
    DST(dst, 3, 0, v);
    DST(dst, 2, 1, v);
    DST(dst, 1, 2, v);
    DST(dst, 0, 3, v);
    let v = AVG3(E, F, G);
    DST(dst, 3, 1, v);
    DST(dst, 2, 2, v);
    DST(dst, 1, 3, v);
    let v = AVG3(F, G, H);
    DST(dst, 3, 2, v);
    DST(dst, 2, 3, v);
    DST(dst, 3, 3, AVG3(G, H, H));
}

fn vr4(dst: &mut [pel; BLK_DIM], e: &[pel; EDGE_LEN]) {
    let (I, J, K, X) = (e[3], e[2], e[1], e[4]);
    let (A, B, C, D) = (e[5], e[6], e[7], e[8]);
    let v = AVG2(X, A);
    DST(dst, 0, 0, v);
    DST(dst, 1, 2, v);
    let v = AVG2(A, B);
    DST(dst, 1, 0, v);
    DST(dst, 2, 2, v);
    let v = AVG2(B, C);
    DST(dst, 2, 0, v);
    DST(dst, 3, 2, v);
    DST(dst, 3, 0, AVG2(C, D));

    DST(dst, 0, 3, AVG3(K, J, I));
    DST(dst, 0, 2, AVG3(J, I, X));
    let v = AVG3(I, X, A);
    DST(dst, 0, 1, v);
    DST(dst, 1, 3, v);
    let v = AVG3(X, A, B);
    DST(dst, 1, 1, v);
    DST(dst, 2, 3, v);
    let v = AVG3(A, B, C);
    DST(dst, 2, 1, v);
    DST(dst, 3, 3, v);
    DST(dst, 3, 1, AVG3(B, C, D));
}

fn vl4(dst: &mut [pel; BLK_DIM], e: &[pel; EDGE_LEN]) {
    let (A, B, C, D) = (e[5], e[6], e[7], e[8]);
    let (E, F, G, H) = (e[9], e[10], e[11], e[12]);
    DST(dst, 0, 0, AVG2(A, B));
    let v = AVG2(B, C);
    DST(dst, 1, 0, v);
    DST(dst, 0, 2, v);
    let v = AVG2(C, D);
    DST(dst, 2, 0, v);
    DST(dst, 1, 2, v);
    let v = AVG2(D, E);
    DST(dst, 3, 0, v);
    DST(dst, 2, 2, v);

    DST(dst, 0, 1, AVG3(A, B, C));
    let v = AVG3(B, C, D);
    DST(dst, 1, 1, v);
    DST(dst, 0, 3, v);
    let v = AVG3(C, D, E);
    DST(dst, 2, 1, v);
    DST(dst, 1, 3, v);
    let v = AVG3(D, E, F);
    DST(dst, 3, 1, v);
    DST(dst, 2, 3, v);
    DST(dst, 3, 2, AVG3(E, F, G));
    DST(dst, 3, 3, AVG3(F, G, H));
}

fn hu4(dst: &mut [pel; BLK_DIM], e: &[pel; EDGE_LEN]) {
    let (I, J, K, L) = (e[3], e[2], e[1], e[0]);
    DST(dst, 0, 0, AVG2(I, J));
    let v = AVG2(J, K);
    DST(dst, 2, 0, v);
    DST(dst, 0, 1, v);
    let v = AVG2(K, L);
    DST(dst, 2, 1, v);
    DST(dst, 0, 2, v);
    DST(dst, 1, 0, AVG3(I, J, K));
    let v = AVG3(J, K, L);
    DST(dst, 3, 0, v);
    DST(dst, 1, 1, v);
    let v = AVG3(K, L, L);
    DST(dst, 3, 1, v);
    DST(dst, 1, 2, v);
    DST(dst, 3, 2, L);
    DST(dst, 2, 2, L);
    for x in 0..BLK_SIZE {
        DST(dst, x, 3, L);
    }
}

fn hd4(dst: &mut [pel; BLK_DIM], e: &[pel; EDGE_LEN]) {
    let (I, J, K, L, X) = (e[3], e[2], e[1], e[0], e[4]);
    let (A, B, C) = (e[5], e[6], e[7]);
    let v = AVG2(I, X);
    DST(dst, 0, 0, v);
    DST(dst, 2, 1, v);
    let v = AVG2(J, I);
    DST(dst, 0, 1, v);
    DST(dst, 2, 2, v);
    let v = AVG2(K, J);
    DST(dst, 0, 2, v);
    DST(dst, 2, 3, v);
    DST(dst, 0, 3, AVG2(L, K));

    DST(dst, 3, 0, AVG3(A, B, C));
    DST(dst, 2, 0, AVG3(X, A, B));
    let v = AVG3(I, X, A);
    DST(dst, 1, 0, v);
    DST(dst, 3, 1, v);
    let v = AVG3(J, I, X);
    DST(dst, 1, 1, v);
    DST(dst, 3, 2, v);
    let v = AVG3(K, J, I);
    DST(dst, 1, 2, v);
    DST(dst, 3, 3, v);
    DST(dst, 1, 3, AVG3(L, K, J));
}

pub(crate) fn vp8_ipred_4(dst: &mut [pel; BLK_DIM], mode: IntraBMode, edge: &[pel; EDGE_LEN]) {
    use IntraBMode::*;
    match mode {
        B_DC_PRED => dc4(dst, edge),
        B_TM_PRED => tm4(dst, edge),
        B_VE_PRED => ve4(dst, edge),
        B_HE_PRED => he4(dst, edge),
        B_RD_PRED => rd4(dst, edge),
        B_VR_PRED => vr4(dst, edge),
        B_LD_PRED => ld4(dst, edge),
        B_VL_PRED => vl4(dst, edge),
        B_HD_PRED => hd4(dst, edge),
        B_HU_PRED => hu4(dst, edge),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use interpolate_name::interpolate_test;
    use pretty_assertions::assert_eq;

    fn neighbors(x: usize, y: usize) -> Vp8Neighbors {
        let mut nb = Vp8Neighbors::default();
        nb.has_left = x > 0;
        nb.has_top = y > 0;
        for i in 0..MB_SIZE {
            nb.y_left[i] = 40 + i as pel;
            nb.y_top[i] = 200 - 3 * i as pel;
        }
        for i in 0..UV_SIZE {
            nb.u_left[i] = 10;
            nb.v_left[i] = 250;
            nb.u_top[i] = 20;
            nb.v_top[i] = 240;
        }
        nb.y_top_left = 90;
        nb
    }

    #[test]
    fn dc_without_neighbors_is_mid_gray() {
        let mut pred = [0; MB_DIM];
        vp8_ipred_16(&mut pred, PredMode::DC_PRED, &neighbors(0, 0));
        assert!(pred.iter().all(|&v| v == 128));

        let mut pred = [0; UV_DIM];
        vp8_ipred_uv(&mut pred, PredMode::DC_PRED, &neighbors(0, 0));
        assert!(pred.iter().all(|&v| v == 128));
    }

    #[test]
    fn true_motion_at_origin_is_flat_129() {
        let mut pred = [0; MB_DIM];
        vp8_ipred_16(&mut pred, PredMode::TM_PRED, &neighbors(0, 0));
        assert!(pred.iter().all(|&v| v == 129));
    }

    #[test]
    fn true_motion_on_first_row_copies_left() {
        let nb = neighbors(3, 0);
        let mut pred = [0; MB_DIM];
        vp8_ipred_16(&mut pred, PredMode::TM_PRED, &nb);
        for j in 0..MB_SIZE {
            for i in 0..MB_SIZE {
                assert_eq!(pred[j * BPS + i], nb.y_left[j]);
            }
        }
    }

    #[test]
    fn true_motion_on_first_column_copies_top() {
        let nb = neighbors(0, 2);
        let mut pred = [0; MB_DIM];
        vp8_ipred_16(&mut pred, PredMode::TM_PRED, &nb);
        for j in 0..MB_SIZE {
            assert_eq!(&pred[j * BPS..(j + 1) * BPS], &nb.y_top[..MB_SIZE]);
        }
    }

    #[test]
    fn missing_edges_use_defaults() {
        let nb = neighbors(0, 0);
        let mut pred = [0; MB_DIM];
        vp8_ipred_16(&mut pred, PredMode::V_PRED, &nb);
        assert!(pred.iter().all(|&v| v == TOP_MISSING));
        vp8_ipred_16(&mut pred, PredMode::H_PRED, &nb);
        assert!(pred.iter().all(|&v| v == LEFT_MISSING));
    }

    #[test]
    fn chroma_dc_is_per_channel() {
        let nb = neighbors(1, 1);
        let mut pred = [0; UV_DIM];
        vp8_ipred_uv(&mut pred, PredMode::DC_PRED, &nb);
        for j in 0..UV_SIZE {
            assert!(pred[j * BPS..j * BPS + UV_SIZE].iter().all(|&v| v == 15));
            assert!(pred[j * BPS + UV_SIZE..(j + 1) * BPS].iter().all(|&v| v == 245));
        }
    }

    #[test]
    fn true_motion_clips() {
        let mut nb = neighbors(1, 1);
        nb.y_top_left = 0;
        nb.y_left = [255; MB_SIZE];
        let mut pred = [0; MB_DIM];
        vp8_ipred_16(&mut pred, PredMode::TM_PRED, &nb);
        assert!(pred.iter().all(|&v| v == 255));
    }

    /* L K J I X A B C D E F G H */
    const EDGE: [pel; EDGE_LEN] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120, 130];

    fn expected_4x4(mode: IntraBMode) -> [pel; BLK_DIM] {
        use IntraBMode::*;
        match mode {
            B_DC_PRED => [50; BLK_DIM],
            B_VE_PRED => [60, 70, 80, 90, 60, 70, 80, 90, 60, 70, 80, 90, 60, 70, 80, 90],
            B_HE_PRED => [40, 40, 40, 40, 30, 30, 30, 30, 20, 20, 20, 20, 13, 13, 13, 13],
            B_TM_PRED => [50, 60, 70, 80, 40, 50, 60, 70, 30, 40, 50, 60, 20, 30, 40, 50],
            B_HU_PRED => [35, 30, 25, 20, 25, 20, 15, 13, 15, 13, 10, 10, 10, 10, 10, 10],
            B_LD_PRED => [70, 80, 90, 100, 80, 90, 100, 110, 90, 100, 110, 120, 100, 110, 120, 128],
            B_RD_PRED => [50, 60, 70, 80, 40, 50, 60, 70, 30, 40, 50, 60, 20, 30, 40, 50],
            B_VR_PRED => [55, 65, 75, 85, 50, 60, 70, 80, 40, 55, 65, 75, 30, 50, 60, 70],
            /* bottom right takes AVG3 of F G H, not a pair average */
            B_VL_PRED => [65, 75, 85, 95, 70, 80, 90, 100, 75, 85, 95, 110, 80, 90, 100, 120],
            B_HD_PRED => [45, 50, 60, 70, 35, 40, 45, 50, 25, 30, 35, 40, 15, 20, 25, 30],
        }
    }

    #[interpolate_test(dc, IntraBMode::B_DC_PRED)]
    #[interpolate_test(ve, IntraBMode::B_VE_PRED)]
    #[interpolate_test(he, IntraBMode::B_HE_PRED)]
    #[interpolate_test(tm, IntraBMode::B_TM_PRED)]
    #[interpolate_test(hu, IntraBMode::B_HU_PRED)]
    #[interpolate_test(ld, IntraBMode::B_LD_PRED)]
    #[interpolate_test(rd, IntraBMode::B_RD_PRED)]
    #[interpolate_test(vr, IntraBMode::B_VR_PRED)]
    #[interpolate_test(vl, IntraBMode::B_VL_PRED)]
    #[interpolate_test(hd, IntraBMode::B_HD_PRED)]
    fn pred_4x4(mode: IntraBMode) {
        let mut pred = [0; BLK_DIM];
        vp8_ipred_4(&mut pred, mode, &EDGE);
        assert_eq!(&pred[..], &expected_4x4(mode)[..]);
    }

    #[test]
    fn diagonal_modes_on_flat_edges_are_flat() {
        let edge = [77; EDGE_LEN];
        for &mode in IntraBMode::ALL.iter() {
            let mut pred = [0; BLK_DIM];
            vp8_ipred_4(&mut pred, mode, &edge);
            assert!(pred.iter().all(|&v| v == 77), "{}", mode);
        }
    }
}
