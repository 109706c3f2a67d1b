use criterion::*;
use revp8::api::*;

criterion_group!(record, bench_segment_record, bench_output_record, bench_run_job);

fn bench_segment_record(c: &mut Criterion) {
    let seg = SegmentInfo::from_quant(60, 50);

    c.bench_function("bench_segment_record", move |b| {
        b.iter(|| SegmentInfo::from_bytes(&seg.to_bytes()).unwrap())
    });
}

fn bench_output_record(c: &mut Criterion) {
    let res = MacroblockResult::default();

    c.bench_function("bench_output_record", move |b| {
        b.iter(|| MacroblockResult::from_bytes(&res.to_bytes()).unwrap())
    });
}

fn bench_run_job(c: &mut Criterion) {
    let (mb_w, mb_h) = (2usize, 2usize);
    let n = mb_w * mb_h;
    let input_addr = SEGMENT_RECORD_SIZE;
    let output_addr = input_addr + n * MB_INPUT_RECORD_SIZE;
    let mut mem = vec![0u8; output_addr + n * MB_OUTPUT_RECORD_SIZE];
    mem[..SEGMENT_RECORD_SIZE].copy_from_slice(&SegmentInfo::from_quant(40, 50).to_bytes());
    let job = JobDescriptor {
        input_addr: input_addr as u64,
        output_addr: output_addr as u64,
        segment_addr: 0,
        mb_w: mb_w as i32,
        mb_h: mb_h as i32,
    };

    c.bench_function("bench_run_job", move |b| {
        b.iter(|| Encoder::run_job(&mut mem, &job).unwrap())
    });
}
