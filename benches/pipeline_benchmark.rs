//! Benchmarks for the document pipeline.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic report text shaped like real PDF
//! extraction output: noise lines interleaved with Korean sentences.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use econodoc::pipeline::{Normalizer, Pipeline, PipelineOptions, SegmentStrategy};
use econodoc::BatchRequestBuilder;

/// Builds synthetic report text with the given number of sections.
fn create_report_text(section_count: usize) -> String {
    let mut text = String::new();
    text.push_str("목차\n제1장 경제 동향\n제2장 금융시장\nI - 1 개황\n");

    for i in 0..section_count {
        text.push_str(&format!("표 {} 주요 지표\n", i + 1));
        text.push_str("(조사국 동향분석팀)\n");
        text.push_str(
            "국내 경기는 소비와 수출이 완만하게 회복되면서 개선 흐름을 이어갔다. \
             물가 상승률은 전년동기대비 2.3% 수준에서 안정되었다.\n",
        );
        text.push_str("주: 1) 계절조정 기준\n");
        text.push_str(&format!("- {} -\n", i + 1));
    }

    text.push_str("주요 통계 및 참고 지표\n");
    text
}

/// Benchmark line-level normalization.
fn bench_normalize(c: &mut Criterion) {
    let normalizer = Normalizer::new();
    let text = create_report_text(20);

    c.bench_function("normalize_20_sections", |b| {
        b.iter(|| normalizer.normalize(black_box(&text)));
    });
}

/// Benchmark the full pipeline at various document sizes.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for section_count in [5, 20, 80].iter() {
        let text = create_report_text(*section_count);
        let options = PipelineOptions::new().with_segmentation(SegmentStrategy::departments());
        let pipeline = Pipeline::new(options);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| pipeline.paragraphs(black_box(&text)));
        });
    }

    group.finish();
}

/// Benchmark batch request construction over pipeline output.
fn bench_request_building(c: &mut Criterion) {
    let text = create_report_text(20);
    let options = PipelineOptions::new().with_segmentation(SegmentStrategy::departments());
    let paragraphs = Pipeline::new(options).paragraphs(&text);
    let builder = BatchRequestBuilder::new("gpt-5.1");

    c.bench_function("build_requests_20_sections", |b| {
        b.iter(|| builder.build(black_box(&paragraphs)));
    });
}

criterion_group!(benches, bench_normalize, bench_pipeline, bench_request_building);
criterion_main!(benches);
