//! Integration tests for the document pipeline.

use econodoc::pipeline::{Normalizer, Paragraph, Pipeline, PipelineOptions, SegmentStrategy};

/// Synthetic report text shaped like real PDF extraction output.
fn sample_report() -> &'static str {
    "통화신용정책보고서\n\
     한국은행\n\
     Ⅰ - 1 통화정책 운영\n\
     [표1] 주요 경제지표\n\
     (조사국 동향분석팀)\n\
     국내 경기는 수출을 중심으로 완만한 회복 흐름을 이어갔다.\n\
     소비자물가 상승률1)은 2.3%로 둔화되었다.\n\
     주: 1) 전년동기대비 기준\n\
     자료: 한국은행\n\
     - 5 -\n\
     (금융시장국 채권시장팀)\n\
     장기 국고채 금리가 상승하였다.\n\
     그림 2 금리 추이\n\
     주요 통계 및 참고 지표\n\
     부록 통계표 1.2 3.4 5.6\n"
}

#[test]
fn test_full_pipeline_department_split() {
    let options = PipelineOptions::new().with_segmentation(SegmentStrategy::departments());
    let pipeline = Pipeline::new(options);
    let paragraphs = pipeline.paragraphs(sample_report());

    assert_eq!(paragraphs.len(), 2);
    assert!(paragraphs[0].text().contains("완만한 회복 흐름"));
    assert!(paragraphs[0].text().contains("둔화되었다"));
    assert_eq!(
        paragraphs[1].header.as_deref(),
        Some("(금융시장국 채권시장팀)")
    );
    assert!(paragraphs[1].body.contains("장기 국고채 금리가 상승하였다."));
}

#[test]
fn test_full_pipeline_whole_document() {
    let pipeline = Pipeline::default();
    let paragraphs = pipeline.paragraphs(sample_report());

    assert_eq!(paragraphs.len(), 1);
    assert!(paragraphs[0].header.is_none());
    assert!(paragraphs[0].text().contains("회복 흐름"));
}

#[test]
fn test_appendix_content_excluded() {
    let pipeline = Pipeline::default();
    let paragraphs = pipeline.paragraphs(sample_report());
    let all: String = paragraphs.iter().map(Paragraph::text).collect();

    assert!(!all.contains("부록 통계표"));
    assert!(!all.contains("주요 통계 및 참고"));
}

#[test]
fn test_front_matter_excluded() {
    let pipeline = Pipeline::default();
    let paragraphs = pipeline.paragraphs(sample_report());
    let all: String = paragraphs.iter().map(Paragraph::text).collect();

    // Everything before the first section marker is cut.
    assert!(!all.contains("통화신용정책보고서"));
}

#[test]
fn test_noise_lines_absent_from_output() {
    let options = PipelineOptions::new().with_segmentation(SegmentStrategy::departments());
    let pipeline = Pipeline::new(options);
    let paragraphs = pipeline.paragraphs(sample_report());
    let all: String = paragraphs.iter().map(Paragraph::text).collect();

    assert!(!all.contains("주요 경제지표"));
    assert!(!all.contains("자료"));
    assert!(!all.contains("- 5 -"));
    assert!(!all.contains("그림 2"));
}

#[test]
fn test_paragraphs_are_non_empty_and_ordered() {
    let options = PipelineOptions::new().with_segmentation(SegmentStrategy::departments());
    let pipeline = Pipeline::new(options);
    let paragraphs = pipeline.paragraphs(sample_report());

    assert!(paragraphs.iter().all(|p| !p.is_empty()));
    let first = paragraphs
        .iter()
        .position(|p| p.text().contains("회복 흐름"))
        .unwrap();
    let second = paragraphs
        .iter()
        .position(|p| p.text().contains("국고채"))
        .unwrap();
    assert!(first < second);
}

#[test]
fn test_normalization_is_idempotent_on_report() {
    let normalizer = Normalizer::new();
    let once = normalizer.normalize(sample_report());
    assert_eq!(normalizer.normalize(&once), once);
}

#[test]
fn test_pipeline_is_stable_on_own_output() {
    let pipeline = Pipeline::default();
    let first = pipeline.paragraphs("실제 내용 문장입니다. 경기가 회복되었다.");
    assert_eq!(first.len(), 1);
    let second = pipeline.paragraphs(&first[0].text());
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].text(), first[0].text());
}

#[test]
fn test_empty_and_noise_only_input() {
    let pipeline = Pipeline::default();
    assert!(pipeline.paragraphs("").is_empty());
    assert!(pipeline
        .paragraphs("표 1 지표\n- 3 -\n자료: 한국은행\n주: 1) 각주")
        .is_empty());
}
