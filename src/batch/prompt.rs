//! Instruction prompt rendering for summary requests.

/// Shape of the `summary` field the model must return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryShape {
    /// An ordered list of key-point strings.
    PointList,
    /// A single summary string.
    #[default]
    SingleText,
}

/// Render the system instruction for a paragraph summary.
///
/// Embeds the chosen length bucket and states the output contract matching
/// the declared response schema.
pub fn render_instruction(shape: SummaryShape, bucket_label: &str) -> String {
    match shape {
        SummaryShape::PointList => format!(
            "너는 경제 분석 전문가야. \
             다음 문단을 불필요한 문장이나 반복 표현은 제거하고 핵심 경제 흐름만 정리하여 \
             핵심 내용을 {}로 요약해줘. \
             요약은 '핵심 문장 단위 문자열 리스트' 형태로 반환해야 해. \
             또한 기준 금리 변동 여부를 제목으로 1줄로 작성해줘.",
            bucket_label
        ),
        SummaryShape::SingleText => format!(
            "너는 경제 분석 전문가야. \
             다음 문단을 불필요한 문장이나 반복 표현은 제거하고 핵심 경제 흐름만 정리하고 \
             핵심만 {}로 요약해줘. \
             이를 대표하는 제목을 1줄로 작성해줘.",
            bucket_label
        ),
    }
}
