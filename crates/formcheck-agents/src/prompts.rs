//! Prompt templates for coaching feedback.

use formcheck_core::JointName;

/// Threshold used by [`build_prompt`] callers that have no better value
pub const DEFAULT_THRESHOLD_DEGREES: f64 = 10.0;

/// Threshold applied by the feedback operation
pub const FEEDBACK_THRESHOLD_DEGREES: f64 = 15.0;

/// Prompt used when every joint is within the threshold
pub const PRAISE_PROMPT: &str = r#"당신은 피트니스 앱의 AI 코치입니다. 사용자의 현재 자세는 기준 자세와 거의 일치합니다.

사용자에게 딱 한 문장의 짧고 따뜻한 칭찬 멘트를 생성해주세요.

가이드라인:
- 딱 한 문장만 작성하세요.
- 형식적이지 않게, 부드러운 말투로.
- 현재 자세가 잘 유지되고 있다는 느낌을 주세요.

예시: “몸의 균형이 아주 잘 잡혀 있어요, 그대로만 유지해보세요!”
"#;

/// Korean name spoken to the user for a joint, if one is defined
pub fn joint_display_name(joint: JointName) -> Option<&'static str> {
    match joint {
        JointName::LeftElbow => Some("왼쪽 팔꿈치"),
        JointName::RightElbow => Some("오른쪽 팔꿈치"),
        JointName::LeftShoulder => Some("왼쪽 어깨"),
        JointName::RightShoulder => Some("오른쪽 어깨"),
        JointName::LeftKnee => Some("왼쪽 무릎"),
        JointName::RightKnee => Some("오른쪽 무릎"),
        JointName::LeftHip => Some("왼쪽 엉덩이"),
        JointName::RightHip => Some("오른쪽 엉덩이"),
        JointName::Nose => Some("목"),
        _ => None,
    }
}

/// Display name, or the raw identifier when untranslated
pub fn friendly_name(joint: JointName) -> &'static str {
    joint_display_name(joint).unwrap_or_else(|| joint.as_str())
}

/// Joints whose deviation is present and strictly above `threshold`
///
/// `deviations` is aligned with `joints` by position; input order is kept.
pub fn qualifying_joints(
    joints: &[JointName],
    deviations: &[Option<f64>],
    threshold: f64,
) -> Vec<(JointName, f64)> {
    joints
        .iter()
        .zip(deviations)
        .filter_map(|(joint, deviation)| match deviation {
            Some(diff) if *diff > threshold => Some((*joint, *diff)),
            _ => None,
        })
        .collect()
}

/// One bullet line of the correction prompt
pub fn format_correction_line(joint: JointName, diff: f64) -> String {
    format!("- {}가 기준보다 {:.1}도 차이가 납니다.", friendly_name(joint), diff)
}

/// Template asking for a diagnostic sentence plus a corrective sentence
pub fn format_correction_prompt(detail: &str) -> String {
    format!(
        r#"

당신은 피트니스 앱의 AI 코치입니다. 사용자는 일반인 또는 시각적 제약이 있는 사람이며, 자세 인식 결과를 바탕으로 피드백을 받습니다.

아래는 사용자의 관절별 기준 자세와 실제 자세 간의 각도 차이 중, 차이가 큰 부위만 정리한 내용입니다.
해당 부위를 중심으로 다음 조건에 따라 피드백을 작성해주세요:

[관절별 각도 차이]
{}

작성 가이드:
- 문장은 딱딱하지 않게, 부드럽게 말하듯 작성하세요.
- 1문장은 문제 설명, 1문장은 교정 조언으로 구성하세요.
- 전문 용어는 피하고, 감각 중심 표현을 사용하세요.
- 칭찬은 생략하고, 교정 중심으로 작성하세요.
- 총 2문장 이내로 작성해주세요.

예시: "왼쪽 엉덩이가 오른쪽보다 높게 들려 있어요. 양 발에 고르게 체중을 실어서 중심을 가운데로 맞춰볼게요."

이제 사용자에게 피드백을 작성해 주세요.

"#,
        detail
    )
}

/// Build the prompt for the text generator.
///
/// Falls back to [`PRAISE_PROMPT`] when no joint exceeds `threshold`.
pub fn build_prompt(joints: &[JointName], deviations: &[Option<f64>], threshold: f64) -> String {
    let corrections = qualifying_joints(joints, deviations, threshold);
    prompt_for(&corrections)
}

/// Prompt for an already filtered list of corrections
pub fn prompt_for(corrections: &[(JointName, f64)]) -> String {
    if corrections.is_empty() {
        return PRAISE_PROMPT.to_string();
    }

    let detail = corrections
        .iter()
        .map(|(joint, diff)| format_correction_line(*joint, *diff))
        .collect::<Vec<_>>()
        .join("\n");

    format_correction_prompt(&detail)
}
