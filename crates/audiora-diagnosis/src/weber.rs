use audiora_core::models::audiogram::ThresholdRow;
use audiora_core::models::ear::Ear;
use audiora_core::models::speech::WeberTest;

/// Weber marks implied by which ears have unmasked bone thresholds.
///
/// Bone data on one side only lateralizes every frequency to that side;
/// bone data on both sides clears the marks. `None` when neither side
/// has bone data, meaning the current marks stand.
pub fn infer_weber(rows: &[ThresholdRow]) -> Option<WeberTest> {
    let has_bone = |ear: Ear| rows.iter().any(|r| r.bone(ear).is_some());

    match (has_bone(Ear::Right), has_bone(Ear::Left)) {
        (true, false) => Some(WeberTest::lateralized(Ear::Right)),
        (false, true) => Some(WeberTest::lateralized(Ear::Left)),
        (true, true) => Some(WeberTest::blank()),
        (false, false) => None,
    }
}
