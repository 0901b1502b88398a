use audiora_core::models::audiogram::ThresholdField;
use audiora_core::models::diagnosis::{INSUFFICIENT_DATA, NO_DATA_AVAILABLE};
use audiora_core::models::ear::Ear;
use audiora_core::models::impedance::{ImpedanceMeasurement, ReflexResult, ReflexRow, TympType};
use audiora_core::models::session::{OverrideState, SessionKind, TestSession};
use audiora_core::models::speech::{LATERALIZED, WeberTest};
use audiora_core::numeric::Reading;
use audiora_diagnosis::sync::{
    DiagnosisField, NO_PATHOLOGY, PATHOLOGY, interpretation_for, reflex_for,
    restore_saved_diagnosis, sync_puretone,
};
use audiora_diagnosis::{SessionEvent, apply, synchronize};

fn enter(session: &mut TestSession, frequency: u32, field: ThresholdField, value: f64) {
    apply(
        session,
        SessionEvent::ThresholdEntered {
            frequency,
            field,
            value: Some(value),
        },
    );
}

fn conductive_right(session: &mut TestSession) {
    for (freq, air, bone) in [(500, 30.0, 5.0), (1000, 35.0, 10.0), (2000, 40.0, 15.0)] {
        enter(session, freq, ThresholdField::AirRight, air);
        enter(session, freq, ThresholdField::BoneRight, bone);
    }
}

fn measurement(pressure: f64, compliance: f64, volume: f64) -> ImpedanceMeasurement {
    ImpedanceMeasurement {
        pressure: Reading::Number(pressure),
        volume: Reading::Number(volume),
        compliance: Reading::Number(compliance),
    }
}

#[test]
fn derived_text_for_each_tymp_type() {
    assert_eq!(interpretation_for(Some(TympType::A)), NO_PATHOLOGY);
    for t in [TympType::As, TympType::Ad, TympType::B, TympType::C] {
        assert_eq!(interpretation_for(Some(t)), PATHOLOGY);
        assert_eq!(reflex_for(Some(t)), ReflexResult::Absent);
    }
    assert_eq!(interpretation_for(None), "");
    assert_eq!(reflex_for(None), ReflexResult::NotAssessed);
    assert_eq!(reflex_for(Some(TympType::A)), ReflexResult::Present);
}

#[test]
fn thresholds_drive_pta_and_diagnosis() {
    let mut session = TestSession::new(None, SessionKind::Puretone);
    conductive_right(&mut session);

    assert_eq!(session.pta.right, Some(35.0));
    assert_eq!(session.pta.left, None);
    assert_eq!(session.provisional_diagnosis.right, "Mild Conductive Hearing Loss");
    assert_eq!(session.provisional_diagnosis.left, "Unable to Determine");
}

#[test]
fn nothing_is_diagnosed_before_any_pta_exists() {
    let mut session = TestSession::new(None, SessionKind::Puretone);
    enter(&mut session, 500, ThresholdField::BoneRight, 10.0);

    assert_eq!(session.provisional_diagnosis.right, "");
    assert!(sync_puretone(&mut session).is_none());
}

#[test]
fn zero_pta_in_both_ears_counts_as_no_data() {
    let mut session = TestSession::new(None, SessionKind::Puretone);
    for freq in [500, 1000, 2000] {
        enter(&mut session, freq, ThresholdField::AirRight, 0.0);
        enter(&mut session, freq, ThresholdField::AirLeft, 0.0);
    }

    assert_eq!(session.pta.right, Some(0.0));
    assert_eq!(session.provisional_diagnosis.right, "");
    assert_eq!(session.provisional_diagnosis.left, "");
    assert!(sync_puretone(&mut session).is_none());

    // One ear with a non-zero average diagnoses both.
    enter(&mut session, 500, ThresholdField::AirLeft, 15.0);
    assert_eq!(session.provisional_diagnosis.left, "Normal Hearing Sensitivity");
    assert_eq!(session.provisional_diagnosis.right, "Normal Hearing Sensitivity");
}

#[test]
fn focus_freezes_only_that_ear() {
    let mut session = TestSession::new(None, SessionKind::Puretone);
    conductive_right(&mut session);
    enter(&mut session, 1000, ThresholdField::AirLeft, 20.0);
    assert_eq!(session.provisional_diagnosis.left, "Minimal Hearing Loss");

    apply(
        &mut session,
        SessionEvent::DiagnosisFocused {
            field: DiagnosisField::Puretone,
            ear: Ear::Right,
        },
    );
    enter(&mut session, 500, ThresholdField::AirRight, 90.0);
    enter(&mut session, 1000, ThresholdField::AirLeft, 60.0);

    assert_eq!(
        session.diagnosis_overrides.right,
        OverrideState::ManuallyOverridden
    );
    assert_eq!(session.provisional_diagnosis.right, "Mild Conductive Hearing Loss");
    assert_eq!(session.provisional_diagnosis.left, "Moderately Severe Sensorineural Hearing Loss");
}

#[test]
fn edited_text_survives_recomputation() {
    let mut session = TestSession::new(None, SessionKind::Puretone);
    apply(
        &mut session,
        SessionEvent::DiagnosisEdited {
            field: DiagnosisField::Puretone,
            ear: Ear::Left,
            text: "Refer for ABR".to_string(),
        },
    );
    enter(&mut session, 500, ThresholdField::AirLeft, 70.0);
    synchronize(&mut session);

    assert_eq!(session.provisional_diagnosis.left, "Refer for ABR");
    assert_eq!(session.pta.left, Some(70.0));
}

#[test]
fn impedance_inputs_fill_the_results_table() {
    let mut session = TestSession::new(None, SessionKind::Impedance);
    apply(
        &mut session,
        SessionEvent::ImpedanceEntered {
            ear: Ear::Right,
            measurement: measurement(0.0, 1.2, 1.0),
        },
    );
    apply(
        &mut session,
        SessionEvent::ImpedanceEntered {
            ear: Ear::Left,
            measurement: measurement(-250.0, 0.1, 1.0),
        },
    );

    let report = &session.report_data;
    assert_eq!(report.tymp.right.tymp_type, Some(TympType::A));
    assert_eq!(report.tymp.right.comp, Reading::Number(1.2));
    assert_eq!(report.interpretation.right, NO_PATHOLOGY);
    assert_eq!(report.reflex.right, ReflexRow::uniform(ReflexResult::Present));

    assert_eq!(report.tymp.left.tymp_type, Some(TympType::B));
    assert_eq!(report.tymp.left.mep, Reading::Number(-250.0));
    assert_eq!(report.interpretation.left, PATHOLOGY);
    assert_eq!(report.reflex.left, ReflexRow::uniform(ReflexResult::Absent));

    // No pure-tone data in an impedance-only session.
    assert_eq!(report.diagnosis.right, NO_DATA_AVAILABLE);
}

#[test]
fn clearing_the_tymp_type_resets_reflex_to_not_assessed() {
    let mut session = TestSession::new(None, SessionKind::Impedance);
    synchronize(&mut session);
    apply(
        &mut session,
        SessionEvent::TympTypeEdited {
            ear: Ear::Left,
            tymp_type: None,
        },
    );

    assert_eq!(session.report_data.interpretation.left, "");
    assert_eq!(
        session.report_data.reflex.left,
        ReflexRow::uniform(ReflexResult::NotAssessed)
    );
    assert_eq!(session.report_data.interpretation.right, NO_PATHOLOGY);
}

#[test]
fn combined_session_diagnoses_the_impedance_report_independently() {
    let mut session = TestSession::new(None, SessionKind::PuretoneImpedance);
    apply(
        &mut session,
        SessionEvent::DiagnosisFocused {
            field: DiagnosisField::Impedance,
            ear: Ear::Right,
        },
    );
    conductive_right(&mut session);

    // Pure-tone field still follows the classifier.
    assert_eq!(session.provisional_diagnosis.right, "Mild Conductive Hearing Loss");
    // Impedance field for the right ear was taken over; left follows.
    assert_eq!(session.report_data.diagnosis.right, NO_DATA_AVAILABLE);
    assert_eq!(session.report_data.diagnosis.left, "Unable to Determine");
}

#[test]
fn bone_entry_lateralizes_weber_and_later_edits_stick_until_next_entry() {
    let mut session = TestSession::new(None, SessionKind::Puretone);
    enter(&mut session, 500, ThresholdField::BoneRight, 10.0);
    assert_eq!(session.weber_test, WeberTest::lateralized(Ear::Right));

    apply(
        &mut session,
        SessionEvent::WeberMarked {
            frequency: 250,
            ear: Ear::Left,
            mark: LATERALIZED.to_string(),
        },
    );
    assert_eq!(session.weber_test.get(250).unwrap().left, LATERALIZED);

    enter(&mut session, 500, ThresholdField::BoneLeft, 10.0);
    assert_eq!(session.weber_test, WeberTest::blank());
}

#[test]
fn restored_diagnosis_counts_as_manual() {
    let mut session = TestSession::new(None, SessionKind::Puretone);
    session.provisional_diagnosis.right = "  Severe Mixed Hearing Loss ".to_string();
    session.provisional_diagnosis.left = INSUFFICIENT_DATA.to_string();

    restore_saved_diagnosis(&mut session);

    assert_eq!(session.provisional_diagnosis.right, "Severe Mixed Hearing Loss");
    assert!(session.diagnosis_overrides.right.is_overridden());
    assert_eq!(session.provisional_diagnosis.left, "");
    assert!(!session.diagnosis_overrides.left.is_overridden());

    conductive_right(&mut session);
    enter(&mut session, 500, ThresholdField::AirLeft, 30.0);
    assert_eq!(session.provisional_diagnosis.right, "Severe Mixed Hearing Loss");
    assert_eq!(session.provisional_diagnosis.left, "Mild Sensorineural Hearing Loss");
}

#[test]
fn reset_hands_fields_back_to_the_classifier() {
    let mut session = TestSession::new(None, SessionKind::PuretoneImpedance);
    conductive_right(&mut session);
    apply(
        &mut session,
        SessionEvent::DiagnosisEdited {
            field: DiagnosisField::Puretone,
            ear: Ear::Right,
            text: "custom".to_string(),
        },
    );
    apply(
        &mut session,
        SessionEvent::ImpedanceEntered {
            ear: Ear::Left,
            measurement: measurement(-250.0, 0.1, 1.0),
        },
    );

    apply(&mut session, SessionEvent::Reset);

    assert!(session.audiometry_data.iter().all(|r| r.air_right.is_none()));
    assert_eq!(session.pta.right, None);
    assert_eq!(session.provisional_diagnosis.right, "");
    assert_eq!(session.diagnosis_overrides.right, OverrideState::Auto);
    assert_eq!(session.impedance.left, ImpedanceMeasurement::default());
    assert_eq!(session.report_data.diagnosis.left, NO_DATA_AVAILABLE);
    assert_eq!(session.weber_test, WeberTest::blank());

    conductive_right(&mut session);
    assert_eq!(session.provisional_diagnosis.right, "Mild Conductive Hearing Loss");
}

#[test]
fn synchronize_is_idempotent() {
    let mut session = TestSession::new(None, SessionKind::PuretoneImpedance);
    conductive_right(&mut session);
    synchronize(&mut session);
    let first = serde_json::to_value(&session).unwrap();
    synchronize(&mut session);
    let second = serde_json::to_value(&session).unwrap();
    assert_eq!(first, second);
}

#[test]
fn threshold_for_unlisted_frequency_adds_a_row_in_order() {
    let mut session = TestSession::new(None, SessionKind::Puretone);
    session.audiometry_data.retain(|r| r.frequency != 1500);
    enter(&mut session, 1500, ThresholdField::AirRight, 25.0);

    let freqs: Vec<u32> = session.audiometry_data.iter().map(|r| r.frequency).collect();
    assert_eq!(freqs, vec![250, 500, 1000, 1500, 2000, 3000, 4000, 6000, 8000]);
    assert_eq!(session.row(1500).unwrap().air_right, Some(25.0));
}
