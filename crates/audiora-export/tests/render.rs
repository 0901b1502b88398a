use audiora_core::models::audiogram::ThresholdField;
use audiora_core::models::ear::Ear;
use audiora_core::models::impedance::ImpedanceMeasurement;
use audiora_core::models::patient::{AudiologistProfile, Patient};
use audiora_core::models::report_format::{
    ImpedanceSections, PuretoneSections, ReportKind, ReportLayout,
};
use audiora_core::models::session::{SessionKind, TestSession};
use audiora_core::numeric::Reading;
use audiora_diagnosis::{SessionEvent, apply};
use audiora_export::context::ReportContext;
use audiora_export::render::{render_report, render_template};

fn patient() -> Patient {
    Patient {
        id: uuid::Uuid::new_v4(),
        patient_id: "P-0042".to_string(),
        name: "Asha Menon".to_string(),
        age: 54,
        gender: "Female".to_string(),
        location: "Kochi".to_string(),
        created_at: jiff::Timestamp::now(),
    }
}

fn audiologist() -> AudiologistProfile {
    AudiologistProfile {
        name: "Dr. R. Iyer".to_string(),
        reg_no: "A12345".to_string(),
        qualification: "MASLP".to_string(),
        phone_number: "98470 00000".to_string(),
        address: "Clinic Road".to_string(),
    }
}

fn conductive_session() -> TestSession {
    let mut session = TestSession::new(None, SessionKind::PuretoneImpedance);
    for (frequency, air, bone) in [(500, 30.0, 5.0), (1000, 35.0, 10.0), (2000, 40.0, 15.0)] {
        for (field, value) in [(ThresholdField::AirRight, air), (ThresholdField::BoneRight, bone)] {
            apply(
                &mut session,
                SessionEvent::ThresholdEntered {
                    frequency,
                    field,
                    value: Some(value),
                },
            );
        }
    }
    session.recommendations = "Hearing aid trial\n\nReview in 6 months".to_string();
    session
}

#[test]
fn puretone_report_carries_diagnosis_and_thresholds() {
    let session = conductive_session();
    let ctx = ReportContext::build(
        &session,
        ReportKind::Puretone,
        Some(&patient()),
        Some(&audiologist()),
        None,
    )
    .unwrap();

    let text = render_report(&ctx).unwrap();
    assert!(text.contains("# Pure Tone Audiometry Report"));
    assert!(text.contains("**Right Ear:** Mild Conductive Hearing Loss"));
    assert!(text.contains("**PTA:** 35 dBHL"));
    assert!(text.contains("| 500 | 30 |  | 5 |  |"));
    assert!(text.contains("**Name:** Asha Menon"));
    assert!(text.contains("- Review in 6 months"));
    assert!(text.contains("Reg. No. A12345"));
}

#[test]
fn front_page_is_separated_by_a_page_break() {
    let session = conductive_session();
    let ctx = ReportContext::build(&session, ReportKind::Puretone, None, None, None).unwrap();

    let text = render_report(&ctx).unwrap();
    let summary = text.find("# Audiological Summary").unwrap();
    let brk = text.find("\n---\n").unwrap();
    let main = text.find("# Pure Tone Audiometry Report").unwrap();
    assert!(summary < brk && brk < main);
}

#[test]
fn disabled_sections_are_left_out() {
    let session = conductive_session();
    let layout = ReportLayout::Puretone(PuretoneSections {
        front_page: false,
        weber_test: false,
        speech_audiometry: false,
        left_ear_graph: false,
        ..PuretoneSections::default()
    });
    let ctx = ReportContext::build(
        &session,
        ReportKind::Puretone,
        Some(&patient()),
        None,
        Some(&layout),
    )
    .unwrap();

    let text = render_report(&ctx).unwrap();
    assert!(!text.contains("Audiological Summary"));
    assert!(!text.contains("Weber Test"));
    assert!(!text.contains("Speech Audiometry"));
    assert!(!text.contains("Left Ear Audiogram"));
    assert!(text.contains("Right Ear Audiogram"));
}

#[test]
fn layout_of_the_other_kind_is_ignored() {
    let mut session = conductive_session();
    session.report_sections.weber_test = false;
    let layout = ReportLayout::Impedance(ImpedanceSections::default());

    let ctx = ReportContext::build(&session, ReportKind::Puretone, None, None, Some(&layout))
        .unwrap();
    assert!(!ctx.section_enabled("weber_test"));
    assert!(ctx.section_enabled("right_ear_graph"));
    assert!(!ctx.section_enabled("acoustic_reflex"));
}

#[test]
fn missing_patient_and_blank_audiologist_skip_their_sections() {
    let session = conductive_session();
    let ctx = ReportContext::build(
        &session,
        ReportKind::Puretone,
        None,
        Some(&AudiologistProfile::default()),
        None,
    )
    .unwrap();

    assert!(ctx.audiologist.is_none());
    let text = render_report(&ctx).unwrap();
    assert!(!text.contains("Patient Information"));
    assert!(!text.contains("## Audiologist"));
}

#[test]
fn disabled_recommendations_are_not_printed() {
    let mut session = conductive_session();
    session.recommendations_enabled = false;
    let ctx = ReportContext::build(&session, ReportKind::Puretone, None, None, None).unwrap();

    assert!(ctx.recommendations.is_empty());
    assert!(!render_report(&ctx).unwrap().contains("## Recommendations"));
}

#[test]
fn impedance_report_uses_its_own_diagnosis_and_recommendations() {
    let mut session = conductive_session();
    apply(
        &mut session,
        SessionEvent::ImpedanceEntered {
            ear: Ear::Left,
            measurement: ImpedanceMeasurement {
                pressure: Reading::Number(-250.0),
                volume: Reading::Number(1.0),
                compliance: Reading::Number(0.8),
            },
        },
    );
    let ctx = ReportContext::build(&session, ReportKind::Impedance, None, None, None).unwrap();

    assert_eq!(ctx.recommendations, vec!["ENT Review", "Follow up"]);
    assert_eq!(ctx.tymp.left.tymp_type, "C");

    let text = render_report(&ctx).unwrap();
    assert!(text.contains("# Impedance Audiometry Report"));
    assert!(text.contains("| Left | 0.8 | 1 | -250 | C |"));
    assert!(text.contains("| 500 | Present | Absent |"));
    assert!(text.contains("**Left Ear:** Indication of Middle ear pathology."));
    assert!(text.contains("**Right Ear:** Mild Conductive Hearing Loss"));
    assert!(text.contains("- Follow up"));
}

#[test]
fn custom_template_sees_the_context() {
    let session = conductive_session();
    let ctx = ReportContext::build(&session, ReportKind::Puretone, None, None, None).unwrap();

    let text = render_template("custom.md", "{{ format_name }}: {{ diagnosis.right }}", &ctx).unwrap();
    assert_eq!(text, "Default (Full): Mild Conductive Hearing Loss");
}

#[test]
fn bad_template_is_a_parse_error() {
    let session = conductive_session();
    let ctx = ReportContext::build(&session, ReportKind::Puretone, None, None, None).unwrap();

    let err = render_template("broken.md", "{% if %}", &ctx).unwrap_err();
    assert!(matches!(err, audiora_export::error::ExportError::TemplateParse(_)));
}
