use chrono::NaiveDate;
use signoff_core::report::html::render_html;
use signoff_core::report::text::{email_subject, render_email_body};
use signoff_core::{
    gather_report, AttendanceStatus, MeetingField, MeetingSession, Point, ReportDocument, SlotId,
    SlotPatch,
};

fn meeting_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
}

/// Alice signed, Bob present without signature, Carol absent ("Sick").
fn three_attendee_session(expected: i64) -> MeetingSession {
    let mut session = MeetingSession::new(meeting_day());
    session.set_field(MeetingField::Location, "Warehouse B");
    session.set_field(MeetingField::Facilitator, "Jordan Lee");
    session.set_field(MeetingField::Topic, "Forklift Safety");
    session.set_expected_count(expected);
    session.generate_roster();

    let names = ["Alice", "Bob", "Carol"];
    for (index, name) in names.iter().enumerate() {
        session.update_slot(&SlotId::from_position(index + 1), SlotPatch::name(*name));
    }
    let carol = SlotId::from_position(3);
    session.toggle_presence(&carol);
    session.update_slot(&carol, SlotPatch::absent_reason("Sick"));

    let mut pad = session.open_signature(&SlotId::from_position(1)).unwrap();
    pad.session_mut().begin_stroke(Point::new(10.0, 10.0));
    pad.session_mut().extend_stroke(Point::new(20.0, 20.0));
    pad.session_mut().end_stroke();
    session.apply_signature(pad.save_at(1).unwrap()).unwrap();
    session
}

fn build(session: &MeetingSession) -> ReportDocument {
    let generated_at = meeting_day().and_hms_opt(14, 5, 0).unwrap();
    ReportDocument::build(&session.report_data(), generated_at)
}

#[test]
fn summary_and_rows_for_three_attendees() {
    let session = three_attendee_session(3);
    let doc = build(&session);

    let summary: Vec<(&str, usize)> = doc
        .summary
        .iter()
        .map(|card| (card.label, card.value))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Expected", 3),
            ("Signed", 1),
            ("Present (Unsigned)", 1),
            ("Absent", 1),
        ]
    );

    let rows: Vec<(usize, &str, String)> = doc
        .rows
        .iter()
        .map(|row| (row.number, row.name.as_str(), row.status_label()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "Alice", "✓ Signed".to_string()),
            (2, "Bob", "⚠ Not Signed".to_string()),
            (3, "Carol", "Absent: Sick".to_string()),
        ]
    );
    assert_eq!(doc.generated_on, "Wednesday, March 5, 2025 at 02:05 PM");
}

#[test]
fn unfilled_slots_never_reach_report_rows() {
    let mut session = three_attendee_session(6);
    // Slot 5 stays unnamed but is marked absent; slot 4 unnamed and present.
    session.toggle_presence(&SlotId::from_position(5));

    let doc = build(&session);
    assert_eq!(doc.rows.len(), 3);
    assert!(doc.rows.iter().all(|row| !row.name.trim().is_empty()));
    assert_eq!(doc.summary[0].value, 6);
    assert_eq!(doc.summary[3].value, 1);

    let data = gather_report(session.meeting(), session.slots());
    assert_eq!(data.filled.len(), 3);
    assert_eq!(data.present().count(), 2);
    assert_eq!(data.absent().count(), 1);
}

#[test]
fn html_lists_rows_in_roster_order() {
    let session = three_attendee_session(3);
    let html = render_html(&build(&session));

    let alice = html.find(">Alice<").unwrap();
    let bob = html.find(">Bob<").unwrap();
    let carol = html.find(">Carol<").unwrap();
    assert!(alice < bob && bob < carol);
    assert!(html.contains("Wednesday, March 5, 2025"));
    assert!(html.contains("Forklift Safety"));
    assert_eq!(html.matches("<tr class=\"absent-row\">").count(), 1);
}

#[test]
fn missing_metadata_uses_fallbacks() {
    let mut session = MeetingSession::new(meeting_day());
    session.set_field(MeetingField::Date, "next Tuesday");
    let doc = build(&session);

    let values: Vec<&str> = doc.details.iter().map(|field| field.value.as_str()).collect();
    assert_eq!(
        values,
        vec![
            "next Tuesday",
            "Not specified",
            "Not specified",
            "General Safety Training",
        ]
    );
}

#[test]
fn email_body_reads_the_same_counts() {
    let session = three_attendee_session(3);
    let body = render_email_body(&session.report_data());

    assert!(body.contains("• Present & Signed: 1"));
    assert!(body.contains("• Present but Not Signed: 1"));
    assert!(body.contains("• Absent: 1"));
    assert!(body.contains("• Total Recorded: 3/3"));
    assert!(body.contains("ATTENDEES PRESENT (2):"));
    assert!(body.contains("• Alice (Signed)"));
    assert!(body.contains("• Bob (Not Signed)"));
    assert!(body.contains("ABSENTEES (1):"));
    assert!(body.contains("• Carol - Sick"));

    assert_eq!(
        email_subject(session.meeting()),
        "Safety Meeting Attendance - Forklift Safety - 2025-03-05"
    );
}

#[test]
fn absent_status_carries_typed_reason() {
    let session = three_attendee_session(3);
    let carol = session.roster().slot(&SlotId::from_position(3)).unwrap();
    assert_eq!(
        carol.status(),
        AttendanceStatus::Absent(Some("Sick".to_string()))
    );
}

#[test]
fn whitespace_metadata_is_printed_as_typed() {
    let mut session = three_attendee_session(3);
    session.set_field(MeetingField::Location, " ");
    session.set_field(MeetingField::Topic, "  ");

    assert_eq!(session.stats().meeting_info_complete, 3);

    let doc = build(&session);
    assert_eq!(doc.details[1].value, " ");
    assert_eq!(doc.details[3].value, "  ");
    assert_eq!(
        email_subject(session.meeting()),
        "Safety Meeting Attendance -   - 2025-03-05"
    );
}
