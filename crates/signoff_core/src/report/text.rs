//! Plain-text formatter for the email body and subject.

use super::{ReportData, NOT_SPECIFIED};
use crate::model::meeting::MeetingInfo;

/// Subject topic used when the meeting has none.
pub const DEFAULT_SUBJECT_TOPIC: &str = "Safety Training";

/// `Safety Meeting Attendance - <topic> - <date>`.
pub fn email_subject(meeting: &MeetingInfo) -> String {
    let topic = if meeting.topic.is_empty() {
        DEFAULT_SUBJECT_TOPIC
    } else {
        meeting.topic.as_str()
    };
    format!("Safety Meeting Attendance - {topic} - {}", meeting.date)
}

/// Renders the email body from the same data as the printed report.
pub fn render_email_body(data: &ReportData<'_>) -> String {
    let meeting = data.meeting;
    let stats = &data.stats;
    let mut body = String::new();

    body.push_str("Safety Meeting Attendance Report\n\n");
    body.push_str("Meeting Details:\n");
    body.push_str(&format!("• Date: {}\n", meeting.date));
    body.push_str(&format!("• Location: {}\n", meeting.location));
    body.push_str(&format!("• Facilitator: {}\n", meeting.facilitator));
    body.push_str(&format!("• Topic: {}\n", meeting.topic));
    body.push_str(&format!("• Expected Attendees: {}\n\n", meeting.expected_count));

    body.push_str("ATTENDANCE SUMMARY:\n");
    body.push_str(&format!("• Present & Signed: {}\n", stats.signed_count));
    body.push_str(&format!(
        "• Present but Not Signed: {}\n",
        stats.unsigned_present_count()
    ));
    body.push_str(&format!("• Absent: {}\n", stats.absent_count));
    body.push_str(&format!(
        "• Total Recorded: {}/{}\n\n",
        stats.filled_names, meeting.expected_count
    ));

    if stats.present_count > 0 {
        body.push_str(&format!("ATTENDEES PRESENT ({}):\n", stats.present_count));
        for slot in data.present() {
            let status = if slot.is_signed() { "Signed" } else { "Not Signed" };
            body.push_str(&format!("• {} ({status})\n", slot.name));
        }
        body.push('\n');
    }

    if stats.absent_count > 0 {
        body.push_str(&format!("ABSENTEES ({}):\n", stats.absent_count));
        for slot in data.absent() {
            let reason = slot
                .absent_reason
                .as_deref()
                .filter(|reason| !reason.trim().is_empty())
                .unwrap_or(NOT_SPECIFIED);
            body.push_str(&format!("• {} - {reason}\n", slot.name));
        }
    }

    body
}

#[cfg(test)]
mod tests {
    use super::{email_subject, render_email_body};
    use crate::model::attendee::{AttendeeSlot, SlotId, SlotPatch};
    use crate::model::meeting::MeetingInfo;
    use crate::model::signature::SignatureBlob;
    use crate::report::gather_report;

    #[test]
    fn subject_falls_back_to_safety_training() {
        let mut meeting = MeetingInfo::new("2025-03-05");
        assert_eq!(
            email_subject(&meeting),
            "Safety Meeting Attendance - Safety Training - 2025-03-05"
        );
        meeting.topic = "Ladders".to_string();
        assert_eq!(
            email_subject(&meeting),
            "Safety Meeting Attendance - Ladders - 2025-03-05"
        );
    }

    #[test]
    fn empty_sections_are_omitted() {
        let meeting = MeetingInfo::new("2025-03-05");
        let body = render_email_body(&gather_report(&meeting, &[]));
        assert!(body.contains("• Total Recorded: 0/10"));
        assert!(!body.contains("ATTENDEES PRESENT"));
        assert!(!body.contains("ABSENTEES"));
    }

    #[test]
    fn body_lines_end_with_single_newlines() {
        let meeting = MeetingInfo::new("2025-03-05");
        let mut alice = AttendeeSlot::new(SlotId::from_position(1), "2025-03-05");
        alice.apply(SlotPatch::name("Alice"));
        alice.apply(SlotPatch::signature(SignatureBlob::from_raw(
            r#"{"paths":["M1.00,1.00 L2.00,2.00"],"timestamp":1}"#,
        )));
        let mut carol = AttendeeSlot::new(SlotId::from_position(2), "2025-03-05");
        carol.apply(SlotPatch::name("Carol"));
        carol.apply(SlotPatch::presence(false));
        carol.apply(SlotPatch::absent_reason("Sick"));

        let slots = [alice, carol];
        let body = render_email_body(&gather_report(&meeting, &slots));
        assert_eq!(
            body,
            "Safety Meeting Attendance Report\n\n\
             Meeting Details:\n\
             • Date: 2025-03-05\n\
             • Location: \n\
             • Facilitator: \n\
             • Topic: \n\
             • Expected Attendees: 10\n\n\
             ATTENDANCE SUMMARY:\n\
             • Present & Signed: 1\n\
             • Present but Not Signed: 0\n\
             • Absent: 1\n\
             • Total Recorded: 2/10\n\n\
             ATTENDEES PRESENT (1):\n\
             • Alice (Signed)\n\n\
             ABSENTEES (1):\n\
             • Carol - Sick\n"
        );
    }

    #[test]
    fn absentee_without_reason_reads_not_specified() {
        let meeting = MeetingInfo::new("2025-03-05");
        let mut slot = AttendeeSlot::new(SlotId::from_position(1), "2025-03-05");
        slot.apply(SlotPatch::name("Carol"));
        slot.apply(SlotPatch::presence(false));

        let body = render_email_body(&gather_report(&meeting, std::slice::from_ref(&slot)));
        assert!(body.contains("ABSENTEES (1):\n• Carol - Not specified\n"));
    }
}
