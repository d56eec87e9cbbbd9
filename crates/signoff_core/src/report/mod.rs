//! Attendance report assembly.
//!
//! # Responsibility
//! - Gather report data (filtering, partitioning, statistics) once.
//! - Build a structured document model from that data.
//! - Hand the model to output formatters (`html`, `text`).
//!
//! # Invariants
//! - Unfilled slots never appear in any report output.
//! - Row order is roster order; absent rows are flagged, not relocated.
//! - Printed document and email body read counts from the same
//!   `RosterStats`, so they cannot disagree.

pub mod html;
pub mod text;

use crate::model::attendee::{AttendanceStatus, AttendeeSlot};
use crate::model::meeting::MeetingInfo;
use crate::roster::stats::{compute_stats, RosterStats};
use chrono::NaiveDateTime;

pub const REPORT_TITLE: &str = "Safety Meeting Attendance Report";
pub const REPORT_SUBTITLE: &str = "Official Documentation of Safety Training Participation";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const DEFAULT_TOPIC: &str = "General Safety Training";
pub const TABLE_COLUMNS: [&str; 4] = ["#", "Employee Name", "Attendance Status", "Date"];

const FOOTER_NOTES: [FooterNote; 3] = [
    FooterNote {
        heading: "Document Integrity:",
        text: "This attendance record was generated digitally and contains electronic signatures where applicable.",
    },
    FooterNote {
        heading: "Compliance:",
        text: "This document serves as official record of safety training attendance as required by workplace safety regulations.",
    },
    FooterNote {
        heading: "Contact:",
        text: "For questions regarding this attendance record, please contact the meeting facilitator listed above.",
    },
];

const COMPLIANCE_NOTE: FooterNote = FooterNote {
    heading: "Important:",
    text: "This digital attendance record is legally equivalent to paper-based sign-in sheets when properly maintained and stored according to company policy.",
};

/// Format-independent report input.
#[derive(Debug, Clone)]
pub struct ReportData<'a> {
    pub meeting: &'a MeetingInfo,
    pub stats: RosterStats,
    /// Filled slots in roster order.
    pub filled: Vec<&'a AttendeeSlot>,
}

impl<'a> ReportData<'a> {
    /// Filled, present slots in roster order.
    pub fn present(&self) -> impl Iterator<Item = &'a AttendeeSlot> + '_ {
        self.filled.iter().copied().filter(|slot| slot.is_present)
    }

    /// Filled, absent slots in roster order.
    pub fn absent(&self) -> impl Iterator<Item = &'a AttendeeSlot> + '_ {
        self.filled.iter().copied().filter(|slot| !slot.is_present)
    }
}

/// Filters, partitions and counts the roster for report output.
pub fn gather_report<'a>(meeting: &'a MeetingInfo, slots: &'a [AttendeeSlot]) -> ReportData<'a> {
    ReportData {
        meeting,
        stats: compute_stats(slots, meeting),
        filled: slots.iter().filter(|slot| slot.is_filled()).collect(),
    }
}

/// One labelled value of the meeting details block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

/// One cell of the four-cell summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCard {
    pub value: usize,
    pub label: &'static str,
}

/// One line of the attendee table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeRow {
    /// 1-based position among filled slots.
    pub number: usize,
    pub name: String,
    pub status: AttendanceStatus,
    pub date: String,
}

impl AttendeeRow {
    /// Text of the status column.
    pub fn status_label(&self) -> String {
        status_label(&self.status)
    }
}

/// Fixed notice paragraph in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterNote {
    pub heading: &'static str,
    pub text: &'static str,
}

/// Structured printable report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub generated_on: String,
    pub details: Vec<DetailField>,
    pub summary: [SummaryCard; 4],
    pub columns: [&'static str; 4],
    pub rows: Vec<AttendeeRow>,
    pub footer: [FooterNote; 3],
    pub compliance_note: FooterNote,
}

impl ReportDocument {
    /// Builds the document for `data`, stamped with `generated_at`.
    pub fn build(data: &ReportData<'_>, generated_at: NaiveDateTime) -> Self {
        let meeting = data.meeting;
        let stats = &data.stats;

        let details = vec![
            DetailField {
                label: "Meeting Date",
                value: long_meeting_date(meeting),
            },
            DetailField {
                label: "Location",
                value: or_fallback(&meeting.location, NOT_SPECIFIED),
            },
            DetailField {
                label: "Facilitator",
                value: or_fallback(&meeting.facilitator, NOT_SPECIFIED),
            },
            DetailField {
                label: "Safety Topic",
                value: or_fallback(&meeting.topic, DEFAULT_TOPIC),
            },
        ];

        let summary = [
            SummaryCard {
                value: meeting.expected_count as usize,
                label: "Expected",
            },
            SummaryCard {
                value: stats.signed_count,
                label: "Signed",
            },
            SummaryCard {
                value: stats.unsigned_present_count(),
                label: "Present (Unsigned)",
            },
            SummaryCard {
                value: stats.absent_count,
                label: "Absent",
            },
        ];

        let rows = data
            .filled
            .iter()
            .enumerate()
            .map(|(index, slot)| AttendeeRow {
                number: index + 1,
                name: slot.name.clone(),
                status: slot.status(),
                date: slot.date.clone(),
            })
            .collect();

        Self {
            title: REPORT_TITLE,
            subtitle: REPORT_SUBTITLE,
            generated_on: generated_at.format("%A, %B %-d, %Y at %I:%M %p").to_string(),
            details,
            summary,
            columns: TABLE_COLUMNS,
            rows,
            footer: FOOTER_NOTES,
            compliance_note: COMPLIANCE_NOTE,
        }
    }
}

/// Status column text: `✓ Signed`, `⚠ Not Signed` or `Absent: <reason>`.
pub fn status_label(status: &AttendanceStatus) -> String {
    match status {
        AttendanceStatus::Signed => "✓ Signed".to_string(),
        AttendanceStatus::NotSigned => "⚠ Not Signed".to_string(),
        AttendanceStatus::Absent(reason) => {
            format!("Absent: {}", reason.as_deref().unwrap_or(NOT_SPECIFIED))
        }
    }
}

/// Long-form meeting date, e.g. `Wednesday, March 5, 2025`.
///
/// Dates that do not parse as `YYYY-MM-DD` are printed as typed.
pub fn long_meeting_date(meeting: &MeetingInfo) -> String {
    meeting
        .parsed_date()
        .map(|date| date.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|| meeting.date.clone())
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{gather_report, long_meeting_date, status_label, ReportDocument};
    use crate::model::attendee::{AttendanceStatus, AttendeeSlot, SlotId, SlotPatch};
    use crate::model::meeting::MeetingInfo;
    use chrono::NaiveDate;

    fn generated_at() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 5)
            .and_then(|date| date.and_hms_opt(14, 7, 0))
            .expect("valid timestamp")
    }

    #[test]
    fn details_use_fallbacks_for_blank_fields() {
        let meeting = MeetingInfo::new("2025-03-05");
        let data = gather_report(&meeting, &[]);
        let doc = ReportDocument::build(&data, generated_at());

        let values: Vec<&str> = doc.details.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(
            values,
            vec![
                "Wednesday, March 5, 2025",
                "Not specified",
                "Not specified",
                "General Safety Training"
            ]
        );
        assert_eq!(doc.generated_on, "Wednesday, March 5, 2025 at 02:07 PM");
    }

    #[test]
    fn rows_skip_unfilled_slots_and_number_sequentially() {
        let meeting = MeetingInfo::new("2025-03-05");
        let mut slots: Vec<AttendeeSlot> = (1..=4)
            .map(|n| AttendeeSlot::new(SlotId::from_position(n), "2025-03-05"))
            .collect();
        slots[1].apply(SlotPatch::name("Bob"));
        slots[2].apply(SlotPatch::presence(false));
        slots[3].apply(SlotPatch::name("Dee"));

        let data = gather_report(&meeting, &slots);
        let doc = ReportDocument::build(&data, generated_at());
        let rows: Vec<(usize, &str)> = doc
            .rows
            .iter()
            .map(|row| (row.number, row.name.as_str()))
            .collect();
        assert_eq!(rows, vec![(1, "Bob"), (2, "Dee")]);
    }

    #[test]
    fn status_labels_match_printed_contract() {
        assert_eq!(status_label(&AttendanceStatus::Signed), "✓ Signed");
        assert_eq!(status_label(&AttendanceStatus::NotSigned), "⚠ Not Signed");
        assert_eq!(
            status_label(&AttendanceStatus::Absent(Some("Sick".to_string()))),
            "Absent: Sick"
        );
        assert_eq!(
            status_label(&AttendanceStatus::Absent(None)),
            "Absent: Not specified"
        );
    }

    #[test]
    fn unparsable_meeting_date_is_printed_verbatim() {
        let meeting = MeetingInfo::new("sometime in March");
        assert_eq!(long_meeting_date(&meeting), "sometime in March");
    }
}
