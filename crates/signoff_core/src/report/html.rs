//! Printable HTML formatter for `ReportDocument`.
//!
//! The section order, column set and fallback strings form the printed
//! compliance record; keep them stable.

use super::{AttendeeRow, ReportDocument};
use crate::model::attendee::AttendanceStatus;

const REPORT_STYLES: &str = r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #1f2937; background: white; padding: 40px; font-size: 14px; }
    .header { text-align: center; margin-bottom: 40px; border-bottom: 3px solid #2563eb; padding-bottom: 20px; }
    .header h1 { font-size: 28px; font-weight: bold; color: #1f2937; margin-bottom: 8px; }
    .header .subtitle { font-size: 16px; color: #6b7280; margin-bottom: 12px; }
    .header .generated { font-size: 12px; color: #9ca3af; }
    .meeting-details { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; margin-bottom: 30px; background: #f8fafc; padding: 20px; border-radius: 8px; border: 1px solid #e5e7eb; }
    .detail-item { display: flex; flex-direction: column; }
    .detail-label { font-size: 12px; font-weight: 600; color: #6b7280; text-transform: uppercase; letter-spacing: 0.5px; margin-bottom: 4px; }
    .detail-value { font-size: 16px; font-weight: 500; color: #1f2937; }
    .summary-stats { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; margin-bottom: 30px; }
    .stat-card { background: white; border: 1px solid #e5e7eb; border-radius: 8px; padding: 16px; text-align: center; }
    .stat-number { font-size: 24px; font-weight: bold; color: #2563eb; margin-bottom: 4px; }
    .stat-label { font-size: 12px; color: #6b7280; font-weight: 500; }
    .attendance-table { width: 100%; border-collapse: collapse; margin-bottom: 30px; background: white; border-radius: 8px; overflow: hidden; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1); }
    .attendance-table th { background: #f3f4f6; padding: 16px 12px; text-align: left; font-weight: 600; font-size: 14px; color: #374151; border-bottom: 2px solid #e5e7eb; }
    .cell { padding: 12px; border-bottom: 1px solid #f3f4f6; vertical-align: middle; }
    .number-cell { text-align: center; font-weight: 600; background: #f8fafc; width: 60px; }
    .name-cell { font-weight: 500; min-width: 200px; }
    .status-cell { text-align: center; font-weight: 500; min-width: 150px; }
    .status-cell.signed { color: #059669; }
    .status-cell.unsigned { color: #dc2626; }
    .status-cell.absent { color: #dc2626; font-style: italic; }
    .date-cell { text-align: center; color: #6b7280; width: 120px; }
    .absent-row { background: #fef2f2; }
    .absent-row .cell { border-bottom-color: #fecaca; }
    .footer { margin-top: 40px; padding-top: 20px; border-top: 1px solid #e5e7eb; font-size: 12px; color: #6b7280; line-height: 1.5; }
    .footer p { margin-bottom: 8px; }
    .compliance-note { background: #fffbeb; border: 1px solid #fbbf24; border-radius: 6px; padding: 12px; margin-top: 16px; }
    .compliance-note strong { color: #92400e; }
    @media print {
      body { padding: 20px; }
      .header h1 { font-size: 24px; }
      .meeting-details { break-inside: avoid; }
      .attendance-table { break-inside: avoid; }
    }
"#;

/// Renders the complete printable HTML page.
pub fn render_html(doc: &ReportDocument) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("  <title>{}</title>\n", escape_html(doc.title)));
    html.push_str(&format!("  <style>{}  </style>\n", REPORT_STYLES));
    html.push_str("</head>\n<body>\n");

    html.push_str("  <div class=\"header\">\n");
    html.push_str(&format!("    <h1>{}</h1>\n", escape_html(doc.title)));
    html.push_str(&format!(
        "    <div class=\"subtitle\">{}</div>\n",
        escape_html(doc.subtitle)
    ));
    html.push_str(&format!(
        "    <div class=\"generated\">Generated on {}</div>\n",
        escape_html(&doc.generated_on)
    ));
    html.push_str("  </div>\n");

    html.push_str("  <div class=\"meeting-details\">\n");
    for field in &doc.details {
        html.push_str("    <div class=\"detail-item\">\n");
        html.push_str(&format!(
            "      <div class=\"detail-label\">{}</div>\n",
            escape_html(field.label)
        ));
        html.push_str(&format!(
            "      <div class=\"detail-value\">{}</div>\n",
            escape_html(&field.value)
        ));
        html.push_str("    </div>\n");
    }
    html.push_str("  </div>\n");

    html.push_str("  <div class=\"summary-stats\">\n");
    for card in &doc.summary {
        html.push_str("    <div class=\"stat-card\">\n");
        html.push_str(&format!("      <div class=\"stat-number\">{}</div>\n", card.value));
        html.push_str(&format!(
            "      <div class=\"stat-label\">{}</div>\n",
            escape_html(card.label)
        ));
        html.push_str("    </div>\n");
    }
    html.push_str("  </div>\n");

    html.push_str("  <table class=\"attendance-table\">\n    <thead>\n      <tr>\n");
    for column in doc.columns {
        html.push_str(&format!("        <th>{}</th>\n", escape_html(column)));
    }
    html.push_str("      </tr>\n    </thead>\n    <tbody>\n");
    for row in &doc.rows {
        render_row(&mut html, row);
    }
    html.push_str("    </tbody>\n  </table>\n");

    html.push_str("  <div class=\"footer\">\n");
    for note in &doc.footer {
        html.push_str(&format!(
            "    <p><strong>{}</strong> {}</p>\n",
            escape_html(note.heading),
            escape_html(note.text)
        ));
    }
    html.push_str("    <div class=\"compliance-note\">\n");
    html.push_str(&format!(
        "      <p><strong>{}</strong> {}</p>\n",
        escape_html(doc.compliance_note.heading),
        escape_html(doc.compliance_note.text)
    ));
    html.push_str("    </div>\n  </div>\n</body>\n</html>\n");

    html
}

fn render_row(html: &mut String, row: &AttendeeRow) {
    let (row_class, status_class) = match row.status {
        AttendanceStatus::Signed => ("", "signed"),
        AttendanceStatus::NotSigned => ("", "unsigned"),
        AttendanceStatus::Absent(_) => (" class=\"absent-row\"", "absent"),
    };

    html.push_str(&format!("      <tr{row_class}>\n"));
    html.push_str(&format!(
        "        <td class=\"cell number-cell\">{}</td>\n",
        row.number
    ));
    html.push_str(&format!(
        "        <td class=\"cell name-cell\">{}</td>\n",
        escape_html(&row.name)
    ));
    html.push_str(&format!(
        "        <td class=\"cell status-cell {status_class}\">{}</td>\n",
        escape_html(&row.status_label())
    ));
    html.push_str(&format!(
        "        <td class=\"cell date-cell\">{}</td>\n",
        escape_html(&row.date)
    ));
    html.push_str("      </tr>\n");
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
