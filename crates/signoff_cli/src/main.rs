//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `signoff_core` linkage.
//! - Render a fixed sample report for checking printed output without a
//!   device.
//!
//! Usage: `signoff [ping | sample [html|email] [--out <dir>]]`

use chrono::NaiveDate;
use signoff_core::report::html::render_html;
use signoff_core::report::text::{email_subject, render_email_body};
use signoff_core::{
    HtmlFilePrinter, MeetingField, MeetingSession, Point, PrintAdapter, PrintJob, ReportDocument,
    SignoffError, SlotId, SlotPatch,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        None | Some("ping") => {
            println!("signoff_core ping={}", signoff_core::ping());
            println!("signoff_core version={}", signoff_core::core_version());
            Ok(())
        }
        Some("sample") => run_sample(&args[1..]),
        Some(other) => {
            eprintln!("unknown command `{other}`; expected `ping` or `sample`");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error[{}]: {err}", err.code());
            ExitCode::FAILURE
        }
    }
}

fn run_sample(args: &[String]) -> Result<(), SignoffError> {
    let mut format = "html";
    let mut out_dir: Option<&str> = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "html" | "email" => format = arg.as_str(),
            "--out" => {
                out_dir = Some(iter.next().map(String::as_str).ok_or_else(|| {
                    SignoffError::InvalidInput("--out needs a directory".to_string())
                })?);
            }
            other => {
                return Err(SignoffError::InvalidInput(format!(
                    "unexpected argument `{other}`"
                )))
            }
        }
    }

    let session = sample_session()?;
    match format {
        "email" => {
            println!("Subject: {}\n", email_subject(session.meeting()));
            print!("{}", render_email_body(&session.report_data()));
        }
        _ => {
            let generated_at = NaiveDate::from_ymd_opt(2025, 3, 5)
                .and_then(|date| date.and_hms_opt(9, 0, 0))
                .ok_or_else(|| SignoffError::InvalidInput("bad sample timestamp".to_string()))?;
            let document = ReportDocument::build(&session.report_data(), generated_at);
            let html = render_html(&document);
            match out_dir {
                Some(dir) => {
                    let file = HtmlFilePrinter::new(dir)
                        .print_to_file(&PrintJob {
                            html,
                            page: Some(signoff_core::PageSize::LETTER),
                        })
                        .map_err(SignoffError::ReportGenerationFailed)?;
                    println!("{}", file.uri);
                }
                None => print!("{html}"),
            }
        }
    }
    Ok(())
}

/// Three attendees: Alice signed, Bob present unsigned, Carol absent.
fn sample_session() -> Result<MeetingSession, SignoffError> {
    let date = NaiveDate::from_ymd_opt(2025, 3, 5)
        .ok_or_else(|| SignoffError::InvalidInput("bad sample date".to_string()))?;
    let mut session = MeetingSession::new(date);
    session.set_field(MeetingField::Location, "Warehouse B");
    session.set_field(MeetingField::Facilitator, "Jordan Lee");
    session.set_field(MeetingField::Topic, "Forklift Safety");
    session.set_expected_count(3);
    session.generate_roster();

    let (alice, bob, carol) = (
        SlotId::from_position(1),
        SlotId::from_position(2),
        SlotId::from_position(3),
    );
    session.update_slot(&alice, SlotPatch::name("Alice"));
    session.update_slot(&bob, SlotPatch::name("Bob"));
    session.update_slot(&carol, SlotPatch::name("Carol"));
    session.update_slot(&carol, SlotPatch::presence(false));
    session.update_slot(&carol, SlotPatch::absent_reason("Sick"));

    let mut pad = session
        .open_signature(&alice)
        .ok_or_else(|| SignoffError::InvalidInput("sample slot missing".to_string()))?;
    pad.session_mut().begin_stroke(Point::new(10.0, 10.0));
    pad.session_mut().extend_stroke(Point::new(20.0, 20.0));
    pad.session_mut().end_stroke();
    let capture = pad
        .save_at(1_741_165_200_000)
        .map_err(|err| SignoffError::from(err.into_parts().1))?;
    session.apply_signature(capture);

    Ok(session)
}
