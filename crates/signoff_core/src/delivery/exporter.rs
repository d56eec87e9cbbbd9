//! Report export use-cases: generate, share and email.

use super::{
    MailAdapter, MailDraft, PageSize, PrintAdapter, PrintJob, ReportFile, ShareAdapter,
    ShareOptions, DeliveryChannel,
};
use crate::error::{SignoffError, SignoffResult};
use crate::model::attendee::AttendeeSlot;
use crate::model::meeting::MeetingInfo;
use crate::report::html::render_html;
use crate::report::text::{email_subject, render_email_body};
use crate::report::{gather_report, ReportDocument};
use chrono::Local;
use log::{error, info, warn};
use std::cell::Cell;

/// Result of an email export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailOutcome {
    pub draft: MailDraft,
    /// Set when the report could not be attached; the mail went out without it.
    pub attachment_error: Option<String>,
}

/// Export orchestration over platform adapters.
///
/// Single-threaded by construction (`!Sync`); the busy flag rejects
/// re-entrant render requests made while an adapter call is in flight.
pub struct ReportExporter<P: PrintAdapter, S: ShareAdapter, M: MailAdapter> {
    printer: P,
    sharer: S,
    mailer: M,
    busy: Cell<bool>,
}

struct BusyGuard<'a>(&'a Cell<bool>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<P: PrintAdapter, S: ShareAdapter, M: MailAdapter> ReportExporter<P, S, M> {
    pub fn new(printer: P, sharer: S, mailer: M) -> Self {
        Self {
            printer,
            sharer,
            mailer,
            busy: Cell::new(false),
        }
    }

    /// Returns whether a report render is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Renders the report and prints it to a file.
    ///
    /// # Errors
    /// - `ExportBusy` while another render is in flight.
    /// - `ReportGenerationFailed` when the print adapter fails.
    pub fn generate(
        &self,
        meeting: &MeetingInfo,
        slots: &[AttendeeSlot],
    ) -> SignoffResult<ReportFile> {
        if self.busy.replace(true) {
            warn!("event=report_generate module=delivery status=rejected reason=busy");
            return Err(SignoffError::ExportBusy);
        }
        let _guard = BusyGuard(&self.busy);

        let data = gather_report(meeting, slots);
        let document = ReportDocument::build(&data, Local::now().naive_local());
        let job = PrintJob {
            html: render_html(&document),
            page: Some(PageSize::LETTER),
        };

        info!(
            "event=report_generate module=delivery status=start rows={}",
            document.rows.len()
        );
        match self.printer.print_to_file(&job) {
            Ok(file) => {
                info!("event=report_generate module=delivery status=ok");
                Ok(file)
            }
            Err(err) => {
                error!(
                    "event=report_generate module=delivery status=error error_code=report_generation_failed error={}",
                    err
                );
                Err(SignoffError::ReportGenerationFailed(err))
            }
        }
    }

    /// Generates the report and presents the share sheet for it.
    pub fn share(
        &self,
        meeting: &MeetingInfo,
        slots: &[AttendeeSlot],
    ) -> SignoffResult<ReportFile> {
        let file = self.generate(meeting, slots)?;

        if !self.sharer.is_available() {
            warn!("event=report_share module=delivery status=error error_code=adapter_unavailable");
            return Err(SignoffError::AdapterUnavailable(DeliveryChannel::Share));
        }

        self.sharer
            .share(&file, &ShareOptions::for_report(&file))
            .map_err(|err| {
                error!(
                    "event=report_share module=delivery status=error error_code=delivery_failed error={}",
                    err
                );
                SignoffError::DeliveryFailed(err)
            })?;
        info!("event=report_share module=delivery status=ok");
        Ok(file)
    }

    /// Composes the report email to `recipients`.
    ///
    /// A failed render does not abort the email; the draft is sent without
    /// attachment and the failure is returned in the outcome.
    pub fn email(
        &self,
        meeting: &MeetingInfo,
        slots: &[AttendeeSlot],
        recipients: &[String],
    ) -> SignoffResult<EmailOutcome> {
        let data = gather_report(meeting, slots);
        let body = render_email_body(&data);

        let (attachments, attachment_error) = match self.generate(meeting, slots) {
            Ok(file) => (vec![file.uri], None),
            Err(SignoffError::ExportBusy) => return Err(SignoffError::ExportBusy),
            Err(err) => {
                warn!(
                    "event=report_email module=delivery status=degraded error_code={}",
                    err.code()
                );
                (Vec::new(), Some(err.to_string()))
            }
        };

        if !self.mailer.is_available() {
            warn!("event=report_email module=delivery status=error error_code=adapter_unavailable");
            return Err(SignoffError::AdapterUnavailable(DeliveryChannel::Mail));
        }

        let draft = MailDraft {
            recipients: recipients.to_vec(),
            subject: email_subject(meeting),
            body,
            attachments,
        };
        self.mailer.compose(&draft).map_err(|err| {
            error!(
                "event=report_email module=delivery status=error error_code=delivery_failed error={}",
                err
            );
            SignoffError::DeliveryFailed(err)
        })?;
        info!(
            "event=report_email module=delivery status=ok recipients={} attachments={}",
            draft.recipients.len(),
            draft.attachments.len()
        );

        Ok(EmailOutcome {
            draft,
            attachment_error,
        })
    }
}
