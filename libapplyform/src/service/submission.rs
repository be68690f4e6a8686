//! Submission flow
//!
//! One call to [`SubmissionService::submit`] either rejects the form (a
//! required field is empty) or accepts it: the record is stored locally,
//! optionally forwarded, and the personal fields are cleared.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::validation::{first_missing, missing_field_message};
use crate::age::compute_age_on;
use crate::error::Result;
use crate::form::{FormFields, Notifier};
use crate::forwarder::{spawn_forward, Forwarder};
use crate::store::ApplicationStore;
use crate::types::{ApplicationRecord, FieldId};

/// Status after a local save with no endpoint configured
pub const STATUS_SAVED: &str = "ส่งใบสมัครเรียบร้อย (บันทึกไว้ในเครื่องนี้)";

/// Status after a local save when the record is also being sent
pub const STATUS_SAVED_AND_SENT: &str =
    "ส่งใบสมัครเรียบร้อย (บันทึกไว้ในเครื่องนี้ และส่งไปยังเซิร์ฟเวอร์ที่ตั้งค่าไว้)";

/// Fields cleared after an accepted submission. Work area and role
/// selections stay so the next application can reuse them.
pub const RESET_FIELDS: [FieldId; 11] = [
    FieldId::FirstName,
    FieldId::LastName,
    FieldId::Nickname,
    FieldId::Dob,
    FieldId::StartDate,
    FieldId::ExpectedSalary,
    FieldId::Email,
    FieldId::Phone,
    FieldId::Address,
    FieldId::Nationality,
    FieldId::Age,
];

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// A required field was empty; nothing was stored
    Rejected { field: FieldId, label: &'static str },
    /// The record was stored; `forward` is the background delivery, if any
    Accepted {
        record: ApplicationRecord,
        forward: Option<JoinHandle<()>>,
    },
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }
}

#[derive(Clone)]
pub struct SubmissionService {
    store: Arc<Mutex<ApplicationStore>>,
    forwarder: Option<Arc<dyn Forwarder>>,
}

impl SubmissionService {
    pub fn new(store: Arc<Mutex<ApplicationStore>>, forwarder: Option<Arc<dyn Forwarder>>) -> Self {
        Self { store, forwarder }
    }

    pub fn forwarding_enabled(&self) -> bool {
        self.forwarder.is_some()
    }

    /// Validate, store, forward, and reset
    ///
    /// Only a failed local write is returned as an error; in that case the
    /// form is left untouched so the user can retry.
    pub async fn submit<F, N>(&self, form: &mut F, notifier: &mut N) -> Result<SubmissionOutcome>
    where
        F: FormFields + ?Sized,
        N: Notifier + ?Sized,
    {
        notifier.clear_status();

        if let Some(missing) = first_missing(form) {
            debug!("Rejected submission: {} is empty", missing.id);
            notifier.alert(&missing_field_message(&missing));
            form.focus(missing.id);
            return Ok(SubmissionOutcome::Rejected {
                field: missing.id,
                label: missing.label,
            });
        }

        let record = build_record(form, Utc::now());

        self.store.lock().await.append(record.clone()).await?;
        info!(
            "Saved application for {} ({} / {})",
            record.submitted_at, record.work_area, record.role1
        );

        let forward = self
            .forwarder
            .as_ref()
            .map(|forwarder| spawn_forward(Arc::clone(forwarder), record.clone()));

        notifier.set_status(if forward.is_some() {
            STATUS_SAVED_AND_SENT
        } else {
            STATUS_SAVED
        });

        reset_personal_fields(form);

        Ok(SubmissionOutcome::Accepted { record, forward })
    }

    /// Recompute the derived age field after the date of birth changed
    pub fn refresh_age<F: FormFields + ?Sized>(form: &mut F) {
        let dob = form.value(FieldId::Dob).unwrap_or_default();
        let age = compute_age_on(&dob, Local::now().date_naive());
        form.set_value(FieldId::Age, &age);
    }
}

/// Build a record from the form's current values at time `now`
///
/// Free-text fields are trimmed; select and date fields are taken verbatim.
pub fn build_record<F: FormFields + ?Sized>(form: &F, now: DateTime<Utc>) -> ApplicationRecord {
    let raw = |id: FieldId| form.value(id).unwrap_or_default();
    let trimmed = |id: FieldId| raw(id).trim().to_string();

    let dob = raw(FieldId::Dob);
    let age = compute_age_on(&dob, now.with_timezone(&Local).date_naive());

    ApplicationRecord {
        submitted_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        work_area: raw(FieldId::WorkArea),
        role1: raw(FieldId::Role1),
        role2: raw(FieldId::Role2),
        first_name: trimmed(FieldId::FirstName),
        last_name: trimmed(FieldId::LastName),
        nickname: trimmed(FieldId::Nickname),
        dob,
        age,
        start_date: raw(FieldId::StartDate),
        expected_salary: raw(FieldId::ExpectedSalary),
        email: trimmed(FieldId::Email),
        phone: trimmed(FieldId::Phone),
        address: trimmed(FieldId::Address),
        military: raw(FieldId::Military),
        nationality: trimmed(FieldId::Nationality),
        tattoo: raw(FieldId::Tattoo),
        driver_license: raw(FieldId::DriverLicense),
        resume_name: form.attached_file_name().unwrap_or_default(),
    }
}

fn reset_personal_fields<F: FormFields + ?Sized>(form: &mut F) {
    for id in RESET_FIELDS {
        form.set_value(id, "");
    }
    form.clear_attachment();
}
