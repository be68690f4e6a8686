//! Form-field and notification surfaces
//!
//! The submission and export flows never touch a concrete UI. They read and
//! write fields through [`FormFields`] and talk to the user through
//! [`Notifier`], so the same flows drive the command-line tools and tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::FieldId;

/// Access to the application form's input elements by id
pub trait FormFields {
    /// Current value of a field; `None` if the form has no such element
    fn value(&self, id: FieldId) -> Option<String>;

    /// Overwrite a field's value. Setting an absent element is a no-op.
    fn set_value(&mut self, id: FieldId, value: &str);

    /// Move input focus to a field
    fn focus(&mut self, id: FieldId);

    /// File name (not path) of the attached resume, if any
    fn attached_file_name(&self) -> Option<String>;

    /// Drop the attached resume
    fn clear_attachment(&mut self);
}

/// User-facing notifications
pub trait Notifier {
    /// A notice the user must acknowledge
    fn alert(&mut self, message: &str);

    /// Replace the status line
    fn set_status(&mut self, message: &str);

    fn clear_status(&mut self);
}

/// Form held in memory; every field starts present and empty
#[derive(Debug, Clone)]
pub struct MemoryForm {
    values: HashMap<FieldId, String>,
    focused: Option<FieldId>,
    attachment: Option<PathBuf>,
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryForm {
    pub fn new() -> Self {
        Self {
            values: FieldId::ALL
                .iter()
                .map(|id| (*id, String::new()))
                .collect(),
            focused: None,
            attachment: None,
        }
    }

    /// Builder-style setter
    pub fn with(mut self, id: FieldId, value: &str) -> Self {
        self.set_value(id, value);
        self
    }

    /// Attach a resume file; only its name is ever read
    pub fn attach(&mut self, path: impl AsRef<Path>) {
        self.attachment = Some(path.as_ref().to_path_buf());
    }

    /// Remove an element from the form entirely
    pub fn remove_field(&mut self, id: FieldId) {
        self.values.remove(&id);
    }

    /// Field that last received focus
    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }
}

impl FormFields for MemoryForm {
    fn value(&self, id: FieldId) -> Option<String> {
        self.values.get(&id).cloned()
    }

    fn set_value(&mut self, id: FieldId, value: &str) {
        if let Some(slot) = self.values.get_mut(&id) {
            *slot = value.to_string();
        }
    }

    fn focus(&mut self, id: FieldId) {
        self.focused = Some(id);
    }

    fn attached_file_name(&self) -> Option<String> {
        self.attachment
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }

    fn clear_attachment(&mut self) {
        self.attachment = None;
    }
}

/// Notifier that keeps everything it is told, for inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub alerts: Vec<String>,
    pub status: Option<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn set_status(&mut self, message: &str) {
        self.status = Some(message.to_string());
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Terminal notifier: alerts to stderr, status lines to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    /// Suppress status lines (machine-readable output mode)
    pub quiet: bool,
}

impl Notifier for ConsoleNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn set_status(&mut self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    fn clear_status(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_form_starts_with_all_fields_empty() {
        let form = MemoryForm::new();
        for id in FieldId::ALL {
            assert_eq!(form.value(id).as_deref(), Some(""), "field {}", id);
        }
        assert_eq!(form.focused(), None);
        assert_eq!(form.attached_file_name(), None);
    }

    #[test]
    fn test_removed_field_is_absent_and_ignores_writes() {
        let mut form = MemoryForm::new();
        form.remove_field(FieldId::Phone);
        form.set_value(FieldId::Phone, "0812345678");
        assert_eq!(form.value(FieldId::Phone), None);
    }

    #[test]
    fn test_attachment_exposes_file_name_only() {
        let mut form = MemoryForm::new();
        form.attach("/home/user/documents/resume-2024.pdf");
        assert_eq!(form.attached_file_name().as_deref(), Some("resume-2024.pdf"));

        form.clear_attachment();
        assert_eq!(form.attached_file_name(), None);
    }

    #[test]
    fn test_recording_notifier() {
        let mut notifier = RecordingNotifier::new();
        notifier.alert("first");
        notifier.set_status("saved");
        assert_eq!(notifier.alerts, vec!["first".to_string()]);
        assert_eq!(notifier.status.as_deref(), Some("saved"));

        notifier.clear_status();
        assert_eq!(notifier.status, None);
    }
}
