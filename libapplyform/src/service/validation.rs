//! Required-field checks
//!
//! Presence only: a field passes when its element exists and its value is
//! not blank after trimming. No format checks are made on emails, phones or
//! dates.

use crate::form::FormFields;
use crate::types::FieldId;

/// A field that must be filled in, with the label shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredField {
    pub id: FieldId,
    pub label: &'static str,
}

/// Required fields in the order they are checked
pub const REQUIRED_FIELDS: [RequiredField; 7] = [
    RequiredField {
        id: FieldId::WorkArea,
        label: "พื้นที่ที่ต้องการปฏิบัติงาน",
    },
    RequiredField {
        id: FieldId::Role1,
        label: "ตำแหน่งที่ 1",
    },
    RequiredField {
        id: FieldId::FirstName,
        label: "ชื่อ",
    },
    RequiredField {
        id: FieldId::LastName,
        label: "นามสกุล",
    },
    RequiredField {
        id: FieldId::Dob,
        label: "วันเกิด",
    },
    RequiredField {
        id: FieldId::Phone,
        label: "เบอร์โทรศัพท์",
    },
    RequiredField {
        id: FieldId::Email,
        label: "E-Mail",
    },
];

/// The first required field that is absent, empty, or only whitespace
///
/// Free-text values are trimmed before they are stored, so a blank value
/// would otherwise end up as an empty required field.
pub fn first_missing<F: FormFields + ?Sized>(form: &F) -> Option<RequiredField> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .find(|field| form.value(field.id).map_or(true, |v| v.trim().is_empty()))
}

/// Message shown when `field` is missing
pub fn missing_field_message(field: &RequiredField) -> String {
    format!("กรุณากรอก: {}", field.label)
}
