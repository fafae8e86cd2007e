use serde::{Deserialize, Serialize};

/// Raw submission as it arrives from the browser form or the JSON API.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

impl AttendanceForm {
    /// Trims both fields; `None` when either is empty afterwards.
    pub fn normalized(&self) -> Option<AttendanceRecord> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        if name.is_empty() || phone.is_empty() {
            return None;
        }

        Some(AttendanceRecord {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }
}

/// A validated record, ready to be appended to the worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub name: String,
    pub phone: String,
}

impl AttendanceRecord {
    pub fn into_row(self) -> Vec<String> {
        vec![self.name, self.phone]
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub name: String,
    pub date: String,
    pub worksheet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_trims_both_fields() {
        let form = AttendanceForm {
            name: "  Ali Hasan ".to_string(),
            phone: " +65 8123 4567  ".to_string(),
        };

        let record = form.normalized().expect("record");
        assert_eq!(record.name, "Ali Hasan");
        assert_eq!(record.phone, "+65 8123 4567");
        assert_eq!(
            record.into_row(),
            vec!["Ali Hasan".to_string(), "+65 8123 4567".to_string()]
        );
    }

    #[test]
    fn normalized_rejects_blank_name() {
        let form = AttendanceForm {
            name: "   ".to_string(),
            phone: "123".to_string(),
        };
        assert!(form.normalized().is_none());
    }

    #[test]
    fn normalized_rejects_empty_phone() {
        let form = AttendanceForm {
            name: "Ali".to_string(),
            phone: String::new(),
        };
        assert!(form.normalized().is_none());
    }

    #[test]
    fn normalized_keeps_values_as_entered() {
        let form = AttendanceForm {
            name: "O'Brien, Jr.".to_string(),
            phone: "not-a-number".to_string(),
        };

        let record = form.normalized().expect("record");
        assert_eq!(record.name, "O'Brien, Jr.");
        assert_eq!(record.phone, "not-a-number");
    }
}
