use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    /// Clinic-assigned patient number.
    pub patient_id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub location: String,
    pub created_at: jiff::Timestamp,
}

impl Patient {
    /// Reject records the intake form would not accept: blank text fields
    /// or an age outside 0–120.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("patient_id", &self.patient_id),
            ("name", &self.name),
            ("gender", &self.gender),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::MissingField(field.to_string()));
            }
        }
        if self.age > 120 {
            return Err(CoreError::InvalidAge(self.age));
        }
        Ok(())
    }
}

/// Audiologist details printed at the foot of every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct AudiologistProfile {
    pub name: String,
    /// Professional registration number.
    pub reg_no: String,
    pub qualification: String,
    pub phone_number: String,
    pub address: String,
}

impl AudiologistProfile {
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.reg_no,
            &self.qualification,
            &self.phone_number,
            &self.address,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
    }
}
