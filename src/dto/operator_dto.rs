use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Operator, OperatorData, OperatorStatus};
use crate::utils::validation::{normalize_optional, validate_not_blank};

// Request para crear o reemplazar un operador
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OperatorRequest {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub first_name: String,
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub last_name: String,
    #[validate(email, length(max = 200))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 50))]
    pub employee_id: Option<String>,
    #[validate(length(max = 50))]
    pub license_number: Option<String>,
    #[serde(default)]
    pub license_expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<OperatorStatus>,
    #[serde(default)]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default)]
    pub hire_date: Option<DateTime<Utc>>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 200))]
    pub emergency_contact: Option<String>,
    #[validate(length(max = 20))]
    pub emergency_phone: Option<String>,
}

impl OperatorRequest {
    pub fn into_data(self) -> OperatorData {
        OperatorData {
            email: normalize_optional(self.email),
            phone: normalize_optional(self.phone),
            employee_id: normalize_optional(self.employee_id),
            license_number: normalize_optional(self.license_number),
            license_expiry_date: self.license_expiry_date,
            status: self.status.unwrap_or_default(),
            date_of_birth: self.date_of_birth,
            hire_date: self.hire_date,
            address: normalize_optional(self.address),
            emergency_contact: normalize_optional(self.emergency_contact),
            emergency_phone: normalize_optional(self.emergency_phone),
            ..OperatorData::new(self.first_name.trim(), self.last_name.trim())
        }
    }
}

// Response de operador
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub employee_id: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry_date: Option<DateTime<Utc>>,
    pub status: OperatorStatus,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub hire_date: Option<DateTime<Utc>>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

impl From<Operator> for OperatorResponse {
    fn from(operator: Operator) -> Self {
        let full_name = operator.data.full_name();
        let data = operator.data;

        Self {
            id: operator.id,
            first_name: data.first_name,
            last_name: data.last_name,
            full_name,
            email: data.email,
            phone: data.phone,
            employee_id: data.employee_id,
            license_number: data.license_number,
            license_expiry_date: data.license_expiry_date,
            status: data.status,
            date_of_birth: data.date_of_birth,
            hire_date: data.hire_date,
            address: data.address,
            emergency_contact: data.emergency_contact,
            emergency_phone: data.emergency_phone,
            created_at: operator.audit.created_at,
            modified_at: operator.audit.modified_at,
            created_by: operator.audit.created_by,
            modified_by: operator.audit.modified_by,
        }
    }
}
