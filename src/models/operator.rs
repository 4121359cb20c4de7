//! Modelo de Operator
//!
//! Catálogo de operadores que pueden realizar viajes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::audit::AuditFields;
use super::Entity;

/// Estado de un operador
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum OperatorStatus {
    #[default]
    Active = 1,
    Inactive = 2,
    Suspended = 3,
    OnLeave = 4,
}

impl From<OperatorStatus> for i32 {
    fn from(value: OperatorStatus) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for OperatorStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(OperatorStatus::Active),
            2 => Ok(OperatorStatus::Inactive),
            3 => Ok(OperatorStatus::Suspended),
            4 => Ok(OperatorStatus::OnLeave),
            other => Err(format!("Estado de operador inválido: {}", other)),
        }
    }
}

/// Columnas editables de un operador
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OperatorData {
    pub first_name: String,
    pub last_name: String,
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
}

impl OperatorData {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            phone: None,
            employee_id: None,
            license_number: None,
            license_expiry_date: None,
            status: OperatorStatus::default(),
            date_of_birth: None,
            hire_date: None,
            address: None,
            emergency_contact: None,
            emergency_phone: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == OperatorStatus::Active
    }
}

/// Campos únicos (cuando están presentes) de un operador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorUniqueField {
    Email,
    EmployeeId,
    LicenseNumber,
}

impl OperatorUniqueField {
    pub fn column(&self) -> &'static str {
        match self {
            OperatorUniqueField::Email => "email",
            OperatorUniqueField::EmployeeId => "employee_id",
            OperatorUniqueField::LicenseNumber => "license_number",
        }
    }

    pub fn value_of<'a>(&self, data: &'a OperatorData) -> Option<&'a str> {
        match self {
            OperatorUniqueField::Email => data.email.as_deref(),
            OperatorUniqueField::EmployeeId => data.employee_id.as_deref(),
            OperatorUniqueField::LicenseNumber => data.license_number.as_deref(),
        }
    }

    pub fn duplicate_message(&self) -> &'static str {
        match self {
            OperatorUniqueField::Email => "Ya existe un operador con este email",
            OperatorUniqueField::EmployeeId => "Ya existe un operador con este ID de empleado",
            OperatorUniqueField::LicenseNumber => "Ya existe un operador con este número de licencia",
        }
    }
}

/// Operator persistido
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Operator {
    pub id: i32,
    #[sqlx(flatten)]
    pub data: OperatorData,
    #[sqlx(flatten)]
    pub audit: AuditFields,
}

impl Entity for Operator {
    type Data = OperatorData;
    const RESOURCE: &'static str = "Operador";

    fn id(&self) -> i32 {
        self.id
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn assemble(id: i32, data: OperatorData, audit: AuditFields) -> Self {
        Self { id, data, audit }
    }
}
