//! Utilidades de validación
//!
//! Funciones helper usadas por los DTOs (vía `#[validate(custom = ...)]`)
//! y por los controladores para normalizar datos de entrada.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Tamaño de página por defecto
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Tamaño de página máximo aceptado en listados de lugares
pub const MAX_PAGE_SIZE: i64 = 100;

/// Validar que un string no esté vacío ni sea solo espacios
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar latitud GPS
pub fn validate_latitude(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::from(-90) || *value > Decimal::from(90) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &value.to_string());
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud GPS
pub fn validate_longitude(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::from(-180) || *value > Decimal::from(180) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &value.to_string());
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que una distancia no sea negativa
pub fn validate_distance(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Los campos opcionales vacíos se tratan como ausentes
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Normalizar parámetros de paginación: página mínima 1, tamaño entre 1 y 100
pub fn normalize_pagination(page: Option<i64>, page_size: Option<i64>) -> (i64, i64) {
    let page = page.filter(|p| *p >= 1).unwrap_or(1);
    let page_size = page_size
        .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
        .unwrap_or(DEFAULT_PAGE_SIZE);
    (page, page_size)
}

/// Filas a saltar para llegar a `page`; satura en `i64::MAX` con páginas enormes
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(page_size)
}
