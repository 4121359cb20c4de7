//! Datos iniciales
//!
//! Si el catálogo está vacío se cargan cinco ciudades de México y cuatro
//! operadores de prueba. Las inserciones pasan por los escritores auditados.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::models::{OperatorData, PlaceData};
use crate::repositories::{Audited, OperatorListing, Stores};
use crate::utils::errors::AppResult;

const SEED_ACTOR: &str = "seed";

fn date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

fn place(name: &str, address: &str, latitude: Decimal, longitude: Decimal) -> PlaceData {
    PlaceData {
        address: Some(address.to_string()),
        latitude: Some(latitude),
        longitude: Some(longitude),
        ..PlaceData::named(name)
    }
}

pub fn seed_places() -> Vec<PlaceData> {
    vec![
        place(
            "Ciudad de México",
            "Centro Histórico, Ciudad de México",
            Decimal::new(194326, 4),
            Decimal::new(-991332, 4),
        ),
        place(
            "Guadalajara",
            "Centro de Guadalajara, Jalisco",
            Decimal::new(206597, 4),
            Decimal::new(-1033496, 4),
        ),
        place(
            "Monterrey",
            "Centro de Monterrey, Nuevo León",
            Decimal::new(256866, 4),
            Decimal::new(-1003161, 4),
        ),
        place(
            "Puebla",
            "Centro Histórico, Puebla",
            Decimal::new(190414, 4),
            Decimal::new(-982063, 4),
        ),
        place(
            "Cancún",
            "Zona Hotelera, Cancún, Quintana Roo",
            Decimal::new(211619, 4),
            Decimal::new(-868515, 4),
        ),
    ]
}

struct SeedOperator<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
    employee_id: &'a str,
    license_number: &'a str,
    license_valid_days: i64,
    date_of_birth: (i32, u32, u32),
    hire_date: (i32, u32, u32),
    address: &'a str,
    emergency_contact: &'a str,
    emergency_phone: &'a str,
}

impl SeedOperator<'_> {
    fn into_data(self, now: DateTime<Utc>) -> OperatorData {
        let (by, bm, bd) = self.date_of_birth;
        let (hy, hm, hd) = self.hire_date;
        OperatorData {
            email: Some(self.email.to_string()),
            phone: Some(self.phone.to_string()),
            employee_id: Some(self.employee_id.to_string()),
            license_number: Some(self.license_number.to_string()),
            license_expiry_date: Some(now + Duration::days(self.license_valid_days)),
            date_of_birth: date(by, bm, bd),
            hire_date: date(hy, hm, hd),
            address: Some(self.address.to_string()),
            emergency_contact: Some(self.emergency_contact.to_string()),
            emergency_phone: Some(self.emergency_phone.to_string()),
            ..OperatorData::new(self.first_name, self.last_name)
        }
    }
}

pub fn seed_operators(now: DateTime<Utc>) -> Vec<OperatorData> {
    let operators = [
        SeedOperator {
            first_name: "Juan",
            last_name: "Pérez González",
            email: "juan.perez@transport.com",
            phone: "+52 55 1234 5678",
            employee_id: "EMP001",
            license_number: "LIC12345678",
            license_valid_days: 730,
            date_of_birth: (1985, 5, 15),
            hire_date: (2020, 1, 15),
            address: "Calle Principal 123, Ciudad de México",
            emergency_contact: "María Pérez",
            emergency_phone: "+52 55 8765 4321",
        },
        SeedOperator {
            first_name: "Ana",
            last_name: "García López",
            email: "ana.garcia@transport.com",
            phone: "+52 33 2345 6789",
            employee_id: "EMP002",
            license_number: "LIC87654321",
            license_valid_days: 1095,
            date_of_birth: (1990, 8, 22),
            hire_date: (2021, 3, 10),
            address: "Avenida Reforma 456, Guadalajara",
            emergency_contact: "Carlos García",
            emergency_phone: "+52 33 9876 5432",
        },
        SeedOperator {
            first_name: "Luis",
            last_name: "Martínez Rodríguez",
            email: "luis.martinez@transport.com",
            phone: "+52 81 3456 7890",
            employee_id: "EMP003",
            license_number: "LIC11223344",
            license_valid_days: 365,
            date_of_birth: (1982, 12, 3),
            hire_date: (2019, 7, 20),
            address: "Boulevard Norte 789, Monterrey",
            emergency_contact: "Elena Martínez",
            emergency_phone: "+52 81 1122 3344",
        },
        SeedOperator {
            first_name: "Carmen",
            last_name: "Hernández Silva",
            email: "carmen.hernandez@transport.com",
            phone: "+52 22 4567 8901",
            employee_id: "EMP004",
            license_number: "LIC55667788",
            license_valid_days: 182,
            date_of_birth: (1988, 4, 18),
            hire_date: (2022, 1, 5),
            address: "Calle 16 de Septiembre 321, Puebla",
            emergency_contact: "Roberto Hernández",
            emergency_phone: "+52 22 5566 7788",
        },
    ];

    operators.into_iter().map(|o| o.into_data(now)).collect()
}

/// Cargar los datos iniciales si no hay lugares ni operadores.
///
/// Devuelve `true` si se insertaron datos.
pub async fn seed_if_empty(stores: &Stores) -> AppResult<bool> {
    let has_places = stores.places.count_places().await? > 0;
    let has_operators = !stores
        .operators
        .list_operators(OperatorListing::All)
        .await?
        .is_empty();
    if has_places || has_operators {
        info!("🌱 Catálogo con datos, se omite la carga inicial");
        return Ok(false);
    }

    let actor = Some(SEED_ACTOR.to_string());
    let places = Audited::new(stores.place_writer.clone(), actor.clone());
    for data in seed_places() {
        places.create(&data).await?;
    }

    let operators = Audited::new(stores.operator_writer.clone(), actor);
    for data in seed_operators(Utc::now()) {
        operators.create(&data).await?;
    }

    info!("🌱 Datos iniciales cargados: 5 lugares y 4 operadores");
    Ok(true)
}
