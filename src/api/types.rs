use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

///
/// A citizen as returned to callers. The linked credential is embedded (or null when
/// the citizen has none).
///
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Citizen {
    pub id: String,
    pub run: i64,
    pub dv: String,
    pub nombre: String,
    pub a_paterno: String,
    pub a_materno: String,
    pub fecha_registro: DateTime<Utc>,
    pub telefono: i64,
    pub credencial: Option<Credential>,
}

///
/// A credential as returned to callers.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: String,
    pub correo: String,
    pub contrasenia: String,
    pub intentos_fallidos: i32,
    pub activo: bool,
}

///
/// The body of a create-citizen request. Everything is optional at the wire level so
/// the validation rules can produce a specific error for each missing field.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCitizen {
    pub run: Option<i64>,
    pub dv: Option<String>,
    pub nombre: Option<String>,
    pub a_paterno: Option<String>,
    pub a_materno: Option<String>,
    pub fecha_registro: Option<DateTime<Utc>>,
    pub telefono: Option<i64>,
    pub credencial: Option<NewCredential>,
}

///
/// The body of a create-credential request (also nested inside NewCitizen).
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCredential {
    pub correo: Option<String>,
    pub contrasenia: Option<String>,
    pub intentos_fallidos: Option<i32>,
    pub activo: Option<bool>,
}

///
/// The body of an update-citizen request. Only the fields present are applied to the
/// stored citizen, anything omitted keeps its current value.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenPatch {
    pub run: Option<i64>,
    pub dv: Option<String>,
    pub nombre: Option<String>,
    pub a_paterno: Option<String>,
    pub a_materno: Option<String>,
    pub fecha_registro: Option<DateTime<Utc>>,
    pub telefono: Option<i64>,
}

///
/// The body of an update-credential request.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPatch {
    pub correo: Option<String>,
    pub contrasenia: Option<String>,
    pub activo: Option<bool>,
}

///
/// The body of a login request.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Login {
    pub correo: String,
    pub contrasenia: String,
}
