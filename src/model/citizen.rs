use crate::api;
use serde::{Deserialize, Serialize};
use super::credential::CredentialDB;

///
/// A registered citizen as persisted in MongoDB.
///
/// The run is the national identity number and the dv its check digit. Both the run
/// and telefono are unique across all citizens.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CitizenDB {
    pub citizen_id: String,
    pub run: i64,
    pub dv: String,
    pub nombre: String,
    pub a_paterno: String,
    pub a_materno: String,
    pub fecha_registro: bson::DateTime,
    pub telefono: i64,
    pub credencial_id: Option<String>,
}

impl From<(CitizenDB, Option<CredentialDB>)> for api::types::Citizen {
    fn from((citizen, credencial): (CitizenDB, Option<CredentialDB>)) -> Self {
        api::types::Citizen {
            id: citizen.citizen_id,
            run: citizen.run,
            dv: citizen.dv,
            nombre: citizen.nombre,
            a_paterno: citizen.a_paterno,
            a_materno: citizen.a_materno,
            fecha_registro: citizen.fecha_registro.to_chrono(),
            telefono: citizen.telefono,
            credencial: credencial.map(api::types::Credential::from),
        }
    }
}
