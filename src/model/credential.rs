use crate::api;
use serde::{Deserialize, Serialize};

///
/// A citizen's login credential as persisted in MongoDB. The correo is unique across
/// all credentials.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CredentialDB {
    pub credential_id: String,
    pub correo: String,
    pub contrasenia: String,
    pub intentos_fallidos: i32,
    pub activo: bool,
}

impl From<CredentialDB> for api::types::Credential {
    fn from(credential: CredentialDB) -> Self {
        api::types::Credential {
            id: credential.credential_id,
            correo: credential.correo,
            contrasenia: credential.contrasenia,
            intentos_fallidos: credential.intentos_fallidos,
            activo: credential.activo,
        }
    }
}
