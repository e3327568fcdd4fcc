pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use crate::model::citizen::CitizenDB;
use crate::model::credential::CredentialDB;
use crate::utils::errors::CivitasError;

pub mod prelude {
    // Collection names.
    pub const CITIZENS:    &str = "Citizens";
    pub const CREDENTIALS: &str = "Credentials";

    // Field names.
    pub const CITIZEN_ID:    &str = "citizen_id";
    pub const RUN:           &str = "run";
    pub const TELEFONO:      &str = "telefono";
    pub const CREDENCIAL_ID: &str = "credencial_id";
    pub const CREDENTIAL_ID: &str = "credential_id";
    pub const CORREO:        &str = "correo";
}

///
/// Every way the services touch persistent storage.
///
/// The server runs against MongoDB, the integration tests run against an in-memory
/// implementation with the same unique-key behaviour.
///
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn ping(&self) -> Result<(), CivitasError>;

    async fn find_citizens(&self) -> Result<Vec<CitizenDB>, CivitasError>;
    async fn find_citizen(&self, citizen_id: &str) -> Result<Option<CitizenDB>, CivitasError>;
    async fn find_citizen_by_run(&self, run: i64) -> Result<Option<CitizenDB>, CivitasError>;
    async fn find_citizen_by_telefono(&self, telefono: i64) -> Result<Option<CitizenDB>, CivitasError>;
    async fn find_citizen_by_credencial(&self, credential_id: &str) -> Result<Option<CitizenDB>, CivitasError>;

    ///
    /// Insert the citizen, or replace it if the citizen_id is already present.
    ///
    /// Writing a run or telefono held by a different citizen is a duplicate key
    /// violation.
    ///
    async fn save_citizen(&self, citizen: &CitizenDB) -> Result<(), CivitasError>;

    ///
    /// Returns the number of citizens deleted (zero or one).
    ///
    async fn delete_citizen(&self, citizen_id: &str) -> Result<u64, CivitasError>;

    async fn find_credentials(&self) -> Result<Vec<CredentialDB>, CivitasError>;
    async fn find_credential(&self, credential_id: &str) -> Result<Option<CredentialDB>, CivitasError>;
    async fn find_credential_by_correo(&self, correo: &str) -> Result<Option<CredentialDB>, CivitasError>;

    ///
    /// Insert the credential, or replace it if the credential_id is already present.
    ///
    /// Writing a correo held by a different credential is a duplicate key violation.
    ///
    async fn save_credential(&self, credential: &CredentialDB) -> Result<(), CivitasError>;

    ///
    /// Returns the number of credentials deleted (zero or one).
    ///
    async fn delete_credential(&self, credential_id: &str) -> Result<u64, CivitasError>;
}
