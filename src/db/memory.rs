use parking_lot::Mutex;
use async_trait::async_trait;
use std::collections::HashMap;
use crate::db::Datastore;
use crate::model::citizen::CitizenDB;
use crate::model::credential::CredentialDB;
use crate::utils::errors::{CivitasError, ErrorCode};

///
/// A Datastore holding everything in two in-process maps.
///
/// It enforces the same unique keys as the MongoDB indexes, so the integration tests
/// can exercise the duplicate-key paths without a running database.
///
#[derive(Default)]
pub struct MemoryDatastore {
    citizens: Mutex<HashMap<String, CitizenDB>>,
    credentials: Mutex<HashMap<String, CredentialDB>>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        MemoryDatastore::default()
    }
}

#[async_trait]
impl Datastore for MemoryDatastore {
    async fn ping(&self) -> Result<(), CivitasError> {
        Ok(())
    }

    async fn find_citizens(&self) -> Result<Vec<CitizenDB>, CivitasError> {
        let lock = self.citizens.lock();

        // Keep the order stable across calls.
        let mut citizens: Vec<CitizenDB> = lock.values().cloned().collect();
        citizens.sort_by(|a, b| a.citizen_id.cmp(&b.citizen_id));

        Ok(citizens)
    }

    async fn find_citizen(&self, citizen_id: &str) -> Result<Option<CitizenDB>, CivitasError> {
        Ok(self.citizens.lock().get(citizen_id).cloned())
    }

    async fn find_citizen_by_run(&self, run: i64) -> Result<Option<CitizenDB>, CivitasError> {
        Ok(self.citizens.lock().values().find(|c| c.run == run).cloned())
    }

    async fn find_citizen_by_telefono(&self, telefono: i64) -> Result<Option<CitizenDB>, CivitasError> {
        Ok(self.citizens.lock().values().find(|c| c.telefono == telefono).cloned())
    }

    async fn find_citizen_by_credencial(&self, credential_id: &str) -> Result<Option<CitizenDB>, CivitasError> {
        Ok(self.citizens.lock().values()
            .find(|c| c.credencial_id.as_deref() == Some(credential_id))
            .cloned())
    }

    async fn save_citizen(&self, citizen: &CitizenDB) -> Result<(), CivitasError> {
        let mut lock = self.citizens.lock();

        if lock.values().any(|c| c.citizen_id != citizen.citizen_id && c.run == citizen.run) {
            return Err(ErrorCode::DuplicateKeyViolation
                .with_msg(&format!("E11000 duplicate key error: idx_run dup key: {}", citizen.run)))
        }

        if lock.values().any(|c| c.citizen_id != citizen.citizen_id && c.telefono == citizen.telefono) {
            return Err(ErrorCode::DuplicateKeyViolation
                .with_msg(&format!("E11000 duplicate key error: idx_telefono dup key: {}", citizen.telefono)))
        }

        lock.insert(citizen.citizen_id.clone(), citizen.clone());
        Ok(())
    }

    async fn delete_citizen(&self, citizen_id: &str) -> Result<u64, CivitasError> {
        match self.citizens.lock().remove(citizen_id) {
            Some(_) => Ok(1),
            None => Ok(0),
        }
    }

    async fn find_credentials(&self) -> Result<Vec<CredentialDB>, CivitasError> {
        let lock = self.credentials.lock();

        let mut credentials: Vec<CredentialDB> = lock.values().cloned().collect();
        credentials.sort_by(|a, b| a.credential_id.cmp(&b.credential_id));

        Ok(credentials)
    }

    async fn find_credential(&self, credential_id: &str) -> Result<Option<CredentialDB>, CivitasError> {
        Ok(self.credentials.lock().get(credential_id).cloned())
    }

    async fn find_credential_by_correo(&self, correo: &str) -> Result<Option<CredentialDB>, CivitasError> {
        Ok(self.credentials.lock().values().find(|c| c.correo == correo).cloned())
    }

    async fn save_credential(&self, credential: &CredentialDB) -> Result<(), CivitasError> {
        let mut lock = self.credentials.lock();

        if lock.values().any(|c| c.credential_id != credential.credential_id && c.correo == credential.correo) {
            return Err(ErrorCode::DuplicateKeyViolation
                .with_msg(&format!("E11000 duplicate key error: idx_correo dup key: {}", credential.correo)))
        }

        lock.insert(credential.credential_id.clone(), credential.clone());
        Ok(())
    }

    async fn delete_credential(&self, credential_id: &str) -> Result<u64, CivitasError> {
        match self.credentials.lock().remove(credential_id) {
            Some(_) => Ok(1),
            None => Ok(0),
        }
    }
}
