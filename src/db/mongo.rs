use std::fs;
use tracing::info;
use futures::StreamExt;
use async_trait::async_trait;
use crate::db::{Datastore, prelude::*};
use mongodb::error::ErrorKind;
use crate::model::citizen::CitizenDB;
use crate::model::credential::CredentialDB;
use crate::utils::errors::ErrorCode;
use crate::utils::errors::CivitasError;
use crate::utils::config::Configuration;
use mongodb::{Client, Database, bson::{Document, doc}, options::{ClientOptions, ReplaceOptions}};

///
/// Run any schema-like updates against MongoDB that haven't been run yet.
///
pub async fn update_mongo(db: &Database) -> Result<(), CivitasError> {
    create_init_indexes(db).await?;
    Ok(())
}

async fn create_init_indexes(db: &Database) -> Result<(), CivitasError> {
    // Note: the current driver doesn't yet support creating indexes on collections, so the dbcommand must be used instead.
    // https://docs.mongodb.com/manual/reference/command/createIndexes/#createindexes

    // The unique indexes are the last line of defence for the uniqueness rules - two
    // racing requests can both pass the service-level checks.
    db.run_command(doc! { "createIndexes": CITIZENS, "indexes": [
        { "key": { CITIZEN_ID: 1 }, "name": "idx_citizen_id", "unique": true },
        { "key": { RUN: 1 }, "name": "idx_run", "unique": true },
        { "key": { TELEFONO: 1 }, "name": "idx_telefono", "unique": true }] }, None).await?;
    db.run_command(doc! { "createIndexes": CREDENTIALS, "indexes": [
        { "key": { CREDENTIAL_ID: 1 }, "name": "idx_credential_id", "unique": true },
        { "key": { CORREO: 1 }, "name": "idx_correo", "unique": true }] }, None).await?;

    Ok(())
}

///
/// Indicates if the MongoDB error is from a duplicate key violation.
///
pub fn is_duplicate_err(err: &mongodb::error::Error) -> bool {
    let ec = err.clone();
    match *ec.kind {
        ErrorKind::Write(sub_err) => match sub_err {
            mongodb::error::WriteFailure::WriteError(we) => {
                if we.code == 11000 /* Duplicate insert */ {
                    return true
                }

                false
            },
            _ => false,
        },
        _ => return false
    }
}


pub async fn get_mongo_db(app_name: &str, config: &Configuration) -> Result<Database, CivitasError> {

    // Read username and password from a secrets file.
    let username = fs::read_to_string("secrets/mongodb_username")
        .map_err(|err| ErrorCode::UnableToReadCredentials
            .with_msg(&format!("Unable to read credentials from secrets/mongodb_username: {}", err)))?;

    let password = fs::read_to_string("secrets/mongodb_password")
        .map_err(|err| ErrorCode::UnableToReadCredentials
            .with_msg(&format!("Unable to read credentials from secrets/mongodb_password: {}", err)))?;

    let uri = config.mongo_uri.replace("$USERNAME", &username).replace("$PASSWORD", &password);

    // Parse the uri now.
    let mut client_options = ClientOptions::parse(&uri).await?;

    // Manually set an option.
    client_options.app_name = Some(app_name.to_string());

    // Get a handle to the deployment.
    let client = Client::with_options(client_options)?;

    info!("Connecting to MongoDB...");

    let db = client.database(&config.db_name);
    ping(&db).await?;

    info!("Connected to MongoDB");
    Ok(db)
}


pub async fn ping(db: &Database) -> Result<Document, CivitasError> {
    Ok(db.run_command(doc! { "ping": 1 }, None).await?)
}


pub fn upsert() -> ReplaceOptions {
    ReplaceOptions::builder().upsert(true).build()
}


///
/// The production Datastore - everything is kept in MongoDB.
///
pub struct MongoDatastore {
    db: Database,
}

impl MongoDatastore {
    pub fn new(db: Database) -> Self {
        MongoDatastore { db }
    }

    fn citizens(&self) -> mongodb::Collection<CitizenDB> {
        self.db.collection::<CitizenDB>(CITIZENS)
    }

    fn credentials(&self) -> mongodb::Collection<CredentialDB> {
        self.db.collection::<CredentialDB>(CREDENTIALS)
    }
}

#[async_trait]
impl Datastore for MongoDatastore {
    async fn ping(&self) -> Result<(), CivitasError> {
        ping(&self.db).await?;
        Ok(())
    }

    async fn find_citizens(&self) -> Result<Vec<CitizenDB>, CivitasError> {
        let mut cursor = self.citizens().find(None, None).await?;

        let mut citizens = vec![];
        while let Some(citizen) = cursor.next().await {
            citizens.push(citizen?);
        }

        Ok(citizens)
    }

    async fn find_citizen(&self, citizen_id: &str) -> Result<Option<CitizenDB>, CivitasError> {
        Ok(self.citizens().find_one(doc!{ CITIZEN_ID: citizen_id }, None).await?)
    }

    async fn find_citizen_by_run(&self, run: i64) -> Result<Option<CitizenDB>, CivitasError> {
        Ok(self.citizens().find_one(doc!{ RUN: run }, None).await?)
    }

    async fn find_citizen_by_telefono(&self, telefono: i64) -> Result<Option<CitizenDB>, CivitasError> {
        Ok(self.citizens().find_one(doc!{ TELEFONO: telefono }, None).await?)
    }

    async fn find_citizen_by_credencial(&self, credential_id: &str) -> Result<Option<CitizenDB>, CivitasError> {
        Ok(self.citizens().find_one(doc!{ CREDENCIAL_ID: credential_id }, None).await?)
    }

    async fn save_citizen(&self, citizen: &CitizenDB) -> Result<(), CivitasError> {
        let filter = doc!{ CITIZEN_ID: &citizen.citizen_id };
        self.citizens().replace_one(filter, citizen, upsert()).await?;
        Ok(())
    }

    async fn delete_citizen(&self, citizen_id: &str) -> Result<u64, CivitasError> {
        let result = self.citizens().delete_one(doc!{ CITIZEN_ID: citizen_id }, None).await?;
        Ok(result.deleted_count)
    }

    async fn find_credentials(&self) -> Result<Vec<CredentialDB>, CivitasError> {
        let mut cursor = self.credentials().find(None, None).await?;

        let mut credentials = vec![];
        while let Some(credential) = cursor.next().await {
            credentials.push(credential?);
        }

        Ok(credentials)
    }

    async fn find_credential(&self, credential_id: &str) -> Result<Option<CredentialDB>, CivitasError> {
        Ok(self.credentials().find_one(doc!{ CREDENTIAL_ID: credential_id }, None).await?)
    }

    async fn find_credential_by_correo(&self, correo: &str) -> Result<Option<CredentialDB>, CivitasError> {
        Ok(self.credentials().find_one(doc!{ CORREO: correo }, None).await?)
    }

    async fn save_credential(&self, credential: &CredentialDB) -> Result<(), CivitasError> {
        let filter = doc!{ CREDENTIAL_ID: &credential.credential_id };
        self.credentials().replace_one(filter, credential, upsert()).await?;
        Ok(())
    }

    async fn delete_credential(&self, credential_id: &str) -> Result<u64, CivitasError> {
        let result = self.credentials().delete_one(doc!{ CREDENTIAL_ID: credential_id }, None).await?;
        Ok(result.deleted_count)
    }
}
