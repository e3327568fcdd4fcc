use std::sync::Arc;
use crate::db::Datastore;
use crate::utils::config::Configuration;

///
/// The context is available to all service endpoints and gives them access to the
/// datastore, config, etc.
///
pub struct ServiceContext {
    config: Configuration,
    datastore: Arc<dyn Datastore>,
}

impl ServiceContext {
    pub fn new(config: Configuration, datastore: Arc<dyn Datastore>) -> Self {
        ServiceContext { config, datastore }
    }

    pub fn datastore(&self) -> &dyn Datastore {
        self.datastore.as_ref()
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }
}
