use crate::engine::types::ConnectionTarget;

pub struct TargetFactory {
    uri: String,
    database: String,
    collection: String,
}

impl TargetFactory {
    pub fn new() -> Self {
        Self {
            uri: "mongodb://127.0.0.1:27017".into(),
            database: "metrics".into(),
            collection: "containers".into(),
        }
    }

    pub fn uri(mut self, uri: &str) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn database(mut self, database: &str) -> Self {
        self.database = database.into();
        self
    }

    pub fn collection(mut self, collection: &str) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn create(self) -> ConnectionTarget {
        ConnectionTarget::new(self.uri, self.database, self.collection)
    }
}
