use serde_json::{Map, Value, json};

pub struct DocumentFactory {
    fields: Map<String, Value>,
}

impl DocumentFactory {
    pub fn new() -> Self {
        let mut fields = Map::new();
        fields.insert("mime".into(), json!("application/pdf"));
        fields.insert("size".into(), json!(20480));
        fields.insert("entropy".into(), json!(7.25));
        fields.insert(
            "streams".into(),
            json!([{ "filter": "FlateDecode", "length": 1024 }]),
        );
        Self { fields }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn create(self) -> Value {
        Value::Object(self.fields)
    }
}
