//! Runs against a real MongoDB when `JMESQ_TEST_MONGO_URI` is set; otherwise each test returns early.

use jmesq::engine::fetch::{DocumentSource, MongoFetcher};
use jmesq::shared::config::StoreConfig;
use jmesq::{ConnectionTarget, FetchError};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::Client;
use serde_json::Value;

fn live_uri() -> Option<String> {
    std::env::var("JMESQ_TEST_MONGO_URI").ok()
}

#[tokio::test]
async fn fetches_inserted_document_and_distinguishes_not_found() {
    let Some(uri) = live_uri() else {
        eprintln!("JMESQ_TEST_MONGO_URI not set, skipping");
        return;
    };

    let client = Client::with_uri_str(&uri).await.expect("client");
    let collection = client.database("jmesq_tests").collection::<Document>("containers");
    let oid = ObjectId::new();
    collection
        .insert_one(doc! { "_id": oid, "mime": "application/pdf", "pages": 12 }, None)
        .await
        .expect("insert");

    let fetcher = MongoFetcher::new(StoreConfig::default());
    let target = ConnectionTarget::new(&uri, "jmesq_tests", "containers");

    let text = fetcher.fetch(&target, &oid.to_hex()).await.expect("fetched");
    let parsed: Value = serde_json::from_str(text.as_str()).expect("json");
    assert_eq!(parsed["_id"]["$oid"], oid.to_hex());
    assert_eq!(parsed["pages"], 12);

    let absent = ObjectId::new().to_hex();
    assert_eq!(
        fetcher.fetch(&target, &absent).await,
        Err(FetchError::NotFound(absent.clone()))
    );

    collection
        .delete_one(doc! { "_id": oid }, None)
        .await
        .expect("cleanup");
}
