use crate::test_helpers::factory::Factory;
use serde_json::json;

#[test]
fn test_document_factory() {
    let document = Factory::document()
        .with("size", 7)
        .without("streams")
        .create();

    assert_eq!(document["size"], json!(7));
    assert_eq!(document["mime"], json!("application/pdf"));
    assert!(document.get("streams").is_none());
}
