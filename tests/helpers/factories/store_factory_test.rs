use crate::test_helpers::factory::Factory;

#[test]
fn test_store_factory_preloads_documents() {
    let store = Factory::store()
        .with_document("a", Factory::document().create())
        .with_document("b", Factory::document().with("size", 1).create())
        .create();
    assert_eq!(store.len(), 2);
}
