use crate::test_helpers::factory::Factory;

#[test]
fn test_target_factory_defaults() {
    let target = Factory::target().create();
    assert_eq!(target.database, "metrics");
    assert_eq!(target.collection, "containers");
    assert!(target.uri.starts_with("mongodb://"));
}

#[test]
fn test_target_factory_overrides() {
    let target = Factory::target()
        .uri("mongodb://db.internal:27018")
        .database("scans")
        .collection("jpeg")
        .create();
    assert_eq!(target.uri, "mongodb://db.internal:27018");
    assert_eq!(target.database, "scans");
    assert_eq!(target.collection, "jpeg");
}
