use crate::test_helpers::factory::Factory;

#[test]
fn test_processor_factory_runs_shell_script() {
    let config = Factory::processor().script("exit 3").timeout_ms(100).create();
    assert_eq!(config.path, "/bin/sh");
    assert_eq!(config.args, vec!["-c", "exit 3"]);
    assert_eq!(config.timeout_ms, 100);
}

#[test]
fn test_processor_factory_identity_is_cat() {
    let config = Factory::processor()
        .script("exit 1")
        .identity()
        .chunk_size(8)
        .create();
    assert_eq!(config.args, vec!["-c", "cat"]);
    assert_eq!(config.read_chunk_size, 8);
}

#[test]
fn test_processor_factory_echo_query_keeps_other_settings() {
    let config = Factory::processor().timeout_ms(250).echo_query().create();
    assert_eq!(config.path, "/bin/sh");
    assert_eq!(config.args, vec!["-c", r#"printf '%s\n' "$0""#]);
    assert_eq!(config.timeout_ms, 250);
}
