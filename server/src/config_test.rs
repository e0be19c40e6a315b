use super::*;

// =============================================================================
// env_bool: uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_case_insensitive_and_trimmed() {
    let key = "__TEST_EB_CI_117__";
    unsafe { std::env::set_var(key, "  TRUE ") };
    assert_eq!(env_bool(key), Some(true));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_invalid_returns_none() {
    let key = "__TEST_EB_INVALID_9823__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_unset_returns_none() {
    assert_eq!(env_bool("__TEST_EB_SURELY_UNSET_XYZ_42__"), None);
}

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_reads_value() {
    let key = "__TEST_EP_VALUE_311__";
    unsafe { std::env::set_var(key, " 12 ") };
    assert_eq!(env_parse::<u32>(key, 5), 12);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_falls_back_on_garbage() {
    let key = "__TEST_EP_GARBAGE_312__";
    unsafe { std::env::set_var(key, "twelve") };
    assert_eq!(env_parse::<u32>(key, 5), 5);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_falls_back_when_unset() {
    assert_eq!(env_parse::<i64>("__TEST_EP_UNSET_313__", 14), 14);
}

// =============================================================================
// session ttl
// =============================================================================

#[test]
fn session_ttl_keeps_sane_values() {
    assert_eq!(clamp_session_ttl(DEFAULT_SESSION_TTL_DAYS), 14);
    assert_eq!(clamp_session_ttl(MAX_SESSION_TTL_DAYS), MAX_SESSION_TTL_DAYS);
}

#[test]
fn session_ttl_clamps_both_ends() {
    assert_eq!(clamp_session_ttl(0), 1);
    assert_eq!(clamp_session_ttl(-30), 1);
    assert_eq!(clamp_session_ttl(i64::MAX), MAX_SESSION_TTL_DAYS);
}

#[test]
fn clamped_ttl_fits_cookie_duration() {
    let days = clamp_session_ttl(i64::MAX);
    assert_eq!(time::Duration::days(days).whole_days(), MAX_SESSION_TTL_DAYS);
    assert!(i32::try_from(days).is_ok());
}

#[test]
fn config_error_messages_name_the_variable() {
    assert_eq!(ConfigError::Missing { var: "DATABASE_URL" }.to_string(), "DATABASE_URL is required");
    assert_eq!(
        ConfigError::Invalid { var: "PORT", value: "abc".into() }.to_string(),
        "PORT is not a valid value: abc"
    );
}
