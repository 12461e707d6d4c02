//! ADVISOR_* environment overrides.
//!
//! Kept in its own test binary with a single test: the process environment
//! is shared by every test in a binary.

use std::env;

use rstest::{fixture, rstest};

use advisor::application::ApplicationError;
use advisor::config::Settings;
use advisor::domain::DuplicatePolicy;
use advisor::util::testing;

const OVERRIDES: [(&str, &str); 4] = [
    ("ADVISOR_DUPLICATES", "reject"),
    ("ADVISOR_TRIM_FIELDS", "true"),
    ("ADVISOR_UPPERCASE_QUERIES", "false"),
    ("ADVISOR_DEFAULT_SOURCE", "from-env.csv"),
];

#[fixture]
fn env_overrides() -> Vec<&'static str> {
    testing::init_test_setup();
    for (name, value) in OVERRIDES {
        env::set_var(name, value);
    }
    OVERRIDES.iter().map(|(name, _)| *name).collect()
}

#[rstest]
fn given_single_underscore_env_vars_when_applying_overrides_then_replace_settings(
    env_overrides: Vec<&'static str>,
) {
    let settings = Settings::apply_env_overrides(Settings::default()).expect("apply overrides");

    assert_eq!(settings.duplicates, DuplicatePolicy::Reject);
    assert!(settings.trim_fields);
    assert!(!settings.uppercase_queries);
    assert_eq!(settings.default_source.to_str(), Some("from-env.csv"));

    // An unknown policy name is reported, not ignored
    env::set_var("ADVISOR_DUPLICATES", "sometimes");
    let err = Settings::apply_env_overrides(Settings::default()).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));

    for name in env_overrides {
        env::remove_var(name);
    }
    let settings = Settings::apply_env_overrides(Settings::default()).expect("apply overrides");
    assert_eq!(settings, Settings::default());
}
