use super::*;
use std::collections::HashMap;

fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn empty_environment_yields_defaults() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.cookie_name, "session_token");
    assert!(!cfg.cookie_secure);
    assert!(!cfg.dev_auth_bypass);
    assert!(cfg.database_url.is_none());
}

#[test]
fn overrides_are_applied() {
    let cfg = config_from(&[
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/app"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("SESSION_COOKIE_NAME", "sessionid"),
        ("SESSION_TTL_SECS", "60"),
        ("DEV_AUTH_BYPASS", "yes"),
        ("PKG_DIR", "/srv/pkg"),
        ("SITE_TITLE", "StudyBud"),
        ("NAV_PROFILE_PATH", "/user-profile/{user_id}/"),
        ("NAV_LOGOUT_PATH", "/logout/"),
    ])
    .unwrap();

    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/app"));
    assert_eq!(cfg.db_max_connections, 12);
    assert_eq!(cfg.cookie_name, "sessionid");
    assert_eq!(cfg.session_ttl, Duration::from_secs(60));
    assert!(cfg.dev_auth_bypass);
    assert_eq!(cfg.pkg_dir, PathBuf::from("/srv/pkg"));
    assert_eq!(cfg.site_title, "StudyBud");
    assert_eq!(cfg.nav_paths.profile, "/user-profile/{user_id}/");
    assert_eq!(cfg.nav_paths.logout, "/logout/");
    assert_eq!(cfg.nav_paths.login, "/login");
}

#[test]
fn blank_values_count_as_unset() {
    let cfg = config_from(&[("PORT", "  "), ("DATABASE_URL", "")]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(cfg.database_url.is_none());
}

#[test]
fn invalid_port_errors() {
    let err = config_from(&[("PORT", "http")]).unwrap_err().to_string();
    assert!(err.contains("invalid PORT"));
    assert!(err.contains("\"http\""));
}

#[test]
fn port_out_of_range_errors() {
    assert!(matches!(config_from(&[("PORT", "70000")]), Err(ConfigError::InvalidNumber { key: "PORT", .. })));
}

#[test]
fn zero_db_connections_errors() {
    assert!(matches!(
        config_from(&[("DB_MAX_CONNECTIONS", "0")]),
        Err(ConfigError::InvalidNumber { key: "DB_MAX_CONNECTIONS", .. })
    ));
}

#[test]
fn invalid_bool_errors() {
    let err = config_from(&[("DEV_AUTH_BYPASS", "maybe")]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBool { key: "DEV_AUTH_BYPASS", .. }));
}

#[test]
fn cookie_secure_explicit_wins_over_public_url() {
    let cfg = config_from(&[("COOKIE_SECURE", "off"), ("PUBLIC_URL", "https://app.example.com")]).unwrap();
    assert!(!cfg.cookie_secure);
}

#[test]
fn cookie_secure_inferred_from_https_public_url() {
    assert!(config_from(&[("PUBLIC_URL", "https://app.example.com")]).unwrap().cookie_secure);
    assert!(!config_from(&[("PUBLIC_URL", "http://localhost:3000")]).unwrap().cookie_secure);
}

#[test]
fn profile_path_without_placeholder_errors() {
    let err = config_from(&[("NAV_PROFILE_PATH", "/profile")]).unwrap_err();
    assert!(matches!(err, ConfigError::NavPaths(NavPathsError::MissingPlaceholder(_))));
}

#[test]
fn relative_nav_path_errors() {
    let err = config_from(&[("NAV_LOGIN_PATH", "login")]).unwrap_err().to_string();
    assert!(err.starts_with("invalid nav path"));
}

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_true_variants() {
    for val in ["1", "true", "yes", "on", "TRUE", "On", "  true  "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
}

#[test]
fn parse_bool_false_variants() {
    for val in ["0", "false", "no", "off", "FALSE"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_invalid_returns_none() {
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_bool(""), None);
}
