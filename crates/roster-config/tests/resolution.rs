//! Configuration resolution tests against real files in temp directories.
//!
//! Covers resolution order (CLI > env path > env dir > XDG > defaults) and
//! validation of loaded files.

use roster_config::resolve::{load_settings, resolve_config_path, ConfigSource};
use roster_config::{validate_settings, ConfigError, EditPolicy, SelectAllScope};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const ENV_KEYS: [&str; 3] = ["ROSTER_CONFIG", "ROSTER_CONFIG_DIR", "XDG_CONFIG_HOME"];

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for key in keys {
            saved.push(env::var(key).ok());
            env::remove_var(key);
        }
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f()
}

fn write_config(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create config parent");
    }
    fs::write(path, body).expect("write config");
}

#[test]
fn test_cli_over_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let cli = temp.path().join("cli").join("roster.toml");
        let envp = temp.path().join("env").join("roster.toml");
        write_config(&cli, "page_size = 5\n");
        write_config(&envp, "page_size = 7\n");
        env::set_var("ROSTER_CONFIG", envp.display().to_string());

        let loaded = load_settings(Some(&cli)).expect("load");
        assert_eq!(loaded.source, ConfigSource::CliArgument);
        assert_eq!(loaded.settings.page_size, 5);
    });
}

#[test]
fn test_env_path_over_env_dir() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let envp = temp.path().join("direct.toml");
        let dir = temp.path().join("dir");
        write_config(&envp, "page_size = 7\n");
        write_config(&dir.join("roster.toml"), "page_size = 9\n");
        env::set_var("ROSTER_CONFIG", envp.display().to_string());
        env::set_var("ROSTER_CONFIG_DIR", dir.display().to_string());

        let (path, source) = resolve_config_path(None);
        assert_eq!(source, ConfigSource::Environment);
        assert_eq!(path.expect("path"), envp);
    });
}

#[test]
fn test_env_dir_over_xdg() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().join("dir");
        let xdg = temp.path().join("xdg");
        write_config(&dir.join("roster.toml"), "edit_policy = \"exclusive\"\n");
        write_config(&xdg.join("roster").join("roster.toml"), "page_size = 3\n");
        env::set_var("ROSTER_CONFIG_DIR", dir.display().to_string());
        env::set_var("XDG_CONFIG_HOME", xdg.display().to_string());

        let loaded = load_settings(None).expect("load");
        assert_eq!(loaded.source, ConfigSource::Environment);
        assert_eq!(loaded.settings.edit_policy, EditPolicy::Exclusive);
        assert_eq!(loaded.settings.page_size, 10);
    });
}

#[test]
#[cfg(target_os = "linux")]
fn test_xdg_config_home() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let xdg = temp.path().join("xdg");
        write_config(
            &xdg.join("roster").join("roster.toml"),
            "select_all_scope = \"filtered\"\n",
        );
        env::set_var("XDG_CONFIG_HOME", xdg.display().to_string());

        let loaded = load_settings(None).expect("load");
        assert_eq!(loaded.source, ConfigSource::XdgConfig);
        assert_eq!(loaded.settings.select_all_scope, SelectAllScope::Filtered);
    });
}

#[test]
fn test_missing_env_path_falls_through() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        env::set_var(
            "ROSTER_CONFIG",
            temp.path().join("absent.toml").display().to_string(),
        );
        env::set_var("XDG_CONFIG_HOME", temp.path().join("empty").display().to_string());

        let (path, source) = resolve_config_path(None);
        assert!(path.is_none());
        assert_eq!(source, ConfigSource::BuiltinDefault);
    });
}

#[test]
fn test_invalid_page_size_in_file_rejected() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let cli = temp.path().join("roster.toml");
        write_config(&cli, "page_size = 0\n");

        let loaded = load_settings(Some(&cli)).expect("load");
        let err = validate_settings(&loaded.settings).expect_err("zero page size");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    });
}

#[test]
fn test_override_repairs_invalid_file_value() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let cli = temp.path().join("roster.toml");
        write_config(&cli, "page_size = 0\n");

        let loaded = load_settings(Some(&cli)).expect("load");
        let settings = loaded.settings.with_page_size(4);
        validate_settings(&settings).expect("override is valid");
        assert_eq!(settings.page_size, 4);
    });
}

#[test]
fn test_malformed_toml_is_parse_error() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&ENV_KEYS);
        let temp = TempDir::new().expect("temp dir");
        let cli = temp.path().join("roster.toml");
        write_config(&cli, "page_size = [\n");

        let err = load_settings(Some(&cli)).expect_err("bad toml");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.code(), 13);
    });
}
