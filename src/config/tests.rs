use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_manasik_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MANASIK_CONFIG_PATH", "/tmp/manasik-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/manasik-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("manasik")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("manasik")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
poll_interval_ms = 250
previous_grace_secs = 5

[controls]
scrub_seconds = 9

[ui]
header_text = "hello"
now_playing_time_fields = ["elapsed", "remaining"]
now_playing_time_separator = " | "

[catalog]
manifest_path = "/srv/manasik/manifest.toml"
extensions = ["mp3"]
recursive = false
include_hidden = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MANASIK_CONFIG_PATH", cfg_path.to_str().unwrap());

    let settings = Settings::load().unwrap();
    assert_eq!(settings.playback.poll_interval_ms, 250);
    assert_eq!(settings.playback.previous_grace_secs, 5);
    assert_eq!(settings.controls.scrub_seconds, 9);
    assert_eq!(settings.ui.header_text, "hello");
    assert_eq!(
        settings.ui.now_playing_time_fields,
        vec![TimeField::Elapsed, TimeField::Remaining]
    );
    assert_eq!(
        settings.catalog.manifest_path.as_deref(),
        Some("/srv/manasik/manifest.toml")
    );
    assert_eq!(settings.catalog.extensions, vec!["mp3".to_string()]);
    assert!(!settings.catalog.recursive);
    assert!(!settings.catalog.include_hidden);
}

#[test]
fn defaults_are_sane_and_validate() {
    let settings = Settings::default();
    assert_eq!(settings.playback.poll_interval_ms, 500);
    assert_eq!(settings.playback.previous_grace_secs, 3);
    assert!(settings.validate().is_ok());
}

#[test]
fn validate_rejects_bad_values() {
    let mut settings = Settings::default();
    settings.playback.poll_interval_ms = 10;
    assert!(settings.validate().is_err());

    let mut settings = Settings::default();
    settings.catalog.extensions.clear();
    assert!(settings.validate().is_err());
}
