//! Loader coverage for individual configuration layers.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use tempfile::TempDir;

use gearman_admin_config::{
    Config, DEFAULT_LOG_FILTER, LogFormat, OrthoConfig, ServerEndpoint, default_server_endpoint,
};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

struct EnvOverride {
    key: &'static str,
    previous: Option<OsString>,
}

impl EnvOverride {
    fn set_var(key: &'static str, value: &OsStr) -> Self {
        let previous = std::env::var_os(key);
        unsafe { std::env::set_var(key, value) };
        Self { key, previous }
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => unsafe { std::env::set_var(self.key, value) },
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}

fn args(extra: &[&OsStr]) -> Vec<OsString> {
    let mut args = vec![OsString::from("gearman-admin")];
    args.extend(extra.iter().map(|arg| arg.to_os_string()));
    args
}

#[test]
fn defaults_apply_without_overrides() {
    let _guard = env_lock();
    let config = Config::load_from_iter(args(&[])).expect("defaults load");
    assert_eq!(config.server(), &default_server_endpoint());
    assert_eq!(config.log_format(), LogFormat::Compact);
    assert_eq!(config.io_timeout_secs, None);
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("gearman-admin.toml");
    fs::write(&path, "log_format = \"json\"\n").expect("write config");

    let config = Config::load_from_iter(args(&[
        OsStr::new("--config-path"),
        path.as_os_str(),
    ]))
    .expect("partial file loads");

    assert_eq!(config.log_format(), LogFormat::Json);
    assert_eq!(config.server(), &default_server_endpoint());
    assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
    assert_eq!(config.connect_timeout_secs, 5);
}

#[test]
fn file_layer_sets_every_field() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("gearman-admin.toml");
    fs::write(
        &path,
        concat!(
            "server = { transport = \"unix\", path = \"/run/gearmand/admin.sock\" }\n",
            "log_filter = \"gearman_admin=debug\"\n",
            "log_format = \"json\"\n",
            "connect_timeout_secs = 2\n",
            "io_timeout_secs = 10\n",
        ),
    )
    .expect("write config");

    let config = Config::load_from_iter(args(&[
        OsStr::new("--config-path"),
        path.as_os_str(),
    ]))
    .expect("file config loads");

    assert_eq!(
        config.server(),
        &ServerEndpoint::unix("/run/gearmand/admin.sock")
    );
    assert_eq!(config.log_filter(), "gearman_admin=debug");
    assert_eq!(config.log_format(), LogFormat::Json);
    assert_eq!(config.connect_timeout_secs, 2);
    assert_eq!(config.io_timeout_secs, Some(10));
}

#[test]
fn environment_overrides_file() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("gearman-admin.toml");
    fs::write(
        &path,
        "server = { transport = \"tcp\", host = \"10.0.0.1\", port = 4730 }\n",
    )
    .expect("write config");
    let _env = EnvOverride::set_var("GEARMAN_ADMIN_SERVER", OsStr::new("tcp://10.0.0.9:4731"));

    let config = Config::load_from_iter(args(&[
        OsStr::new("--config-path"),
        path.as_os_str(),
    ]))
    .expect("layered config loads");

    assert_eq!(config.server(), &ServerEndpoint::tcp("10.0.0.9", 4731));
}

#[test]
fn invalid_server_flag_is_rejected() {
    let _guard = env_lock();
    let result = Config::load_from_iter(args(&[
        OsStr::new("--server"),
        OsStr::new("http://localhost:4730"),
    ]));
    assert!(result.is_err(), "unsupported scheme must fail to load");
}
