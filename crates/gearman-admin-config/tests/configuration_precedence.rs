//! Behavioural coverage for configuration layer precedence.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use gearman_admin_config::{Config, OrthoConfig, ServerEndpoint};

struct Harness {
    temp_dir: TempDir,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
}

impl Harness {
    fn new() -> Self {
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            cli_args: RefCell::new(vec![OsString::from("gearman-admin")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
        }
    }

    fn write_config(&self, server: &ServerEndpoint) {
        let path = self.temp_dir.path().join("gearman-admin.toml");
        let toml = match server {
            ServerEndpoint::Tcp { host, port } => format!(
                "server = {{ transport = \"tcp\", host = \"{host}\", port = {port} }}\n"
            ),
            ServerEndpoint::Unix { path } => {
                format!("server = {{ transport = \"unix\", path = \"{path}\" }}\n")
            }
        };

        if let Err(error) = fs::write(&path, toml) {
            panic!("failed to write configuration: {error}");
        }

        let mut args = self.cli_args.borrow_mut();
        args.push(OsString::from("--config-path"));
        args.push(path.into_os_string());
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Environment mutation is `unsafe` in edition 2024; `Drop` restores
        // the previous value.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }

        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            match value {
                Some(os_value) => unsafe { std::env::set_var(&key, os_value) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}

fn parse_endpoint(text: &str) -> ServerEndpoint {
    match text.parse::<ServerEndpoint>() {
        Ok(endpoint) => endpoint,
        Err(error) => panic!("invalid endpoint '{text}': {error}"),
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the server to \"{server}\"")]
fn given_configuration_file(harness: &Harness, server: String) {
    harness.write_config(&parse_endpoint(&server));
}

#[given("the environment overrides the server to \"{server}\"")]
fn given_environment_override(harness: &Harness, server: String) {
    harness.set_env("GEARMAN_ADMIN_SERVER", &server);
}

#[when("the CLI sets the server to \"{server}\"")]
fn when_cli_override(harness: &Harness, server: String) {
    harness.push_cli_arg("--server");
    harness.push_cli_arg(OsString::from(&server));
}

#[then("loading the configuration resolves the server to \"{server}\"")]
fn then_resolved_server(harness: &Harness, server: String) {
    harness.load();

    if let Some(error) = harness.error.borrow().as_ref() {
        panic!("configuration failed to load: {error}");
    }

    let loaded = harness.loaded.borrow();
    let Some(config) = loaded.as_ref() else {
        panic!("configuration was not loaded");
    };

    assert_eq!(config.server(), &parse_endpoint(&server));
}

#[scenario(path = "tests/features/configuration_precedence.feature")]
fn configuration_precedence(#[from(harness)] harness: Harness) {
    let _ = harness;
}
