//! The default configuration module.
//!
//! # Responsibilities
//! - Load layered application configuration from the config directory
//! - Serve typed values to other modules through dotted-path lookup
//!
//! # Data Flow
//! ```text
//! <config_dir>/default.{toml,json}        (base layer)
//!     ← deep-merged under ←
//! <config_dir>/<env>.{toml,json}          (environment overlay)
//!     → single in-memory store (JSON value tree)
//!     → get::<T>("dotted.path") from any module
//! ```
//!
//! # Design Decisions
//! - Missing layer files are tolerated (a bare checkout boots); unreadable
//!   or unparseable files fail the load phase
//! - TOML is tried before JSON for each layer; the first match wins
//! - The store is cleared on dispose

use std::any::Any;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::schema::ServiceConfig;
use crate::context::Context;
use crate::module::{Module, ModuleError};

/// Base layer file stem, always read first.
const BASE_LAYER: &str = "default";

/// The auto-registered configuration provider.
///
/// Always the first module to load and the last to dispose, so every
/// other module can read configuration from its own load hook:
///
/// ```ignore
/// let config = ctx.provide_as::<ConfigModule>(ConfigModule::NAME).unwrap();
/// let port: u16 = config.get("server.port").unwrap_or(8080);
/// ```
pub struct ConfigModule {
    dir: PathBuf,
    env: String,
    store: RwLock<Value>,
}

impl ConfigModule {
    /// Registry name of the default config module.
    pub const NAME: &'static str = "config";

    /// Create a config module reading `dir` with the given environment.
    pub fn new(dir: impl Into<PathBuf>, env: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            env: env.into(),
            store: RwLock::new(Value::Null),
        }
    }

    /// Create the module for a service configuration. The `CHASSIS_ENV`
    /// process variable overrides the configured environment name.
    pub fn from_service(service: &ServiceConfig) -> Self {
        let env = std::env::var("CHASSIS_ENV").unwrap_or_else(|_| service.env.clone());
        Self::new(service.config_dir.clone(), env)
    }

    /// Look up a value by dotted path and deserialize it.
    ///
    /// `None` when the path is absent or the value does not deserialize
    /// as `T`.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let store = self.store.read().expect("config store lock poisoned");
        let mut current = &*store;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        serde_json::from_value(current.clone()).ok()
    }

    /// Clone of the full merged configuration tree.
    pub fn value(&self) -> Value {
        self.store
            .read()
            .expect("config store lock poisoned")
            .clone()
    }

    /// Read one layer: `<dir>/<stem>.toml`, falling back to
    /// `<dir>/<stem>.json`. `None` when neither file exists.
    async fn read_layer(&self, stem: &str) -> Result<Option<Value>, ModuleError> {
        for ext in ["toml", "json"] {
            let path = self.dir.join(format!("{stem}.{ext}"));
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => return Err(ModuleError::Io(err)),
            };

            let value = match ext {
                "toml" => {
                    let parsed: toml::Value = toml::from_str(&content).map_err(|err| {
                        ModuleError::Config(format!("{}: {err}", path.display()))
                    })?;
                    serde_json::to_value(parsed).map_err(|err| {
                        ModuleError::Config(format!("{}: {err}", path.display()))
                    })?
                }
                _ => serde_json::from_str(&content).map_err(|err| {
                    ModuleError::Config(format!("{}: {err}", path.display()))
                })?,
            };

            return Ok(Some(value));
        }

        Ok(None)
    }
}

/// Deep-merge `overlay` into `base`. Objects merge key-by-key; any other
/// value in the overlay replaces the base value outright.
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, overlay) => *slot = overlay,
    }
}

#[async_trait]
impl Module for ConfigModule {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn load(&self, _ctx: &Context) -> Result<(), ModuleError> {
        let mut merged = Value::Object(Map::new());
        let mut layers = 0;

        if let Some(base) = self.read_layer(BASE_LAYER).await? {
            merge(&mut merged, base);
            layers += 1;
        }
        if self.env != BASE_LAYER {
            if let Some(overlay) = self.read_layer(&self.env).await? {
                merge(&mut merged, overlay);
                layers += 1;
            }
        }

        tracing::info!(
            dir = %self.dir.display(),
            env = %self.env,
            layers,
            "configuration loaded"
        );

        *self.store.write().expect("config store lock poisoned") = merged;
        Ok(())
    }

    async fn dispose(&self) -> Result<(), ModuleError> {
        *self.store.write().expect("config store lock poisoned") = Value::Null;
        Ok(())
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_context() -> Context {
        Context::new(ServiceConfig::default())
    }

    async fn loaded(dir: &std::path::Path, env: &str) -> ConfigModule {
        let module = ConfigModule::new(dir, env);
        module.load(&test_context()).await.unwrap();
        module
    }

    #[tokio::test]
    async fn test_missing_dir_yields_empty_store() {
        let module = loaded(std::path::Path::new("/nonexistent/config"), "default").await;
        assert_eq!(module.value(), Value::Object(Map::new()));
        assert!(module.get::<u16>("server.port").is_none());
    }

    #[tokio::test]
    async fn test_base_layer_lookup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "log = \"info\"\n\n[server]\nport = 8080\nhost = \"0.0.0.0\"\n",
        )
        .unwrap();

        let module = loaded(dir.path(), "default").await;
        assert_eq!(module.get::<u16>("server.port"), Some(8080));
        assert_eq!(module.get::<String>("server.host"), Some("0.0.0.0".into()));
        assert_eq!(module.get::<String>("log"), Some("info".into()));
        assert!(module.get::<String>("server.missing").is_none());
    }

    #[tokio::test]
    async fn test_env_layer_merged_over_base() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "log = \"info\"\n\n[server]\nport = 8080\nhost = \"0.0.0.0\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("production.json"),
            r#"{ "server": { "port": 9090 } }"#,
        )
        .unwrap();

        let module = loaded(dir.path(), "production").await;
        // Overlay wins where present, base shows through elsewhere.
        assert_eq!(module.get::<u16>("server.port"), Some(9090));
        assert_eq!(module.get::<String>("server.host"), Some("0.0.0.0".into()));
        assert_eq!(module.get::<String>("log"), Some("info".into()));
    }

    #[tokio::test]
    async fn test_unparseable_layer_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.toml"), "server = [broken\n").unwrap();

        let module = ConfigModule::new(dir.path(), "default");
        let err = module.load(&test_context()).await.unwrap_err();
        assert!(matches!(err, ModuleError::Config(_)));
    }

    #[tokio::test]
    async fn test_dispose_clears_store() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.toml"), "log = \"info\"\n").unwrap();

        let module = loaded(dir.path(), "default").await;
        assert!(module.get::<String>("log").is_some());

        module.dispose().await.unwrap();
        assert!(module.get::<String>("log").is_none());
        assert_eq!(module.value(), Value::Null);
    }
}
