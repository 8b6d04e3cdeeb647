//! The module-lifecycle orchestrator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::config::module::ConfigModule;
use crate::config::schema::ServiceConfig;
use crate::context::registry::ModuleRegistry;
use crate::lifecycle::shutdown::{DisposeOutcome, DisposeReport};
use crate::lifecycle::signals::SignalSource;
use crate::module::{Module, ModuleError};

/// Error aborting the load phase.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A module's load hook failed. No later module was loaded.
    #[error("module \"{module}\" failed to load: {source}")]
    Module {
        /// Name of the failing module.
        module: String,
        /// The hook's error.
        source: ModuleError,
    },
}

/// The orchestrator: owns the module registry and drives the load and
/// dispose lifecycle phases.
///
/// Construction registers the default configuration module, so it is
/// always the first module to load and the last to dispose. Caller
/// modules are expected to be registered before [`load`](Context::load)
/// begins.
///
/// The load phase is strictly sequential and fail-fast; the dispose phase
/// is strictly sequential, reverse-ordered, and best-effort. Once a
/// dispose sweep has started the context is on its way out of the
/// process: further registration or lookup is not meaningful.
pub struct Context {
    service: ServiceConfig,
    registry: RwLock<ModuleRegistry>,
    disposing: AtomicBool,
}

impl Context {
    /// Create a context for the given service configuration and register
    /// the default configuration module.
    pub fn new(service: ServiceConfig) -> Self {
        let context = Self {
            registry: RwLock::new(ModuleRegistry::new()),
            disposing: AtomicBool::new(false),
            service,
        };
        context.register(Arc::new(ConfigModule::from_service(&context.service)));
        context
    }

    /// The service configuration this context was constructed with.
    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }

    /// Whether a module with the given name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.read_registry().contains(name)
    }

    /// Look up a module by name. Absence is `None`, never a panic.
    pub fn provide(&self, name: &str) -> Option<Arc<dyn Module>> {
        self.read_registry().get(name)
    }

    /// Look up a module by name as its concrete type.
    ///
    /// `None` when the name is unregistered or the registered module is
    /// not a `T`.
    pub fn provide_as<T: Module>(&self, name: &str) -> Option<Arc<T>> {
        self.provide(name)?.as_any().downcast::<T>().ok()
    }

    /// Register a module under its own name.
    ///
    /// Re-registering an existing name replaces the module in place; the
    /// entry keeps its original position in load order. Expected to happen
    /// before [`load`](Context::load) begins.
    pub fn register(&self, module: Arc<dyn Module>) {
        self.registry
            .write()
            .expect("module registry lock poisoned")
            .insert(module);
    }

    /// All registered module names, in load order.
    pub fn module_names(&self) -> Vec<String> {
        self.read_registry().names()
    }

    /// Load every registered module, in registration order.
    ///
    /// Each module's load hook is awaited to completion before the next
    /// begins. The first failure aborts the phase: remaining modules are
    /// never loaded and the error names the module that failed. Modules
    /// loaded before the failure are not tracked; a following dispose
    /// sweep covers the full registry.
    pub async fn load(&self) -> Result<(), LoadError> {
        let modules = self.snapshot();
        tracing::info!(
            service = %self.service.name,
            modules = modules.len(),
            "load phase starting"
        );

        for module in modules {
            tracing::info!(module = module.name(), "loading module");
            if let Err(source) = module.load(self).await {
                tracing::error!(
                    module = module.name(),
                    error = %source,
                    "module failed to load"
                );
                return Err(LoadError::Module {
                    module: module.name().to_owned(),
                    source,
                });
            }
        }

        Ok(())
    }

    /// Dispose every registered module, in reverse registration order.
    ///
    /// Best-effort: each module gets a dispose attempt regardless of
    /// earlier failures, and every outcome lands in the returned report.
    /// Idempotent: only the first call performs the sweep; later calls
    /// (for example a second signal arriving mid-sweep) return a report
    /// with `swept == false` and no outcomes.
    pub async fn dispose(&self, code: i32) -> DisposeReport {
        if self.disposing.swap(true, Ordering::SeqCst) {
            tracing::debug!(code, "dispose already requested, skipping sweep");
            return DisposeReport::skipped(code);
        }

        tracing::info!(service = %self.service.name, "dispose phase starting");

        let modules = self.snapshot();
        let mut outcomes = Vec::with_capacity(modules.len());
        for module in modules.into_iter().rev() {
            tracing::info!(module = module.name(), "disposing module");
            let result = module.dispose().await;
            if let Err(err) = &result {
                tracing::error!(
                    module = module.name(),
                    error = %err,
                    "module failed to dispose"
                );
            }
            outcomes.push(DisposeOutcome {
                module: module.name().to_owned(),
                result,
            });
        }

        let report = DisposeReport {
            code,
            outcomes,
            swept: true,
        };
        if report.is_clean() {
            tracing::info!(code, "dispose phase complete");
        } else {
            tracing::warn!(
                code,
                failures = report.failures().count(),
                "dispose phase complete with failures"
            );
        }
        report
    }

    /// Drive the full process lifecycle.
    ///
    /// Races the load phase against the signal source. A termination
    /// event during load drops the in-flight load sweep at its next await
    /// point and proceeds straight to dispose. After a successful load the
    /// context waits for the next event. Either way the dispose sweep
    /// covers the full registry and the returned report carries the exit
    /// code: 0 for graceful termination, 1 for a load failure or fault.
    ///
    /// The caller owns actual process termination with the report's code.
    pub async fn run<S: SignalSource>(&self, mut signals: S) -> DisposeReport {
        let shutdown = signals.recv();
        tokio::pin!(shutdown);

        let code = tokio::select! {
            result = self.load() => match result {
                Ok(()) => {
                    tracing::info!(service = %self.service.name, "all modules loaded");
                    shutdown.await.exit_code()
                }
                Err(err) => {
                    tracing::error!(error = %err, "load phase failed");
                    1
                }
            },
            event = &mut shutdown => {
                tracing::warn!(event = ?event, "termination during load phase");
                event.exit_code()
            }
        };

        self.dispose(code).await
    }

    fn snapshot(&self) -> Vec<Arc<dyn Module>> {
        self.read_registry().snapshot()
    }

    fn read_registry(&self) -> std::sync::RwLockReadGuard<'_, ModuleRegistry> {
        self.registry.read().expect("module registry lock poisoned")
    }
}
