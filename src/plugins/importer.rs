//! Module importers - Turn a plugin file into a `Module`

use async_trait::async_trait;
use std::path::Path;

use crate::application::errors::ImportError;
use super::catalog::Catalog;
use super::descriptor::{Export, Module};
use super::manifest::PluginManifest;
use super::trait_def::Category;

/// Imports the module behind a plugin file
#[async_trait]
pub trait ModuleImporter: Send + Sync {
    async fn import(&self, path: &Path, category: Category) -> Result<Module, ImportError>;
}

/// Plain functions and closures work as importers, which keeps tests short
#[async_trait]
impl<F> ModuleImporter for F
where
    F: Fn(&Path, Category) -> Result<Module, ImportError> + Send + Sync,
{
    async fn import(&self, path: &Path, category: Category) -> Result<Module, ImportError> {
        self(path, category)
    }
}

/// Reads a YAML manifest and resolves it against the built-in catalog
pub struct ManifestImporter {
    catalog: Catalog,
}

impl ManifestImporter {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn builtin() -> Self {
        Self::new(Catalog::builtin())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[async_trait]
impl ModuleImporter for ManifestImporter {
    async fn import(&self, path: &Path, category: Category) -> Result<Module, ImportError> {
        let manifest = PluginManifest::from_file(path)?;
        let key = manifest.module_key(path)
            .ok_or_else(|| ImportError::Other(format!("Cannot derive module name from {}", path.display())))?;

        let mut module = self.catalog.get(category, &key)
            .cloned()
            .ok_or_else(|| ImportError::UnknownModule(key.clone()))?;

        if manifest.interval.is_some() {
            module.interval = manifest.interval;
        }
        if manifest.once.is_some() {
            module.once = manifest.once;
        }

        // Importing a util is what triggers its side effect
        if let Some(Export::Util(Some(init))) = &module.export {
            init();
        }

        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingTask;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static INIT_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn count_init() {
        INIT_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.register(Category::Task, "memory", Module::task("memory", Some(300_000), CountingTask::new()));
        catalog.register(Category::Util, "hook", Module::util(Some(count_init)));
        catalog
    }

    #[tokio::test]
    async fn test_manifest_interval_overrides_catalog_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.yaml");
        std::fs::write(&path, "interval: 5000\n").unwrap();

        let module = ManifestImporter::new(catalog()).import(&path, Category::Task).await.unwrap();
        assert_eq!(module.name.as_deref(), Some("memory"));
        assert_eq!(module.interval, Some(5000));
    }

    #[tokio::test]
    async fn test_unknown_module_fails_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghost.yaml");
        std::fs::write(&path, "").unwrap();

        let err = ManifestImporter::new(catalog()).import(&path, Category::Task).await.unwrap_err();
        assert_eq!(err, ImportError::UnknownModule("ghost".to_string()));
    }

    #[tokio::test]
    async fn test_util_import_runs_side_effect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hook.yml");
        std::fs::write(&path, "module: hook\n").unwrap();

        let before = INIT_CALLS.load(Ordering::SeqCst);
        ManifestImporter::new(catalog()).import(&path, Category::Util).await.unwrap();
        assert_eq!(INIT_CALLS.load(Ordering::SeqCst), before + 1);
    }
}
