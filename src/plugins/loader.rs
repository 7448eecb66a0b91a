//! Plugin loader - Scans a plugin directory and registers what it finds

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::{BotError, LoadError, ShapeError};
use crate::application::events::{Listener, ListenerFuture};
use crate::domain::entities::BotEvent;
use crate::domain::traits::Logger;
use crate::routes::HttpApp;
use super::descriptor::{validate, PluginDescriptor};
use super::importer::ModuleImporter;
use super::trait_def::{Category, EventHandler};

/// File extensions treated as plugin files
const PLUGIN_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Route file stems that can be mounted as a literal path segment
static ROUTE_STEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("route stem pattern is valid")
});

/// Outcome of one directory scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Identifiers of registered plugins (names, or file stems for routes and utils)
    pub loaded: Vec<String>,
    /// File names that failed to import or validate
    pub failed: Vec<String>,
    /// Number of candidate files
    pub total: usize,
}

/// Plugin loader.
///
/// Files are processed one after another in file-name order; a failing file
/// is recorded and never stops the batch. Calling `load_files` twice on the
/// same directory registers listeners and schedules tasks twice.
pub struct PluginLoader {
    base: PathBuf,
    importer: Arc<dyn ModuleImporter>,
    logger: Arc<dyn Logger>,
}

impl PluginLoader {
    pub fn new(base: impl Into<PathBuf>, importer: Arc<dyn ModuleImporter>, logger: Arc<dyn Logger>) -> Self {
        Self {
            base: base.into(),
            importer,
            logger,
        }
    }

    /// Load every plugin file in `directory` (relative to the base path).
    ///
    /// Only contract violations are returned as errors: a directory outside
    /// the base path, or route loading without an app handle. Everything else
    /// ends up in the report.
    pub async fn load_files(
        &self,
        directory: impl AsRef<Path>,
        category: Category,
        client: &Arc<BotClient>,
        mut app: Option<&mut HttpApp>,
    ) -> Result<LoadReport, LoadError> {
        let directory = directory.as_ref();
        if category == Category::Route && app.is_none() {
            return Err(LoadError::MissingApp);
        }
        let dir = self.resolve(directory)?;

        let files = match self.candidates(&dir) {
            Ok(Some(files)) => files,
            Ok(None) => {
                self.logger.warn(&format!("{} directory not found: {}", category, dir.display()));
                return Ok(LoadReport::default());
            }
            Err(e) => {
                self.logger.error(&format!("Failed to read {} directory {}: {}", category, dir.display(), e));
                return Ok(LoadReport::default());
            }
        };

        let mut report = LoadReport {
            total: files.len(),
            ..Default::default()
        };

        for path in &files {
            let file_name = file_name(path);
            match self.load_one(path, category, client, app.as_deref_mut()).await {
                Ok(id) => {
                    self.logger.debug(&format!("Loaded {} '{}' from {}", category, id, file_name));
                    report.loaded.push(id);
                }
                Err(reason) => {
                    self.logger.error(&format!("Failed to load {} {}: {}", category, file_name, reason));
                    report.failed.push(file_name);
                }
            }
        }

        self.logger.custom(
            "LOADER",
            &format!("{}: {}/{} loaded from {}", category, report.loaded.len(), report.total, dir.display()),
        );
        Ok(report)
    }

    /// Load every category from its default directory, utils first
    pub async fn load_all(
        &self,
        client: &Arc<BotClient>,
        app: &mut HttpApp,
    ) -> Result<Vec<(Category, LoadReport)>, LoadError> {
        let mut reports = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let report = self.load_files(category.directory(), category, client, Some(&mut *app)).await?;
            reports.push((category, report));
        }
        Ok(reports)
    }

    /// Join `directory` onto the base path, refusing anything that escapes it
    fn resolve(&self, directory: &Path) -> Result<PathBuf, LoadError> {
        let escapes = directory.components().any(|c| {
            matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
        });
        if escapes {
            return Err(LoadError::OutsideBase(directory.to_path_buf()));
        }
        Ok(self.base.join(directory))
    }

    /// Plugin files in `dir`, sorted by name. `None` when the directory is absent.
    fn candidates(&self, dir: &Path) -> std::io::Result<Option<Vec<PathBuf>>> {
        if !dir.exists() {
            return Ok(None);
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_plugin = path.extension()
                .and_then(|e| e.to_str())
                .map(|e| PLUGIN_EXTENSIONS.contains(&e))
                .unwrap_or(false);
            // Skip hidden files
            let hidden = path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(true);
            if is_plugin && !hidden {
                files.push(path);
            }
        }
        files.sort();
        Ok(Some(files))
    }

    /// Import, validate and register one file, returning its identifier
    async fn load_one(
        &self,
        path: &Path,
        category: Category,
        client: &Arc<BotClient>,
        app: Option<&mut HttpApp>,
    ) -> Result<String, String> {
        let module = self.importer.import(path, category).await.map_err(|e| e.to_string())?;
        let descriptor = validate(category, module).map_err(|e| e.to_string())?;
        self.register(descriptor, path, client, app).await.map_err(|e| e.to_string())
    }

    async fn register(
        &self,
        descriptor: PluginDescriptor,
        path: &Path,
        client: &Arc<BotClient>,
        app: Option<&mut HttpApp>,
    ) -> Result<String, BotError> {
        match descriptor {
            PluginDescriptor::Command { name, handler } => {
                if client.commands.insert(name.clone(), handler.clone())?.is_some() {
                    self.logger.warn(&format!("Command '{}' registered twice, keeping {}", name, file_name(path)));
                }
                for custom_id in handler.components() {
                    if client.components.insert(custom_id.clone(), handler.clone())?.is_some() {
                        self.logger.warn(&format!("Component '{}' registered twice", custom_id));
                    }
                }
                Ok(name)
            }
            PluginDescriptor::Event { name, once, handler } => {
                let listener = wrap_listener(handler, client);
                if once {
                    client.events.once(name.clone(), listener)?;
                } else {
                    client.events.on(name.clone(), listener)?;
                }
                Ok(name)
            }
            PluginDescriptor::Task { name, job, interval } => {
                match interval {
                    Some(period) => client.scheduler.schedule_repeating(name.clone(), period, job, Arc::downgrade(client)),
                    None => client.scheduler.run_once(name.clone(), job, Arc::downgrade(client)).await,
                }
                Ok(name)
            }
            PluginDescriptor::Route { factory } => {
                let app = app.ok_or(BotError::Plugin(LoadError::MissingApp))?;
                let stem = file_stem(path);
                if !ROUTE_STEM.is_match(&stem) {
                    return Err(ShapeError::InvalidRoutePath(stem).into());
                }
                let router = factory(client.clone(), self.logger.clone());
                app.mount(format!("/v1/{}", stem), router);
                Ok(stem)
            }
            PluginDescriptor::Util => Ok(file_stem(path)),
        }
    }
}

/// Adapt an event handler to the emitter, passing the client as trailing argument.
/// The client is held weakly so the emitter does not keep it alive.
fn wrap_listener(handler: Arc<dyn EventHandler>, client: &Arc<BotClient>) -> Listener {
    let client = Arc::downgrade(client);
    Arc::new(move |event: BotEvent| -> ListenerFuture {
        let handler = handler.clone();
        let client = client.clone();
        Box::pin(async move {
            let Some(client) = client.upgrade() else {
                return Ok(());
            };
            handler.execute(&event, &client).await
        })
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
