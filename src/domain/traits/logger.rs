/// Narrow logging capability handed to the loader, routes and tasks.
///
/// Production code uses `infrastructure::logging::TracingLogger`; tests
/// substitute a recording implementation.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);

    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);

    /// Message under a custom tag (e.g. `MEMORY`, `LOADER`)
    fn custom(&self, tag: &str, message: &str);

    /// Banner line separating startup phases
    fn section(&self, title: &str);
}
