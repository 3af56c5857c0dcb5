pub mod books;
mod openapi;
pub mod todos;

use shelf_kernel::{settings::Settings, ModuleRegistry};

const KNOWN_MODULES: &[&str] = &["books", "todos"];

/// Register every module enabled in `settings.modules`
pub fn register_all(registry: &mut ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    for name in &settings.modules.enabled {
        if !KNOWN_MODULES.contains(&name.as_str()) {
            tracing::warn!(module = %name, "ignoring unknown module in modules.enabled");
        }
    }

    if settings.modules.is_enabled("books") {
        registry.register(books::create_module(&settings.books)?);
    }
    if settings.modules.is_enabled("todos") {
        registry.register(todos::create_module());
    }

    Ok(())
}
