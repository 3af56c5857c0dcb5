//! Bootstrap: pool, registry, migrations, module lifecycle, HTTP server.

use anyhow::Context;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry holding every module enabled in `settings`
pub fn build_registry(settings: &Settings) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings)?;

    if registry.is_empty() {
        tracing::warn!("no modules enabled, only /healthz and the API docs will be served");
    }

    Ok(registry)
}

/// Apply pending migrations of the enabled modules, returning how many ran
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let pool = shelf_db::connect(&settings.database).await?;
    let registry = build_registry(settings)?;

    let applied = shelf_db::migrate(&pool, &registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;
    pool.close().await;

    tracing::info!(applied, "migrations complete");
    Ok(applied)
}

/// Run the services until a shutdown signal arrives
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let pool = shelf_db::connect(&settings.database).await?;
    let registry = build_registry(settings)?;

    shelf_db::migrate(&pool, &registry.collect_migrations())
        .await
        .context("failed to apply migrations")?;

    let ctx = InitCtx {
        settings,
        db: &pool,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = shelf_http::start_server(&registry, settings).await;

    registry.stop_all().await?;
    pool.close().await;

    served
}
