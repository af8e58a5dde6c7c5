use crate::core::resolver::Resolver;
use crate::domain::model::{Identifier, Resolution, ResolveOptions};
use crate::domain::ports::{LocalIndex, RemoteResolver};
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::monitor::SystemMonitor;

/// Runs a resolution batch and reports progress and a summary.
pub struct ResolverEngine<L: LocalIndex, R: RemoteResolver> {
    resolver: Resolver<L, R>,
    #[cfg(feature = "cli")]
    monitor: SystemMonitor,
}

impl<L: LocalIndex, R: RemoteResolver> ResolverEngine<L, R> {
    pub fn new(resolver: Resolver<L, R>) -> Self {
        Self {
            resolver,
            #[cfg(feature = "cli")]
            monitor: SystemMonitor::new(false),
        }
    }

    #[cfg(feature = "cli")]
    pub fn new_with_monitoring(resolver: Resolver<L, R>, enabled: bool) -> Self {
        Self {
            resolver,
            monitor: SystemMonitor::new(enabled),
        }
    }

    pub async fn run(
        &self,
        identifiers: Vec<Identifier>,
        options: &ResolveOptions,
    ) -> Result<Vec<Resolution>> {
        tracing::info!("Resolving {} identifier(s)...", identifiers.len());
        if options.try_local_first && !self.resolver.has_index() {
            tracing::warn!("No local index in the cache, every lookup goes remote");
        }

        let results = self.resolver.resolve_batch(identifiers, options).await;

        let resolved = results.iter().filter(|r| r.is_resolved()).count();
        tracing::info!(
            "Resolved {}/{} identifier(s), {} not found",
            resolved,
            results.len(),
            results.len() - resolved
        );

        #[cfg(feature = "cli")]
        if let Some(stats) = self.monitor.stats() {
            tracing::info!(
                "Resource usage: {:.1}% CPU, {} MB (peak {} MB), {:.2?} elapsed",
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.elapsed
            );
        }

        Ok(results)
    }
}
