use crate::core::standardize::standardize;
use crate::domain::model::{Identifier, Resolution, ResolveOptions};
use crate::domain::ports::{LocalIndex, RemoteResolver};

/// Batch identifier resolution: local index first, remote service as
/// fallback, per-element soft failure.
pub struct Resolver<L: LocalIndex, R: RemoteResolver> {
    index: Option<L>,
    remote: R,
}

impl<L: LocalIndex, R: RemoteResolver> Resolver<L, R> {
    pub fn new(index: Option<L>, remote: R) -> Self {
        Self { index, remote }
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Resolve a single identifier.
    pub async fn resolve_one(
        &self,
        identifier: impl Into<Identifier>,
        options: &ResolveOptions,
    ) -> Resolution {
        self.resolve_element(&identifier.into(), options).await
    }

    /// Resolve an ordered batch. The output has one entry per input, in
    /// input order. Individual failures produce all-`None` entries; this
    /// call never fails as a whole.
    pub async fn resolve_batch<I>(&self, identifiers: I, options: &ResolveOptions) -> Vec<Resolution>
    where
        I: IntoIterator,
        I::Item: Into<Identifier>,
    {
        let identifiers: Vec<Identifier> = identifiers.into_iter().map(Into::into).collect();
        let total = identifiers.len();

        let mut results = Vec::with_capacity(total);
        for (position, identifier) in identifiers.iter().enumerate() {
            if options.show_progress {
                tracing::info!("({}/{}) resolving '{}'", position + 1, total, identifier);
            }
            results.push(self.resolve_element(identifier, options).await);
        }
        results
    }

    async fn resolve_element(
        &self,
        identifier: &Identifier,
        options: &ResolveOptions,
    ) -> Resolution {
        let Some(key) = standardize(identifier) else {
            tracing::debug!("identifier '{}' cannot be standardized", identifier);
            return Resolution::unresolved();
        };

        let mut hit = None;

        if options.try_local_first {
            if let Some(index) = &self.index {
                hit = index.lookup(&key);
            }
        }

        // Local miss (or local pass disabled): ask the remote service.
        if hit.is_none() {
            hit = match self.remote.resolve(&key).await {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!("remote lookup failed for '{}': {}", key.query(), e);
                    None
                }
            };
        }

        let mut resolution = hit.unwrap_or_else(Resolution::unresolved);
        if !options.return_id {
            resolution.id = None;
        }
        resolution
    }
}
