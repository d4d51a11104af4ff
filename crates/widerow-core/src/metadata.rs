//! Field classification and the per-type metadata cache.

use crate::{
    error::{ConfigError, Error},
    model::{FieldModel, KeyRole, RawField},
    traits::FieldValues,
};
use std::{
    any,
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Classify a raw field table into ordered descriptors.
///
/// Pure function of the table: walks declared fields in declaration
/// order, parses each annotation, and recursively splices traversed
/// sub-record tables in place with their own roles untranslated.
/// Any unrecognized qualifier on a non-embeddable field aborts the
/// whole type; there is never a partial result.
pub fn classify(
    type_name: &'static str,
    raw: &'static [RawField],
) -> Result<Vec<FieldModel>, Error> {
    let mut models = Vec::with_capacity(raw.len());

    for (pos, field) in raw.iter().enumerate() {
        let spec: &'static str = field.spec;
        let mut parts = spec.splitn(2, ',');
        let column = parts.next().unwrap_or_default();

        let role = match parts.next() {
            None => KeyRole::Ordinary,
            Some("key") => KeyRole::PartitionKey,
            Some("sort") => KeyRole::ClusteringKey,
            Some("traverse") => {
                let embed = field.embed.ok_or(ConfigError::NotTraversable {
                    type_name,
                    field: field.name,
                })?;
                models.extend(classify(type_name, embed())?);
                continue;
            }
            Some(other) => {
                // Structural-only embeddings carry no persisted columns.
                if field.embed.is_some() {
                    continue;
                }
                return Err(ConfigError::BadQualifier {
                    type_name,
                    field: field.name,
                    qualifier: other,
                }
                .into());
            }
        };

        models.push(FieldModel {
            pos,
            name: field.name,
            column,
            role,
        });
    }

    Ok(models)
}

///
/// MetadataCache
///
/// Memoizes classification per type name for the process lifetime.
/// Optimistic read under the shared lock; on miss, classification runs
/// outside any lock and the exclusive lock is held only for the map
/// insert. Two callers racing the same cold type may both classify;
/// classification is pure, so the duplicate write is wasted work, not
/// a correctness bug. Faults are never cached.
///

#[derive(Default)]
pub struct MetadataCache {
    defs: RwLock<HashMap<&'static str, Arc<[FieldModel]>>>,
}

impl MetadataCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptors for `R`, classified on first access.
    pub fn get<R: FieldValues>(&self) -> Result<Arc<[FieldModel]>, Error> {
        let key = any::type_name::<R>();

        let hit = self
            .defs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();
        if let Some(models) = hit {
            return Ok(models);
        }

        let models: Arc<[FieldModel]> = classify(key, R::raw_fields())?.into();
        self.defs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&models));

        Ok(models)
    }
}
