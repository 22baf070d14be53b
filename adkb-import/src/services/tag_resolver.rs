//! Tag find-or-create
//!
//! Tags are shared by name across research entries. The resolver keeps a
//! per-run cache of every tag it has seen, so each distinct name costs at
//! most one store lookup and one insert per run.
//!
//! Find-then-create is not atomic. Two concurrent importers against the same
//! store could both miss and both insert the same name (the UNIQUE
//! constraint on `tags.name` would then fail one of them). The importer runs
//! as a single sequential writer, which is what makes this safe.

use adkb_common::db::{NewRecord, Store, Tag};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::ImportResult;

pub struct TagResolver {
    store: Arc<dyn Store>,
    cache: HashMap<String, Tag>,
    created: usize,
}

impl TagResolver {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            cache: HashMap::new(),
            created: 0,
        }
    }

    /// Return the tag named `name`, creating it if the store has none
    pub async fn resolve(&mut self, name: &str) -> ImportResult<Tag> {
        if let Some(tag) = self.cache.get(name) {
            debug!("Tag '{}' resolved from cache", name);
            return Ok(tag.clone());
        }

        let tag = match self.store.find_tag_by_name(name).await? {
            Some(existing) => {
                debug!("Tag '{}' found in store", name);
                existing
            }
            None => {
                let id = self
                    .store
                    .create(NewRecord::Tag {
                        name: name.to_string(),
                    })
                    .await?;
                self.created += 1;
                debug!("Tag '{}' created", name);
                Tag {
                    id,
                    name: name.to_string(),
                }
            }
        };

        self.cache.insert(name.to_string(), tag.clone());
        Ok(tag)
    }

    /// Tags created by this resolver
    pub fn created_count(&self) -> usize {
        self.created
    }
}
