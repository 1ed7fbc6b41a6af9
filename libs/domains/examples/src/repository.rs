use async_trait::async_trait;
use pagination::{PageRequest, PageResult, SortOrder, sort_by_orders};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tokio::sync::RwLock;
use value_objects::ResourceId;

use crate::error::ExampleResult;
use crate::models::{Example, ExampleFilter};

/// Persistence port for examples.
///
/// This is the only dependency the service has on storage. Implementations
/// own identifier assignment, sorting by property name and conflict detection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExampleRepository: Send + Sync {
    /// Persist an example, assigning an identifier when it has none
    async fn save(&self, example: Example) -> ExampleResult<Example>;

    /// Get an example by ID; absence is not an error
    async fn find_by_id(&self, id: ResourceId) -> ExampleResult<Option<Example>>;

    /// List one page of examples, optionally filtered by example
    async fn find_all(
        &self,
        filter: Option<ExampleFilter>,
        page: PageRequest,
    ) -> ExampleResult<PageResult<Example>>;

    /// Delete an example by ID
    async fn delete(&self, id: ResourceId) -> ExampleResult<()>;
}

/// In-memory implementation of ExampleRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryExampleRepository {
    examples: Arc<RwLock<BTreeMap<ResourceId, Example>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryExampleRepository {
    pub fn new() -> Self {
        Self {
            examples: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub async fn len(&self) -> usize {
        self.examples.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.examples.read().await.is_empty()
    }

    fn assign_id(&self, example: &Example) -> ResourceId {
        match example.id {
            Some(id) if id.is_persisted() => {
                // keep generated ids ahead of explicitly supplied ones
                self.next_id
                    .fetch_max(id.value().saturating_add(1), AtomicOrdering::SeqCst);
                id
            }
            _ => ResourceId::new(self.next_id.fetch_add(1, AtomicOrdering::SeqCst)),
        }
    }
}

impl Default for InMemoryExampleRepository {
    fn default() -> Self {
        Self::new()
    }
}

const SORTABLE: &[&str] = &[
    "id",
    "name",
    "description",
    "createdAt",
    "created_at",
    "updatedAt",
    "updated_at",
];

/// Compare two examples on one sortable property
fn compare_by(a: &Example, b: &Example, property: &str) -> Ordering {
    match property {
        "id" => a.id.cmp(&b.id),
        "name" => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        "description" => a.description.cmp(&b.description),
        "createdAt" | "created_at" => a.created_at.cmp(&b.created_at),
        "updatedAt" | "updated_at" => a.updated_at.cmp(&b.updated_at),
        _ => Ordering::Equal,
    }
}

fn sort_examples(examples: &mut [Example], orders: &[SortOrder]) {
    for property in sort_by_orders(examples, orders, SORTABLE, compare_by) {
        tracing::debug!(property = %property, "Ignoring unknown sort property");
    }
}

#[async_trait]
impl ExampleRepository for InMemoryExampleRepository {
    async fn save(&self, example: Example) -> ExampleResult<Example> {
        let id = self.assign_id(&example);
        let saved = example.with_id(id);

        let mut examples = self.examples.write().await;
        examples.insert(id, saved.clone());

        tracing::debug!(example_id = %id, "Saved example");
        Ok(saved)
    }

    async fn find_by_id(&self, id: ResourceId) -> ExampleResult<Option<Example>> {
        let examples = self.examples.read().await;
        Ok(examples.get(&id).cloned())
    }

    async fn find_all(
        &self,
        filter: Option<ExampleFilter>,
        page: PageRequest,
    ) -> ExampleResult<PageResult<Example>> {
        let examples = self.examples.read().await;

        // BTreeMap iteration gives ascending id order, kept as the tiebreak
        let mut matching: Vec<Example> = examples
            .values()
            .filter(|e| filter.as_ref().is_none_or(|f| f.matches(e)))
            .cloned()
            .collect();
        drop(examples);

        sort_examples(&mut matching, &page.sort);

        let total = matching.len() as u64;
        let items = page.slice(matching);
        Ok(PageResult::from_raw(items, total, page.page, page.size))
    }

    async fn delete(&self, id: ResourceId) -> ExampleResult<()> {
        let mut examples = self.examples.write().await;
        if examples.remove(&id).is_some() {
            tracing::debug!(example_id = %id, "Deleted example");
        }
        Ok(())
    }
}
