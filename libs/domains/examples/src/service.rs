use pagination::{PageLimits, PageRequest, PageResult};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;
use value_objects::ResourceId;

use crate::error::{ExampleError, ExampleResult};
use crate::models::{
    CreateExample, Example, ExampleFilter, ExamplePatch, PatchRequest, ReplaceExample,
};
use crate::repository::ExampleRepository;

/// Field matched by free-text search in [`ExampleService::find_all`]
pub const SEARCH_FIELD: &str = ExamplePatch::NAME;

/// Service layer for Example business logic.
///
/// Holds no aggregates between calls: every operation re-reads through the
/// repository. Find-then-save sequences are not locked; conflict detection,
/// if any, belongs to the repository.
#[derive(Clone)]
pub struct ExampleService<R: ExampleRepository> {
    repository: Arc<R>,
    limits: PageLimits,
}

impl<R: ExampleRepository> ExampleService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_limits(repository, PageLimits::default())
    }

    pub fn with_limits(repository: R, limits: PageLimits) -> Self {
        Self {
            repository: Arc::new(repository),
            limits,
        }
    }

    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    /// Create a new example
    #[instrument(skip(self, input), fields(example_name = %input.name))]
    pub async fn create(&self, input: CreateExample) -> ExampleResult<Example> {
        input.validate()?;

        let example = Example::from_input(input)?;
        let created = self.repository.save(example).await?;

        tracing::info!(example_id = ?created.id, "Created example");
        Ok(created)
    }

    /// Get an example by ID
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: ResourceId) -> ExampleResult<Example> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ExampleError::NotFound(id))
    }

    /// Replace every mutable field of an existing example
    #[instrument(skip(self, replacement))]
    pub async fn update(&self, id: ResourceId, replacement: ReplaceExample) -> ExampleResult<Example> {
        let existing = self.find_by_id(id).await?;
        replacement.validate()?;

        let updated = self.repository.save(existing.replaced(replacement)?).await?;

        tracing::info!(example_id = %id, "Updated example");
        Ok(updated)
    }

    /// Delete an existing example; deleting an absent id is `NotFound`
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ResourceId) -> ExampleResult<()> {
        self.find_by_id(id).await?;
        self.repository.delete(id).await?;

        tracing::info!(example_id = %id, "Deleted example");
        Ok(())
    }

    /// List examples, optionally narrowed by a case-insensitive substring
    /// match on the name
    #[instrument(skip(self, page))]
    pub async fn find_all(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> ExampleResult<PageResult<Example>> {
        let page = page.normalize(&self.limits);
        let filter = search
            .filter(|text| !text.trim().is_empty())
            .map(ExampleFilter::by_name);

        tracing::debug!(
            page = page.page,
            size = page.size,
            filtered = filter.is_some(),
            "Listing examples"
        );
        self.repository.find_all(filter, page).await
    }

    /// Change one field, chosen by property name
    #[instrument(skip(self, request), fields(property = %request.property))]
    pub async fn patch(&self, id: ResourceId, request: PatchRequest) -> ExampleResult<Example> {
        let existing = self.find_by_id(id).await?;

        let patch = ExamplePatch::try_from(request).inspect_err(|e| {
            tracing::warn!(example_id = %id, error = %e, "Rejected patch");
        })?;

        self.apply_patch(existing, patch).await
    }

    /// Change one field with an already parsed patch
    #[instrument(skip(self, patch))]
    pub async fn patch_field(&self, id: ResourceId, patch: ExamplePatch) -> ExampleResult<Example> {
        let existing = self.find_by_id(id).await?;
        self.apply_patch(existing, patch).await
    }

    async fn apply_patch(&self, existing: Example, patch: ExamplePatch) -> ExampleResult<Example> {
        let property = patch.property();
        let patched = self.repository.save(existing.patched(patch)?).await?;

        tracing::info!(example_id = ?patched.id, property, "Patched example");
        Ok(patched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockExampleRepository;
    use mockall::predicate::{always, eq};

    fn stored(id: u64, name: &str) -> Example {
        Example::new(name, Some("Original description".to_string()))
            .unwrap()
            .with_id(ResourceId::new(id))
    }

    fn absent_repo(id: ResourceId) -> MockExampleRepository {
        let mut mock_repo = MockExampleRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_save().never();
        mock_repo.expect_delete().never();
        mock_repo
    }

    #[tokio::test]
    async fn test_find_by_id_absent_is_not_found() {
        let id = ResourceId::new(5);
        let service = ExampleService::new(absent_repo(id));

        let result = service.find_by_id(id).await;
        assert!(matches!(result, Err(ExampleError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_create_invalid_input_does_not_save() {
        let mut mock_repo = MockExampleRepository::new();
        mock_repo.expect_save().never();

        let service = ExampleService::new(mock_repo);
        let result = service
            .create(CreateExample {
                name: "x".repeat(101),
                description: None,
            })
            .await;
        assert!(matches!(result, Err(ExampleError::Validation(msg)) if msg.contains("name")));
    }

    #[tokio::test]
    async fn test_update_invalid_replacement_does_not_save() {
        let id = ResourceId::new(3);
        let mut mock_repo = MockExampleRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored(3, "Alpha Suite"))));
        mock_repo.expect_save().never();

        let service = ExampleService::new(mock_repo);
        let result = service
            .update(
                id,
                ReplaceExample {
                    name: "Alpha Suite".to_string(),
                    description: Some("d".repeat(501)),
                },
            )
            .await;
        assert!(matches!(result, Err(ExampleError::Validation(msg)) if msg.contains("description")));
    }

    #[tokio::test]
    async fn test_update_absent_does_not_save() {
        let id = ResourceId::new(5);
        let service = ExampleService::new(absent_repo(id));

        let result = service
            .update(
                id,
                ReplaceExample {
                    name: "New".to_string(),
                    description: None,
                },
            )
            .await;
        assert!(matches!(result, Err(ExampleError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_absent_does_not_delete() {
        let id = ResourceId::new(5);
        let service = ExampleService::new(absent_repo(id));

        assert!(matches!(
            service.delete(id).await,
            Err(ExampleError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_patch_absent_is_not_found() {
        let id = ResourceId::new(5);
        let service = ExampleService::new(absent_repo(id));

        let result = service.patch(id, PatchRequest::new("name", "X")).await;
        assert!(matches!(result, Err(ExampleError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_patch_unknown_property_performs_no_write() {
        let id = ResourceId::new(3);
        let mut mock_repo = MockExampleRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .returning(|id| Ok(Some(stored(id.value(), "Alpha Suite"))));
        mock_repo.expect_save().never();

        let service = ExampleService::new(mock_repo);
        let result = service.patch(id, PatchRequest::new("id", "99")).await;

        assert!(matches!(result, Err(ExampleError::UnknownProperty(p)) if p == "id"));
    }

    #[tokio::test]
    async fn test_patch_name_changes_only_name() {
        let id = ResourceId::new(3);
        let mut mock_repo = MockExampleRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored(id.value(), "Alpha Suite"))));
        mock_repo
            .expect_save()
            .times(1)
            .withf(|e| e.name == "X" && e.description.as_deref() == Some("Original description"))
            .returning(Ok);

        let service = ExampleService::new(mock_repo);
        let patched = service.patch(id, PatchRequest::new("name", "X")).await.unwrap();

        assert_eq!(patched.id, Some(id));
        assert_eq!(patched.name, "X");
        assert_eq!(patched.description.as_deref(), Some("Original description"));
    }

    #[tokio::test]
    async fn test_delete_existing_calls_repository() {
        let id = ResourceId::new(8);
        let mut mock_repo = MockExampleRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored(id.value(), "Alpha Suite"))));
        mock_repo
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(()));

        let service = ExampleService::new(mock_repo);
        service.delete(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_repository_failures_propagate_unchanged() {
        let mut mock_repo = MockExampleRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|_| Err(ExampleError::Internal("connection reset".to_string())));

        let service = ExampleService::new(mock_repo);
        let result = service.find_by_id(ResourceId::new(1)).await;
        assert!(matches!(result, Err(ExampleError::Internal(msg)) if msg == "connection reset"));
    }

    #[tokio::test]
    async fn test_blank_search_lists_unfiltered() {
        let mut mock_repo = MockExampleRepository::new();
        mock_repo
            .expect_find_all()
            .with(eq(None), always())
            .times(2)
            .returning(|_, page| Ok(PageResult::from_raw(vec![], 0, page.page, page.size)));

        let service = ExampleService::new(mock_repo);
        service.find_all(None, PageRequest::new(0, 10)).await.unwrap();
        service.find_all(Some("   "), PageRequest::new(0, 10)).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_builds_name_filter_and_normalizes_page() {
        let mut mock_repo = MockExampleRepository::new();
        mock_repo
            .expect_find_all()
            .withf(|filter, page| {
                filter.as_ref() == Some(&ExampleFilter::by_name(" ALPHA ")) && page.size == 50
            })
            .times(1)
            .returning(|_, page| Ok(PageResult::from_raw(vec![], 0, page.page, page.size)));

        let service = ExampleService::with_limits(mock_repo, PageLimits::new(10, 50));
        let result = service
            .find_all(Some(" ALPHA "), PageRequest::new(0, 500))
            .await
            .unwrap();
        assert_eq!(result.size, 50);
    }
}
