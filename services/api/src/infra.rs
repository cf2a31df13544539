use chrono::{DateTime, Utc};
use formdesk::blogs::{Blog, BlogId, BlogRepository};
use formdesk::forms::programmes::{Programme, ProgrammeId, ProgrammeRepository};
use formdesk::forms::repository::{FormKey, FormRepository, RepositoryError};
use formdesk::forms::schema::FormSchema;
use formdesk::forms::submissions::{
    Submission, SubmissionFilter, SubmissionId, SubmissionRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct Documents {
    blogs: HashMap<BlogId, Blog>,
    eligibility_form: Option<FormSchema>,
    programmes: HashMap<ProgrammeId, Programme>,
    submissions: HashMap<SubmissionId, Submission>,
}

/// Process-local document store. A programme's form lives inside the programme document.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStore {
    documents: Arc<Mutex<Documents>>,
}

impl InMemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, Documents>, RepositoryError> {
        self.documents
            .lock()
            .map_err(|_| RepositoryError::Unavailable("document store lock poisoned".to_string()))
    }
}

impl FormRepository for InMemoryStore {
    fn fetch_form(&self, key: &FormKey) -> Result<Option<FormSchema>, RepositoryError> {
        let documents = self.lock()?;
        match key {
            FormKey::Eligibility => Ok(documents.eligibility_form.clone()),
            FormKey::Programme { programme_id } => documents
                .programmes
                .get(programme_id)
                .map(|programme| programme.form.clone())
                .ok_or(RepositoryError::NotFound),
        }
    }

    fn store_form(&self, key: &FormKey, schema: FormSchema) -> Result<(), RepositoryError> {
        let mut documents = self.lock()?;
        match key {
            FormKey::Eligibility => documents.eligibility_form = Some(schema),
            FormKey::Programme { programme_id } => {
                let programme = documents
                    .programmes
                    .get_mut(programme_id)
                    .ok_or(RepositoryError::NotFound)?;
                programme.form = Some(schema);
                programme.updated_at = Utc::now();
            }
        }
        Ok(())
    }
}

impl ProgrammeRepository for InMemoryStore {
    fn insert(&self, programme: Programme) -> Result<Programme, RepositoryError> {
        let mut documents = self.lock()?;
        if documents.programmes.contains_key(&programme.id) {
            return Err(RepositoryError::Conflict);
        }
        documents
            .programmes
            .insert(programme.id.clone(), programme.clone());
        Ok(programme)
    }

    fn fetch(&self, id: &ProgrammeId) -> Result<Option<Programme>, RepositoryError> {
        Ok(self.lock()?.programmes.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Programme>, RepositoryError> {
        Ok(self.lock()?.programmes.values().cloned().collect())
    }

    fn update(&self, programme: Programme) -> Result<Programme, RepositoryError> {
        let mut documents = self.lock()?;
        let slot = documents
            .programmes
            .get_mut(&programme.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = programme.clone();
        Ok(programme)
    }

    fn delete(&self, id: &ProgrammeId) -> Result<Programme, RepositoryError> {
        self.lock()?
            .programmes
            .remove(id)
            .ok_or(RepositoryError::NotFound)
    }
}

impl BlogRepository for InMemoryStore {
    fn insert(&self, blog: Blog) -> Result<Blog, RepositoryError> {
        let mut documents = self.lock()?;
        if documents.blogs.contains_key(&blog.id) {
            return Err(RepositoryError::Conflict);
        }
        documents.blogs.insert(blog.id.clone(), blog.clone());
        Ok(blog)
    }

    fn fetch(&self, id: &BlogId) -> Result<Option<Blog>, RepositoryError> {
        Ok(self.lock()?.blogs.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Blog>, RepositoryError> {
        Ok(self.lock()?.blogs.values().cloned().collect())
    }

    fn update(&self, blog: Blog) -> Result<Blog, RepositoryError> {
        let mut documents = self.lock()?;
        let slot = documents
            .blogs
            .get_mut(&blog.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = blog.clone();
        Ok(blog)
    }

    fn delete(&self, id: &BlogId) -> Result<Blog, RepositoryError> {
        self.lock()?.blogs.remove(id).ok_or(RepositoryError::NotFound)
    }
}

impl SubmissionRepository for InMemoryStore {
    fn insert(&self, submission: Submission) -> Result<Submission, RepositoryError> {
        let mut documents = self.lock()?;
        if documents.submissions.contains_key(&submission.id) {
            return Err(RepositoryError::Conflict);
        }
        documents
            .submissions
            .insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        Ok(self.lock()?.submissions.get(id).cloned())
    }

    fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, RepositoryError> {
        Ok(self
            .lock()?
            .submissions
            .values()
            .filter(|submission| filter.matches(submission))
            .cloned()
            .collect())
    }

    fn mark_seen(
        &self,
        id: &SubmissionId,
        at: DateTime<Utc>,
    ) -> Result<Submission, RepositoryError> {
        let mut documents = self.lock()?;
        let submission = documents
            .submissions
            .get_mut(id)
            .ok_or(RepositoryError::NotFound)?;
        if !submission.seen {
            submission.seen = true;
            submission.updated_at = at;
        }
        Ok(submission.clone())
    }

    fn delete(&self, id: &SubmissionId) -> Result<Submission, RepositoryError> {
        self.lock()?
            .submissions
            .remove(id)
            .ok_or(RepositoryError::NotFound)
    }
}
