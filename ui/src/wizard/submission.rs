use super::gate::{RequestGate, Ticket};
use super::store::WizardStore;
use super::types::SubmissionStatus;
use crate::services::api::{Migration, MigrationsApi};
use crate::services::errors::{ApiResult, WizardError, WizardResult};
use crate::{console_error, console_info};

/// Submit-button state: disabled while a request is pending and after success
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmissionHandler {
    status: SubmissionStatus,
    error: Option<String>,
    gate: RequestGate,
}

impl SubmissionHandler {
    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.gate.is_in_flight()
    }

    pub fn is_enabled(&self) -> bool {
        !self.gate.is_in_flight()
            && !matches!(self.status, SubmissionStatus::Succeeded { .. })
    }

    pub fn begin(&mut self) -> WizardResult<Ticket> {
        if matches!(self.status, SubmissionStatus::Succeeded { .. }) {
            return Err(WizardError::SubmissionInFlight);
        }
        let ticket = self
            .gate
            .try_begin()
            .ok_or(WizardError::SubmissionInFlight)?;
        self.status = SubmissionStatus::Submitting;
        self.error = None;
        Ok(ticket)
    }

    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: ApiResult<Migration>,
    ) -> WizardResult<Migration> {
        if !self.gate.finish(ticket) {
            return Err(WizardError::Discarded);
        }

        match outcome {
            Ok(migration) => {
                self.status = SubmissionStatus::Succeeded {
                    migration_id: migration.id.clone(),
                };
                Ok(migration)
            }
            Err(e) => {
                self.status = SubmissionStatus::Failed;
                self.error = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Record a client-side rejection (validation) without touching the gate
    pub fn reject(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn successor(&self) -> Self {
        Self {
            gate: self.gate.successor(),
            ..Self::default()
        }
    }
}

/// Create the migration from the wizard's current data.
///
/// Validation failures never reach the network. On API failure the error is
/// stored for the banner, the submit control is re-enabled and the form data
/// is kept for correction. On success the caller navigates to the migration list.
pub async fn submit_migration<S, A>(store: &S, api: &A) -> WizardResult<Migration>
where
    S: WizardStore,
    A: MigrationsApi + ?Sized,
{
    let (ticket, request) = store.update(|state| state.begin_submission())?;
    console_info!(
        "[Submit] Creating migration '{}' with {} tables",
        request.name,
        request.tables.len()
    );

    let outcome = api.create_migration(request).await;

    if !store.is_live() {
        console_info!("[Submit] View closed before the backend answered, dropping result");
        return Err(WizardError::Discarded);
    }

    let result = store.update(|state| state.finish_submission(ticket, outcome));
    match &result {
        Ok(migration) => console_info!("[Submit] Migration {} created", migration.id),
        Err(e) => console_error!("[Submit] Migration was not created: {}", e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::{CreateMigrationRequest, InMemoryApi, TableInfo};
    use crate::services::config::WizardConfig;
    use crate::services::errors::ApiError;
    use crate::wizard::state::WizardState;
    use crate::wizard::store::ViewStore;
    use crate::wizard::types::{SourceField, WizardAction};
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use tokio::sync::oneshot;

    fn ready_to_submit() -> Rc<RefCell<WizardState>> {
        let mut state = WizardState::new(WizardConfig::default());
        state.reduce_in_place(WizardAction::SetName("Legacy CRM".into()));
        state.reduce_in_place(WizardAction::Next);
        state.reduce_in_place(WizardAction::SetSourceField(SourceField::Host, "sql01".into()));
        state.reduce_in_place(WizardAction::SetSourceField(SourceField::Database, "crm".into()));
        state.reduce_in_place(WizardAction::SetSourceField(SourceField::Username, "sa".into()));
        state.reduce_in_place(WizardAction::Next);
        state.reduce_in_place(WizardAction::SetTargetProject("warehouse".into()));
        state.reduce_in_place(WizardAction::Next);
        state.load_catalog(vec![
            TableInfo {
                name: "accounts".into(),
                row_count: 120,
            },
            TableInfo {
                name: "contacts".into(),
                row_count: 4_000,
            },
        ]);
        state.reduce_in_place(WizardAction::ToggleTable("contacts".into()));
        assert_eq!(state.controller().current_step(), 4);
        Rc::new(RefCell::new(state))
    }

    /// Backend whose create call stays pending until the test answers it
    struct HeldCreate {
        answer: RefCell<Option<oneshot::Receiver<Migration>>>,
        calls: Cell<u32>,
    }

    #[async_trait(?Send)]
    impl MigrationsApi for HeldCreate {
        async fn create_migration(&self, request: CreateMigrationRequest) -> ApiResult<Migration> {
            self.calls.set(self.calls.get() + 1);
            let receiver = self.answer.borrow_mut().take();
            match receiver {
                Some(rx) => rx.await.map_err(|_| ApiError::network("request dropped")),
                None => Err(ApiError::http(500, format!("unexpected create for {}", request.name))),
            }
        }

        async fn list_migrations(&self) -> ApiResult<Vec<Migration>> {
            Ok(Vec::new())
        }

        async fn delete_migration(&self, _id: &str) -> ApiResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let store = ready_to_submit();
        let api = InMemoryApi::new();

        let migration = submit_migration(&store, &api).await.unwrap();
        assert_eq!(migration.name, "Legacy CRM");
        assert_eq!(migration.table_count, 1);
        assert_eq!(
            store.borrow().submission().status(),
            &SubmissionStatus::Succeeded {
                migration_id: migration.id.clone()
            }
        );

        // No second create once the first one succeeded
        let again = submit_migration(&store, &api).await;
        assert_eq!(again, Err(WizardError::SubmissionInFlight));
        assert_eq!(api.create_migration_calls(), 1);
    }

    #[tokio::test]
    async fn test_backend_rejection_keeps_form_data() {
        let store = ready_to_submit();
        let api = InMemoryApi::new();
        api.fail_next_create_migration(ApiError::http(422, "Migration name already exists"));
        let before = store.borrow().form_data().clone();

        let result = submit_migration(&store, &api).await;
        assert!(matches!(result, Err(WizardError::Api(_))));

        {
            let state = store.borrow();
            assert!(state.submission().is_enabled());
            assert_eq!(state.submission().status(), &SubmissionStatus::Failed);
            assert_eq!(
                state.submission().error(),
                Some("Migration name already exists")
            );
            assert_eq!(state.form_data(), &before);
        }

        store
            .borrow_mut()
            .reduce_in_place(WizardAction::DismissSubmitError);
        assert!(store.borrow().submission().error().is_none());

        // User-initiated retry succeeds
        assert!(submit_migration(&store, &api).await.is_ok());
        assert_eq!(api.create_migration_calls(), 2);
    }

    #[tokio::test]
    async fn test_invalid_last_step_never_calls_backend() {
        let store = ready_to_submit();
        store
            .borrow_mut()
            .reduce_in_place(WizardAction::DeselectAllTables);
        let api = InMemoryApi::new();

        let result = submit_migration(&store, &api).await;
        assert!(matches!(result, Err(WizardError::Validation { step: 4, .. })));
        assert_eq!(api.create_migration_calls(), 0);
        assert_eq!(
            store.borrow().submission().error(),
            Some("Select at least one table to migrate")
        );
    }

    #[tokio::test]
    async fn test_submit_refused_before_last_step() {
        let store = ready_to_submit();
        store.borrow_mut().reduce_in_place(WizardAction::Previous);
        let api = InMemoryApi::new();

        let result = submit_migration(&store, &api).await;
        assert_eq!(result, Err(WizardError::NotOnLastStep { current_step: 3 }));
        assert_eq!(api.create_migration_calls(), 0);
    }

    #[tokio::test]
    async fn test_double_submit_rejected_while_pending() {
        let store = ready_to_submit();
        let api = InMemoryApi::new();

        let ticket = store.borrow_mut().begin_submission().map(|(t, _)| t).unwrap();
        assert!(!store.borrow().submission().is_enabled());

        let second = submit_migration(&store, &api).await;
        assert_eq!(second, Err(WizardError::SubmissionInFlight));
        assert_eq!(api.create_migration_calls(), 0);

        let failed = store
            .borrow_mut()
            .finish_submission(ticket, Err(ApiError::network("offline")));
        assert!(failed.is_err());
        assert!(store.borrow().submission().is_enabled());
    }

    #[tokio::test]
    async fn test_created_migration_after_view_closed_is_dropped() {
        let store = ViewStore::new(ready_to_submit().borrow().clone());
        let (tx, rx) = oneshot::channel();
        let api = HeldCreate {
            answer: RefCell::new(Some(rx)),
            calls: Cell::new(0),
        };

        let mut pending = Box::pin(submit_migration(&store, &api));
        assert!(futures::poll!(pending.as_mut()).is_pending());
        assert!(store.snapshot().submission().is_submitting());

        store.unmount();
        let closed = store.snapshot();
        assert!(!closed.submission().is_submitting());

        let created = InMemoryApi::new()
            .create_migration(closed.build_request())
            .await
            .unwrap();
        tx.send(created).unwrap();

        assert_eq!(pending.await, Err(WizardError::Discarded));
        assert_eq!(store.snapshot(), closed);
        assert_eq!(closed.submission().status(), &SubmissionStatus::default());
        assert_eq!(api.calls.get(), 1);
    }
}
