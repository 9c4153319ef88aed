use super::gate::{RequestGate, Ticket};
use super::store::WizardStore;
use super::types::ConnectionStatus;
use crate::services::api::{ConnectionApi, ConnectionTestResult};
use crate::services::errors::{ApiResult, WizardError, WizardResult};
use crate::{console_debug, console_info, console_warn};

/// Tri-state probe result for the configured source, plus the pending state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionTester {
    status: ConnectionStatus,
    message: Option<String>,
    gate: RequestGate,
}

impl ConnectionTester {
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_testing(&self) -> bool {
        self.gate.is_in_flight()
    }

    /// The test button stays disabled while a probe is pending
    pub fn can_test(&self) -> bool {
        !self.gate.is_in_flight()
    }

    pub fn begin(&mut self) -> WizardResult<Ticket> {
        let ticket = self
            .gate
            .try_begin()
            .ok_or(WizardError::ConnectionTestInFlight)?;
        self.status = ConnectionStatus::Testing;
        self.message = None;
        Ok(ticket)
    }

    /// Apply a probe outcome. Stale tickets are rejected with `Discarded` and
    /// leave the current status alone.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: ApiResult<ConnectionTestResult>,
    ) -> WizardResult<ConnectionStatus> {
        if !self.gate.finish(ticket) {
            return Err(WizardError::Discarded);
        }

        match outcome {
            Ok(result) if result.success => {
                self.status = ConnectionStatus::Success;
                self.message = result.message;
            }
            Ok(result) => {
                self.status = ConnectionStatus::Error;
                self.message = Some(
                    result
                        .message
                        .unwrap_or_else(|| "Connection failed".to_string()),
                );
            }
            Err(e) => {
                self.status = ConnectionStatus::Error;
                self.message = Some(e.user_message());
            }
        }
        Ok(self.status)
    }

    /// Forget any result and drop a pending probe
    pub fn reset(&mut self) {
        self.gate.invalidate();
        self.status = ConnectionStatus::Idle;
        self.message = None;
    }

    pub(crate) fn successor(&self) -> Self {
        Self {
            gate: self.gate.successor(),
            ..Self::default()
        }
    }
}

/// Probe the source connection currently entered in the form.
///
/// Rejected with `ConnectionTestInFlight` while another probe is pending. The
/// result is discarded if the view closed, the wizard was cancelled or a
/// source field was edited while the probe was running.
pub async fn test_source_connection<S, A>(store: &S, api: &A) -> WizardResult<ConnectionStatus>
where
    S: WizardStore,
    A: ConnectionApi + ?Sized,
{
    let (ticket, config) = store.update(|state| state.begin_connection_test())?;
    console_info!(
        "[ConnectionTest] Probing {}",
        config.display_target()
    );

    let outcome = api.test_connection_config(&config).await;

    if !store.is_live() {
        console_debug!("[ConnectionTest] View closed before the probe finished, dropping result");
        return Err(WizardError::Discarded);
    }

    let status = store.update(|state| state.finish_connection_test(ticket, outcome));
    match &status {
        Ok(ConnectionStatus::Success) => {
            console_info!("[ConnectionTest] {} is reachable", config.display_target())
        }
        Ok(other) => console_warn!(
            "[ConnectionTest] {} probe finished with {:?}",
            config.display_target(),
            other
        ),
        Err(e) => console_debug!("[ConnectionTest] Result not applied: {}", e),
    }
    status
}
