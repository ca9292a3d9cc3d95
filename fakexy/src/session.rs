//! The current address, held as an explicit value.
//!
//! A [`Session`] owns the most recently displayed record. Each fetch takes a
//! [`FetchTicket`] and reports back through [`Session::complete`]; the
//! [`StalePolicy`] decides what happens when fetches overlap.

use tracing::{debug, info};

use crate::api::{AddressRequest, ApiClient, ClientError};
use crate::order::PreferredOrder;
use crate::record::{AddressRecord, FetchedAddress};
use crate::render::{
    copy_all, render_failure, render_record, Clipboard, ClipboardError, RenderTarget, Rendered,
    SKELETON_PLACEHOLDERS,
};

/// What to do with a response whose request has since been superseded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Whatever completes last is shown, even if it was requested first.
    #[default]
    LastCompleted,
    /// Only the most recently issued request may replace the current record.
    LatestRequest,
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Result of handing a fetch outcome to the session.
#[derive(Debug)]
pub enum Completion {
    /// The record replaced the current one.
    Updated,
    /// The fetch failed; the current record is unchanged.
    Failed(ClientError),
    /// The response belonged to a superseded request and was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct Session {
    preferred: PreferredOrder,
    policy: StalePolicy,
    current: Option<AddressRecord>,
    suggestion: Option<String>,
    issued: u64,
}

impl Session {
    pub fn new(preferred: PreferredOrder) -> Self {
        Self::with_policy(preferred, StalePolicy::default())
    }

    pub fn with_policy(preferred: PreferredOrder, policy: StalePolicy) -> Self {
        Self {
            preferred,
            policy,
            current: None,
            suggestion: None,
            issued: 0,
        }
    }

    pub fn preferred(&self) -> &PreferredOrder {
        &self.preferred
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    /// The record currently on display, if any fetch has succeeded.
    pub fn current(&self) -> Option<&AddressRecord> {
        self.current.as_ref()
    }

    /// The suggestion that accompanied the current record.
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Start a fetch.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    fn is_superseded(&self, ticket: FetchTicket) -> bool {
        self.policy == StalePolicy::LatestRequest && ticket.0 < self.issued
    }

    /// Record the outcome of a fetch.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<FetchedAddress, ClientError>,
    ) -> Completion {
        if self.is_superseded(ticket) {
            debug!(
                "Dropping response for ticket {} (latest is {})",
                ticket.0, self.issued
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(fetched) => {
                self.current = Some(fetched.record);
                self.suggestion = fetched.suggestion;
                Completion::Updated
            }
            Err(e) => Completion::Failed(e),
        }
    }

    /// Render whatever the session currently holds.
    pub fn render<T: RenderTarget + ?Sized>(&self, target: &mut T) -> Rendered {
        if let Some(suggestion) = &self.suggestion {
            target.suggestion(suggestion);
        }
        render_record(target, self.current.as_ref(), &self.preferred)
    }

    /// Fetch an address, make it current and render it.
    ///
    /// Failures are rendered inline and returned; the previous record stays current.
    pub async fn load<T: RenderTarget + ?Sized>(
        &mut self,
        client: &ApiClient,
        request: &AddressRequest,
        target: &mut T,
    ) -> Result<Rendered, ClientError> {
        let ticket = self.begin_fetch();
        target.loading(SKELETON_PLACEHOLDERS);

        let outcome = client.fetch(request).await;
        match self.complete(ticket, outcome) {
            Completion::Updated => {
                info!("Showing {}", request);
                Ok(self.render(target))
            }
            Completion::Failed(e) => {
                render_failure(target, &e);
                Err(e)
            }
            // Sequential loads never overlap
            Completion::Stale => Ok(self.render(target)),
        }
    }

    /// Copy the current record to the clipboard.
    pub fn copy_all<C, T>(&self, clipboard: &mut C, target: &mut T) -> Result<(), ClipboardError>
    where
        C: Clipboard + ?Sized,
        T: RenderTarget + ?Sized,
    {
        copy_all(clipboard, target, self.current.as_ref(), &self.preferred)
    }
}
