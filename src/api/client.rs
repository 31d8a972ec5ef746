//! Expense store clients
//!
//! [`ExpenseStore`] is the seam between the ledger and the remote service:
//! the HTTP implementation talks to the REST API, and tests substitute an
//! in-memory fake. All methods are plain request/response calls with no
//! ordering guarantees between independently issued requests; callers that
//! need sequencing (create before refetch) await one call before issuing
//! the next.

use crate::api::payload::NewExpense;
use crate::types::{Expense, LedgerError, Member};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Remote expense store operations
///
/// Every call may be pending, succeed, or fail; implementations must never
/// mutate caller-visible state on failure.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Fetch all expenses of a group, including resolved splits
    async fn fetch_expenses(&self, group_id: &str) -> Result<Vec<Expense>, LedgerError>;

    /// Fetch the member roster of a group
    async fn fetch_members(&self, group_id: &str) -> Result<Vec<Member>, LedgerError>;

    /// Create an expense; the response carries the server-assigned id
    async fn create_expense(&self, expense: &NewExpense) -> Result<Expense, LedgerError>;

    /// Delete an expense by id
    async fn delete_expense(&self, expense_id: &str) -> Result<(), LedgerError>;
}

/// Group endpoint response
///
/// Only the roster is consumed here; the group's other fields belong to the
/// group-management side of the application.
#[derive(Deserialize)]
struct GroupResponse {
    #[serde(default)]
    members: Vec<Member>,
}

/// HTTP implementation of [`ExpenseStore`]
///
/// Thin typed wrapper over the REST API: bearer-token auth, a 30s request
/// timeout, JSON bodies. Errors are mapped into [`LedgerError`] remote
/// variants; this client never panics on a bad response.
#[derive(Clone)]
pub struct HttpExpenseStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpExpenseStore {
    /// Create a client for the given API root
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, e.g. `https://api.example.com/api` (trailing
    ///   slash tolerated)
    /// * `token` - Opaque bearer token; acquiring it is out of scope
    ///
    /// # Errors
    ///
    /// [`LedgerError::Remote`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(HttpExpenseStore {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response to an Api error with its body text
    async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, LedgerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        Err(LedgerError::api(status.as_u16(), message))
    }
}

#[async_trait]
impl ExpenseStore for HttpExpenseStore {
    async fn fetch_expenses(&self, group_id: &str) -> Result<Vec<Expense>, LedgerError> {
        let url = self.url(&format!("/groups/{}/expenses", group_id));
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = Self::error_for_status(response).await?;

        Ok(response.json().await?)
    }

    async fn fetch_members(&self, group_id: &str) -> Result<Vec<Member>, LedgerError> {
        let url = self.url(&format!("/groups/{}", group_id));
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = Self::error_for_status(response).await?;

        let group: GroupResponse = response.json().await?;
        Ok(group.members)
    }

    async fn create_expense(&self, expense: &NewExpense) -> Result<Expense, LedgerError> {
        let url = self.url("/expenses");
        log::debug!("POST {} ({} split)", url, expense.split.split_type().label());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(expense)
            .send()
            .await?;
        let response = Self::error_for_status(response).await?;

        Ok(response.json().await?)
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<(), LedgerError> {
        let url = self.url(&format!("/expenses/{}", expense_id));
        log::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::error_for_status(response).await?;

        Ok(())
    }
}
