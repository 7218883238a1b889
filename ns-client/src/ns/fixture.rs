//! Fixture gateway for running without NS credentials.
//!
//! Serves XML documents from memory or from a directory of files named
//! after [`Endpoint::fixture_name`], and records every request it answers.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::xml::Document;

use super::endpoint::{Endpoint, QueryOptions};
use super::error::NsError;
use super::gateway::Gateway;

#[derive(Debug, Default)]
struct FixtureLog {
    login_ok: bool,
    login_checks: usize,
    requests: Vec<(Endpoint, QueryOptions)>,
}

/// Gateway that answers every request from static XML.
///
/// Options are recorded but do not influence the answer. Clones share the
/// request log and the login flag.
#[derive(Debug, Clone)]
pub struct FixtureGateway {
    documents: Arc<HashMap<Endpoint, String>>,
    log: Arc<Mutex<FixtureLog>>,
}

impl FixtureGateway {
    /// Create a gateway from in-memory documents. Login succeeds.
    pub fn new(documents: impl IntoIterator<Item = (Endpoint, String)>) -> Self {
        Self {
            documents: Arc::new(documents.into_iter().collect()),
            log: Arc::new(Mutex::new(FixtureLog {
                login_ok: true,
                ..FixtureLog::default()
            })),
        }
    }

    /// Load `{name}.xml` files from a directory, e.g. `stations.xml`.
    ///
    /// Missing files are allowed as long as at least one endpoint has a
    /// fixture; requests for the others fail with [`NsError::Fixture`].
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, NsError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(NsError::fixture(format!(
                "fixture directory {} does not exist",
                dir.display()
            )));
        }

        let mut documents = Vec::new();
        for endpoint in Endpoint::ALL {
            let path = dir.join(format!("{}.xml", endpoint.fixture_name()));
            if !path.is_file() {
                continue;
            }
            let xml = std::fs::read_to_string(&path).map_err(|e| {
                NsError::fixture(format!("failed to read {}: {e}", path.display()))
            })?;
            documents.push((endpoint, xml));
        }

        if documents.is_empty() {
            return Err(NsError::fixture(format!(
                "no fixture files found in {}",
                dir.display()
            )));
        }

        debug!(dir = %dir.display(), count = documents.len(), "loaded fixtures");
        Ok(Self::new(documents))
    }

    /// Set whether the login check succeeds.
    pub async fn set_login(&self, ok: bool) {
        self.log.lock().await.login_ok = ok;
    }

    /// Builder form of [`FixtureGateway::set_login`].
    ///
    /// The returned gateway starts a fresh log, no longer shared with
    /// earlier clones.
    pub fn with_login(self, ok: bool) -> Self {
        Self {
            documents: self.documents,
            log: Arc::new(Mutex::new(FixtureLog {
                login_ok: ok,
                ..FixtureLog::default()
            })),
        }
    }

    /// Requests answered so far, oldest first.
    pub async fn requests(&self) -> Vec<(Endpoint, QueryOptions)> {
        self.log.lock().await.requests.clone()
    }

    /// Number of login checks so far.
    pub async fn login_checks(&self) -> usize {
        self.log.lock().await.login_checks
    }

    /// Endpoints that have a fixture.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        Endpoint::ALL
            .into_iter()
            .filter(|e| self.documents.contains_key(e))
            .collect()
    }
}

#[async_trait]
impl Gateway for FixtureGateway {
    async fn fetch(&self, endpoint: Endpoint, options: &QueryOptions) -> Result<Document, NsError> {
        self.log
            .lock()
            .await
            .requests
            .push((endpoint, options.clone()));

        let xml = self
            .documents
            .get(&endpoint)
            .ok_or_else(|| NsError::fixture(format!("no fixture for {endpoint}")))?;

        debug!(%endpoint, query = %options.encode(), "serving fixture");
        Ok(Document::parse(xml)?)
    }

    async fn verify_login(&self) -> bool {
        let mut log = self.log.lock().await;
        log.login_checks += 1;
        log.login_ok
    }
}
