use crate::client::IdentityClient;
use crate::config::IdentityConfig;
use crate::session::Session;
use crate::strategy::AuthStrategy;
use errors::IdentityResult;
use std::sync::Arc;
use sv_core::RequestContext;
use tokio::sync::RwLock;

/// Resolves a request context to an authenticated identity client.
///
/// The session and the client bound to it are built on first access and
/// reused for the life of the resolver. The check-then-create sequence runs
/// under a write lock so concurrent first calls build each at most once,
/// and session construction always precedes client construction.
pub struct CredentialResolver {
    config: IdentityConfig,
    session: RwLock<Option<Arc<Session>>>,
    client: RwLock<Option<Arc<IdentityClient>>>,
}

impl CredentialResolver {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            session: RwLock::new(None),
            client: RwLock::new(None),
        }
    }

    /// Cached session for the context, built on first access.
    ///
    /// Strategy selection happens here and only here; a context with no
    /// usable credential material fails with `AuthorizationFailure`.
    pub async fn session(&self, context: &RequestContext) -> IdentityResult<Arc<Session>> {
        if let Some(session) = self.session.read().await.as_ref() {
            return Ok(Arc::clone(session));
        }

        let mut slot = self.session.write().await;
        if let Some(session) = slot.as_ref() {
            return Ok(Arc::clone(session));
        }

        let strategy = AuthStrategy::select(context, &self.config)?;
        let session = Arc::new(Session::new(strategy, &self.config.session)?);
        *slot = Some(Arc::clone(&session));
        Ok(session)
    }

    /// Cached identity client bound to the resolved session.
    pub async fn client(&self, context: &RequestContext) -> IdentityResult<Arc<IdentityClient>> {
        if let Some(client) = self.client.read().await.as_ref() {
            return Ok(Arc::clone(client));
        }

        let session = self.session(context).await?;

        let mut slot = self.client.write().await;
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(IdentityClient::new(session, self.config.auth_url()));
        *slot = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Token extracted from the resolved session; may authenticate.
    pub async fn auth_token(&self, context: &RequestContext) -> IdentityResult<String> {
        let session = self.session(context).await?;
        session.token().await
    }
}
