use crate::clients::{build_client, HttpStore};
use crate::config::ClientConfig;
use crate::model::{Group, Knowledge, Model, User};
use reconcile_framework::{ActorStore, Reconciler, ResourceActor, ServerQuirks, StoreError};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The reconcilers of every supported kind, each with its own injected store.
#[derive(Debug, Clone)]
pub struct Provider<M, K, G, U> {
    pub models: Reconciler<Model, M>,
    pub knowledge: Reconciler<Knowledge, K>,
    pub groups: Reconciler<Group, G>,
    pub users: Reconciler<User, U>,
}

pub type HttpProvider =
    Provider<HttpStore<Model>, HttpStore<Knowledge>, HttpStore<Group>, HttpStore<User>>;

pub type InMemoryProvider =
    Provider<ActorStore<Model>, ActorStore<Knowledge>, ActorStore<Group>, ActorStore<User>>;

impl HttpProvider {
    /// Builds HTTP stores for every kind, sharing a single connection pool.
    pub fn connect(config: &ClientConfig) -> Result<Self, StoreError> {
        let http = build_client(config)?;
        info!(endpoint = %config.endpoint, "Connecting to Open WebUI");
        Ok(Self {
            models: Reconciler::new(HttpStore::with_client(http.clone(), config)),
            knowledge: Reconciler::new(HttpStore::with_client(http.clone(), config)),
            groups: Reconciler::new(HttpStore::with_client(http.clone(), config)),
            users: Reconciler::new(HttpStore::with_client(http, config)),
        })
    }
}

/// A provider backed by one in-memory remote per kind.
///
/// # Example
///
/// ```ignore
/// let system = InMemorySystem::start();
/// let created = system.provider.models.create(desired).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct InMemorySystem {
    pub provider: InMemoryProvider,
    /// Task handles for the running remotes (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl InMemorySystem {
    /// Spawns well-behaved remotes.
    pub fn start() -> Self {
        Self::with_quirks(ServerQuirks::default())
    }

    /// Spawns remotes that reproduce `quirks`. Must be called inside a Tokio runtime.
    pub fn with_quirks(quirks: ServerQuirks) -> Self {
        let (model_actor, model_store) = ResourceActor::<Model>::new(32);
        let (knowledge_actor, knowledge_store) = ResourceActor::<Knowledge>::new(32);
        let (group_actor, group_store) = ResourceActor::<Group>::new(32);
        let (user_actor, user_store) = ResourceActor::<User>::new(32);

        let handles = vec![
            tokio::spawn(model_actor.with_quirks(quirks).run()),
            tokio::spawn(knowledge_actor.with_quirks(quirks).run()),
            tokio::spawn(group_actor.with_quirks(quirks).run()),
            tokio::spawn(user_actor.with_quirks(quirks).run()),
        ];

        Self {
            provider: Provider {
                models: Reconciler::new(model_store),
                knowledge: Reconciler::new(knowledge_store),
                groups: Reconciler::new(group_store),
                users: Reconciler::new(user_store),
            },
            handles,
        }
    }

    /// Drops every store and waits for the remotes to drain.
    ///
    /// Clones of the provider's reconcilers keep their remote alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down in-memory remotes...");
        drop(self.provider);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Remote task failed: {:?}", e);
                return Err(e);
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
