use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, instrument, warn};

use crate::api;
use crate::config::Config;
use crate::session::{PersistenceError, SessionManager};
use crate::shared::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("could not restore sessions from {path:?}: {source}")]
    Restore {
        path: PathBuf,
        #[source]
        source: PersistenceError,
    },

    #[error("could not listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("server stopped unexpectedly: {0}")]
    Serve(#[source] io::Error),

    #[error("could not persist sessions to {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: PersistenceError,
    },
}

/// Loads the registry, serves until a termination signal arrives, then saves the registry.
#[instrument(skip_all, fields(address = %config.address))]
pub async fn run(config: Config) -> Result<(), ServerError> {
    info!("deck-service begin");

    let sessions = Arc::new(load_sessions(&config)?);
    let state = AppState::new(Arc::clone(&sessions))
        .with_session_max_age(config.session_cookie_max_age);

    let listener = TcpListener::bind(&config.address)
        .await
        .map_err(|source| ServerError::Bind {
            address: config.address.clone(),
            source,
        })?;
    info!("Listening on http://{}", config.address);

    let served = axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve);
    match &served {
        Ok(()) => info!("Server has stopped"),
        Err(err) => error!(error = %err, "Server failed"),
    }

    // Sessions are persisted even when serving failed.
    let persisted = save_sessions(&config, &sessions);
    if let Err(err) = &persisted {
        error!(error = %err, "Sessions were not persisted");
    }

    info!("deck-service end");
    served.and(persisted)
}

fn load_sessions(config: &Config) -> Result<SessionManager, ServerError> {
    let Some(path) = &config.sessions_restore_from else {
        return Ok(SessionManager::new());
    };

    info!(path = %path.display(), "Restoring sessions");
    let sessions = SessionManager::restore(path).map_err(|source| ServerError::Restore {
        path: path.clone(),
        source,
    })?;
    info!(sessions = sessions.len(), "Sessions restored");

    Ok(sessions)
}

fn save_sessions(config: &Config, sessions: &SessionManager) -> Result<(), ServerError> {
    let Some(path) = &config.sessions_persist_to else {
        return Ok(());
    };

    info!(path = %path.display(), sessions = sessions.len(), "Persisting sessions");
    sessions
        .persist(path)
        .map_err(|source| ServerError::Persist {
            path: path.clone(),
            source,
        })
}

/// Resolves on SIGINT, SIGTERM or SIGHUP (ctrl-c only on non-unix targets).
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Could not listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = wait_for_unix_signal(tokio::signal::unix::SignalKind::terminate(), "SIGTERM");
    #[cfg(unix)]
    let hangup = wait_for_unix_signal(tokio::signal::unix::SignalKind::hangup(), "SIGHUP");

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    #[cfg(not(unix))]
    let hangup = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
        _ = hangup => info!("Received SIGHUP, shutting down"),
    }
}

#[cfg(unix)]
async fn wait_for_unix_signal(kind: tokio::signal::unix::SignalKind, name: &'static str) {
    match tokio::signal::unix::signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(err) => {
            warn!(error = %err, signal = name, "Could not install signal handler");
            std::future::pending::<()>().await;
        }
    }
}
