//! Plain-text snapshot of the session registry.
//!
//! One line per session: `<id> <serialized deck>\n`, where the deck is the
//! concatenation of two-character card codes in deck order.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::{
    manager::SessionManager,
    models::Session,
    repository::{InMemorySessionStore, SessionStore},
};
use crate::game::{Deck, DeckError};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not {action} {path:?}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path:?} line {line}: expected 2 tokens, found {tokens}")]
    MalformedLine {
        path: PathBuf,
        line: usize,
        tokens: usize,
    },
    #[error("{path:?} line {line}: deck could not be parsed: {source}")]
    MalformedDeck {
        path: PathBuf,
        line: usize,
        #[source]
        source: DeckError,
    },
}

impl PersistenceError {
    /// True when the snapshot was readable but its contents were not.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            PersistenceError::MalformedLine { .. } | PersistenceError::MalformedDeck { .. }
        )
    }
}

impl SessionManager {
    /// Overwrites `path` with one line per session.
    ///
    /// A failure partway through leaves a partially written file behind.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        let io_error = |action: &'static str| {
            move |source: io::Error| PersistenceError::Io {
                action,
                path: path.to_path_buf(),
                source,
            }
        };

        let file = File::create(path).map_err(io_error("create"))?;
        let mut writer = BufWriter::new(file);
        self.persist_to(&mut writer).map_err(io_error("write to"))?;
        writer
            .into_inner()
            .map_err(|err| err.into_error())
            .and_then(|file| file.sync_all())
            .map_err(io_error("close"))
    }

    /// Writes the snapshot to any writer. Each deck is locked while it is serialized.
    pub fn persist_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for session in self.sessions() {
            let deck = session.deck().serialize();
            writeln!(writer, "{} {}", session.id(), deck)?;
        }
        writer.flush()
    }

    /// Rebuilds a registry from a file written by [`SessionManager::persist`].
    pub fn restore(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        Self::restore_with_store(path, Arc::new(InMemorySessionStore::new()))
    }

    /// Like [`SessionManager::restore`], filling the given store.
    ///
    /// Nothing is inserted unless every line parses.
    pub fn restore_with_store(
        path: impl AsRef<Path>,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PersistenceError::Io {
            action: "open",
            path: path.to_path_buf(),
            source,
        })?;

        Self::restore_from(BufReader::new(file), path, store)
    }

    /// Reads a snapshot from any buffered reader; `origin` names the source in errors.
    pub fn restore_from<R: BufRead>(
        reader: R,
        origin: &Path,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, PersistenceError> {
        let sessions = read_sessions(reader, origin)?;
        for session in sessions {
            store.insert(Arc::new(session));
        }
        Ok(Self::with_store(store))
    }
}

fn read_sessions<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<Session>, PersistenceError> {
    let mut sessions = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| PersistenceError::Io {
            action: "read",
            path: origin.to_path_buf(),
            source,
        })?;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [id, serialized] = tokens[..] else {
            return Err(PersistenceError::MalformedLine {
                path: origin.to_path_buf(),
                line: line_number,
                tokens: tokens.len(),
            });
        };

        let deck = Deck::deserialize(serialized).map_err(|source| {
            PersistenceError::MalformedDeck {
                path: origin.to_path_buf(),
                line: line_number,
                source,
            }
        })?;

        sessions.push(Session::new(id, deck));
    }

    Ok(sessions)
}
