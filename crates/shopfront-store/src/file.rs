//! File-backed token store: one JSON record on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::Rng;
use tokio::sync::broadcast;

use crate::{EVENT_BUFFER, StoreEvent, StoredSession, TokenStore};

/// A [`TokenStore`] persisted as a single JSON file.
///
/// This is the production store: the session survives process restarts
/// the way a browser session survives page reloads. Writes go through a
/// temp file in the same directory followed by a rename, so a crash
/// mid-write leaves either the old record or the new one — never a
/// truncated mix.
///
/// Clones share the path and the event channel. Two *separate*
/// `FileStore`s opened on the same path still share the file, but not
/// the channel — notifications span one store family, like the storage
/// event spans one browser.
#[derive(Clone)]
pub struct FileStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    events: broadcast::Sender<StoreEvent>,
}

impl FileStore {
    /// Creates a store persisting to `path`. The file (and its parent
    /// directory) may not exist yet; both are created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                events,
            }),
        }
    }

    /// The path the session record lives at.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    fn write_atomic(&self, bytes: &[u8]) -> io::Result<()> {
        let path = &self.inner.path;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Same directory as the target, so the rename stays on one
        // filesystem and is atomic.
        let tmp = path.with_extension(format!("{}.tmp", temp_suffix()));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)
    }
}

impl TokenStore for FileStore {
    fn load(&self) -> Option<StoredSession> {
        let raw = match fs::read_to_string(&self.inner.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(
                    path = %self.inner.path.display(),
                    error = %e,
                    "session file unreadable, treating as no session"
                );
                return None;
            }
        };

        let session: StoredSession = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(
                    path = %self.inner.path.display(),
                    error = %e,
                    "session file corrupt, treating as no session"
                );
                return None;
            }
        };

        // A record without a token is residue, not a session.
        (!session.token.is_empty()).then_some(session)
    }

    fn save(&self, session: &StoredSession) {
        match serde_json::to_vec_pretty(session) {
            Ok(bytes) => {
                if let Err(e) = self.write_atomic(&bytes) {
                    tracing::warn!(
                        path = %self.inner.path.display(),
                        error = %e,
                        "failed to persist session"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode session");
            }
        }
        let _ = self.inner.events.send(StoreEvent::Saved);
    }

    fn clear(&self) {
        match fs::remove_file(&self.inner.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %self.inner.path.display(),
                    error = %e,
                    "failed to remove session file"
                );
            }
        }
        let _ = self.inner.events.send(StoreEvent::Cleared);
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }
}

/// Random 16-character hex suffix for temp files, so concurrent writers
/// in one directory never collide.
fn temp_suffix() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 8] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use shopfront_protocol::UserProfile;

    use super::*;

    fn session(token: &str) -> StoredSession {
        StoredSession::new(
            token,
            UserProfile {
                name: "Ada".into(),
                email: "ada@shop.test".into(),
            },
        )
    }

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn test_load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let s = session("tok-1");

        store.save(&s);

        assert_eq!(store.load(), Some(s));
    }

    #[test]
    fn test_save_survives_reopening_the_store() {
        // The point of the file store: a new process sees the session.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        FileStore::new(&path).save(&session("tok-1"));

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.load().unwrap().token, "tok-1");
    }

    #[test]
    fn test_save_replaces_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&session("old"));
        store.save(&session("new"));

        assert_eq!(store.load().unwrap().token, "new");
    }

    #[test]
    fn test_save_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            FileStore::new(dir.path().join("nested/deeper/session.json"));

        store.save(&session("tok-1"));

        assert_eq!(store.load().unwrap().token, "tok-1");
    }

    #[test]
    fn test_save_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&session("tok-1"));

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["session.json"]);
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&session("tok-1"));

        store.clear();

        assert_eq!(store.load(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear_without_file_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.clear();

        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_corrupt_file_reads_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), b"{ definitely not json").unwrap();

        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_empty_token_reads_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            br#"{"token":"","profile":{"name":"Ada","email":"a@b.c"}}"#,
        )
        .unwrap();

        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_mutations_notify_subscribers_on_clones() {
        let dir = tempfile::tempdir().unwrap();
        let tab_a = store_in(&dir);
        let tab_b = tab_a.clone();
        let mut events = tab_b.subscribe();

        tab_a.save(&session("tok-1"));
        tab_a.clear();

        assert_eq!(events.try_recv().unwrap(), StoreEvent::Saved);
        assert_eq!(events.try_recv().unwrap(), StoreEvent::Cleared);
    }
}
