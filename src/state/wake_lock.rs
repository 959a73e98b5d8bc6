//! Keep-awake capability.
//!
//! The terminal has no screen wake lock of its own, so the lock is held by an
//! idle-inhibitor child process (`systemd-inhibit` on Linux, `caffeinate` on
//! macOS). The lock is released by killing the child. The system may revoke
//! it at any time (the child dies); [`WakeLockController`] re-acquires it
//! when the terminal regains focus.

use super::preferences::BoolPreference;
use crate::model::WakeLockError;
use crate::storage::Storage;
use std::cell::Cell;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Screen keep-awake capability with request/release semantics.
pub trait WakeLock {
    /// Whether this platform can hold a lock at all.
    fn is_supported(&self) -> bool;

    /// Acquire the lock. Acquiring an already-held lock is a no-op.
    fn request(&mut self) -> Result<(), WakeLockError>;

    /// Release the lock if held.
    fn release(&mut self);

    /// Whether the lock is still held. A lock revoked by the system reads as
    /// not held.
    fn is_held(&mut self) -> bool;
}

// ===== Inhibitor process =====

/// Wake lock held by a long-running inhibitor process.
#[derive(Debug)]
pub struct InhibitorWakeLock {
    command: Vec<String>,
    child: Option<Child>,
}

impl InhibitorWakeLock {
    /// Use an explicit command line (program followed by its arguments).
    ///
    /// Returns `None` for an empty command.
    pub fn with_command(command: Vec<String>) -> Option<Self> {
        if command.is_empty() {
            return None;
        }
        Some(Self {
            command,
            child: None,
        })
    }

    /// Find a platform inhibitor on `PATH`.
    pub fn detect() -> Option<Self> {
        let candidates: [(&str, &[&str]); 2] = [
            (
                "systemd-inhibit",
                &[
                    "--what=idle",
                    "--who=mushaf",
                    "--why=Reading",
                    "--mode=block",
                    "sleep",
                    "infinity",
                ],
            ),
            ("caffeinate", &["-d"]),
        ];

        candidates.iter().find_map(|(program, args)| {
            let path = find_on_path(program)?;
            let mut command = vec![path.to_string_lossy().into_owned()];
            command.extend(args.iter().map(|a| a.to_string()));
            Self::with_command(command)
        })
    }

    /// Program that will be spawned.
    pub fn program(&self) -> &str {
        // with_command guarantees a non-empty command
        self.command.first().map(String::as_str).unwrap_or_default()
    }
}

impl WakeLock for InhibitorWakeLock {
    fn is_supported(&self) -> bool {
        true
    }

    fn request(&mut self) -> Result<(), WakeLockError> {
        if self.is_held() {
            return Ok(());
        }

        let (program, args) = match self.command.split_first() {
            Some(split) => split,
            None => return Err(WakeLockError::Unsupported),
        };

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| WakeLockError::Spawn {
                program: program.clone(),
                source,
            })?;

        debug!(program = %program, pid = child.id(), "Wake lock acquired");
        self.child = Some(child);
        Ok(())
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            debug!("Wake lock released");
        }
    }

    fn is_held(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                debug!(%status, "Wake lock process exited");
                self.child = None;
                false
            }
            Err(err) => {
                warn!(error = %err, "Could not poll wake lock process");
                self.child = None;
                false
            }
        }
    }
}

impl Drop for InhibitorWakeLock {
    fn drop(&mut self) {
        self.release();
    }
}

fn find_on_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

// ===== Unsupported =====

/// Placeholder for platforms without any inhibitor.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedWakeLock;

impl WakeLock for UnsupportedWakeLock {
    fn is_supported(&self) -> bool {
        false
    }

    fn request(&mut self) -> Result<(), WakeLockError> {
        Err(WakeLockError::Unsupported)
    }

    fn release(&mut self) {}

    fn is_held(&mut self) -> bool {
        false
    }
}

// ===== Manual =====

/// In-process wake lock whose state is shared with its clones.
///
/// Lets tests observe requests and simulate the system revoking the lock.
#[derive(Debug, Clone, Default)]
pub struct ManualWakeLock {
    held: Rc<Cell<bool>>,
    requests: Rc<Cell<usize>>,
}

impl ManualWakeLock {
    /// Create an unheld lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the lock as the system would.
    pub fn revoke(&self) {
        self.held.set(false);
    }

    /// Whether the lock is currently held.
    pub fn held(&self) -> bool {
        self.held.get()
    }

    /// Number of successful requests so far.
    pub fn request_count(&self) -> usize {
        self.requests.get()
    }
}

impl WakeLock for ManualWakeLock {
    fn is_supported(&self) -> bool {
        true
    }

    fn request(&mut self) -> Result<(), WakeLockError> {
        if !self.held.get() {
            self.held.set(true);
            self.requests.set(self.requests.get() + 1);
        }
        Ok(())
    }

    fn release(&mut self) {
        self.held.set(false);
    }

    fn is_held(&mut self) -> bool {
        self.held.get()
    }
}

/// Pick the best wake lock for this system.
///
/// An explicit command wins; otherwise a platform inhibitor is searched for
/// on `PATH`. Detection happens once; without an inhibitor, or when the
/// configured program cannot be found, the feature is disabled.
pub fn detect_wake_lock(command: Option<Vec<String>>) -> Box<dyn WakeLock> {
    let lock = match command {
        Some(command) => InhibitorWakeLock::with_command(command).filter(|lock| {
            let found = program_exists(lock.program());
            if !found {
                warn!(program = lock.program(), "Configured wake-lock command not found");
            }
            found
        }),
        None => InhibitorWakeLock::detect(),
    };
    match lock {
        Some(lock) => {
            debug!(program = lock.program(), "Wake lock supported");
            Box::new(lock)
        }
        None => {
            debug!("No wake lock mechanism found, keep-awake disabled");
            Box::new(UnsupportedWakeLock)
        }
    }
}

/// A program given with a path must exist there; a bare name must be on `PATH`.
fn program_exists(program: &str) -> bool {
    if program.chars().any(std::path::is_separator) {
        std::path::Path::new(program).is_file()
    } else {
        find_on_path(program).is_some()
    }
}

// ===== Controller =====

/// Ties the desired keep-awake preference to the actual lock.
pub struct WakeLockController {
    lock: Box<dyn WakeLock>,
    preference: BoolPreference,
    desired: bool,
}

impl WakeLockController {
    /// Controller with keep-awake initially off.
    pub fn new(lock: Box<dyn WakeLock>, preference: BoolPreference) -> Self {
        Self {
            lock,
            preference,
            desired: false,
        }
    }

    /// Whether keep-awake can be used on this system.
    pub fn is_supported(&self) -> bool {
        self.lock.is_supported()
    }

    /// Whether the user wants the screen kept awake.
    pub fn desired(&self) -> bool {
        self.desired
    }

    /// Whether the lock is currently held.
    pub fn is_held(&mut self) -> bool {
        self.lock.is_held()
    }

    /// Restore the persisted preference and apply it.
    ///
    /// On an unsupported system the preference is ignored. If the lock
    /// cannot be acquired, keep-awake stays off for this session; the
    /// stored preference is left alone.
    pub fn load(&mut self, storage: &dyn Storage) {
        self.desired = self.is_supported() && self.preference.load(storage);
        if let Err(err) = self.apply() {
            warn!(error = %err, "Failed to acquire wake lock at start-up");
            self.desired = false;
        }
    }

    /// Flip the preference, persist it and apply it.
    ///
    /// Returns the new desired state.
    ///
    /// # Errors
    ///
    /// Returns `WakeLockError::Unsupported` when there is no lock (nothing
    /// changes), or the acquisition error when turning keep-awake on failed.
    /// In that case keep-awake stays off and `false` is persisted.
    pub fn toggle(&mut self, storage: &mut dyn Storage) -> Result<bool, WakeLockError> {
        if !self.is_supported() {
            return Err(WakeLockError::Unsupported);
        }
        self.desired = !self.desired;
        let applied = self.apply();
        if applied.is_err() {
            self.desired = false;
        }
        if let Err(err) = self.preference.store(storage, self.desired) {
            warn!(error = %err, "Failed to persist keep-awake preference");
        }
        applied.map(|()| self.desired)
    }

    /// Bring the lock in line with the desired state.
    ///
    /// # Errors
    ///
    /// Returns the error from requesting the lock.
    pub fn apply(&mut self) -> Result<(), WakeLockError> {
        if !self.desired {
            self.lock.release();
            return Ok(());
        }
        if self.lock.is_held() {
            return Ok(());
        }
        self.lock.request().inspect_err(|err| {
            warn!(error = %err, "Failed to acquire wake lock");
        })
    }

    /// Re-acquire a lock the system revoked while the reader was hidden.
    ///
    /// Returns `true` when a new lock was obtained. A failed attempt turns
    /// keep-awake off for the session instead of retrying on every focus.
    pub fn on_visibility_regained(&mut self) -> bool {
        if !self.desired || self.lock.is_held() {
            return false;
        }
        info!("Re-acquiring revoked wake lock");
        match self.lock.request() {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "Failed to re-acquire wake lock");
                self.desired = false;
                false
            }
        }
    }
}

impl std::fmt::Debug for WakeLockController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WakeLockController")
            .field("supported", &self.lock.is_supported())
            .field("desired", &self.desired)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const KEY: &str = "quran_wake_lock";

    fn controller() -> (WakeLockController, ManualWakeLock) {
        let lock = ManualWakeLock::new();
        let controller =
            WakeLockController::new(Box::new(lock.clone()), BoolPreference::flag(KEY));
        (controller, lock)
    }

    #[test]
    fn load_acquires_when_preference_is_on() {
        let (mut controller, lock) = controller();
        let storage = MemoryStorage::with_values([(KEY, "true")]);

        controller.load(&storage);

        assert!(controller.desired());
        assert!(lock.held());
    }

    #[test]
    fn load_leaves_lock_released_by_default() {
        let (mut controller, lock) = controller();
        controller.load(&MemoryStorage::new());
        assert!(!controller.desired());
        assert!(!lock.held());
    }

    #[test]
    fn toggle_persists_and_applies() {
        let (mut controller, lock) = controller();
        let mut storage = MemoryStorage::new();

        assert!(matches!(controller.toggle(&mut storage), Ok(true)));
        assert!(lock.held());
        assert_eq!(storage.get(KEY).as_deref(), Some("true"));

        assert!(matches!(controller.toggle(&mut storage), Ok(false)));
        assert!(!lock.held());
        assert_eq!(storage.get(KEY).as_deref(), Some("false"));
    }

    #[test]
    fn revoked_lock_is_reacquired_on_visibility() {
        let (mut controller, lock) = controller();
        let mut storage = MemoryStorage::new();
        controller.toggle(&mut storage).unwrap();

        lock.revoke();
        assert!(controller.on_visibility_regained());
        assert!(lock.held());
        assert_eq!(lock.request_count(), 2);
    }

    #[test]
    fn held_lock_is_not_requested_again() {
        let (mut controller, lock) = controller();
        controller.toggle(&mut MemoryStorage::new()).unwrap();

        assert!(!controller.on_visibility_regained());
        assert_eq!(lock.request_count(), 1);
    }

    #[test]
    fn undesired_lock_is_not_reacquired() {
        let (mut controller, lock) = controller();
        assert!(!controller.on_visibility_regained());
        assert_eq!(lock.request_count(), 0);
    }

    #[test]
    fn unsupported_lock_disables_the_feature() {
        let mut controller =
            WakeLockController::new(Box::new(UnsupportedWakeLock), BoolPreference::flag(KEY));
        let mut storage = MemoryStorage::with_values([(KEY, "true")]);

        controller.load(&storage);
        assert!(!controller.desired());

        assert!(matches!(
            controller.toggle(&mut storage),
            Err(WakeLockError::Unsupported)
        ));
        assert_eq!(storage.get(KEY).as_deref(), Some("true"));
        assert!(!controller.on_visibility_regained());
    }

    #[test]
    fn empty_command_is_unsupported() {
        assert!(InhibitorWakeLock::with_command(Vec::new()).is_none());
        assert!(!detect_wake_lock(Some(Vec::new())).is_supported());
    }

    #[cfg(unix)]
    #[test]
    fn inhibitor_process_is_held_until_released() {
        let mut lock = InhibitorWakeLock::with_command(vec!["sleep".into(), "30".into()]).unwrap();

        lock.request().unwrap();
        assert!(lock.is_held());

        lock.release();
        assert!(!lock.is_held());
    }

    #[cfg(unix)]
    #[test]
    fn exited_inhibitor_reads_as_revoked() {
        let mut lock = InhibitorWakeLock::with_command(vec!["true".into()]).unwrap();
        lock.request().unwrap();

        for _ in 0..50 {
            if !lock.is_held() {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        panic!("process exiting should revoke the lock");
    }

    #[test]
    fn missing_program_reports_spawn_error() {
        let mut lock =
            InhibitorWakeLock::with_command(vec!["mushaf-no-such-inhibitor".into()]).unwrap();
        assert!(matches!(lock.request(), Err(WakeLockError::Spawn { .. })));
    }

    #[test]
    fn failed_acquire_turns_keep_awake_back_off() {
        let lock =
            InhibitorWakeLock::with_command(vec!["mushaf-no-such-inhibitor".into()]).unwrap();
        let mut controller = WakeLockController::new(Box::new(lock), BoolPreference::flag(KEY));
        let mut storage = MemoryStorage::new();

        assert!(matches!(
            controller.toggle(&mut storage),
            Err(WakeLockError::Spawn { .. })
        ));
        assert!(!controller.desired());
        assert_eq!(storage.get(KEY).as_deref(), Some("false"));
        assert!(!controller.on_visibility_regained());
    }

    #[test]
    fn failed_acquire_at_load_keeps_stored_preference() {
        let lock =
            InhibitorWakeLock::with_command(vec!["mushaf-no-such-inhibitor".into()]).unwrap();
        let mut controller = WakeLockController::new(Box::new(lock), BoolPreference::flag(KEY));
        let storage = MemoryStorage::with_values([(KEY, "true")]);

        controller.load(&storage);

        assert!(!controller.desired());
        assert_eq!(storage.get(KEY).as_deref(), Some("true"));
    }

    #[test]
    fn configured_command_must_exist() {
        assert!(!detect_wake_lock(Some(vec!["mushaf-no-such-inhibitor".into()])).is_supported());
        assert!(!detect_wake_lock(Some(vec!["/nonexistent/mushaf-inhibit".into()])).is_supported());
    }

    #[cfg(unix)]
    #[test]
    fn configured_command_found_on_path_is_supported() {
        assert!(detect_wake_lock(Some(vec!["sleep".into(), "30".into()])).is_supported());
    }
}
