//! Device orientation lock abstraction.

/// Orientation a screen can be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Operations on the device orientation lock.
pub trait OrientationLock {
    /// Releases any lock so the device follows its sensor again.
    fn unlock_all_orientations(&mut self);

    /// Pins the display to landscape, as fullscreen playback does.
    fn lock_landscape(&mut self);

    /// The orientation currently pinned, `None` when unlocked.
    fn locked(&self) -> Option<Orientation>;
}

/// Orientation lock that only tracks state, for hosts without a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackedOrientation {
    locked: Option<Orientation>,
}

impl OrientationLock for TrackedOrientation {
    fn unlock_all_orientations(&mut self) {
        tracing::debug!(previous = ?self.locked, "unlocking all orientations");
        self.locked = None;
    }

    fn lock_landscape(&mut self) {
        tracing::debug!("locking landscape");
        self.locked = Some(Orientation::Landscape);
    }

    fn locked(&self) -> Option<Orientation> {
        self.locked
    }
}
