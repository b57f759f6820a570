use tyle_core::FocusChange;

/// Active-leaf index plus the queue of focus notifications the shell has not
/// consumed yet.
#[derive(Debug, Default)]
pub struct FocusTracker {
    active: usize,
    pending: Vec<FocusChange>,
}

impl FocusTracker {
    pub fn active(&self) -> usize {
        self.active
    }

    /// Focus `index` (clamped into range) and queue a notification.
    pub(crate) fn focus(&mut self, index: usize, leaf_count: usize) {
        if leaf_count == 0 {
            return;
        }
        let old = self.active;
        self.active = index.min(leaf_count - 1);
        self.pending.push(FocusChange {
            old: Some(old),
            new: self.active,
        });
    }

    /// Advance by `step` positions, wrapping around the leaf list.
    pub(crate) fn cycle(&mut self, step: isize, leaf_count: usize) {
        if leaf_count == 0 {
            return;
        }
        let next = (self.active as isize + step).rem_euclid(leaf_count as isize) as usize;
        self.focus(next, leaf_count);
    }

    /// Re-validate after a structural change: `min(active, count - 1)`.
    pub(crate) fn clamp(&mut self, leaf_count: usize) {
        let old = self.active;
        self.bound(leaf_count);
        self.pending.push(FocusChange {
            old: Some(old),
            new: self.active,
        });
    }

    /// First notification for a new workspace; nothing was active before.
    pub(crate) fn announce(&mut self, leaf_count: usize) {
        self.bound(leaf_count);
        self.pending.push(FocusChange {
            old: None,
            new: self.active,
        });
    }

    /// Clamp without notifying.
    pub(crate) fn bound(&mut self, leaf_count: usize) {
        self.active = self.active.min(leaf_count.saturating_sub(1));
    }

    pub fn drain(&mut self) -> Vec<FocusChange> {
        std::mem::take(&mut self.pending)
    }
}
