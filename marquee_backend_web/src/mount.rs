// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rollback for a mount that fails halfway.
//!
//! [`create_carousel`](crate::create_carousel) appends the canvas and the
//! caption overlay before the steps that can still fail. Each appended part
//! is recorded in a [`MountGuard`], which takes them out of the container
//! again on drop unless the mount was [committed](MountGuard::commit).

use web_sys::Element;

/// Something that was inserted into the page and can be taken out again.
pub(crate) trait Unmount {
    fn unmount(&self);
}

impl Unmount for Element {
    fn unmount(&self) {
        self.remove();
    }
}

/// Unmounts the recorded parts, newest first, when dropped.
#[derive(Debug)]
pub(crate) struct MountGuard<T: Unmount> {
    mounted: Vec<T>,
}

impl<T: Unmount> MountGuard<T> {
    pub(crate) fn new() -> Self {
        Self {
            mounted: Vec::new(),
        }
    }

    /// Records a part that is now in the page.
    pub(crate) fn push(&mut self, part: T) {
        self.mounted.push(part);
    }

    /// Leaves every recorded part in place.
    pub(crate) fn commit(mut self) {
        self.mounted.clear();
    }
}

impl<T: Unmount> Drop for MountGuard<T> {
    fn drop(&mut self) {
        if !self.mounted.is_empty() {
            log::debug!("mount failed, removing {} elements", self.mounted.len());
        }
        while let Some(part) = self.mounted.pop() {
            part.unmount();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug)]
    struct Part {
        name: &'static str,
        removed: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Unmount for Part {
        fn unmount(&self) {
            self.removed.borrow_mut().push(self.name);
        }
    }

    fn mount(names: &[&'static str]) -> (MountGuard<Part>, Rc<RefCell<Vec<&'static str>>>) {
        let removed = Rc::new(RefCell::new(Vec::new()));
        let mut guard = MountGuard::new();
        for &name in names {
            guard.push(Part {
                name,
                removed: Rc::clone(&removed),
            });
        }
        (guard, removed)
    }

    /// The last mount step: commits on success, returns early on failure.
    fn finish(guard: MountGuard<Part>, fail: bool) -> Result<(), &'static str> {
        if fail {
            return Err("listener rejected");
        }
        guard.commit();
        Ok(())
    }

    #[test]
    fn failed_mount_removes_everything_appended() {
        let (guard, removed) = mount(&["canvas", "overlay"]);
        assert!(finish(guard, true).is_err());
        assert_eq!(*removed.borrow(), ["overlay", "canvas"]);
    }

    #[test]
    fn failure_before_the_overlay_removes_only_the_canvas() {
        let (guard, removed) = mount(&["canvas"]);
        drop(guard);
        assert_eq!(*removed.borrow(), ["canvas"]);
    }

    #[test]
    fn committed_mount_stays_in_place() {
        let (guard, removed) = mount(&["canvas", "overlay"]);
        assert!(finish(guard, false).is_ok());
        assert!(removed.borrow().is_empty());
    }
}
