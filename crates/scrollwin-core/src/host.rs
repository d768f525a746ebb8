//! Capability through which the window drives the native scroll container.
//!
//! The window never keeps a handle to the rendering surface. Navigation
//! operations compute the new offset and hand it to a [`ScrollHost`], which the
//! host implements on top of whatever scroll container it owns.

/// Receiver of imperative scroll commands.
pub trait ScrollHost {
    /// Move the native scroll container to `offset` pixels from the top.
    fn set_scroll_offset(&mut self, offset: i64);
}

/// Host that ignores every command. Used when the caller reads
/// [`ScrollWindow::scroll_offset`](crate::ScrollWindow::scroll_offset) instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detached;

impl ScrollHost for Detached {
    fn set_scroll_offset(&mut self, _offset: i64) {}
}

/// Host that records every command it receives, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingHost {
    commands: Vec<i64>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All offsets received so far.
    #[must_use]
    pub fn commands(&self) -> &[i64] {
        &self.commands
    }

    /// The most recent offset, i.e. where the container ends up.
    #[must_use]
    pub fn last(&self) -> Option<i64> {
        self.commands.last().copied()
    }

    /// Take the recorded commands, leaving the host empty.
    pub fn drain(&mut self) -> Vec<i64> {
        std::mem::take(&mut self.commands)
    }
}

impl ScrollHost for RecordingHost {
    fn set_scroll_offset(&mut self, offset: i64) {
        self.commands.push(offset);
    }
}

/// Adapts a closure into a [`ScrollHost`].
///
/// ```
/// use scrollwin_core::{FnHost, ScrollHost};
///
/// let mut last = 0;
/// FnHost(|offset| last = offset).set_scroll_offset(640);
/// assert_eq!(last, 640);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnHost<F>(pub F);

impl<F> ScrollHost for FnHost<F>
where
    F: FnMut(i64),
{
    fn set_scroll_offset(&mut self, offset: i64) {
        (self.0)(offset);
    }
}

impl<H> ScrollHost for &mut H
where
    H: ScrollHost + ?Sized,
{
    fn set_scroll_offset(&mut self, offset: i64) {
        (**self).set_scroll_offset(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_host_keeps_order() {
        let mut host = RecordingHost::new();
        host.set_scroll_offset(10);
        host.set_scroll_offset(0);
        host.set_scroll_offset(400);
        assert_eq!(host.commands(), &[10, 0, 400]);
        assert_eq!(host.last(), Some(400));
        assert_eq!(host.drain(), vec![10, 0, 400]);
        assert!(host.commands().is_empty());
    }

    #[test]
    fn closure_acts_as_host() {
        let mut seen = Vec::new();
        {
            let mut host = FnHost(|offset: i64| seen.push(offset));
            host.set_scroll_offset(7);
            host.set_scroll_offset(9);
        }
        assert_eq!(seen, vec![7, 9]);
    }

    fn drive<H: ScrollHost>(mut host: H, offsets: &[i64]) {
        for &offset in offsets {
            host.set_scroll_offset(offset);
        }
    }

    #[test]
    fn borrowed_host_forwards_to_owner() {
        let mut host = RecordingHost::new();
        drive(&mut host, &[80, 160]);
        drive(&mut host, &[0]);
        assert_eq!(host.commands(), &[80, 160, 0]);
    }

    #[test]
    fn borrowed_dyn_host_forwards_to_owner() {
        let mut host = RecordingHost::new();
        let lent: &mut dyn ScrollHost = &mut host;
        drive(lent, &[3]);
        assert_eq!(host.last(), Some(3));
    }
}
