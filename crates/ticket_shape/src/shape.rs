//! Shapes and size-driven path recomputation
//!
//! A [`Shape`] turns a bounding rect into a [`Path`]. Hosts do not call it on
//! every frame; they keep a [`ShapeCache`] and feed it the rect whenever the
//! layout reports a new size. The cache rebuilds the path only when the rect
//! actually changed and notifies registered listeners.

use std::fmt;
use std::sync::Arc;

use ticket_core::{Path, Rect};

/// Something that can produce a path for a bounding rect
///
/// Implementations are pure: the same rect always yields the same path.
pub trait Shape {
    fn path(&self, rect: Rect) -> Path;
}

impl<S: Shape + ?Sized> Shape for &S {
    fn path(&self, rect: Rect) -> Path {
        (**self).path(rect)
    }
}

/// Callback run after the cache rebuilt its path
pub type ResizeCallback = Arc<dyn Fn(Rect, &Path) + Send + Sync>;

/// Holds the path of a shape for the most recent rect
pub struct ShapeCache<S: Shape> {
    shape: S,
    rect: Option<Rect>,
    path: Path,
    listeners: Vec<ResizeCallback>,
    rebuilds: u64,
}

impl<S: Shape> ShapeCache<S> {
    pub fn new(shape: S) -> Self {
        Self {
            shape,
            rect: None,
            path: Path::new(),
            listeners: Vec::new(),
            rebuilds: 0,
        }
    }

    pub fn shape(&self) -> &S {
        &self.shape
    }

    /// Swap the shape; the next `resize` rebuilds unconditionally
    pub fn set_shape(&mut self, shape: S) {
        self.shape = shape;
        self.invalidate();
    }

    /// Report the current bounding rect and get the matching path
    pub fn resize(&mut self, rect: Rect) -> &Path {
        if self.rect != Some(rect) {
            self.path = self.shape.path(rect);
            self.rect = Some(rect);
            self.rebuilds += 1;
            tracing::trace!(
                width = rect.width(),
                height = rect.height(),
                commands = self.path.commands().len(),
                "rebuilt shape path"
            );
            for listener in &self.listeners {
                listener(rect, &self.path);
            }
        }
        &self.path
    }

    /// Path for the last reported rect, if any
    pub fn path(&self) -> Option<&Path> {
        self.rect.map(|_| &self.path)
    }

    /// Last reported rect
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    /// Forget the cached path
    pub fn invalidate(&mut self) {
        self.rect = None;
        self.path = Path::new();
    }

    /// Register a callback run every time the path is rebuilt
    pub fn on_resize(&mut self, callback: impl Fn(Rect, &Path) + Send + Sync + 'static) {
        self.listeners.push(Arc::new(callback));
    }

    /// Number of times the path has been rebuilt
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}

impl<S: Shape + fmt::Debug> fmt::Debug for ShapeCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeCache")
            .field("shape", &self.shape)
            .field("rect", &self.rect)
            .field("listeners", &self.listeners.len())
            .field("rebuilds", &self.rebuilds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Divider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_rebuilds_only_on_size_change() {
        let mut cache = ShapeCache::new(Divider);
        assert!(cache.path().is_none());

        let a = Rect::new(0.0, 0.0, 100.0, 10.0);
        let first = cache.resize(a).clone();
        let again = cache.resize(a).clone();
        assert_eq!(first, again);
        assert_eq!(cache.rebuild_count(), 1);

        cache.resize(Rect::new(0.0, 0.0, 200.0, 10.0));
        assert_eq!(cache.rebuild_count(), 2);
        assert_eq!(cache.path().unwrap().bounds().width(), 200.0);
    }

    #[test]
    fn test_listeners_see_rebuilt_paths() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        let mut cache = ShapeCache::new(Divider);
        cache.on_resize(move |rect, path| {
            assert_eq!(path.bounds().width(), rect.width());
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let rect = Rect::new(0.0, 0.0, 50.0, 4.0);
        cache.resize(rect);
        cache.resize(rect);
        cache.invalidate();
        cache.resize(rect);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
