//! Ownership-tagged Registries
//!
//! An ordered list of shared entries with identity-based removal. The
//! ownership tag decides what happens to an entry once it is detached:
//! [`Owned`] entries are released by the registry, [`Shared`] entries are
//! simply dropped from the list.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{ProjectError, Result};
use crate::project::data::RawDataFile;

/// What a registry does with an entry after removing it.
pub trait Ownership<T: ?Sized> {
    fn release(entry: &T) -> Result<()>;
}

/// The registry is the exclusive releaser of its entries.
#[derive(Debug)]
pub enum Owned {}

/// Entries are owned elsewhere; removal only detaches them.
#[derive(Debug)]
pub enum Shared {}

impl Ownership<dyn RawDataFile> for Owned {
    fn release(entry: &dyn RawDataFile) -> Result<()> {
        entry.close().map_err(|e| ProjectError::DataSourceRelease {
            name: entry.name().to_string(),
            source: e,
        })
    }
}

impl<T: ?Sized> Ownership<T> for Shared {
    fn release(_entry: &T) -> Result<()> {
        Ok(())
    }
}

/// Insertion-ordered collection of `Arc<T>`. Duplicates are allowed.
pub struct Registry<T: ?Sized, O> {
    entries: Vec<Arc<T>>,
    _ownership: PhantomData<fn() -> O>,
}

impl<T: ?Sized, O> Default for Registry<T, O> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            _ownership: PhantomData,
        }
    }
}

impl<T: ?Sized + fmt::Debug, O> fmt::Debug for Registry<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<T: ?Sized, O: Ownership<T>> Registry<T, O> {
    pub fn push(&mut self, entry: Arc<T>) {
        self.entries.push(entry);
    }

    /// Detach the first entry that is `entry` (pointer identity), then
    /// release it.
    ///
    /// Returns `Ok(false)` and releases nothing if `entry` is not present.
    /// A release failure is returned after the entry has been detached.
    pub fn remove(&mut self, entry: &Arc<T>) -> Result<bool> {
        let Some(index) = self.entries.iter().position(|e| Arc::ptr_eq(e, entry)) else {
            return Ok(false);
        };

        let removed = self.entries.remove(index);
        O::release(&removed)?;
        Ok(true)
    }

    /// Detach every entry, releasing each in order.
    ///
    /// All entries are detached even if some releases fail; the first
    /// failure is returned.
    pub fn drain(&mut self) -> (Vec<Arc<T>>, Result<()>) {
        let drained: Vec<Arc<T>> = self.entries.drain(..).collect();
        let mut outcome = Ok(());
        for entry in &drained {
            if let Err(e) = O::release(entry) {
                if outcome.is_ok() {
                    outcome = Err(e);
                }
            }
        }
        (drained, outcome)
    }

    pub fn contains(&self, entry: &Arc<T>) -> bool {
        self.entries.iter().any(|e| Arc::ptr_eq(e, entry))
    }

    /// Independent copy of the current entries.
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.entries.clone()
    }

    /// Entries matching `pred`, in registry order.
    pub fn filtered(&self, mut pred: impl FnMut(&T) -> bool) -> Vec<Arc<T>> {
        self.entries
            .iter()
            .filter(|e| pred(Arc::as_ref(e)))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct CountingFile {
        name: String,
        closes: AtomicUsize,
        fail: bool,
    }

    impl CountingFile {
        fn new(name: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                closes: AtomicUsize::new(0),
                fail: false,
            })
        }
    }

    impl RawDataFile for CountingFile {
        fn name(&self) -> &str {
            &self.name
        }

        fn close(&self) -> io::Result<()> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::Other, "close failed"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_owned_remove_releases_once() {
        let file = CountingFile::new("a.mzXML");
        let handle: Arc<dyn RawDataFile> = file.clone();
        let mut registry: Registry<dyn RawDataFile, Owned> = Registry::default();

        registry.push(handle.clone());
        assert!(registry.remove(&handle).unwrap());
        assert!(registry.is_empty());
        assert_eq!(file.closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_owned_remove_absent_does_not_release() {
        let file = CountingFile::new("a.mzXML");
        let handle: Arc<dyn RawDataFile> = file.clone();
        let mut registry: Registry<dyn RawDataFile, Owned> = Registry::default();

        assert!(!registry.remove(&handle).unwrap());
        assert_eq!(file.closes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remove_takes_first_duplicate_only() {
        let handle: Arc<dyn RawDataFile> = CountingFile::new("a.mzXML");
        let mut registry: Registry<dyn RawDataFile, Owned> = Registry::default();

        registry.push(handle.clone());
        registry.push(handle.clone());
        registry.remove(&handle).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&handle));
    }

    #[test]
    fn test_failed_release_still_detaches() {
        let file = Arc::new(CountingFile {
            name: "bad.mzXML".to_string(),
            closes: AtomicUsize::new(0),
            fail: true,
        });
        let handle: Arc<dyn RawDataFile> = file.clone();
        let mut registry: Registry<dyn RawDataFile, Owned> = Registry::default();

        registry.push(handle.clone());
        let result = registry.remove(&handle);
        assert!(matches!(result, Err(ProjectError::DataSourceRelease { .. })));
        assert!(!registry.contains(&handle));
    }

    #[test]
    fn test_drain_detaches_all_and_reports_first_failure() {
        let bad = Arc::new(CountingFile {
            name: "bad.mzXML".to_string(),
            closes: AtomicUsize::new(0),
            fail: true,
        });
        let good = CountingFile::new("good.mzXML");
        let mut registry: Registry<dyn RawDataFile, Owned> = Registry::default();
        registry.push(bad.clone());
        registry.push(good.clone());

        let (drained, outcome) = registry.drain();
        assert_eq!(drained.len(), 2);
        assert!(outcome.is_err());
        assert!(registry.is_empty());
        assert_eq!(good.closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_remove_never_fails() {
        let mut registry: Registry<str, Shared> = Registry::default();
        let entry: Arc<str> = Arc::from("peaks");
        let stranger: Arc<str> = Arc::from("peaks");
        registry.push(entry.clone());

        assert!(matches!(registry.remove(&stranger), Ok(false)));
        assert!(matches!(registry.remove(&entry), Ok(true)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut registry: Registry<str, Shared> = Registry::default();
        registry.push(Arc::from("one"));
        let snapshot = registry.snapshot();
        registry.push(Arc::from("two"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_filtered_preserves_order() {
        let mut registry: Registry<str, Shared> = Registry::default();
        for name in ["a1", "b1", "a2", "b2"] {
            registry.push(Arc::from(name));
        }
        let names: Vec<String> = registry
            .filtered(|s| s.starts_with('a'))
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["a1", "a2"]);
    }
}
