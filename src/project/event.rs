//! Project Events
//!
//! A project reports each committed mutation to an injected
//! [`EventDispatcher`]. The usual dispatcher is a [`ListenerRegistry`]
//! shared with the [`ProjectManager`](crate::ProjectManager).

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::project::Project;

/// Kinds of change a project reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectEvent {
    DataFileAdded,
    DataFileRemoved,
    PeakListAdded,
    PeakListRemoved,
    NameChanged,
}

impl fmt::Display for ProjectEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectEvent::DataFileAdded => write!(f, "Data File Added"),
            ProjectEvent::DataFileRemoved => write!(f, "Data File Removed"),
            ProjectEvent::PeakListAdded => write!(f, "Peak List Added"),
            ProjectEvent::PeakListRemoved => write!(f, "Peak List Removed"),
            ProjectEvent::NameChanged => write!(f, "Name Changed"),
        }
    }
}

/// Receives project events.
///
/// Called synchronously after the mutation is applied, so `project`
/// already reflects the change.
pub trait ProjectListener: Send + Sync {
    fn project_changed(&self, project: &Project, event: ProjectEvent);
}

impl<F> ProjectListener for F
where
    F: Fn(&Project, ProjectEvent) + Send + Sync,
{
    fn project_changed(&self, project: &Project, event: ProjectEvent) {
        self(project, event)
    }
}

/// Sink a project fires its events into.
pub trait EventDispatcher: Send + Sync {
    fn fire(&self, project: &Project, event: ProjectEvent);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDispatcher;

impl EventDispatcher for NullDispatcher {
    fn fire(&self, _project: &Project, _event: ProjectEvent) {}
}

/// Fans events out to registered listeners, in registration order.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<Vec<Arc<dyn ProjectListener>>>,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: Arc<dyn ProjectListener>) {
        self.write().push(listener);
    }

    /// Remove a listener by identity. Returns true if it was registered.
    pub fn remove(&self, listener: &Arc<dyn ProjectListener>) -> bool {
        let mut listeners = self.write();
        match listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A poisoned lock still holds a valid list.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<dyn ProjectListener>>> {
        self.listeners.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Arc<dyn ProjectListener>>> {
        self.listeners.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl EventDispatcher for ListenerRegistry {
    fn fire(&self, project: &Project, event: ProjectEvent) {
        // Snapshot first: listeners may (un)register while being notified.
        let listeners = self.read().clone();
        log::debug!(
            "Firing {} to {} listener(s) for '{}'",
            event,
            listeners.len(),
            project.name()
        );
        for listener in listeners {
            listener.project_changed(project, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_event_display() {
        assert_eq!(ProjectEvent::DataFileAdded.to_string(), "Data File Added");
        assert_eq!(ProjectEvent::NameChanged.to_string(), "Name Changed");
    }

    #[test]
    fn test_event_serde_names() {
        let json = serde_json::to_string(&ProjectEvent::PeakListRemoved).unwrap();
        assert_eq!(json, "\"peak_list_removed\"");
    }

    #[test]
    fn test_registry_fans_out_in_order() {
        let registry = Arc::new(ListenerRegistry::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            registry.add(Arc::new(move |_: &Project, event: ProjectEvent| {
                seen.lock().unwrap().push((tag, event));
            }));
        }

        let project = Project::new(registry.clone());
        registry.fire(&project, ProjectEvent::NameChanged);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("first", ProjectEvent::NameChanged),
                ("second", ProjectEvent::NameChanged)
            ]
        );
    }

    #[test]
    fn test_registry_remove_by_identity() {
        let registry = ListenerRegistry::new();
        let listener: Arc<dyn ProjectListener> = Arc::new(|_: &Project, _: ProjectEvent| {});
        let other: Arc<dyn ProjectListener> = Arc::new(|_: &Project, _: ProjectEvent| {});

        registry.add(listener.clone());
        assert!(!registry.remove(&other));
        assert!(registry.remove(&listener));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_listener_can_unregister_itself_while_notified() {
        let registry = Arc::new(ListenerRegistry::new());
        let slot: Arc<Mutex<Option<Arc<dyn ProjectListener>>>> = Arc::new(Mutex::new(None));

        let registry_ref = Arc::clone(&registry);
        let slot_ref = Arc::clone(&slot);
        let listener: Arc<dyn ProjectListener> =
            Arc::new(move |_: &Project, _: ProjectEvent| {
                if let Some(me) = slot_ref.lock().unwrap().take() {
                    registry_ref.remove(&me);
                }
            });
        *slot.lock().unwrap() = Some(listener.clone());
        registry.add(listener);

        let project = Project::new(Arc::new(NullDispatcher));
        registry.fire(&project, ProjectEvent::DataFileAdded);
        assert!(registry.is_empty());
    }
}
