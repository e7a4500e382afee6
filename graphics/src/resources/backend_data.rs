//! Opaque backend-native data attached to front-end resources.

use std::any::Any;

use parking_lot::Mutex;

type Payload = Box<dyn Any + Send + Sync>;

/// Slot holding the backend object created for a resource.
///
/// Empty until the processor loads the resource. The payload is dropped with
/// the slot if the resource dies while still loaded.
#[derive(Default)]
pub(crate) struct BackendData {
    payload: Mutex<Option<Payload>>,
}

impl BackendData {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_set(&self) -> bool {
        self.payload.lock().is_some()
    }

    /// Store `data`. Returns false and leaves the slot untouched if it was
    /// already occupied.
    pub(crate) fn set<T: Any + Send + Sync>(&self, data: T) -> bool {
        let mut payload = self.payload.lock();
        if payload.is_some() {
            return false;
        }
        *payload = Some(Box::new(data));
        true
    }

    /// Detach the payload if it is a `T`.
    pub(crate) fn take<T: Any + Send + Sync>(&self) -> Option<T> {
        let mut payload = self.payload.lock();
        match payload.take()?.downcast::<T>() {
            Ok(data) => Some(*data),
            Err(other) => {
                *payload = Some(other);
                None
            }
        }
    }

    /// Run `f` with a reference to the payload if it is a `T`.
    pub(crate) fn with<T: Any + Send + Sync, R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        let payload = self.payload.lock();
        f(payload.as_ref().and_then(|data| data.downcast_ref::<T>()))
    }
}

impl std::fmt::Debug for BackendData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendData")
            .field("set", &self.is_set())
            .finish()
    }
}
