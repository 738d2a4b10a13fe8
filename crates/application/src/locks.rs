use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use pdfpreview_domain::StorageUri;

/// One mutex per destination uri. Entries are dropped once no caller holds
/// the lock any more.
#[derive(Debug, Default)]
pub(crate) struct KeyedLocks {
    slots: Mutex<HashMap<StorageUri, Weak<Mutex<()>>>>,
}

impl KeyedLocks {
    pub(crate) fn acquire(&self, key: &StorageUri) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock();
        if let Some(existing) = slots.get(key).and_then(Weak::upgrade) {
            return existing;
        }
        slots.retain(|_, slot| slot.strong_count() > 0);
        let lock = Arc::new(Mutex::new(()));
        slots.insert(key.clone(), Arc::downgrade(&lock));
        lock
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.lock().len()
    }
}
