/// A value that is only recomputed when it was marked as out of date.
///
/// The update function is handed in on access, since computing the value
/// usually needs state the owner of the cache holds next to it.
#[derive(Debug, Clone, Default)]
pub struct Cached<T> {
    value: Option<T>,
    dirty: bool,
}

impl<T> Cached<T> {
    /// Creates an empty cache, the value will be computed on first access.
    pub fn new() -> Self {
        Cached {
            value: None,
            dirty: true,
        }
    }

    pub fn with_value(value: T) -> Self {
        Cached {
            value: Some(value),
            dirty: false,
        }
    }

    /// Marks the value as out of date. It will be recomputed upon the next access.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty || self.value.is_none()
    }

    /// Returns the cached value, recomputing it first if it is out of date.
    pub fn get_or_update<F: FnOnce() -> T>(&mut self, update: F) -> &T {
        if self.dirty {
            self.value = None;
            self.dirty = false;
        }

        self.value.get_or_insert_with(update)
    }
}
