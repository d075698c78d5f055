use ustr::{Ustr, UstrMap};

/// Vec-backed storage that remembers insertion order while allowing lookup by name
pub struct UstrIndexMap<T> {
    storage: Vec<T>,
    map: UstrMap<usize>,
}

impl<T> Default for UstrIndexMap<T> {
    fn default() -> Self {
        UstrIndexMap::<T>::new()
    }
}

impl<T> UstrIndexMap<T> {
    pub fn new() -> UstrIndexMap<T> {
        UstrIndexMap {
            storage: Vec::new(),
            map: Default::default(),
        }
    }

    /// Iterate the values in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.storage.iter()
    }

    pub fn get(&self, key: &Ustr) -> Option<&T> {
        self.map.get(key).map(|index| &self.storage[*index])
    }

    pub fn contains_key(&self, key: &Ustr) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `value` under `key`. Returns false and leaves the map untouched if `key` is already present.
    pub fn insert(&mut self, key: Ustr, value: T) -> bool {
        if self.map.contains_key(&key) {
            return false;
        }

        self.map.insert(key, self.storage.len());
        self.storage.push(value);
        true
    }
}

impl<'a, T> IntoIterator for &'a UstrIndexMap<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
