use std::collections::HashMap;

/// Mapa bidireccional usado por el coordinador para asociar direcciones
/// de socket con IDs de usuario, en ambos sentidos.
#[derive(Debug, Clone)]
pub struct BiMap<K, V> {
    forward: HashMap<K, V>,
    backward: HashMap<V, K>,
}

impl<K, V> BiMap<K, V>
where
    K: std::hash::Hash + Eq + Clone,
    V: std::hash::Hash + Eq + Clone,
{
    pub fn new() -> Self {
        BiMap {
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }

    pub fn insert(&mut self, k: K, v: V) {
        // Elimina cualquier valor anterior asociado a la clave
        if let Some(old_v) = self.forward.get(&k) {
            self.backward.remove(old_v);
        }
        // Elimina cualquier clave anterior asociada al valor
        if let Some(old_k) = self.backward.get(&v) {
            self.forward.remove(old_k);
        }
        self.forward.insert(k.clone(), v.clone());
        self.backward.insert(v, k);
    }

    pub fn get_by_key(&self, k: &K) -> Option<&V> {
        self.forward.get(k)
    }

    pub fn get_by_value(&self, v: &V) -> Option<&K> {
        self.backward.get(v)
    }

    pub fn remove_by_key(&mut self, k: &K) -> Option<V> {
        if let Some(v) = self.forward.remove(k) {
            self.backward.remove(&v);
            return Some(v);
        }
        None
    }

    pub fn contains_key(&self, k: &K) -> bool {
        self.forward.contains_key(k)
    }

    pub fn contains_value(&self, v: &V) -> bool {
        self.backward.contains_key(v)
    }
}

impl<K: std::hash::Hash + Eq + Clone, V: std::hash::Hash + Eq + Clone> Default for BiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup_both_ways() {
        let mut map = BiMap::new();
        map.insert("addr1", "vendor_a");
        assert_eq!(map.get_by_key(&"addr1"), Some(&"vendor_a"));
        assert_eq!(map.get_by_value(&"vendor_a"), Some(&"addr1"));
    }

    #[test]
    fn reinsert_replaces_previous_pair() {
        let mut map = BiMap::new();
        map.insert("addr1", "vendor_a");
        // El mismo usuario se reconecta desde otra dirección.
        map.insert("addr2", "vendor_a");
        assert!(!map.contains_key(&"addr1"));
        assert_eq!(map.get_by_value(&"vendor_a"), Some(&"addr2"));
    }

    #[test]
    fn remove_by_key_clears_both_sides() {
        let mut map = BiMap::new();
        map.insert("addr1", "vendor_a");
        assert_eq!(map.remove_by_key(&"addr1"), Some("vendor_a"));
        assert!(!map.contains_value(&"vendor_a"));
        assert_eq!(map.remove_by_key(&"addr1"), None);
    }
}
