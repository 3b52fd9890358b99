use std::cmp::Ordering;

/// A key-value pair stored at a position of a map's tree.
///
/// Items compare by key only; the value takes no part in ordering or equality.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Item<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Item<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Item { key, value }
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> Ord for Item<K, V>
where
    K: Ord,
{
    fn cmp(&self, other: &Item<K, V>) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K, V> PartialOrd for Item<K, V>
where
    K: Ord,
{
    fn partial_cmp(&self, other: &Item<K, V>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, V> PartialEq for Item<K, V>
where
    K: Ord,
{
    fn eq(&self, other: &Item<K, V>) -> bool {
        self.key == other.key
    }
}

impl<K, V> Eq for Item<K, V> where K: Ord {}
