use crate::tree_map::balance::Balance;
use crate::tree_map::map::TreeMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::marker::PhantomData;

impl<K, V, B> Serialize for TreeMap<K, V, B>
where
    K: Serialize,
    V: Serialize,
    B: Balance,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct TreeMapVisitor<K, V, B>
where
    B: Balance,
{
    marker: PhantomData<fn() -> TreeMap<K, V, B>>,
}

impl<'de, K, V, B> Visitor<'de> for TreeMapVisitor<K, V, B>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
    B: Balance,
{
    type Value = TreeMap<K, V, B>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = TreeMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V, B> Deserialize<'de> for TreeMap<K, V, B>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
    B: Balance,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TreeMapVisitor {
            marker: PhantomData,
        })
    }
}
