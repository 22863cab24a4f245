//! Serialize an ordered `Vec` of id-carrying records as a JSON object keyed
//! by segment id, preserving document order in both directions.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::SegmentId;

/// A record that knows its own segment id.
pub trait Keyed {
    fn key(&self) -> SegmentId;
}

#[allow(clippy::ptr_arg)]
pub fn serialize<S, T>(items: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Keyed + Serialize,
{
    let mut map = serializer.serialize_map(Some(items.len()))?;
    for item in items {
        map.serialize_entry(&item.key(), item)?;
    }
    map.end()
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Keyed + Deserialize<'de>,
{
    deserializer.deserialize_map(KeyedVisitor(PhantomData))
}

struct KeyedVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for KeyedVisitor<T>
where
    T: Keyed + Deserialize<'de>,
{
    type Value = Vec<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map keyed by segment id")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Vec<T>, A::Error> {
        let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, item)) = access.next_entry::<SegmentId, T>()? {
            if key != item.key() {
                return Err(serde::de::Error::custom(format!(
                    "entry keyed {key} carries id {}",
                    item.key()
                )));
            }
            items.push(item);
        }
        Ok(items)
    }
}
