use core::cmp;
use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, Error, SeqAccess};
use serde::ser::{self, SerializeSeq};

use crate::alloc::Allocator;

use super::Vec;

impl<T, A: Allocator> ser::Serialize for Vec<T, A>
where
    T: ser::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;

        for value in self {
            seq.serialize_element(value)?;
        }

        seq.end()
    }
}

impl<'de, T> de::Deserialize<'de> for Vec<T>
where
    T: de::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_seq(VecVisitor(PhantomData))
    }
}

struct VecVisitor<T>(PhantomData<T>);

impl<'de, T> de::Visitor<'de> for VecVisitor<T>
where
    T: de::Deserialize<'de>,
{
    type Value = Vec<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
    where
        S: SeqAccess<'de>,
    {
        // Size hints come from untrusted input.
        let capacity = cmp::min(seq.size_hint().unwrap_or(0), 4096);
        let mut values = Vec::try_with_capacity(capacity).map_err(S::Error::custom)?;

        while let Some(value) = seq.next_element()? {
            values.try_push(value).map_err(S::Error::custom)?;
        }

        Ok(values)
    }
}
