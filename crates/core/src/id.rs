use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A type-tagged identifier.
///
/// Wraps a [`uuid::Uuid`] with a phantom marker so that, say, a table's id
/// and a player's id are distinct types even though both are UUIDs
/// underneath. Prevents passing the wrong kind of id to the wrong function
/// at compile time.
pub struct ID<T> {
    uuid: uuid::Uuid,
    marker: PhantomData<fn() -> T>,
}

impl<T> ID<T> {
    /// Generates a new random (v7, time-ordered) identifier.
    pub fn random() -> Self {
        Self {
            uuid: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
    /// Wraps an existing UUID without generating a new one.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self {
            uuid,
            marker: PhantomData,
        }
    }
    pub fn uuid(&self) -> uuid::Uuid {
        self.uuid
    }
    /// Reinterprets this id as belonging to a different type.
    ///
    /// Useful when one entity's id doubles as another's primary key (a hand
    /// record keyed by the table's id, say).
    pub fn cast<U>(&self) -> ID<U> {
        ID {
            uuid: self.uuid,
            marker: PhantomData,
        }
    }
}

impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}
impl<T> Eq for ID<T> {}
impl<T> std::hash::Hash for ID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}
impl<T> fmt::Debug for ID<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID({})", self.uuid)
    }
}
impl<T> fmt::Display for ID<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}
impl<T> FromStr for ID<T> {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self::from_uuid)
    }
}
impl<T> serde::Serialize for ID<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.uuid.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        uuid::Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

/// An entity that can name its own identifier.
pub trait Unique {
    type Kind;
    fn id(&self) -> ID<Self::Kind>;
}
