//! Explicit presence marker for optional payload fields.

use serde::{Serialize, Serializer};

/// A value that the service may or may not have sent.
///
/// `Absent` means the node was missing from the payload. It is distinct from
/// `Present(String::new())`, which means the node was there but empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// The node was present with this value.
    Present(T),
    /// The node was not in the payload.
    Absent,
}

impl<T> Field<T> {
    /// Returns true if the value was present.
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    /// Returns true if the value was absent.
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Borrow the contained value.
    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Present(value) => Field::Present(value),
            Field::Absent => Field::Absent,
        }
    }

    /// Returns the value if present.
    pub fn present(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent => None,
        }
    }

    /// Map the contained value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Present(value) => Field::Present(f(value)),
            Field::Absent => Field::Absent,
        }
    }
}

impl Field<String> {
    /// Borrow the contained string as `&str`.
    pub fn as_deref(&self) -> Field<&str> {
        match self {
            Field::Present(value) => Field::Present(value.as_str()),
            Field::Absent => Field::Absent,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Present(value),
            None => Field::Absent,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(value) => serializer.serialize_some(value),
            Field::Absent => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_not_absent() {
        let empty: Field<String> = Field::Present(String::new());
        assert!(empty.is_present());
        assert_ne!(empty, Field::Absent);
    }

    #[test]
    fn from_option() {
        assert_eq!(Field::from(Some(3)), Field::Present(3));
        assert_eq!(Field::<u8>::from(None), Field::Absent);
    }

    #[test]
    fn accessors() {
        let tip = Field::Present("Stopt niet in Woerden".to_string());
        assert_eq!(tip.as_deref(), Field::Present("Stopt niet in Woerden"));
        assert_eq!(tip.as_ref().map(|s| s.len()), Field::Present(21));
        assert_eq!(tip.present().as_deref(), Some("Stopt niet in Woerden"));

        let absent: Field<String> = Field::Absent;
        assert!(absent.is_absent());
        assert_eq!(absent.present(), None);
    }

    #[test]
    fn serializes_as_nullable() {
        let present = serde_json::to_string(&Field::Present("+5 min")).unwrap();
        assert_eq!(present, "\"+5 min\"");

        let absent = serde_json::to_string(&Field::<&str>::Absent).unwrap();
        assert_eq!(absent, "null");
    }
}
