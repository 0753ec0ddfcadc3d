//! Macros for defining typed ID types.

/// Macro to define a typed ID backed by the store's object identifier.
///
/// This generates a newtype wrapper around [`bson::oid::ObjectId`] with:
/// - `new()` to generate a fresh ID
/// - `parse()` to validate and parse from text
/// - `Display` and `FromStr` implementations
/// - `Serialize` and `Deserialize` as a plain hex string
/// - conversions to and from the native `ObjectId`
///
/// # Example
///
/// ```ignore
/// define_object_id!(FilmId);
///
/// let parsed: FilmId = "65a1f0c2e4b0a1b2c3d4e5f6".parse()?;
/// ```
#[macro_export]
macro_rules! define_object_id {
    ($name:ident) => {
        /// A typed ID for this resource type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($crate::ObjectId);

        impl $name {
            /// Number of characters in the textual form.
            pub const TEXT_LEN: usize = 24;

            /// Creates a new ID with a fresh object identifier.
            #[must_use]
            pub fn new() -> Self {
                Self($crate::ObjectId::new())
            }

            /// Creates an ID from the store's native key.
            #[must_use]
            pub const fn from_object_id(oid: $crate::ObjectId) -> Self {
                Self(oid)
            }

            /// Creates an ID from its raw 12 bytes.
            #[must_use]
            pub const fn from_bytes(bytes: [u8; 12]) -> Self {
                Self($crate::ObjectId::from_bytes(bytes))
            }

            /// Returns the store's native key.
            #[must_use]
            pub const fn object_id(&self) -> $crate::ObjectId {
                self.0
            }

            /// Returns the raw 12 bytes.
            #[must_use]
            pub const fn bytes(&self) -> [u8; 12] {
                self.0.bytes()
            }

            /// Parses an ID from a string.
            ///
            /// The string must be exactly 24 hexadecimal characters. Upper-case
            /// digits are accepted; formatting always yields lower-case.
            pub fn parse(s: &str) -> Result<Self, $crate::IdError> {
                if s.is_empty() {
                    return Err($crate::IdError::Empty);
                }

                // The hex decoder reports byte offsets; only ASCII keeps them
                // equal to character positions.
                if let Some((position, character)) =
                    s.chars().enumerate().find(|(_, c)| !c.is_ascii())
                {
                    return Err($crate::IdError::InvalidCharacter {
                        position,
                        character,
                    });
                }

                $crate::ObjectId::parse_str(s)
                    .map(Self)
                    .map_err(|err| $crate::IdError::from_oid_error(err, Self::TEXT_LEN))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.to_hex())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$crate::ObjectId> for $name {
            fn from(oid: $crate::ObjectId) -> Self {
                Self(oid)
            }
        }

        impl From<$name> for $crate::ObjectId {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}
