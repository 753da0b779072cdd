use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of every server-generated id.
pub const ID_LENGTH: usize = 26;

/// Syntactic check only; says nothing about whether the id exists.
pub fn is_valid_id(raw: &str) -> bool {
    raw.len() == ID_LENGTH && raw.bytes().all(|b| b.is_ascii_alphanumeric())
}

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if is_valid_id(s) {
                    Ok(Self(s.to_string()))
                } else {
                    Err(CoreError::InvalidId(s.to_string()))
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                if is_valid_id(&value) {
                    Ok(Self(value))
                } else {
                    Err(CoreError::InvalidId(value))
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_type!(UserId);
id_type!(PostId);
