//! Gateway lifecycle events.

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// The gateway session is established and events will start flowing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ready {
    /// Session id used to resume after a disconnect.
    pub session_id: String,
}

/// A dropped session was resumed; missed events have been replayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Resumed {}

/// The gateway asked the client to reconnect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Reconnect {}

/// The session was invalidated by the gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvalidSession {
    /// Whether the session may still be resumed.
    pub resumable: bool,
}

// The gateway sends `d` for this event as a bare boolean; older servers
// sent null or an empty object. Accept all three shapes.
impl<'de> Deserialize<'de> for InvalidSession {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct InvalidSessionVisitor;

        impl<'de> Visitor<'de> for InvalidSessionVisitor {
            type Value = InvalidSession;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a resumable flag as a boolean or an object")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<InvalidSession, E> {
                Ok(InvalidSession { resumable: v })
            }

            fn visit_unit<E: de::Error>(self) -> Result<InvalidSession, E> {
                Ok(InvalidSession::default())
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<InvalidSession, A::Error> {
                let mut resumable = false;
                while let Some(key) = map.next_key::<String>()? {
                    if key == "resumable" {
                        resumable = map.next_value()?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(InvalidSession { resumable })
            }
        }

        deserializer.deserialize_any(InvalidSessionVisitor)
    }
}

accord_core::events! {
    Ready => ("READY", Lifecycle),
    Resumed => ("RESUMED", Lifecycle),
    Reconnect => ("RECONNECT", Lifecycle),
    InvalidSession => ("INVALID_SESSION", Lifecycle),
}
