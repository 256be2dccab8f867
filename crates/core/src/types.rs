/// All backend primary keys are 64-bit integers.
pub type DbId = i64;

/// Pill color for statuses without a color and for statuses not yet reached.
pub const DEFAULT_STATUS_COLOR: &str = "#E5E7EB";

pub(crate) fn default_true() -> bool {
    true
}

/// Boolean flags as the backend exchanges them.
///
/// Reads accept either a JSON boolean or an integer (`0` is false, anything
/// else true). Writes always emit `1` / `0`.
pub mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Int(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawFlag::deserialize(deserializer)? {
            RawFlag::Bool(value) => value,
            RawFlag::Int(value) => value != 0,
        })
    }

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }
}
