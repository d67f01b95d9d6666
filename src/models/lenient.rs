//! Deserializers for provider output: explicit `null` falls back to the
//! field default, integers may arrive as integral floats (`3.0`).

use serde::de::Error;
use serde::{Deserialize, Deserializer};

/// `null` (or a missing key, with `#[serde(default)]`) becomes `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional integer that also accepts `3.0`; `3.5` is rejected.
pub fn integral<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(n) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if n.is_finite() && n.fract() == 0.0 {
        Ok(Some(n as i64))
    } else {
        Err(D::Error::custom(format!("expected an integer, got {n}")))
    }
}
