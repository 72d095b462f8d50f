// patch.rs
// Campos anulables de los payloads de actualización: ausente => `None`
// (no cambia), `null` => `Some(None)` (se borra), valor => `Some(Some(v))`.
use serde::{Deserialize, Deserializer};

/// Usar con `#[serde(default, deserialize_with = "crate::patch::nullable")]`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
  where D: Deserializer<'de>,
        T: Deserialize<'de>
{
  Option::<T>::deserialize(deserializer).map(Some)
}

/// Aplica un campo anulable sobre el valor actual.
pub(crate) fn apply_nullable<T>(field: Option<Option<T>>, target: &mut Option<T>) {
  if let Some(value) = field {
    *target = value;
  }
}
