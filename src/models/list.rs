use serde::de::DeserializeOwned;
use serde_json::Value;

/// Estrae una lista da una risposta che può essere un array nudo o un
/// oggetto che la contiene sotto una delle chiavi indicate
///
/// `null` o un oggetto senza nessuna delle chiavi danno una lista vuota.
pub fn coerce_list<T: DeserializeOwned>(
    value: Value,
    keys: &[&str],
) -> Result<Vec<T>, serde_json::Error> {
    match value {
        Value::Array(_) => serde_json::from_value(value),
        Value::Object(mut map) => {
            let inner = keys
                .iter()
                .find_map(|key| map.remove(*key).filter(|v| !v.is_null()));
            match inner {
                Some(inner) => serde_json::from_value(inner),
                None => Ok(Vec::new()),
            }
        }
        _ => Ok(Vec::new()),
    }
}
