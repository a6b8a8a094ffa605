//! Layering of YAML configuration values.
//!
//! A local override file is merged over the project config before it is
//! parsed:
//!
//! - Mappings merge key by key, recursively
//! - Sequences (`step_order`, `bindings`, ...) are replaced as a whole
//! - A `null` in the overlay removes the key
//! - Any other overlay value replaces the base value

use serde_yaml::Value;

/// Merge `overlay` over `base`, returning the combined value.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let (Value::Mapping(base_map), Value::Mapping(overlay_map)) = (base, overlay) else {
        return overlay.clone();
    };

    let mut merged = base_map.clone();
    for (key, value) in overlay_map {
        if value.is_null() {
            merged.remove(key);
            continue;
        }
        let combined = match base_map.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }
    Value::Mapping(merged)
}

/// Merge layers in order; the last layer has the highest priority.
pub fn merge_configs(layers: &[Value]) -> Value {
    layers
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}
