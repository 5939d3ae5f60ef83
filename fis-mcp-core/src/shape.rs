//! Projection of raw response records into compact tool output
//!
//! A [`Projection`] names the fields to keep from a JSON record and,
//! optionally, where to find a key for it. Lookups use dotted paths
//! (`tags.Name`). A missing required field is an error, never a silently
//! wrong mapping.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("missing field `{path}`")]
    MissingField { path: String },

    #[error("expected an object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Look up a dotted path. JSON `null` counts as absent.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
        .filter(|v| !v.is_null())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone)]
struct FieldRule {
    source: String,
    target: String,
    required: bool,
}

/// Field selection and key resolution for one kind of record.
///
/// ```rust
/// use fis_mcp_core::shape::Projection;
/// use serde_json::json;
///
/// let projection = Projection::new()
///     .key("tags.Name")
///     .key("id")
///     .field("id")
///     .optional("state");
///
/// let (key, shaped) = projection.apply(&json!({"id": "EXP1", "tags": {"Name": "drill"}})).unwrap();
/// assert_eq!(key, "drill");
/// assert_eq!(shaped["id"], "EXP1");
/// assert!(shaped["state"].is_null());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Projection {
    key_paths: Vec<String>,
    fields: Vec<FieldRule>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate key path. Candidates are tried in the order added and
    /// the first one holding a string wins.
    pub fn key(mut self, path: impl Into<String>) -> Self {
        self.key_paths.push(path.into());
        self
    }

    /// Copy a required field, named after the last path segment
    pub fn field(self, path: &str) -> Self {
        let target = last_segment(path).to_string();
        self.rule(path, target, true)
    }

    /// Copy an optional field, emitting `null` when absent
    pub fn optional(self, path: &str) -> Self {
        let target = last_segment(path).to_string();
        self.rule(path, target, false)
    }

    /// Copy a required field under a different name
    pub fn rename(self, source: &str, target: impl Into<String>) -> Self {
        self.rule(source, target.into(), true)
    }

    /// Copy an optional field under a different name
    pub fn optional_as(self, source: &str, target: impl Into<String>) -> Self {
        self.rule(source, target.into(), false)
    }

    fn rule(mut self, source: &str, target: String, required: bool) -> Self {
        self.fields.push(FieldRule {
            source: source.to_string(),
            target,
            required,
        });
        self
    }

    /// Resolve the record's key from the candidate paths
    pub fn key_of(&self, item: &Value) -> Result<String, ShapeError> {
        self.key_paths
            .iter()
            .find_map(|path| lookup(item, path).and_then(Value::as_str))
            .map(str::to_owned)
            .ok_or_else(|| ShapeError::MissingField {
                path: self.key_paths.join(" | "),
            })
    }

    /// Copy the selected fields into a new object
    pub fn project(&self, item: &Value) -> Result<Map<String, Value>, ShapeError> {
        if !item.is_object() {
            return Err(ShapeError::NotAnObject { found: kind(item) });
        }

        let mut shaped = Map::with_capacity(self.fields.len());
        for rule in &self.fields {
            let value = match lookup(item, &rule.source) {
                Some(v) => v.clone(),
                None if rule.required => {
                    return Err(ShapeError::MissingField {
                        path: rule.source.clone(),
                    })
                }
                None => Value::Null,
            };
            shaped.insert(rule.target.clone(), value);
        }
        Ok(shaped)
    }

    /// Resolve the key and project the fields
    pub fn apply(&self, item: &Value) -> Result<(String, Map<String, Value>), ShapeError> {
        let shaped = self.project(item)?;
        Ok((self.key_of(item)?, shaped))
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Shape every record into an object keyed by its resolved key.
///
/// Records resolving to a key already taken are stored as `"{key} (2)"`,
/// `"{key} (3)"` and so on, in input order, so none are dropped.
pub fn shape_keyed<'a, I>(items: I, projection: &Projection) -> Result<Map<String, Value>, ShapeError>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut out = Map::new();
    for item in items {
        let (key, shaped) = projection.apply(item)?;
        let key = if out.contains_key(&key) {
            let mut n = 2;
            while out.contains_key(&format!("{} ({})", key, n)) {
                n += 1;
            }
            format!("{} ({})", key, n)
        } else {
            key
        };
        out.insert(key, Value::Object(shaped));
    }
    Ok(out)
}

/// Shape every record into a list, preserving order
pub fn shape_all<'a, I>(items: I, projection: &Projection) -> Result<Vec<Value>, ShapeError>
where
    I: IntoIterator<Item = &'a Value>,
{
    items
        .into_iter()
        .map(|item| projection.project(item).map(Value::Object))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn experiment_projection() -> Projection {
        Projection::new()
            .key("tags.Name")
            .key("id")
            .field("id")
            .field("state")
            .optional("experimentOptions")
    }

    #[test]
    fn test_lookup_nested_path() {
        let v = json!({"tags": {"Name": "drill"}, "gone": null});
        assert_eq!(lookup(&v, "tags.Name"), Some(&json!("drill")));
        assert_eq!(lookup(&v, "tags.Owner"), None);
        assert_eq!(lookup(&v, "gone"), None);
    }

    #[test]
    fn test_key_falls_back_to_id() {
        let (key, _) = experiment_projection()
            .apply(&json!({"id": "EXP1", "state": {"status": "running"}}))
            .unwrap();
        assert_eq!(key, "EXP1");
    }

    #[test]
    fn test_missing_required_field() {
        let err = experiment_projection()
            .apply(&json!({"id": "EXP1"}))
            .unwrap_err();
        assert_eq!(
            err,
            ShapeError::MissingField {
                path: "state".to_string()
            }
        );
    }

    #[test]
    fn test_missing_key_reports_all_candidates() {
        let err = Projection::new()
            .key("tags.Name")
            .key("id")
            .key_of(&json!({"arn": "arn:aws:fis:::x"}))
            .unwrap_err();
        assert_eq!(
            err,
            ShapeError::MissingField {
                path: "tags.Name | id".to_string()
            }
        );
    }

    #[test]
    fn test_rename_and_optional() {
        let projection = Projection::new()
            .rename("configurationItemCaptureTime", "capture_time")
            .optional_as("availabilityZone", "availability_zone");
        let shaped = projection
            .project(&json!({"configurationItemCaptureTime": "2024-01-01T00:00:00Z"}))
            .unwrap();
        assert_eq!(
            Value::Object(shaped),
            json!({"capture_time": "2024-01-01T00:00:00Z", "availability_zone": null})
        );
    }

    #[test]
    fn test_project_rejects_non_object() {
        let err = Projection::new().field("id").project(&json!("EXP1")).unwrap_err();
        assert_eq!(err, ShapeError::NotAnObject { found: "a string" });
    }

    #[test]
    fn test_shape_keyed_disambiguates_collisions() {
        let items = [
            json!({"id": "A", "state": "running", "tags": {"Name": "drill"}}),
            json!({"id": "B", "state": "stopped", "tags": {"Name": "drill"}}),
            json!({"id": "C", "state": "failed", "tags": {"Name": "drill"}}),
        ];
        let shaped = shape_keyed(&items, &experiment_projection()).unwrap();
        assert_eq!(shaped.len(), 3);
        assert_eq!(shaped["drill"]["id"], "A");
        assert_eq!(shaped["drill (2)"]["id"], "B");
        assert_eq!(shaped["drill (3)"]["id"], "C");
    }

    #[test]
    fn test_shape_all_preserves_order() {
        let items = [json!({"id": "1"}), json!({"id": "2"})];
        let shaped = shape_all(&items, &Projection::new().field("id")).unwrap();
        assert_eq!(shaped, vec![json!({"id": "1"}), json!({"id": "2"})]);
    }
}
