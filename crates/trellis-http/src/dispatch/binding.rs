//! Positional handler arguments from a method's parameter bindings

use serde_json::{Map, Value};
use trellis_core::{HandlerArgs, HandlerError, ParamBinding, ParamSource};

/// Build handler arguments for `params`.
///
/// The argument list is as long as the highest bound position; positions
/// without a binding are `null`. The body is only parsed when a binding reads
/// from it, and an empty body reads as `null`.
pub fn bind_arguments(
    params: &[ParamBinding],
    query: Option<&str>,
    body: &[u8],
) -> Result<HandlerArgs, HandlerError> {
    let Some(arity) = params.iter().map(|binding| binding.index + 1).max() else {
        return Ok(HandlerArgs::empty());
    };

    let reads = |source: ParamSource| params.iter().any(|binding| binding.source == source);
    let query_pairs = if reads(ParamSource::Query) {
        parse_query(query)?
    } else {
        Vec::new()
    };
    let body = if reads(ParamSource::Body) {
        parse_body(body)?
    } else {
        Value::Null
    };

    let mut values = vec![Value::Null; arity];
    for binding in params {
        let value = match binding.source {
            ParamSource::Query => query_value(&query_pairs, binding.key.as_deref()),
            // Exact matching captures no path parameters
            ParamSource::Param => match binding.key {
                Some(_) => Value::Null,
                None => Value::Object(Map::new()),
            },
            ParamSource::Body => match binding.key.as_deref() {
                Some(key) => body.get(key).cloned().unwrap_or(Value::Null),
                None => body.clone(),
            },
        };
        values[binding.index] = value;
    }

    Ok(HandlerArgs::new(values))
}

fn parse_query(query: Option<&str>) -> Result<Vec<(String, String)>, HandlerError> {
    match query {
        Some(query) if !query.is_empty() => serde_urlencoded::from_str(query)
            .map_err(|e| HandlerError::bad_request(format!("Invalid query string: {}", e))),
        _ => Ok(Vec::new()),
    }
}

fn query_value(pairs: &[(String, String)], key: Option<&str>) -> Value {
    match key {
        Some(key) => pairs
            .iter()
            .find(|(name, _)| name == key)
            .map_or(Value::Null, |(_, value)| Value::String(value.clone())),
        None => Value::Object(
            pairs
                .iter()
                .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                .collect(),
        ),
    }
}

fn parse_body(body: &[u8]) -> Result<Value, HandlerError> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| HandlerError::bad_request(format!("Invalid JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn binding(index: usize, source: ParamSource, key: Option<&str>) -> ParamBinding {
        ParamBinding::new(index, source, key.map(str::to_string))
    }

    #[test]
    fn test_no_bindings_means_no_arguments() {
        let args = bind_arguments(&[], Some("a=1"), b"{").unwrap();
        assert!(args.is_empty());
    }

    #[test]
    fn test_body_and_gaps() {
        let params = [binding(2, ParamSource::Body, None)];
        let args = bind_arguments(&params, None, br#"{"name":"Jane"}"#).unwrap();

        assert_eq!(args.len(), 3);
        assert_eq!(args.get(0), Some(&Value::Null));
        assert_eq!(args.get(2), Some(&json!({"name": "Jane"})));
    }

    #[test]
    fn test_keyed_sources() {
        let params = [
            binding(0, ParamSource::Query, Some("page")),
            binding(1, ParamSource::Query, Some("missing")),
            binding(2, ParamSource::Body, Some("name")),
            binding(3, ParamSource::Param, Some("id")),
            binding(4, ParamSource::Query, None),
            binding(5, ParamSource::Param, None),
        ];
        let args = bind_arguments(&params, Some("page=2&sort=name"), br#"{"name":"Jane"}"#).unwrap();

        assert_eq!(args.get(0), Some(&json!("2")));
        assert_eq!(args.get(1), Some(&Value::Null));
        assert_eq!(args.get(2), Some(&json!("Jane")));
        assert_eq!(args.get(3), Some(&Value::Null));
        assert_eq!(args.get(4), Some(&json!({"page": "2", "sort": "name"})));
        assert_eq!(args.get(5), Some(&json!({})));
    }

    #[test]
    fn test_empty_body_is_null_and_invalid_body_is_rejected() {
        let params = [binding(0, ParamSource::Body, None)];

        let args = bind_arguments(&params, None, b"").unwrap();
        assert_eq!(args.get(0), Some(&Value::Null));

        let error = bind_arguments(&params, None, b"{not json").unwrap_err();
        assert!(error.is_client_error());
    }
}
