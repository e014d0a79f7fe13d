/// Builds a [`json::Value`](crate::json::Value) from JSON-like syntax.
///
/// Object keys must be string literals. Any other token is converted with
/// `Value::from`; nested negative numbers and expressions go in parentheses.
///
/// ```rust
/// use plaindoc::json;
///
/// let value = json!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["a", "b"]
/// });
/// let object = value.as_object().unwrap();
/// assert_eq!(object.get_str("name"), Some("Alice"));
/// assert_eq!(object.get_array("tags").map(|tags| tags.len()), Some(2));
/// ```
#[macro_export]
macro_rules! json {
    (true) => {
        $crate::json::Value::Boolean(true)
    };

    (false) => {
        $crate::json::Value::Boolean(false)
    };

    ([]) => {
        $crate::json::Value::array()
    };

    ([ $($elem:tt),* $(,)? ]) => {{
        let mut array = $crate::json::Array::new();
        $(
            array.add($crate::json!($elem));
        )*
        $crate::json::Value::Array(array)
    }};

    ({}) => {
        $crate::json::Value::object()
    };

    // Repeated keys keep their first value, as the parser does.
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::json::Object::new();
        $(
            let _ = object.add($key, $crate::json!($value));
        )*
        $crate::json::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::json::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::json::{Object, Value};

    #[test]
    fn test_json_macro_primitives() {
        assert_eq!(json!(true), Value::Boolean(true));
        assert_eq!(json!(false), Value::Boolean(false));
        assert_eq!(json!(42), Value::Integer(42));
        assert_eq!(json!(3.5), Value::Decimal(3.5));
        assert_eq!(json!(-7), Value::Integer(-7));
        assert_eq!(json!([(-7)]), Value::Array([Value::Integer(-7)].into_iter().collect()));
        assert_eq!(json!("hello"), Value::String(b"hello".to_vec()));
    }

    #[test]
    fn test_json_macro_arrays() {
        assert_eq!(json!([]), Value::array());

        let arr = json!([1, 2, 3]);
        match arr {
            Value::Array(list) => {
                assert_eq!(list.len(), 3);
                assert_eq!(list.get_i64(0), Some(1));
                assert_eq!(list.get_i64(2), Some(3));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_json_macro_objects() {
        assert_eq!(json!({}), Value::Object(Object::new()));

        let obj = json!({
            "name": "Alice",
            "age": 30,
            "name": "ignored"
        });

        match obj {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get_str("name"), Some("Alice"));
                assert_eq!(map.get_i64("age"), Some(30));
            }
            _ => panic!("Expected object"),
        }
    }
}
