/// Builds a [`Value`](crate::Value) from a literal-style description.
///
/// Objects use `"key" => value` entries and keep their field order.
/// Any Rust expression that converts into a `Value` works in value
/// position; wrap multi-token expressions in parentheses.
///
/// ## Examples
///
/// ```rust
/// use toon_core::{toon, Value};
///
/// let value = toon!({
///     "name" => "Alice",
///     "tags" => ["admin", "ops"],
///     "manager" => null,
/// });
/// assert!(value.is_object());
/// ```
#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toon!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal => $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::toon!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any expression convertible into a Value.
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn primitives() {
        assert_eq!(toon!(null), Value::Null);
        assert_eq!(toon!(true), Value::Bool(true));
        assert_eq!(toon!(false), Value::Bool(false));
        assert_eq!(toon!(42), Value::Number(Number::Integer(42)));
        assert_eq!(toon!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(toon!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn arrays() {
        assert_eq!(toon!([]), Value::Array(vec![]));
        let value = toon!([1, "two", null]);
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Number(Number::Integer(1)),
                Value::String("two".to_string()),
                Value::Null,
            ])
        );
    }

    #[test]
    fn objects() {
        assert_eq!(toon!({}), Value::Object(Map::new()));
        let value = toon!({"name" => "Alice", "age" => 30});
        match value {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::String("Alice".to_string())));
                assert_eq!(map.get("age"), Some(&Value::Number(Number::Integer(30))));
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn nesting() {
        let value = toon!({
            "rows" => [{"id" => 1}, {"id" => 2}],
            "empty" => {},
        });
        let rows = value.as_object().and_then(|o| o.get("rows")).unwrap();
        assert_eq!(rows.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn parenthesized_expressions() {
        let n = 7;
        assert_eq!(toon!([(n + 1)]), Value::Array(vec![Value::from(8)]));
    }
}
