/// Builds a [`crate::Value`] from JSON-like literal syntax.
///
/// ```rust
/// use serde_tueson::tueson;
///
/// let doc = tueson!({
///     "name": "Ann",
///     "tags": ["x", "y"],
///     "age": 3
/// });
/// assert_eq!(serde_tueson::to_string(&doc).unwrap().lines().next(), Some("record"));
/// ```
#[macro_export]
macro_rules! tueson {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty list
    ([]) => {
        $crate::Value::List(vec![])
    };

    // Handle non-empty list
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::tueson!($elem)),*])
    };

    // Handle empty record
    ({}) => {
        $crate::Value::Record($crate::Map::new())
    };

    // Handle non-empty record
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut fields = $crate::Map::new();
        $(
            fields.insert($key.to_string(), $crate::tueson!($value));
        )*
        $crate::Value::Record(fields)
    }};

    // Fallback for any other expression
    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    }};
}
