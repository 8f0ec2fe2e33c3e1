//! Debug dump output
//!
//! Renders values in the `print_r` nested-array layout:
//!
//! ```text
//! Array
//! (
//!     [a] => Array
//!         (
//!             [b] => Array
//!                 (
//!                     [0] => 1
//!                     [1] => 2
//!                 )
//!
//!         )
//!
//!     [c] => text
//! )
//! ```

use crate::error::FormatError;
use crate::format::Format;
use crate::value::FlatValue;

pub struct DumpFormat;

impl Format for DumpFormat {
    fn name(&self) -> &str {
        "dump"
    }

    fn description(&self) -> &str {
        "print_r-style nested dump"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn serialize(&self, value: &FlatValue) -> Result<String, FormatError> {
        let mut output = String::new();
        write_value(&mut output, value, 0);
        Ok(output)
    }
}

fn write_value(output: &mut String, value: &FlatValue, level: usize) {
    match value {
        FlatValue::Text(text) => output.push_str(text),
        FlatValue::Map(map) => {
            write_entries(output, map.iter().map(|(k, v)| (k.clone(), v)), level)
        }
        FlatValue::List(items) => write_entries(
            output,
            items.iter().enumerate().map(|(i, v)| (i.to_string(), v)),
            level,
        ),
    }
}

fn write_entries<'a>(
    output: &mut String,
    entries: impl Iterator<Item = (String, &'a FlatValue)>,
    level: usize,
) {
    let pad = " ".repeat(level * 8);
    output.push_str("Array\n");
    output.push_str(&pad);
    output.push_str("(\n");
    for (key, value) in entries {
        output.push_str(&format!("{}    [{}] => ", pad, key));
        write_value(output, value, level + 1);
        output.push('\n');
    }
    output.push_str(&pad);
    output.push_str(")\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FlatMap;

    #[test]
    fn test_dump_matches_print_r_layout() {
        let mut inner = FlatMap::new();
        inner.insert("b".to_string(), FlatValue::List(vec!["1".into(), "2".into()]));
        let mut map = FlatMap::new();
        map.insert("a".to_string(), FlatValue::Map(inner));
        map.insert("c".to_string(), "text".into());

        let output = DumpFormat.serialize(&FlatValue::Map(map)).unwrap();
        let expected = "Array\n\
            (\n\
            \x20   [a] => Array\n\
            \x20       (\n\
            \x20           [b] => Array\n\
            \x20               (\n\
            \x20                   [0] => 1\n\
            \x20                   [1] => 2\n\
            \x20               )\n\
            \n\
            \x20       )\n\
            \n\
            \x20   [c] => text\n\
            )\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_dump_text() {
        assert_eq!(DumpFormat.serialize(&"plain".into()).unwrap(), "plain");
    }

    #[test]
    fn test_dump_empty_map() {
        let output = DumpFormat.serialize(&FlatValue::Map(FlatMap::new())).unwrap();
        assert_eq!(output, "Array\n(\n)\n");
    }
}
