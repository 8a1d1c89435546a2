// src/utils/formatter.rs
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

pub fn format_json(content: &str, indent: usize) -> Result<String, String> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| format!("Invalid JSON: {}", e))?;

    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut ser).map_err(|e| e.to_string())?;
    String::from_utf8(out).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_json_four_spaces() {
        let input = r#"{"name":"test","value":[1]}"#;
        let result = format_json(input, 4).unwrap();
        assert_eq!(result, "{\n    \"name\": \"test\",\n    \"value\": [\n        1\n    ]\n}");
    }

    #[test]
    fn test_format_json_invalid() {
        let result = format_json("{\"open\": ", 4);
        assert!(result.unwrap_err().starts_with("Invalid JSON"));
    }
}
