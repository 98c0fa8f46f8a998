//! URI template expansion ([RFC 6570], level 4).
//!
//! One deviation from the RFC: an expression none of whose variables is
//! defined is kept verbatim in the output instead of expanding to nothing, so
//! a partially-filled template can still be expanded later.
//!
//! [RFC 6570]: https://tools.ietf.org/html/rfc6570

use serde_json::{Map, Value};

/// Expands `template` with `variables`.
///
/// Strings, numbers and booleans are scalar values, arrays are lists and
/// objects are associative arrays. `null`, empty lists and empty objects are
/// undefined. An unterminated expression is copied as-is.
pub(crate) fn expand(template: &str, variables: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let expression = &after[..close];
        match expand_expression(expression, variables) {
            Some(expanded) => out.push_str(&expanded),
            None => {
                out.push('{');
                out.push_str(expression);
                out.push('}');
            },
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

struct Operator {
    first: &'static str,
    separator: &'static str,
    named: bool,
    if_empty: &'static str,
    allow_reserved: bool,
}

impl Operator {
    fn parse(expression: &str) -> (Self, &str) {
        let operator = |first, separator, named, if_empty, allow_reserved| Operator {
            first,
            separator,
            named,
            if_empty,
            allow_reserved,
        };
        let mut chars = expression.chars();
        let parsed = match chars.next() {
            Some('+') => operator("", ",", false, "", true),
            Some('#') => operator("#", ",", false, "", true),
            Some('.') => operator(".", ".", false, "", false),
            Some('/') => operator("/", "/", false, "", false),
            Some(';') => operator(";", ";", true, "", false),
            Some('?') => operator("?", "&", true, "=", false),
            Some('&') => operator("&", "&", true, "=", false),
            _ => return (operator("", ",", false, "", false), expression),
        };
        (parsed, chars.as_str())
    }
}

enum Modifier {
    None,
    Prefix(usize),
    Explode,
}

fn parse_varspec(spec: &str) -> (&str, Modifier) {
    if let Some(name) = spec.strip_suffix('*') {
        return (name, Modifier::Explode);
    }
    if let Some((name, length)) = spec.split_once(':') {
        if let Ok(length) = length.parse() {
            return (name, Modifier::Prefix(length));
        }
    }
    (spec, Modifier::None)
}

fn expand_expression(expression: &str, variables: &Map<String, Value>) -> Option<String> {
    let (op, varlist) = Operator::parse(expression);
    let mut parts = Vec::new();

    for spec in varlist.split(',') {
        let (name, modifier) = parse_varspec(spec.trim());
        let Some(value) = variables.get(name).filter(|value| is_defined(value)) else {
            continue;
        };
        parts.push(expand_variable(&op, name, value, &modifier));
    }

    if parts.is_empty() {
        return None;
    }
    Some(format!("{}{}", op.first, parts.join(op.separator)))
}

fn is_defined(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
        _ => true,
    }
}

fn expand_variable(op: &Operator, name: &str, value: &Value, modifier: &Modifier) -> String {
    let enc = |raw: &str| encode(raw, op.allow_reserved);

    match value {
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(scalar).map(|item| enc(&item)).collect();
            match modifier {
                Modifier::Explode if op.named => items
                    .iter()
                    .map(|item| named_pair(op, name, item))
                    .collect::<Vec<_>>()
                    .join(op.separator),
                Modifier::Explode => items.join(op.separator),
                _ => with_name(op, name, &items.join(",")),
            }
        },
        Value::Object(entries) => {
            let pairs = entries.iter().map(|(key, value)| (enc(key), enc(&scalar(value))));
            match modifier {
                Modifier::Explode => pairs
                    .map(|(key, value)| named_pair(op, &key, &value))
                    .collect::<Vec<_>>()
                    .join(op.separator),
                _ => {
                    let flat: Vec<String> = pairs.flat_map(|(key, value)| [key, value]).collect();
                    with_name(op, name, &flat.join(","))
                },
            }
        },
        scalar_value => {
            let raw = scalar(scalar_value);
            let raw = match modifier {
                Modifier::Prefix(length) => raw.chars().take(*length).collect(),
                _ => raw,
            };
            with_name(op, name, &enc(&raw))
        },
    }
}

fn with_name(op: &Operator, name: &str, value: &str) -> String {
    if op.named {
        named_pair(op, name, value)
    } else {
        value.to_string()
    }
}

fn named_pair(op: &Operator, name: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{name}{}", op.if_empty)
    } else {
        format!("{name}={value}")
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

const RESERVED: &str = ":/?#[]@!$&'()*+,;=";

fn encode(raw: &str, allow_reserved: bool) -> String {
    if !allow_reserved {
        return urlencoding::encode(raw).into_owned();
    }

    let mut out = String::with_capacity(raw.len());
    for (index, c) in raw.char_indices() {
        if c.is_ascii_alphanumeric() || "-._~".contains(c) || RESERVED.contains(c) {
            out.push(c);
        } else if c == '%' && is_pct_triplet(&raw[index..]) {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    out
}

fn is_pct_triplet(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    // Variables from RFC 6570 §3.2.
    fn variables() -> Map<String, Value> {
        json!({
            "count": ["one", "two", "three"],
            "dom": ["example", "com"],
            "dub": "me/too",
            "hello": "Hello World!",
            "half": "50%",
            "var": "value",
            "who": "fred",
            "base": "http://example.com/home/",
            "path": "/foo/bar",
            "list": ["red", "green", "blue"],
            "keys": { "semi": ";", "dot": ".", "comma": "," },
            "v": 6,
            "x": 1024,
            "y": 768,
            "empty": "",
            "empty_keys": {},
            "undef": null
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test_case("{var}", "value")]
    #[test_case("{hello}", "Hello%20World%21")]
    #[test_case("{half}", "50%25")]
    #[test_case("O{empty}X", "OX")]
    #[test_case("{x,y}", "1024,768")]
    #[test_case("{var:3}", "val")]
    #[test_case("{list}", "red,green,blue")]
    #[test_case("{list*}", "red,green,blue")]
    #[test_case("{keys}", "semi,%3B,dot,.,comma,%2C")]
    #[test_case("{keys*}", "semi=%3B,dot=.,comma=%2C")]
    fn test_simple(template: &str, expected: &str) {
        assert_eq!(expand(template, &variables()), expected);
    }

    #[test_case("{+var}", "value")]
    #[test_case("{+hello}", "Hello%20World!")]
    #[test_case("{+half}", "50%25")]
    #[test_case("{+base}index", "http://example.com/home/index")]
    #[test_case("{+path}/here", "/foo/bar/here")]
    #[test_case("{+path:6}/here", "/foo/b/here")]
    #[test_case("{#var}", "#value")]
    #[test_case("{#hello}", "#Hello%20World!")]
    #[test_case("{#path:6}/here", "#/foo/b/here")]
    fn test_reserved_and_fragment(template: &str, expected: &str) {
        assert_eq!(expand(template, &variables()), expected);
    }

    #[test_case("X{.var}", "X.value")]
    #[test_case("X{.x,y}", "X.1024.768")]
    #[test_case("www{.dom*}", "www.example.com")]
    #[test_case("{/var}", "/value")]
    #[test_case("{/var,x}/here", "/value/1024/here")]
    #[test_case("{/list*}", "/red/green/blue")]
    #[test_case("{/list*,path:4}", "/red/green/blue/%2Ffoo")]
    #[test_case("{;x,y}", ";x=1024;y=768")]
    #[test_case("{;x,y,empty}", ";x=1024;y=768;empty")]
    #[test_case("{;list*}", ";list=red;list=green;list=blue")]
    #[test_case("{?x,y}", "?x=1024&y=768")]
    #[test_case("{?x,y,empty}", "?x=1024&y=768&empty=")]
    #[test_case("{?list}", "?list=red,green,blue")]
    #[test_case("{?list*}", "?list=red&list=green&list=blue")]
    #[test_case("{?keys*}", "?semi=%3B&dot=.&comma=%2C")]
    #[test_case("?fixed=yes{&x}", "?fixed=yes&x=1024")]
    #[test_case("{&var:3}", "&var=val")]
    fn test_operators(template: &str, expected: &str) {
        assert_eq!(expand(template, &variables()), expected);
    }

    #[test_case("/orders{?page}", "/orders{?page}" ; "missing variable")]
    #[test_case("/orders{?undef}", "/orders{?undef}" ; "null variable")]
    #[test_case("/orders{?empty_keys}", "/orders{?empty_keys}" ; "empty object")]
    #[test_case("/orders{?page,x}", "/orders?x=1024" ; "partially defined")]
    #[test_case("/orders/{id", "/orders/{id" ; "unterminated")]
    #[test_case("/static/path", "/static/path" ; "no expressions")]
    fn test_undefined_expressions(template: &str, expected: &str) {
        assert_eq!(expand(template, &variables()), expected);
    }

    #[test]
    fn test_scalar_types() {
        let variables = json!({ "flag": true, "ratio": 0.5, "unicode": "Zoë" });
        let variables = variables.as_object().unwrap();
        assert_eq!(expand("{?flag,ratio,unicode}", variables), "?flag=true&ratio=0.5&unicode=Zo%C3%AB");
    }
}
