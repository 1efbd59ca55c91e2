//! Regex-Based Type Model Extraction
//!
//! Builds a `TypeModel` from normalized source text:
//! - the first class declaration wins
//! - every `Type name;` statement in the file is taken as a field
//! - generic declarations resolve to their first type argument
//!
//! Known limitations: nested classes are folded into the outer model,
//! annotations between modifiers and type are not recognised, and
//! multi-variable declarations (`int a, b;`) are skipped.
//!
//! @module trace/extract

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::TypeModel;

// =============================================================================
// COMPILED REGEX PATTERNS
// =============================================================================

/// Optional modifiers, then `class Name`
static CLASS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(?:public|protected|private|abstract|final|static|sealed|strictfp)\s+)*class\s+([A-Za-z_$][\w$]*)",
    )
    .unwrap()
});

/// Optional visibility, optional static/final/transient/volatile, a type token
/// with at most one generic group and array brackets, the name, then `;`
static FIELD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:(?:public|private|protected)\s+)?(?:(?:static|final|transient|volatile)\s+)*([A-Za-z_$][\w$.]*(?:\s*<[\w$.,?\s<>\[\]]*>)?(?:\s*\[\s*\])*)\s+([A-Za-z_$][\w$]*)\s*;",
    )
    .unwrap()
});

/// Leading identifier (possibly qualified) of a type argument
static TYPE_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][\w$.]*").unwrap());

// =============================================================================
// EXTRACTION
// =============================================================================

/// Extract the declared class and its fields; `None` when no class is declared
pub fn extract(normalized: &str) -> Option<TypeModel> {
    let name = CLASS_PATTERN.captures(normalized)?.get(1)?.as_str();
    let mut model = TypeModel::new(name);

    for caps in FIELD_PATTERN.captures_iter(normalized) {
        let (Some(type_match), Some(name_match)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let raw_type = type_match.as_str();

        // `return value;` and friends look like declarations
        if is_statement_keyword(raw_type) || is_statement_keyword(name_match.as_str()) {
            continue;
        }

        model.insert_field(name_match.as_str(), effective_type(raw_type));
    }

    Some(model)
}

/// Reduce a declared type to the type a field actually refers to.
///
/// `List<ParentEciType>` -> `ParentEciType`, `Map<K, V>` -> `K`,
/// `com.acme.Order[]` -> `Order`. A generic group with no usable first
/// argument (`List<?>`) falls back to the container.
pub fn effective_type(raw: &str) -> &str {
    let raw = raw.trim();

    if let Some(open) = raw.find('<') {
        let mut arg = raw[open + 1..].trim_start();
        if let Some(rest) = arg.strip_prefix('?') {
            let rest = rest.trim_start();
            arg = rest
                .strip_prefix("extends")
                .or_else(|| rest.strip_prefix("super"))
                .map(str::trim_start)
                .unwrap_or(rest);
        }
        if let Some(m) = TYPE_IDENT.find(arg) {
            return last_segment(m.as_str());
        }
        return last_segment(raw[..open].trim_end());
    }

    let base = raw.split('[').next().unwrap_or(raw).trim_end();
    last_segment(base)
}

fn last_segment(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Java statement keywords that the field pattern can mistake for a type or name
fn is_statement_keyword(token: &str) -> bool {
    matches!(
        token,
        "return"
            | "throw"
            | "new"
            | "yield"
            | "assert"
            | "break"
            | "continue"
            | "case"
            | "goto"
            | "package"
            | "import"
            | "else"
            | "do"
            | "this"
            | "super"
            | "throws"
            | "extends"
            | "implements"
    )
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::normalize::normalize;

    #[test]
    fn test_extract_class_and_fields() {
        let code = r#"
public class OrderRequest {
    private String orderId;
    private OrderDetail details;
    protected static final long serialVersionUID;
    int count;
}
"#;
        let model = extract(code).unwrap();
        assert_eq!(model.name, "OrderRequest");

        let fields: Vec<_> = model
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.declared_type.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("orderId", "String"),
                ("details", "OrderDetail"),
                ("serialVersionUID", "long"),
                ("count", "int"),
            ]
        );
    }

    #[test]
    fn test_no_class_declared() {
        assert!(extract("public interface Named { String name(); }").is_none());
        assert!(extract("public enum Color { RED, GREEN; }").is_none());
        assert!(extract("").is_none());
    }

    #[test]
    fn test_first_class_wins() {
        let code = "class First { int a; }\nclass Second { int b; }";
        let model = extract(code).unwrap();
        assert_eq!(model.name, "First");
        assert!(model.field_type("b").is_some());
    }

    #[test]
    fn test_modifier_prefixes() {
        let model = extract("public abstract class Base { }").unwrap();
        assert_eq!(model.name, "Base");
        let model = extract("final class Leaf { }").unwrap();
        assert_eq!(model.name, "Leaf");
    }

    #[test]
    fn test_subclass_word_is_not_a_declaration() {
        assert!(extract("int subclass value;").is_none());
    }

    #[test]
    fn test_generic_unwrapping() {
        let code = r#"
class Holder {
    private List<ParentEciType> parents;
    private Map<String, Customer> byName;
    private Set<? extends Region> regions;
    private Optional<com.acme.Account> account;
    private List<?> anything;
}
"#;
        let model = extract(code).unwrap();
        assert_eq!(model.field_type("parents"), Some("ParentEciType"));
        assert_eq!(model.field_type("byName"), Some("String"));
        assert_eq!(model.field_type("regions"), Some("Region"));
        assert_eq!(model.field_type("account"), Some("Account"));
        assert_eq!(model.field_type("anything"), Some("List"));
    }

    #[test]
    fn test_nested_generic_takes_outer_first_argument() {
        let model = extract("class A { private List<Map<String, B>> rows; }").unwrap();
        assert_eq!(model.field_type("rows"), Some("Map"));
    }

    #[test]
    fn test_arrays_and_qualified_types() {
        let model = extract("class A { private com.acme.Order[] orders; Line [] lines; }").unwrap();
        assert_eq!(model.field_type("orders"), Some("Order"));
        assert_eq!(model.field_type("lines"), Some("Line"));
    }

    #[test]
    fn test_return_statements_excluded() {
        let code = r#"
class A {
    private Hierarchy node;
    public Hierarchy getNode() {
        return node;
    }
    void fail() {
        throw error;
    }
}
"#;
        let model = extract(code).unwrap();
        assert!(model.field_type("node").is_some());
        assert!(model.fields.iter().all(|f| f.declared_type != "return"));
        assert!(model.fields.iter().all(|f| f.declared_type != "throw"));
    }

    #[test]
    fn test_throws_clause_is_not_a_field() {
        let code = r#"
public abstract class Repository {
    private String name;
    public abstract void save() throws HierarchyException;
    abstract void load() throws java.io.IOException;
}
"#;
        let model = extract(&normalize(code)).unwrap();
        let fields: Vec<_> = model
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.declared_type.as_str()))
            .collect();
        assert_eq!(fields, vec![("name", "String")]);
    }

    #[test]
    fn test_initialized_and_multi_declarations_skipped() {
        let model = extract("class A { int a = 5; int b, c; int d; }").unwrap();
        let names: Vec<_> = model.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["d"]);
    }

    #[test]
    fn test_duplicate_field_last_type_wins() {
        let model = extract("class A { Foo item; Bar item; }").unwrap();
        assert_eq!(model.fields.len(), 1);
        assert_eq!(model.field_type("item"), Some("Bar"));
    }

    #[test]
    fn test_commented_field_not_extracted_after_normalize() {
        let code = r#"
public class A {
    // private String hierarchyCode;
    /* private Long parentEciId; */
    private String label; // ultimateEci value
}
"#;
        let model = extract(&normalize(code)).unwrap();
        let names: Vec<_> = model.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["label"]);
    }

    #[test]
    fn test_effective_type() {
        assert_eq!(effective_type("String"), "String");
        assert_eq!(effective_type("List<Foo>"), "Foo");
        assert_eq!(effective_type("List < Foo >"), "Foo");
        assert_eq!(effective_type("Map<K,V>"), "K");
        assert_eq!(effective_type("java.util.List<a.b.Foo>"), "Foo");
        assert_eq!(effective_type("Foo[][]"), "Foo");
        assert_eq!(effective_type("List<? super Foo>"), "Foo");
    }
}
