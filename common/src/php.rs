//! PHP literal helpers
//!
//! Both tools hand values to the PHP application, either as a generated config
//! file or as a generated script. Values are always emitted as single-quoted
//! literals, where only `\` and `'` are special.

/// Quote a string as a single-quoted PHP literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("en_us"), "'en_us'");
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn test_quote_escapes_quote_and_backslash() {
        assert_eq!(quote(r"it's"), r"'it\'s'");
        assert_eq!(quote(r"C:\tmp\"), r"'C:\\tmp\\'");
    }

    #[test]
    fn test_quote_leaves_dollar_alone() {
        // No interpolation inside single quotes.
        assert_eq!(quote("$sugar_config"), "'$sugar_config'");
    }
}
