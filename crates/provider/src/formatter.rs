/// ResourceNameFormatter decorates the names of managed resources with a
/// configured prefix and suffix, so that they're recognizable in Instana.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceNameFormatter {
    prefix: String,
    suffix: String,
}

impl ResourceNameFormatter {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn format(&self, name: &str) -> String {
        format!("{}{}{}", self.prefix, name, self.suffix)
    }

    /// Strip the prefix and suffix from `full_name`, where present.
    pub fn undo_formatting(&self, full_name: &str) -> String {
        let name = full_name.strip_prefix(&self.prefix).unwrap_or(full_name);
        let name = name.strip_suffix(&self.suffix).unwrap_or(name);
        name.to_string()
    }
}

#[cfg(test)]
mod test {
    use super::ResourceNameFormatter;

    #[test]
    fn test_format_and_undo() {
        let formatter = ResourceNameFormatter::new("prefix ", " suffix");

        let cases = [
            ("name", "prefix name suffix"),
            ("", "prefix  suffix"),
            ("prefix name", "prefix prefix name suffix"),
        ];
        for (name, full_name) in cases {
            assert_eq!(formatter.format(name), full_name);
            assert_eq!(formatter.undo_formatting(full_name), name);
        }

        // Names which were not formatted are returned as-is.
        assert_eq!(formatter.undo_formatting("name"), "name");
        assert_eq!(formatter.undo_formatting("prefix name"), "name");
        assert_eq!(formatter.undo_formatting("name suffix"), "name");

        let noop = ResourceNameFormatter::default();
        assert_eq!(noop.format("name"), "name");
        assert_eq!(noop.undo_formatting("name"), "name");
    }
}
