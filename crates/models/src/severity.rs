use super::{Error, Vocabulary};

/// Severity of an event raised by a custom event specification.
/// The Instana API represents severities as integers, while the
/// Terraform provider exposes them by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.terraform_representation())
    }
}

impl Severity {
    pub fn api_representation(&self) -> i32 {
        match self {
            Severity::Critical => 10,
            Severity::Warning => 5,
        }
    }

    pub fn terraform_representation(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
        }
    }

    pub fn all() -> &'static [Severity] {
        &[Severity::Critical, Severity::Warning]
    }

    /// Names of all severities, as accepted by the Terraform provider.
    pub fn terraform_representations() -> Vec<&'static str> {
        Self::all()
            .iter()
            .map(Severity::terraform_representation)
            .collect()
    }

    pub fn for_api_representation(value: i32) -> Result<Severity, Error> {
        Self::all()
            .iter()
            .find(|s| s.api_representation() == value)
            .copied()
            .ok_or_else(|| Error::Unsupported {
                what: "severity",
                value: value.to_string(),
                vocabulary: Vocabulary::InstanaApi,
            })
    }

    pub fn for_terraform_representation(value: &str) -> Result<Severity, Error> {
        Self::all()
            .iter()
            .find(|s| s.terraform_representation() == value)
            .copied()
            .ok_or_else(|| Error::Unsupported {
                what: "severity",
                value: value.to_string(),
                vocabulary: Vocabulary::Terraform,
            })
    }
}
