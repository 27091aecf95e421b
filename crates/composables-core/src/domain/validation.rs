use crate::domain::{entities::ProjectStructure, error::DomainError};

/// Centralized domain validation.
///
/// The prompt layer calls these directly to re-prompt on bad input, and
/// `ProjectIdentity::new` calls them to guard its invariants.
pub struct DomainValidator;

impl DomainValidator {
    /// A package namespace: at least two dot-separated identifiers, each
    /// starting with a letter and continuing with letters, digits or `_`.
    pub fn validate_namespace(namespace: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidIdentifier {
            field: "package name",
            value: namespace.to_string(),
            reason: reason.to_string(),
        };

        if namespace.is_empty() {
            return Err(invalid("must not be empty"));
        }

        let parts: Vec<&str> = namespace.split('.').collect();
        if parts.len() < 2 {
            return Err(invalid("needs at least two parts separated by '.'"));
        }

        for part in parts {
            let mut chars = part.chars();
            match chars.next() {
                None => return Err(invalid("contains an empty part")),
                Some(first) if !first.is_alphabetic() => {
                    return Err(invalid(&format!("part '{part}' must start with a letter")));
                }
                Some(_) => {}
            }
            if !chars.all(|c| c.is_alphanumeric() || c == '_') {
                return Err(invalid(&format!(
                    "part '{part}' may only contain letters, digits or '_'"
                )));
            }
        }
        Ok(())
    }

    /// A display name: non-empty with at least one letter or digit.
    pub fn validate_app_name(app_name: &str) -> Result<(), DomainError> {
        if app_name.chars().any(char::is_alphanumeric) {
            Ok(())
        } else {
            Err(DomainError::InvalidIdentifier {
                field: "app name",
                value: app_name.to_string(),
                reason: "must contain at least one letter or digit".into(),
            })
        }
    }

    /// A Gradle module name: letters, digits, `-` and `_`, with at least one
    /// letter or digit.
    pub fn validate_module_name(module_name: &str) -> Result<(), DomainError> {
        let valid = module_name.chars().any(char::is_alphanumeric)
            && module_name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidIdentifier {
                field: "module name",
                value: module_name.to_string(),
                reason: "may only contain letters, digits, hyphens or underscores".into(),
            })
        }
    }

    /// The module directory must not share the project directory's name.
    pub fn validate_module_directory(
        module_name: &str,
        directory_name: &str,
    ) -> Result<(), DomainError> {
        if module_name == directory_name {
            return Err(DomainError::ModuleMatchesDirectory {
                module: module_name.to_string(),
            });
        }
        Ok(())
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::DomainValidator as v;

    #[test]
    fn namespace_rules() {
        assert!(v::validate_namespace("com.example.app").is_ok());
        assert!(v::validate_namespace("io.my_org2").is_ok());
        assert!(v::validate_namespace("app").is_err());
        assert!(v::validate_namespace("com..app").is_err());
        assert!(v::validate_namespace("com.1example").is_err());
        assert!(v::validate_namespace("com.exa-mple").is_err());
        assert!(v::validate_namespace("").is_err());
    }

    #[test]
    fn app_name_needs_an_alphanumeric() {
        assert!(v::validate_app_name("My App").is_ok());
        assert!(v::validate_app_name("!!!").is_err());
        assert!(v::validate_app_name("").is_err());
    }

    #[test]
    fn module_name_rules() {
        assert!(v::validate_module_name("composeApp").is_ok());
        assert!(v::validate_module_name("shared-ui_2").is_ok());
        assert!(v::validate_module_name("--").is_err());
        assert!(v::validate_module_name("my app").is_err());
        assert!(v::validate_module_directory("composeApp", "composeApp").is_err());
        assert!(v::validate_module_directory("composeApp", "myapp").is_ok());
    }
}
