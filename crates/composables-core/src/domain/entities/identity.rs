//! The identity of the project being generated.

use crate::domain::{error::DomainError, validation::DomainValidator};

/// Package namespace, display name and module name of a project.
///
/// Created once per invocation and immutable afterwards. Every constructor
/// validates, so holding a `ProjectIdentity` proves its invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    namespace: String,
    app_name: String,
    module_name: String,
}

impl ProjectIdentity {
    pub const DEFAULT_NAMESPACE: &'static str = "com.example.app";
    pub const DEFAULT_APP_NAME: &'static str = "My App";
    pub const DEFAULT_MODULE_NAME: &'static str = "composeApp";

    pub fn new(
        namespace: impl Into<String>,
        app_name: impl Into<String>,
        module_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let namespace = namespace.into();
        let app_name = app_name.into();
        let module_name = module_name.into();

        DomainValidator::validate_namespace(&namespace)?;
        DomainValidator::validate_app_name(&app_name)?;
        DomainValidator::validate_module_name(&module_name)?;

        Ok(Self {
            namespace,
            app_name,
            module_name,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// `com.example.app` → `com/example/app`.
    pub fn namespace_path(&self) -> String {
        self.namespace.replace('.', "/")
    }

    /// Framework base name for the iOS binaries, e.g. `compose-app` → `ComposeApp`.
    pub fn ios_binary_name(&self) -> String {
        to_camel_case(&self.module_name)
    }

    /// Directory of the Xcode project, e.g. `iosComposeApp`.
    pub fn ios_app_dir(&self) -> String {
        format!("ios{}", self.ios_binary_name())
    }

    /// Name of the built iOS application bundle.
    pub fn target_name(&self) -> String {
        format!("{}.app", self.ios_binary_name())
    }
}

impl Default for ProjectIdentity {
    fn default() -> Self {
        Self {
            namespace: Self::DEFAULT_NAMESPACE.into(),
            app_name: Self::DEFAULT_APP_NAME.into(),
            module_name: Self::DEFAULT_MODULE_NAME.into(),
        }
    }
}

/// Split on `-` and `_`, upper-case the first character of every part and
/// join them.
pub fn to_camel_case(input: &str) -> String {
    input
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_ios_names_from_module() {
        let id = ProjectIdentity::new("com.acme.notes", "Notes", "notes-app").unwrap();
        assert_eq!(id.ios_binary_name(), "NotesApp");
        assert_eq!(id.ios_app_dir(), "iosNotesApp");
        assert_eq!(id.target_name(), "NotesApp.app");
        assert_eq!(id.namespace_path(), "com/acme/notes");
    }

    #[test]
    fn camel_case_keeps_inner_capitals() {
        assert_eq!(to_camel_case("composeApp"), "ComposeApp");
        assert_eq!(to_camel_case("shared_ui-kit"), "SharedUiKit");
    }

    #[test]
    fn rejects_invalid_parts() {
        assert!(ProjectIdentity::new("app", "My App", "composeApp").is_err());
        assert!(ProjectIdentity::new("com.example", "", "composeApp").is_err());
        assert!(ProjectIdentity::new("com.example", "X", "a b").is_err());
    }

    #[test]
    fn default_matches_constants() {
        let id = ProjectIdentity::default();
        assert_eq!(id.namespace(), ProjectIdentity::DEFAULT_NAMESPACE);
        assert_eq!(id.module_name(), "composeApp");
    }
}
