//! Conversion session state and template selection types

/// URL prefix of the embedded file-based dialect that needs no credentials.
pub const EMBEDDED_URL_PREFIX: &str = "jdbc:sqlite";

/// Sentinel written into the user id / password slots for the embedded dialect.
pub const AUTH_PLACEHOLDER: &str = "_";

/// True when the JDBC url denotes the embedded dialect, which takes neither
/// a user id nor a password.
pub fn is_embedded_url(jdbc_url: &str) -> bool {
    jdbc_url.starts_with(EMBEDDED_URL_PREFIX)
}

/// Code style of the generated Java data class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateType {
    Class,
    Lombok,
    Record,
}

impl TemplateType {
    /// Canonical menu order.
    pub const ALL: [TemplateType; 3] = [
        TemplateType::Class,
        TemplateType::Lombok,
        TemplateType::Record,
    ];

    /// Capitalized display label, also the persisted form.
    pub fn label(self) -> &'static str {
        match self {
            TemplateType::Class => "Class",
            TemplateType::Lombok => "Lombok",
            TemplateType::Record => "Record",
        }
    }

    /// Lower-first-letter form passed to the generator process.
    pub fn as_arg(self) -> &'static str {
        match self {
            TemplateType::Class => "class",
            TemplateType::Lombok => "lombok",
            TemplateType::Record => "record",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TemplateType::Class => "",
            TemplateType::Lombok => "Requires the Lombok plugin",
            TemplateType::Record => "Requires Java 14+",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.label() == label)
    }

    /// Menu order with the persisted default first and the remaining items
    /// kept in canonical order. An unrecognized or absent default leaves the
    /// canonical order untouched.
    pub fn menu(default: Option<&str>) -> Vec<TemplateType> {
        let mut items = Self::ALL.to_vec();
        if let Some(first) = default.and_then(Self::from_label) {
            items.retain(|t| *t != first);
            items.insert(0, first);
        }
        items
    }
}

/// Ephemeral accumulator for one conversion run. Filled in step by step by
/// the orchestrator and discarded when the run ends; never persisted as a
/// whole (individual fields may be copied into settings afterwards).
#[derive(Debug, Default)]
pub struct ConversionSession {
    pub sql_text: Option<String>,
    pub jdbc_url: Option<String>,
    pub user_id: Option<String>,
    pub password: Option<String>,
    pub template_type: Option<TemplateType>,
    pub package_name: Option<String>,
    pub class_name: Option<String>,
}

impl ConversionSession {
    /// Builds the generator request once every field has been collected.
    pub fn request(&self) -> Option<super::GenerationRequest> {
        Some(super::GenerationRequest {
            template_type: self.template_type?,
            package_name: self.package_name.clone()?,
            class_name: self.class_name.clone()?,
            jdbc_url: self.jdbc_url.clone()?,
            user_id: self.user_id.clone()?,
            password: self.password.clone()?,
            sql_text: self.sql_text.clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dialect_is_detected_by_prefix() {
        assert!(is_embedded_url("jdbc:sqlite:test.db"));
        assert!(!is_embedded_url("jdbc:mysql://localhost/db"));
        assert!(!is_embedded_url("sqlite:test.db"));
    }

    #[test]
    fn menu_moves_default_to_front_keeping_canonical_order() {
        assert_eq!(
            TemplateType::menu(Some("Lombok")),
            vec![TemplateType::Lombok, TemplateType::Class, TemplateType::Record]
        );
        assert_eq!(
            TemplateType::menu(Some("Record")),
            vec![TemplateType::Record, TemplateType::Class, TemplateType::Lombok]
        );
    }

    #[test]
    fn menu_keeps_canonical_order_without_a_recognized_default() {
        assert_eq!(TemplateType::menu(None), TemplateType::ALL.to_vec());
        assert_eq!(TemplateType::menu(Some("Struct")), TemplateType::ALL.to_vec());
        assert_eq!(TemplateType::menu(Some("Class")), TemplateType::ALL.to_vec());
    }

    #[test]
    fn arg_form_lowers_the_first_letter() {
        assert_eq!(TemplateType::Class.as_arg(), "class");
        assert_eq!(TemplateType::Lombok.as_arg(), "lombok");
        assert_eq!(TemplateType::Record.as_arg(), "record");
    }

    #[test]
    fn request_requires_every_field() {
        let mut session = ConversionSession::default();
        assert!(session.request().is_none());

        session.sql_text = Some("SELECT 1".into());
        session.jdbc_url = Some("jdbc:mysql://localhost/db".into());
        session.user_id = Some("root".into());
        session.password = Some("".into());
        session.template_type = Some(TemplateType::Class);
        session.package_name = Some("com.x".into());
        assert!(session.request().is_none(), "class name still missing");

        session.class_name = Some("Foo".into());
        let request = session.request().expect("complete session");
        assert_eq!(request.class_name, "Foo");
        assert_eq!(request.password, "");
    }
}
