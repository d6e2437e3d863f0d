use crate::autofill::IdentityFields;
use crate::domain::email::normalize_email;
use crate::error::CoreError;
use crate::rules::searchable::is_searchable_phone;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub purpose: String,
    pub host: String,
}

impl VisitorForm {
    pub fn identity(&self) -> IdentityFields {
        IdentityFields {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    pub fn patch_identity(&mut self, fields: IdentityFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.phone = fields.phone;
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyName);
        }

        if !self.email.trim().is_empty() {
            let email = normalize_email(&self.email);
            match email.split_once('@') {
                Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
                _ => return Err(CoreError::InvalidEmail(self.email.clone())),
            }
        }

        if !self.phone.trim().is_empty() && !is_searchable_phone(&self.phone) {
            return Err(CoreError::InvalidPhone(self.phone.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::VisitorForm;
    use crate::autofill::IdentityFields;
    use crate::error::CoreError;

    fn form() -> VisitorForm {
        VisitorForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 7946 0958".to_string(),
            company: "Analytical Engines".to_string(),
            purpose: "Interview".to_string(),
            host: "Charles".to_string(),
        }
    }

    #[test]
    fn validate_accepts_complete_form() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn validate_allows_missing_contact_details() {
        let mut form = form();
        form.email.clear();
        form.phone.clear();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut form = form();
        form.name = "  ".to_string();
        assert_eq!(form.validate(), Err(CoreError::EmptyName));

        let mut form = self::form();
        form.email = "ada.example.com".to_string();
        assert!(matches!(form.validate(), Err(CoreError::InvalidEmail(_))));

        let mut form = self::form();
        form.phone = "555-1212".to_string();
        assert!(matches!(form.validate(), Err(CoreError::InvalidPhone(_))));
    }

    #[test]
    fn patch_identity_preserves_other_fields() {
        let mut form = form();
        form.patch_identity(IdentityFields {
            name: "Ada Byron".to_string(),
            email: String::new(),
            phone: "123".to_string(),
        });
        assert_eq!(form.name, "Ada Byron");
        assert_eq!(form.email, "");
        assert_eq!(form.phone, "123");
        assert_eq!(form.company, "Analytical Engines");
        assert_eq!(form.purpose, "Interview");
        assert_eq!(form.host, "Charles");
    }
}
