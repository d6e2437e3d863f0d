use crate::domain::{Visitor, VisitorForm, VisitorId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityField {
    Name,
    Phone,
    Email,
}

impl IdentityField {
    pub const fn as_str(self) -> &'static str {
        match self {
            IdentityField::Name => "name",
            IdentityField::Phone => "phone",
            IdentityField::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdentityFields {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Visitor> for IdentityFields {
    fn from(visitor: &Visitor) -> Self {
        Self {
            name: visitor.name.clone(),
            email: visitor.email.clone().unwrap_or_default(),
            phone: visitor.phone.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    pub fields: IdentityFields,
    pub filled: Vec<IdentityField>,
}

pub fn merge_fields<F>(current: &IdentityFields, patch: &IdentityFields, is_empty: F) -> Merged
where
    F: Fn(&str) -> bool,
{
    let mut fields = current.clone();
    let mut filled = Vec::new();

    let slots = [
        (IdentityField::Name, &mut fields.name, patch.name.as_str()),
        (IdentityField::Phone, &mut fields.phone, patch.phone.as_str()),
        (IdentityField::Email, &mut fields.email, patch.email.as_str()),
    ];
    for (field, slot, value) in slots {
        if is_empty(slot.as_str()) && !is_empty(value) {
            *slot = value.to_string();
            filled.push(field);
        }
    }

    Merged { fields, filled }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillOutcome {
    pub visitor_id: VisitorId,
    pub filled: Vec<IdentityField>,
}

impl FillOutcome {
    pub fn should_notify(&self) -> bool {
        !self.filled.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct AutoFill {
    active: Option<VisitorId>,
}

impl AutoFill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, form: &mut VisitorForm, visitor: &Visitor) -> Option<FillOutcome> {
        if self.active.as_ref() == Some(&visitor.id) {
            return None;
        }
        self.active = Some(visitor.id.clone());

        let merged = merge_fields(&form.identity(), &IdentityFields::from(visitor), is_blank);
        form.patch_identity(merged.fields);
        Some(FillOutcome {
            visitor_id: visitor.id.clone(),
            filled: merged.filled,
        })
    }

    pub fn reset(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{is_blank, merge_fields, AutoFill, IdentityField, IdentityFields};
    use crate::domain::{Visitor, VisitorForm, VisitorId};

    fn bob() -> Visitor {
        Visitor {
            id: VisitorId::new("v-1").unwrap(),
            name: "Bob".to_string(),
            email: Some("b@x.com".to_string()),
            phone: Some("123".to_string()),
            company: None,
        }
    }

    #[test]
    fn merge_never_overwrites_user_input() {
        let current = IdentityFields {
            name: "Alice".to_string(),
            phone: String::new(),
            email: String::new(),
        };
        let merged = merge_fields(&current, &IdentityFields::from(&bob()), is_blank);
        assert_eq!(
            merged.fields,
            IdentityFields {
                name: "Alice".to_string(),
                phone: "123".to_string(),
                email: "b@x.com".to_string(),
            }
        );
        assert_eq!(merged.filled, vec![IdentityField::Phone, IdentityField::Email]);
    }

    #[test]
    fn merge_skips_empty_patch_values() {
        let current = IdentityFields::default();
        let patch = IdentityFields {
            name: "Bob".to_string(),
            ..Default::default()
        };
        let merged = merge_fields(&current, &patch, is_blank);
        assert_eq!(merged.fields.name, "Bob");
        assert_eq!(merged.fields.email, "");
        assert_eq!(merged.filled, vec![IdentityField::Name]);
    }

    #[test]
    fn merge_honours_custom_emptiness() {
        let current = IdentityFields {
            name: "N/A".to_string(),
            ..Default::default()
        };
        let merged = merge_fields(&current, &IdentityFields::from(&bob()), |value| {
            value.is_empty() || value == "N/A"
        });
        assert_eq!(merged.fields.name, "Bob");
    }

    #[test]
    fn autofill_fills_once_per_match() {
        let mut autofill = AutoFill::new();
        let mut form = VisitorForm {
            name: "Alice".to_string(),
            purpose: "Delivery".to_string(),
            ..Default::default()
        };

        let outcome = autofill.apply(&mut form, &bob()).expect("first fill");
        assert!(outcome.should_notify());
        assert_eq!(form.name, "Alice");
        assert_eq!(form.phone, "123");
        assert_eq!(form.email, "b@x.com");
        assert_eq!(form.purpose, "Delivery");

        form.phone.clear();
        assert!(autofill.apply(&mut form, &bob()).is_none());
        assert_eq!(form.phone, "");

        autofill.reset();
        let outcome = autofill.apply(&mut form, &bob()).expect("refill");
        assert_eq!(outcome.filled, vec![IdentityField::Phone]);
        assert_eq!(form.phone, "123");
    }

    #[test]
    fn autofill_without_empty_fields_does_not_notify() {
        let mut autofill = AutoFill::new();
        let mut form = VisitorForm {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            phone: "999".to_string(),
            ..Default::default()
        };
        let outcome = autofill.apply(&mut form, &bob()).expect("transition");
        assert!(!outcome.should_notify());
        assert_eq!(form.email, "alice@x.com");
    }
}
