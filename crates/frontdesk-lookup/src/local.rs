use crate::source::{parse_visitor_payload, VisitorDirectory};
use crate::Result;
use async_trait::async_trait;
use frontdesk_core::{phone_digits, Visitor};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct LocalDirectory {
    visitors: Vec<Visitor>,
}

impl LocalDirectory {
    pub fn new(visitors: Vec<Visitor>) -> Self {
        Self { visitors }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let body = fs::read_to_string(path)?;
        Ok(Self::new(parse_visitor_payload(&body)?))
    }

    pub fn visitors(&self) -> &[Visitor] {
        &self.visitors
    }

    pub fn matching(&self, query: &str) -> Vec<Visitor> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let needle_digits = phone_digits(&needle);

        self.visitors
            .iter()
            .filter(|visitor| {
                visitor.name.to_lowercase().contains(&needle)
                    || visitor
                        .email
                        .as_deref()
                        .is_some_and(|email| email.to_lowercase().contains(&needle))
                    || (!needle_digits.is_empty()
                        && visitor
                            .phone
                            .as_deref()
                            .is_some_and(|phone| phone_digits(phone).contains(&needle_digits)))
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl VisitorDirectory for LocalDirectory {
    fn source_name(&self) -> &'static str {
        "local"
    }

    async fn search(&self, query: &str) -> Result<Vec<Visitor>> {
        Ok(self.matching(query))
    }
}
