use crate::{LookupError, Result};
use async_trait::async_trait;
use frontdesk_core::Visitor;
use serde::Deserialize;

#[async_trait]
pub trait VisitorDirectory: Send + Sync {
    fn source_name(&self) -> &'static str;
    async fn search(&self, query: &str) -> Result<Vec<Visitor>>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VisitorPayload {
    List(Vec<Visitor>),
    Envelope {
        #[serde(alias = "visitors")]
        data: Vec<Visitor>,
    },
}

/// Accepts a bare JSON array or an object wrapping it in `data`/`visitors`.
pub fn parse_visitor_payload(body: &str) -> Result<Vec<Visitor>> {
    let payload: VisitorPayload = serde_json::from_str(body)
        .map_err(|err| LookupError::Parse(format!("invalid visitor payload: {err}")))?;
    Ok(match payload {
        VisitorPayload::List(visitors) => visitors,
        VisitorPayload::Envelope { data } => data,
    })
}
