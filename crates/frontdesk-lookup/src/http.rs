use crate::source::VisitorDirectory;
use crate::{LookupError, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpDirectoryOptions {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

#[cfg(feature = "http")]
mod imp {
    use super::{HttpDirectoryOptions, LookupError, Result, VisitorDirectory};
    use crate::source::parse_visitor_payload;
    use async_trait::async_trait;
    use frontdesk_core::Visitor;
    use reqwest::header::ACCEPT;
    use reqwest::Client;
    use std::time::Duration;
    use url::{Host, Url};

    const VISITORS_PATH: &str = "visitors";

    #[derive(Debug, Clone)]
    pub struct HttpDirectory {
        client: Client,
        endpoint: Url,
        token: Option<String>,
    }

    impl HttpDirectory {
        pub fn new(options: HttpDirectoryOptions) -> Result<Self> {
            let endpoint = visitors_endpoint(&options.base_url)?;
            let client = Client::builder()
                .user_agent("frontdesk")
                .timeout(options.timeout)
                .connect_timeout(Duration::from_secs(5))
                .build()?;
            Ok(Self {
                client,
                endpoint,
                token: options.token,
            })
        }

        pub fn search_url(&self, query: &str) -> Url {
            let mut url = self.endpoint.clone();
            url.query_pairs_mut().append_pair("search", query);
            url
        }
    }

    #[async_trait]
    impl VisitorDirectory for HttpDirectory {
        fn source_name(&self) -> &'static str {
            "http"
        }

        async fn search(&self, query: &str) -> Result<Vec<Visitor>> {
            let mut request = self
                .client
                .get(self.search_url(query))
                .header(ACCEPT, "application/json");
            if let Some(token) = self.token.as_deref() {
                request = request.bearer_auth(token);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LookupError::Status(status.as_u16()));
            }
            let body = response.text().await?;
            parse_visitor_payload(&body)
        }
    }

    pub fn visitors_endpoint(base_url: &str) -> Result<Url> {
        let mut url = Url::parse(base_url.trim())?;
        match url.scheme() {
            "https" => {}
            "http" if is_loopback(&url) => {}
            _ => {
                return Err(LookupError::Parse(
                    "api base url must use https".to_string(),
                ))
            }
        }
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| LookupError::Parse("api base url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(VISITORS_PATH);
        Ok(url)
    }

    fn is_loopback(url: &Url) -> bool {
        match url.host() {
            Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
            Some(Host::Ipv4(addr)) => addr.is_loopback(),
            Some(Host::Ipv6(addr)) => addr.is_loopback(),
            None => false,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::{visitors_endpoint, HttpDirectory, HttpDirectoryOptions};
        use std::time::Duration;

        #[test]
        fn endpoint_appends_visitors_segment() {
            let url = visitors_endpoint("https://api.example.com/v1/").expect("url");
            assert_eq!(url.as_str(), "https://api.example.com/v1/visitors");
            let url = visitors_endpoint("https://api.example.com").expect("url");
            assert_eq!(url.as_str(), "https://api.example.com/visitors");
        }

        #[test]
        fn endpoint_requires_https_except_loopback() {
            assert!(visitors_endpoint("http://api.example.com").is_err());
            assert!(visitors_endpoint("http://localhost:8080/api").is_ok());
            assert!(visitors_endpoint("http://127.0.0.1:3000").is_ok());
            assert!(visitors_endpoint("not a url").is_err());
        }

        #[test]
        fn search_url_encodes_query() {
            let directory = HttpDirectory::new(HttpDirectoryOptions {
                base_url: "https://api.example.com/v1".to_string(),
                token: None,
                timeout: Duration::from_secs(5),
            })
            .expect("directory");
            let url = directory.search_url("a+b@example.com");
            assert_eq!(
                url.as_str(),
                "https://api.example.com/v1/visitors?search=a%2Bb%40example.com"
            );
        }
    }
}

#[cfg(not(feature = "http"))]
mod imp {
    use super::{HttpDirectoryOptions, LookupError, Result, VisitorDirectory};
    use async_trait::async_trait;
    use frontdesk_core::Visitor;

    #[derive(Debug, Clone)]
    pub struct HttpDirectory {
        options: HttpDirectoryOptions,
    }

    impl HttpDirectory {
        pub fn new(options: HttpDirectoryOptions) -> Result<Self> {
            let _ = &options.base_url;
            Err(LookupError::Unavailable(
                "the visitor API requires the http feature".to_string(),
            ))
        }
    }

    #[async_trait]
    impl VisitorDirectory for HttpDirectory {
        fn source_name(&self) -> &'static str {
            "http"
        }

        async fn search(&self, _query: &str) -> Result<Vec<Visitor>> {
            let _ = &self.options;
            Err(LookupError::Unavailable(
                "the visitor API requires the http feature".to_string(),
            ))
        }
    }
}

pub use imp::HttpDirectory;
#[cfg(feature = "http")]
pub use imp::visitors_endpoint;
