use crate::source::{Legislators, Official, RepresentativeSource};
use crate::{CivicError, Result};
use eventmgr_config::{ApiKey, CivicSettings};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use url::{Host, Url};

const LEVELS: &str = "country";
const ROLES: [&str; 2] = ["legislatorUpperBody", "legislatorLowerBody"];
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    /// The service could not use the address; fall back to the static text.
    Unresolvable,
    Unauthorized,
    RateLimited,
    Failure,
}

/// Sorts a response status into the outcome the lookup reports.
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        401 => StatusClass::Unauthorized,
        429 => StatusClass::RateLimited,
        400..=499 => StatusClass::Unresolvable,
        _ => StatusClass::Failure,
    }
}

#[derive(Debug)]
pub struct CivicClient {
    http: Client,
    endpoint: Url,
    api_key: ApiKey,
}

impl CivicClient {
    pub fn new(api_key: ApiKey, settings: &CivicSettings) -> Result<Self> {
        let endpoint = representatives_endpoint(&settings.base_url)?;
        let http = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self, zipcode: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("address", zipcode);
            query.append_pair("levels", LEVELS);
            for role in ROLES {
                query.append_pair("roles", role);
            }
            query.append_pair("key", self.api_key.expose());
        }
        url
    }
}

impl RepresentativeSource for CivicClient {
    fn source_name(&self) -> &'static str {
        "civicinfo"
    }

    fn legislators_by_zipcode(&self, zipcode: &str) -> Result<Legislators> {
        let response = self.http.get(self.request_url(zipcode)).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        legislators_from_response(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct RepresentativeInfoResponse {
    #[serde(default)]
    officials: Vec<Official>,
}

fn legislators_from_response(status: u16, body: &str) -> Result<Legislators> {
    match classify_status(status) {
        StatusClass::Success => {
            let parsed: RepresentativeInfoResponse =
                serde_json::from_str(body).map_err(|err| CivicError::Parse(err.to_string()))?;
            Ok(Legislators::Officials(parsed.officials))
        }
        StatusClass::Unresolvable => Ok(Legislators::unresolved()),
        StatusClass::Unauthorized => Err(CivicError::Unauthorized(status)),
        StatusClass::RateLimited => Err(CivicError::RateLimited),
        StatusClass::Failure => Err(CivicError::Status {
            status,
            body: body.chars().take(200).collect(),
        }),
    }
}

fn representatives_endpoint(base_url: &Url) -> Result<Url> {
    let loopback = match base_url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(addr)) => addr.is_loopback(),
        Some(Host::Ipv6(addr)) => addr.is_loopback(),
        None => return Err(CivicError::Url(format!("{base_url} has no host"))),
    };
    match base_url.scheme() {
        "https" => {}
        "http" if loopback => {}
        _ => {
            return Err(CivicError::Url(
                "civic api url must use https".to_string(),
            ))
        }
    }

    let mut endpoint = base_url.clone();
    endpoint.set_query(None);
    let path = format!("{}/representatives", endpoint.path().trim_end_matches('/'));
    endpoint.set_path(&path);
    Ok(endpoint)
}
