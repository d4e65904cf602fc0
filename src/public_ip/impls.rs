// Standard library
use std::net::IpAddr;
use std::time::Duration;

// 3rd party crates
use tracing::{debug, info, warn};

// Current module imports
use super::constants::{PUBLIC_IP_SERVICES, PUBLIC_IP_TIMEOUT_SECS};
use super::errors::{AttemptError, PublicIpError};
use super::functions::is_public;
use super::types::PublicIpResolver;

impl PublicIpResolver {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            services: PUBLIC_IP_SERVICES.iter().map(|s| s.to_string()).collect(),
            timeout: Duration::from_secs(PUBLIC_IP_TIMEOUT_SECS),
        }
    }

    /// Replaces the service list, keeping its order.
    pub fn with_services<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services = services.into_iter().map(Into::into).collect();
        self
    }

    /// Asks each service in turn; stops at the first public address.
    pub async fn resolve(&self) -> Result<IpAddr, PublicIpError> {
        for service in &self.services {
            match self.query_service(service).await {
                Ok(ip) => {
                    info!(service = %service, ip = %ip, "Discovered public IP");
                    return Ok(ip);
                }
                Err(e) => {
                    warn!(service = %service, error = %e, "Public IP service failed");
                }
            }
        }
        Err(PublicIpError::Undiscoverable)
    }

    async fn query_service(&self, service: &str) -> Result<IpAddr, AttemptError> {
        debug!(service = %service, "Querying public IP service");
        let response = self
            .client
            .get(service)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let ip: IpAddr = body
            .trim()
            .parse()
            .map_err(|_| AttemptError::InvalidResponse(body.trim().to_string()))?;

        if !is_public(&ip) {
            return Err(AttemptError::NotPublic(ip));
        }
        Ok(ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_text(server: &MockServer, route: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn falls_through_until_a_public_address() {
        let server = MockServer::start().await;
        mount_text(&server, "/down", 503, "unavailable").await;
        mount_text(&server, "/garbage", 200, "<html>hello</html>").await;
        mount_text(&server, "/private", 200, "192.168.0.4\n").await;
        mount_text(&server, "/good", 200, "8.8.4.4\n").await;
        mount_text(&server, "/never", 200, "1.1.1.1").await;

        let resolver = PublicIpResolver::new(reqwest::Client::new()).with_services(
            ["/down", "/garbage", "/private", "/good", "/never"]
                .iter()
                .map(|route| format!("{}{}", server.uri(), route)),
        );

        assert_eq!(resolver.resolve().await.unwrap(), "8.8.4.4".parse::<IpAddr>().unwrap());

        let requests = server.received_requests().await.unwrap();
        let paths: Vec<_> = requests.iter().map(|r| r.url.path().to_string()).collect();
        assert_eq!(paths, vec!["/down", "/garbage", "/private", "/good"]);
    }

    #[tokio::test]
    async fn all_failing_is_undiscoverable() {
        let server = MockServer::start().await;
        mount_text(&server, "/a", 500, "").await;
        mount_text(&server, "/b", 200, "127.0.0.1").await;

        let resolver = PublicIpResolver::new(reqwest::Client::new())
            .with_services([format!("{}/a", server.uri()), format!("{}/b", server.uri())]);

        assert!(matches!(
            resolver.resolve().await,
            Err(PublicIpError::Undiscoverable)
        ));
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("8.8.8.8")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;
        mount_text(&server, "/fast", 200, "9.9.9.9").await;

        let mut resolver = PublicIpResolver::new(reqwest::Client::new())
            .with_services([format!("{}/slow", server.uri()), format!("{}/fast", server.uri())]);
        resolver.timeout = Duration::from_millis(50);

        assert_eq!(resolver.resolve().await.unwrap(), "9.9.9.9".parse::<IpAddr>().unwrap());
    }
}
