//! Remote table retrieval.

#[cfg(feature = "http")]
use std::time::Duration;

#[cfg(feature = "http")]
use tracing::debug;

use crate::error::Result;
#[cfg(feature = "http")]
use crate::error::Error;

/// Something that can produce the current remote table as text
pub trait SheetSource: Send + Sync {
    fn fetch(&self) -> Result<String>;
}

impl<F> SheetSource for F
where
    F: Fn() -> Result<String> + Send + Sync,
{
    fn fetch(&self) -> Result<String> {
        self()
    }
}

/// Fetches the table over HTTP with a single GET
#[cfg(feature = "http")]
pub struct HttpSource {
    agent: ureq::Agent,
    url: String,
    user_agent: String,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let agent: ureq::Agent = config.into();
        let user_agent = format!(
            "positionals/{} ({})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS
        );

        Self {
            agent,
            url: url.into(),
            user_agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "http")]
impl SheetSource for HttpSource {
    fn fetch(&self) -> Result<String> {
        debug!("Fetching positional table from {}", self.url);
        let mut response = self
            .agent
            .get(&self.url)
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(classify)?;

        let text = response.body_mut().read_to_string().map_err(classify)?;
        debug!("Fetched {} bytes", text.len());
        Ok(text)
    }
}

/// Sort a transport failure into the error taxonomy
#[cfg(feature = "http")]
fn classify(err: ureq::Error) -> Error {
    use std::io::ErrorKind;

    match &err {
        ureq::Error::StatusCode(code) => Error::HttpStatus(*code),
        ureq::Error::Timeout(_) => Error::TransportTimeout(err.to_string()),
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
            Error::TransportUnreachable(err.to_string())
        }
        ureq::Error::Io(e) => match e.kind() {
            ErrorKind::TimedOut | ErrorKind::WouldBlock => Error::TransportTimeout(e.to_string()),
            ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotConnected
            | ErrorKind::AddrNotAvailable => Error::TransportUnreachable(e.to_string()),
            _ => Error::TransportOther(e.to_string()),
        },
        _ => Error::TransportOther(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_source() {
        let source = || -> Result<String> { Ok("Id\n1\n".to_string()) };
        assert_eq!(source.fetch().unwrap(), "Id\n1\n");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_classify_status_and_dns() {
        assert!(matches!(
            classify(ureq::Error::StatusCode(404)),
            Error::HttpStatus(404)
        ));
        assert!(matches!(
            classify(ureq::Error::HostNotFound),
            Error::TransportUnreachable(_)
        ));
        assert!(matches!(
            classify(ureq::Error::ConnectionFailed),
            Error::TransportUnreachable(_)
        ));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_classify_io() {
        let timeout = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        assert!(matches!(
            classify(ureq::Error::Io(timeout)),
            Error::TransportTimeout(_)
        ));

        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            classify(ureq::Error::Io(refused)),
            Error::TransportUnreachable(_)
        ));

        let other = std::io::Error::other("weird");
        assert!(matches!(
            classify(ureq::Error::Io(other)),
            Error::TransportOther(_)
        ));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_unreachable_host_is_reported_not_panicked() {
        // Port 9 on localhost is almost never listening
        let source = HttpSource::new("http://127.0.0.1:9/sheet.csv", Duration::from_secs(2));
        let err = source.fetch().unwrap_err();
        assert!(err.is_transport());
    }
}
