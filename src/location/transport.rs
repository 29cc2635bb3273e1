//! HTTP transport seam between the resolver and the provider.

use super::types::LocationError;
use log::warn;
use std::io::Read;

/// Issues a single GET and hands back the response body.
///
/// The body is an owned reader; dropping it releases the connection.
pub trait Transport {
    type Body: Read;

    fn get(&self, url: &str, user_agent: Option<&str>) -> Result<Self::Body, LocationError>;
}

/// Blocking transport backed by a `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self { agent: ureq::AgentBuilder::new().build() }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    type Body = Box<dyn Read + Send + Sync + 'static>;

    fn get(&self, url: &str, user_agent: Option<&str>) -> Result<Self::Body, LocationError> {
        let mut request = self.agent.get(url);
        if let Some(ua) = user_agent {
            request = request.set("User-Agent", ua);
        }

        // A 4xx/5xx reply still carries a body worth decoding.
        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                warn!("{} answered with HTTP status {}", url, code);
                response
            }
            Err(ureq::Error::Transport(t)) => return Err(LocationError::Unreachable(t.to_string())),
        };

        Ok(response.into_reader())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{LocationResolver, ResolverConfig, UNKNOWN_IP};
    use std::io::Write;
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one canned HTTP response; returns the base URL and the raw request it saw.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            tx.send(String::from_utf8_lossy(&request).into_owned()).unwrap();
        });

        (format!("http://{}/json/", addr), rx)
    }

    #[test]
    fn test_ureq_get_reads_body() {
        let (base, rx) = serve_once("HTTP/1.1 200 OK", r#"{"city":"Oslo"}"#);
        let transport = UreqTransport::new();

        let mut body = transport.get(&format!("{}1.2.3.4", base), Some("iptoloc-test")).unwrap();
        let mut text = String::new();
        body.read_to_string(&mut text).unwrap();
        assert_eq!(text, r#"{"city":"Oslo"}"#);

        let request = rx.recv().unwrap();
        assert!(request.starts_with("GET /json/1.2.3.4 HTTP/1.1"));
        assert!(request.to_lowercase().contains("user-agent: iptoloc-test"));
    }

    #[test]
    fn test_ureq_default_user_agent_untouched() {
        let (base, rx) = serve_once("HTTP/1.1 200 OK", "{}");
        let mut body = UreqTransport::new().get(&format!("{}1.2.3.4", base), None).unwrap();
        let mut text = String::new();
        body.read_to_string(&mut text).unwrap();

        let request = rx.recv().unwrap().to_lowercase();
        assert!(!request.contains("iptoloc"));
        assert!(request.contains("user-agent: ureq/"));
    }

    #[test]
    fn test_ureq_error_status_returns_body() {
        let (base, _rx) = serve_once("HTTP/1.1 429 Too Many Requests", r#"{"status":"fail"}"#);
        let mut body = UreqTransport::new().get(&format!("{}1.2.3.4", base), None).unwrap();
        let mut text = String::new();
        body.read_to_string(&mut text).unwrap();
        assert_eq!(text, r#"{"status":"fail"}"#);
    }

    #[test]
    fn test_resolve_empty_503_is_malformed() {
        let (base, _rx) = serve_once("HTTP/1.1 503 Service Unavailable", "");
        let resolver = LocationResolver::with_config(ResolverConfig::default().with_endpoint(&base));
        let err = resolver.resolve("1.2.3.4").unwrap_err();
        assert!(matches!(err, LocationError::MalformedResponse(_)));
    }

    #[test]
    fn test_resolve_403_fail_body_is_unknown() {
        let (base, _rx) = serve_once(
            "HTTP/1.1 403 Forbidden",
            r#"{"status":"fail","message":"reserved range","query":"10.0.0.1"}"#,
        );
        let resolver = LocationResolver::with_config(ResolverConfig::default().with_endpoint(&base));
        assert_eq!(resolver.resolve("10.0.0.1").unwrap(), UNKNOWN_IP);
    }

    #[test]
    fn test_ureq_connection_refused_is_unreachable() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/json/1.2.3.4", port);
        let err = UreqTransport::new().get(&url, None).err().unwrap();
        assert!(matches!(err, LocationError::Unreachable(_)));
    }
}
