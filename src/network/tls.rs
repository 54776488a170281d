//! TLS setup
//!
//! Two trust modes:
//! - standard: the server chain must verify against the Mozilla root store
//!   and match the host name
//! - insecure: every certificate is accepted (self-signed router certs);
//!   handshake signatures are still checked, identity is not

use std::net::TcpStream;
use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, ClientConnection, DigitallySignedStruct, RootCertStore, SignatureScheme, StreamOwned};

use crate::error::{Result, RosError};

/// TLS stream over a TCP socket
pub type TlsStream = StreamOwned<ClientConnection, TcpStream>;

/// Build the client TLS config for the chosen trust mode
pub fn client_config(allow_insecure: bool) -> Result<Arc<ClientConfig>> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let builder = ClientConfig::builder_with_provider(provider.clone())
        .with_safe_default_protocol_versions()
        .map_err(|e| RosError::Tls(format!("protocol versions: {e}")))?;

    let config = if allow_insecure {
        tracing::warn!("TLS certificate validation disabled");
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(TrustAllVerifier { provider }))
            .with_no_client_auth()
    } else {
        let root_store = RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
        };
        builder
            .with_root_certificates(root_store)
            .with_no_client_auth()
    };

    Ok(Arc::new(config))
}

/// Run the TLS handshake over an established socket
///
/// The handshake is driven to completion here so certificate problems
/// surface at connect time instead of on the first command.
pub fn handshake(mut socket: TcpStream, host: &str, allow_insecure: bool) -> Result<TlsStream> {
    let config = client_config(allow_insecure)?;
    let server_name = ServerName::try_from(host.to_string())
        .map_err(|e| RosError::Tls(format!("invalid server name {host}: {e}")))?;

    let mut conn = ClientConnection::new(config, server_name)
        .map_err(|e| RosError::Tls(format!("client setup: {e}")))?;

    while conn.is_handshaking() {
        conn.complete_io(&mut socket).map_err(|e| match RosError::from(e) {
            RosError::Timeout => RosError::Timeout,
            other => RosError::Tls(format!("handshake with {host} failed: {other}")),
        })?;
    }

    Ok(StreamOwned::new(conn, socket))
}

/// Accepts any server certificate
#[derive(Debug)]
struct TrustAllVerifier {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for TrustAllVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.provider.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.provider.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider.signature_verification_algorithms.supported_schemes()
    }
}
