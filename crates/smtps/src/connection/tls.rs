//! Implicit-TLS connection setup.

use super::SmtpStream;
use crate::config::ServerConfig;
use crate::error::{Error, Result};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, SignatureScheme};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_rustls::{
    TlsConnector,
    client::TlsStream,
    rustls::{ClientConfig, RootCertStore},
};

/// Stream type produced by [`connect_tls`].
pub type TlsSmtpStream = SmtpStream<TlsStream<TcpStream>>;

/// Connects to an SMTP server over TLS (implicit TLS, usually port 465).
///
/// The TLS server name is the configured host. Connect and handshake
/// together must finish within `connect_timeout`; the returned stream
/// applies `io_timeout` to every read and write.
///
/// # Errors
///
/// Returns an error if the host is not a valid server name, or if the
/// connection or TLS handshake fails or times out.
pub async fn connect_tls(config: &ServerConfig) -> Result<TlsSmtpStream> {
    let server_name = ServerName::try_from(config.host.clone())
        .map_err(|_| Error::InvalidHostname(config.host.clone()))?;

    let connector = create_tls_connector(config.accept_invalid_certs);
    let addr = config.addr();

    tracing::debug!(%addr, "Connecting with implicit TLS");
    let tls_stream = tokio::time::timeout(config.connect_timeout, async {
        let tcp_stream = TcpStream::connect(&addr).await?;
        connector.connect(server_name, tcp_stream).await
    })
    .await??;

    Ok(SmtpStream::new(tls_stream).with_io_timeout(config.io_timeout))
}

/// Creates a TLS connector trusting the webpki root certificates.
fn create_tls_connector(accept_invalid_certs: bool) -> TlsConnector {
    let root_store = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };

    let mut config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    if accept_invalid_certs {
        tracing::warn!("TLS certificate verification is disabled");
        config
            .dangerous()
            .set_certificate_verifier(Arc::new(NoVerifier));
    }

    TlsConnector::from(Arc::new(config))
}

/// Certificate verifier that accepts every certificate.
#[derive(Debug)]
struct NoVerifier;

impl ServerCertVerifier for NoVerifier {
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
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::ED25519,
        ]
    }
}
