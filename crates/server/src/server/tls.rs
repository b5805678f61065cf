//! rustls server configuration for the HTTPS listener.
//!
//! The certificate chain, private key, and optional client CA bundle are read
//! from the paths given in [`crate::config::Config`]. Protocol versions are
//! TLS 1.2 and 1.3 and cipher suites are limited to AES-GCM with ECDHE key
//! exchange (TLS 1.2) or the TLS 1.3 AES-GCM suites.

use std::{io::BufReader, sync::Arc};

use anyhow::{Context, Result};
use rustls::{
    crypto::CryptoProvider,
    server::{danger::ClientCertVerifier, WebPkiClientVerifier},
    CipherSuite, RootCertStore, ServerConfig,
};

use crate::config::TlsPaths;

/// ALPN protocols, most preferred first.
pub const ALPN_PROTOCOLS: &[&[u8]] = &[b"h2", b"http/1.1"];

/// Cipher suites the listener is willing to negotiate.
pub const ALLOWED_CIPHER_SUITES: &[CipherSuite] = &[
    CipherSuite::TLS13_AES_128_GCM_SHA256,
    CipherSuite::TLS13_AES_256_GCM_SHA384,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
];

/// Read the PEM files named in `paths` and build the server configuration.
///
/// # Errors
///
/// Returns an error if any file cannot be read or [`build_server_config`] fails.
pub fn load_server_config(paths: &TlsPaths) -> Result<Arc<ServerConfig>> {
    let cert_pem = std::fs::read(&paths.cert)
        .with_context(|| format!("failed to read TLS certificate {}", paths.cert))?;
    let key_pem = std::fs::read(&paths.key)
        .with_context(|| format!("failed to read TLS private key {}", paths.key))?;
    let client_ca_pem = paths
        .client_ca
        .as_ref()
        .map(|p| std::fs::read(p).with_context(|| format!("failed to read client CA bundle {p}")))
        .transpose()?;

    build_server_config(&cert_pem, &key_pem, client_ca_pem.as_deref())
}

/// Build a [`rustls::ServerConfig`] from PEM-encoded certificate chain,
/// private key, and optional client CA bundle.
///
/// With a client CA bundle, clients are asked for a certificate which is
/// verified against it when presented; clients without one are still accepted.
///
/// # Errors
///
/// Returns an error if any PEM input cannot be parsed, or if rustls rejects
/// the configuration.
pub fn build_server_config(
    cert_pem: &[u8],
    key_pem: &[u8],
    client_ca_pem: Option<&[u8]>,
) -> Result<Arc<ServerConfig>> {
    let certs = rustls_pemfile::certs(&mut BufReader::new(cert_pem))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to parse TLS certificate chain")?;
    if certs.is_empty() {
        anyhow::bail!("no certificate found in PEM data");
    }

    let key = rustls_pemfile::private_key(&mut BufReader::new(key_pem))
        .context("failed to read TLS private key")?
        .context("no private key found in PEM data")?;

    let provider = Arc::new(restricted_provider());
    let builder = ServerConfig::builder_with_provider(provider.clone())
        .with_protocol_versions(&[&rustls::version::TLS13, &rustls::version::TLS12])
        .context("failed to select TLS protocol versions")?;

    let builder = match client_ca_pem {
        Some(pem) => builder.with_client_cert_verifier(client_verifier(pem, provider)?),
        None => builder.with_no_client_auth(),
    };

    let mut config = builder
        .with_single_cert(certs, key)
        .context("failed to build rustls ServerConfig")?;
    config.alpn_protocols = ALPN_PROTOCOLS.iter().map(|p| p.to_vec()).collect();

    Ok(Arc::new(config))
}

/// The ring provider limited to [`ALLOWED_CIPHER_SUITES`].
fn restricted_provider() -> CryptoProvider {
    let mut provider = rustls::crypto::ring::default_provider();
    provider
        .cipher_suites
        .retain(|s| ALLOWED_CIPHER_SUITES.contains(&s.suite()));
    provider
}

fn client_verifier(
    ca_pem: &[u8],
    provider: Arc<CryptoProvider>,
) -> Result<Arc<dyn ClientCertVerifier>> {
    let mut roots = RootCertStore::empty();
    for cert in rustls_pemfile::certs(&mut BufReader::new(ca_pem)) {
        let cert = cert.context("failed to parse client CA certificate")?;
        roots
            .add(cert)
            .context("client CA certificate rejected")?;
    }
    if roots.is_empty() {
        anyhow::bail!("no CA certificate found in client CA bundle");
    }

    WebPkiClientVerifier::builder_with_provider(Arc::new(roots), provider)
        .allow_unauthenticated()
        .build()
        .context("failed to build client certificate verifier")
}
