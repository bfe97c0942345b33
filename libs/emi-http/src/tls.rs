//! Root certificates and the HTTPS connector.

use std::sync::{Arc, OnceLock};

use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use rustls::crypto::CryptoProvider;
use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::CertificateDer;

use crate::config::{TlsRootConfig, TransportSecurity};
use crate::error::HttpError;

// The OS store is read at most once per process
static NATIVE_ROOTS: OnceLock<Vec<CertificateDer<'static>>> = OnceLock::new();

fn native_roots() -> &'static [CertificateDer<'static>] {
    NATIVE_ROOTS.get_or_init(|| {
        let loaded = rustls_native_certs::load_native_certs();
        if !loaded.errors.is_empty() {
            tracing::warn!(
                failures = loaded.errors.len(),
                "some native root certificates could not be loaded"
            );
        }
        tracing::debug!(count = loaded.certs.len(), "native root certificates loaded");
        loaded.certs
    })
}

/// The process-wide provider when one is installed, aws-lc-rs otherwise.
fn provider() -> Arc<CryptoProvider> {
    CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}

fn native_tls_config() -> Result<ClientConfig, HttpError> {
    let mut store = RootCertStore::empty();
    let (added, ignored) = store.add_parsable_certificates(native_roots().iter().cloned());
    if added == 0 {
        return Err(HttpError::Tls(
            format!("no usable native root certificates ({ignored} rejected)").into(),
        ));
    }

    Ok(ClientConfig::builder_with_provider(provider())
        .with_safe_default_protocol_versions()
        .map_err(|e| HttpError::Tls(Box::new(e)))?
        .with_root_certificates(store)
        .with_no_client_auth())
}

pub(crate) fn https_connector(
    roots: TlsRootConfig,
    transport: TransportSecurity,
) -> Result<HttpsConnector<HttpConnector>, HttpError> {
    let builder = match roots {
        TlsRootConfig::WebPki => HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(provider())
            .map_err(|e| HttpError::Tls(Box::new(e)))?,
        TlsRootConfig::Native => HttpsConnectorBuilder::new().with_tls_config(native_tls_config()?),
    };

    let builder = match transport {
        TransportSecurity::TlsOnly => builder.https_only(),
        TransportSecurity::AllowInsecureHttp => builder.https_or_http(),
    };
    Ok(builder.enable_all_versions().build())
}
