//! Certificate chain transcoding
//!
//! Turns the DER certificates of a trusted root chain into the concatenated
//! PEM text the descriptor expects, skipping any certificate that cannot be
//! decoded.

use crate::encoding::Base64;
use crate::trusted_root::{CertChainRecord, CertificateRecord};
use crate::{Error, Result};
use pem::{EncodeConfig, LineEnding, Pem};
use x509_cert::der::Decode;
use x509_cert::Certificate;

const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// Encode a DER certificate as a PEM `CERTIFICATE` block
///
/// The bytes must parse as an X.509 certificate with no trailing data.
/// The block uses LF line endings and ends with a newline.
pub fn certificate_to_pem(der: &[u8]) -> Result<String> {
    Certificate::from_der(der).map_err(|e| Error::Certificate(e.to_string()))?;

    let block = Pem::new(CERTIFICATE_TAG, der.to_vec());
    Ok(pem::encode_config(
        &block,
        EncodeConfig::new().set_line_ending(LineEnding::LF),
    ))
}

/// PEM text of a transcoded chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PemChain {
    pem: String,
    included: usize,
    skipped: usize,
}

impl PemChain {
    /// Concatenated PEM blocks, in chain order
    pub fn as_pem(&self) -> &str {
        &self.pem
    }

    /// Base64 of the concatenated PEM text, as written to `certChain`
    pub fn cert_chain(&self) -> Base64 {
        Base64::encode(self.pem.as_bytes())
    }

    /// Number of certificates that made it into the chain
    pub fn included(&self) -> usize {
        self.included
    }

    /// Number of certificates that were skipped
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn push(&mut self, block: &str) {
        self.pem.push_str(block);
        self.included += 1;
    }
}

fn transcode_certificate(value: &serde_json::Value) -> Result<String> {
    let record = CertificateRecord::from_value(value)?;
    let der = record.raw_bytes.decode()?;
    certificate_to_pem(&der)
}

/// Transcode every certificate of a chain
///
/// `label` identifies the authority in log output, e.g.
/// `certificateAuthorities[0]`. Certificates that fail to decode are logged
/// and left out; the rest keep their original order.
pub fn transcode_chain(label: &str, chain: &CertChainRecord) -> PemChain {
    let mut out = PemChain::default();

    for (j, value) in chain.certificates.iter().enumerate() {
        match transcode_certificate(value) {
            Ok(block) => {
                tracing::debug!("Converted {}[{}] to PEM", label, j);
                out.push(&block);
            }
            Err(e) => {
                tracing::warn!("Skipping certificate {}[{}]: {}", label, j, e);
                out.skipped += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const INTERMEDIATE_B64: &str = "MIIB1zCCAX2gAwIBAgIUMfnrRfrYFJ10wDHiJWo0JHyMJ48wCgYIKoZIzj0EAwIwODEVMBMGA1UECgwMR2l0SHViLCBJbmMuMR8wHQYDVQQDDBZJbnRlcm5hbCBTZXJ2aWNlcyBSb290MCAXDTI2MTAxNDE0MTEwNFoYDzIxMjYwOTIwMTQxMTA0WjA4MRUwEwYDVQQKDAxHaXRIdWIsIEluYy4xHzAdBgNVBAMMFkZ1bGNpbyBJbnRlcm1lZGlhdGUgbDIwWTATBgcqhkjOPQIBBggqhkjOPQMBBwNCAASz03ya+0HRUuRsPqDXIu1lmhJdB/q1vzHTIRXXCrO3baxHpHKlJbBoqyBSKUPiEZRcdUADi0yVVwhqDuTrJKGvo2MwYTAPBgNVHRMBAf8EBTADAQH/MA4GA1UdDwEB/wQEAwIBBjAdBgNVHQ4EFgQU61Chmxs8Z8czy1Sr1A5VQVsBJjkwHwYDVR0jBBgwFoAUmWfJ91Z4YliGkW7oTSKNl2FFjXYwCgYIKoZIzj0EAwIDSAAwRQIhAONwUD5kZq9ZYjLMOeyuk1lAq+tSYzXQFhGLHHjLKpG+AiBEYhYggYwSS++IbkhazLCf6htN5tMhdPqkwnmaLoLBmg==";

    const ROOT_B64: &str = "MIIByDCCAW2gAwIBAgIUXgABZJiBn3cBabNIhPQ4YW46fDAwCgYIKoZIzj0EAwIwODEVMBMGA1UECgwMR2l0SHViLCBJbmMuMR8wHQYDVQQDDBZJbnRlcm5hbCBTZXJ2aWNlcyBSb290MCAXDTI2MTAxNDE0MTEwNFoYDzIxMjYwOTIwMTQxMTA0WjA4MRUwEwYDVQQKDAxHaXRIdWIsIEluYy4xHzAdBgNVBAMMFkludGVybmFsIFNlcnZpY2VzIFJvb3QwWTATBgcqhkjOPQIBBggqhkjOPQMBBwNCAAQf+i/7VInt5DSpNDXSr+I1Asl2sbIlINxEtCuZcu53m1qGVpgrqNElXcjIWr6BLiFSjfpF3PECuCS+2Fu0v3EQo1MwUTAdBgNVHQ4EFgQUmWfJ91Z4YliGkW7oTSKNl2FFjXYwHwYDVR0jBBgwFoAUmWfJ91Z4YliGkW7oTSKNl2FFjXYwDwYDVR0TAQH/BAUwAwEB/zAKBggqhkjOPQQDAgNJADBGAiEAsXOuwU/wD8W093Zr9oSJatVu3fqBAL5B5gqoBkMHOyICIQCQtyAUsjyjwLMwEOdnkK9kisT/Z6wxOUAPgTjD0P1RWg==";

    /// Intermediate followed by root, as written by `openssl x509`
    const EXPECTED_CHAIN_PEM: &str = include_str!("../tests/fixtures/chain.pem");

    fn chain(certificates: Vec<serde_json::Value>) -> CertChainRecord {
        CertChainRecord { certificates }
    }

    #[test]
    fn test_certificate_to_pem_framing() {
        let der = Base64::new(ROOT_B64.to_string()).decode().unwrap();
        let block = certificate_to_pem(&der).unwrap();
        assert!(block.starts_with("-----BEGIN CERTIFICATE-----\n"));
        assert!(block.ends_with("-----END CERTIFICATE-----\n"));
        assert!(!block.contains('\r'));
        assert!(block.lines().all(|line| line.len() <= 64));

        let parsed = pem::parse(&block).unwrap();
        assert_eq!(parsed.tag(), "CERTIFICATE");
        assert_eq!(parsed.contents(), der.as_slice());
    }

    #[test]
    fn test_certificate_to_pem_rejects_non_certificate() {
        let result = certificate_to_pem(b"definitely not DER");
        assert!(matches!(result, Err(Error::Certificate(_))));
    }

    #[test]
    fn test_certificate_to_pem_rejects_trailing_data() {
        let mut der = Base64::new(ROOT_B64.to_string()).decode().unwrap();
        der.push(0);
        assert!(certificate_to_pem(&der).is_err());
    }

    #[test]
    fn test_transcode_chain_preserves_order() {
        let record = chain(vec![
            json!({ "rawBytes": INTERMEDIATE_B64 }),
            json!({ "rawBytes": ROOT_B64 }),
        ]);
        let out = transcode_chain("certificateAuthorities[0]", &record);

        assert_eq!(out.included(), 2);
        assert_eq!(out.skipped(), 0);
        assert_eq!(out.as_pem(), EXPECTED_CHAIN_PEM);
        assert_eq!(
            out.cert_chain().decode().unwrap(),
            EXPECTED_CHAIN_PEM.as_bytes()
        );
    }

    #[test]
    fn test_transcode_chain_skips_bad_certificates() {
        let record = chain(vec![
            json!("not a mapping"),
            json!({ "rawBytes": INTERMEDIATE_B64 }),
            json!({ "other": "field" }),
            json!({ "rawBytes": "%%%" }),
            json!({ "rawBytes": "YWJjZA==" }),
            json!({ "rawBytes": ROOT_B64 }),
        ]);
        let out = transcode_chain("timestampAuthorities[3]", &record);

        assert_eq!(out.included(), 2);
        assert_eq!(out.skipped(), 4);
        assert_eq!(out.as_pem(), EXPECTED_CHAIN_PEM);
    }

    #[test]
    fn test_empty_chain() {
        let out = transcode_chain("timestampAuthorities[0]", &chain(Vec::new()));
        assert_eq!(out.included(), 0);
        assert_eq!(out.as_pem(), "");
        assert_eq!(out.cert_chain(), "");
    }
}
