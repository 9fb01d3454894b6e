//! Vendor classification by marker substrings.

use tracing::trace;

use super::Result;
use crate::error::ParseError;
use crate::models::Vendor;

/// Marker groups in priority order. Markers are lowercase.
pub const DEFAULT_MARKERS: &[(Vendor, &[&str])] = &[
    (
        Vendor::GitHub,
        &["we received payment for your sponsorship", "github, inc."],
    ),
    (Vendor::OpenAI, &["openai"]),
    (
        Vendor::Anthropic,
        &["anthropic, pbc", "anthropic bill to", "support@anthropic.com"],
    ),
    (Vendor::Weaviate, &["weaviate"]),
    (Vendor::Cloudflare, &["cloudflare"]),
    (Vendor::Hetzner, &["hetzner online gmbh"]),
    (
        Vendor::Google,
        &["google cloud", "google one", "contact google llc"],
    ),
    (Vendor::Hostgator, &["hostgator.com, llc"]),
];

/// Maps document text to a vendor; the first group with a matching marker wins.
#[derive(Debug, Clone)]
pub struct VendorClassifier {
    groups: Vec<(Vendor, Vec<String>)>,
}

impl VendorClassifier {
    /// Classifier with the built-in marker groups.
    pub fn new() -> Self {
        Self::with_groups(DEFAULT_MARKERS)
    }

    /// Classifier with custom groups, tested in the given order.
    pub fn with_groups(groups: &[(Vendor, &[&str])]) -> Self {
        Self {
            groups: groups
                .iter()
                .map(|(vendor, markers)| {
                    (*vendor, markers.iter().map(|m| m.to_lowercase()).collect())
                })
                .collect(),
        }
    }

    /// Classify document text.
    pub fn classify(&self, text: &str) -> Result<Vendor> {
        let lower = text.to_lowercase();

        for (vendor, markers) in &self.groups {
            if let Some(marker) = markers.iter().find(|m| lower.contains(m.as_str())) {
                trace!("Classified as {} by marker '{}'", vendor, marker);
                return Ok(*vendor);
            }
        }

        Err(ParseError::UnknownVendor)
    }
}

impl Default for VendorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify text with the built-in marker groups.
pub fn classify_vendor(text: &str) -> Result<Vendor> {
    VendorClassifier::new().classify(text)
}
