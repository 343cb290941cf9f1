//! Decoded land metadata.

/// Encoding version this crate originates.
pub const CURRENT_VERSION: u8 = 0;

/// Metadata stored on chain for a parcel.
///
/// `Default` is the "no prior data" value: current version, empty
/// name/description/ipns, no opaque tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandData {
    /// Encoding version the blob was (or will be) written with
    pub version: u8,
    /// Display name of the estate the parcel belongs to
    pub name: String,
    /// Free-form description
    pub description: String,
    /// URI-shaped reference into the content-addressed network
    pub ipns: String,
    /// Fields past `ipns` that this codec does not understand for
    /// `version`. Carried verbatim, still in encoded form, so that
    /// re-encoding with the same version does not drop them.
    pub extras: Vec<String>,
}

impl LandData {
    /// Metadata at the current encoding version, no opaque tail
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        ipns: impl Into<String>,
    ) -> Self {
        Self {
            version: CURRENT_VERSION,
            name: name.into(),
            description: description.into(),
            ipns: ipns.into(),
            extras: Vec::new(),
        }
    }

    /// Same metadata pointing at a different content reference
    #[must_use]
    pub fn with_ipns(mut self, ipns: impl Into<String>) -> Self {
        self.ipns = ipns.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty_current_version() {
        let data = LandData::default();
        assert_eq!(data.version, CURRENT_VERSION);
        assert!(data.name.is_empty());
        assert!(data.description.is_empty());
        assert!(data.ipns.is_empty());
        assert!(data.extras.is_empty());
    }

    #[test]
    fn with_ipns_replaces_reference() {
        let data = LandData::new("plaza", "", "ipns:old").with_ipns("ipns:new");
        assert_eq!(data.ipns, "ipns:new");
        assert_eq!(data.name, "plaza");
    }
}
