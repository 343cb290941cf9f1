//! Land registry contract surface.
//!
//! Only the two methods the linking session touches; the full ABI and
//! gas-pricing strategy live with the chain client.

/// Read method returning the metadata blob for one parcel.
pub const METHOD_LAND_DATA: &str = "landData";

/// Batched write updating the metadata of many parcels in one
/// transaction.
pub const METHOD_UPDATE_MANY: &str = "updateManyLandData";

/// Minimal contract description handed to the wallet provider at
/// registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractSpec {
    pub name: &'static str,
    pub address: &'static str,
    pub methods: &'static [&'static str],
}

/// The land registry interface registered on wallet connection.
pub const LAND_REGISTRY: ContractSpec = ContractSpec {
    name: "LANDRegistry",
    address: "0xF87E31492Faf9A91B02Ee0dEAAd50d51d56D5d4d",
    methods: &[METHOD_LAND_DATA, METHOD_UPDATE_MANY],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_both_session_methods() {
        assert!(LAND_REGISTRY.methods.contains(&METHOD_LAND_DATA));
        assert!(LAND_REGISTRY.methods.contains(&METHOD_UPDATE_MANY));
    }
}
