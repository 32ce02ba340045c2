/// Enum representing the type of a peer in the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerType {
    /// A customer peer.
    CustomerType,
    /// A vendor (restaurant) peer.
    VendorType,
    /// An admin peer.
    AdminType,
    /// The marketplace coordinator.
    CoordinatorType,
    /// The payment gateway.
    GatewayType,
}

impl PeerType {
    /// Converts a `u8` value to a `PeerType` if possible.
    ///
    /// # Arguments
    /// - `byte`: The byte to convert.
    ///
    /// # Returns
    /// - `Some(PeerType)` if the byte matches a known type, otherwise `None`.
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(PeerType::CustomerType),
            1 => Some(PeerType::VendorType),
            2 => Some(PeerType::AdminType),
            3 => Some(PeerType::CoordinatorType),
            4 => Some(PeerType::GatewayType),
            _ => None,
        }
    }

    /// Converts a `PeerType` to its corresponding `u8` value.
    pub fn to_u8(&self) -> u8 {
        match self {
            PeerType::CustomerType => 0,
            PeerType::VendorType => 1,
            PeerType::AdminType => 2,
            PeerType::CoordinatorType => 3,
            PeerType::GatewayType => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_known_byte() {
        for byte in 0..=4u8 {
            let peer = PeerType::from_u8(byte).unwrap();
            assert_eq!(peer.to_u8(), byte);
        }
    }

    #[test]
    fn rejects_unknown_bytes() {
        assert!(PeerType::from_u8(5).is_none());
        assert!(PeerType::from_u8(255).is_none());
    }
}
