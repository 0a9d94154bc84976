/// Byte order of a multi-byte value
///
/// [`Endianness::Native`] stands for "whatever the running machine uses" and is also the value
/// callers pass when the order of some data is not known yet (see
/// [`StreamDecoder::read_string16`](crate::StreamDecoder::read_string16)).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Endianness {
    #[default]
    Native,
    Little,
    Big,
}

/// Byte order of the running machine, found by laying out the 32-bit value `1` in memory
const MACHINE: Endianness = if 1u32.to_ne_bytes()[0] == 0x01 {
    Endianness::Little
} else {
    Endianness::Big
};

impl Endianness {
    /// The byte order of the running machine, always [`Endianness::Little`] or [`Endianness::Big`]
    pub const fn machine() -> Self {
        MACHINE
    }

    /// Resolves [`Endianness::Native`] to the concrete machine order
    pub const fn resolve(self) -> Self {
        match self {
            Self::Native => MACHINE,
            order => order,
        }
    }

    /// Whether data in this order has to be reversed before the machine can interpret it
    pub fn differs_from_machine(self) -> bool {
        self.resolve() != MACHINE
    }

    /// Rearranges `bytes` from this order into machine order
    pub(crate) fn to_machine(self, bytes: &mut [u8]) {
        if self.differs_from_machine() {
            bytes.reverse();
        }
    }
}

pub const fn is_little_endian() -> bool {
    matches!(MACHINE, Endianness::Little)
}

pub const fn is_big_endian() -> bool {
    matches!(MACHINE, Endianness::Big)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_order_matches_target() {
        #[cfg(target_endian = "little")]
        assert_eq!(Endianness::machine(), Endianness::Little);
        #[cfg(target_endian = "big")]
        assert_eq!(Endianness::machine(), Endianness::Big);

        assert_ne!(is_little_endian(), is_big_endian());
    }

    #[test]
    fn native_never_needs_rearranging() {
        let mut bytes = [1, 2, 3];
        Endianness::Native.to_machine(&mut bytes);
        assert_eq!(bytes, [1, 2, 3]);
        assert!(!Endianness::machine().differs_from_machine());
    }

    #[test]
    fn foreign_order_is_reversed() {
        let foreign = if is_little_endian() {
            Endianness::Big
        } else {
            Endianness::Little
        };

        let mut bytes = [1, 2, 3];
        foreign.to_machine(&mut bytes);
        assert_eq!(bytes, [3, 2, 1]);
    }
}
