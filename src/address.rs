use core::fmt;

/// A 16-bit address.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address16(u16);

impl Address16 {
    pub const fn new(value: u16) -> Self {
        Address16(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }
}

/// A 32-bit address.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address32(u32);

impl Address32 {
    pub const fn new(value: u32) -> Self {
        Address32(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

macro_rules! address_fmt {
    ($name:ident, $width:literal) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("0x{:0", $width, "X}"), self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self)
            }
        }

        impl fmt::UpperHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("{:0", $width, "X}"), self.0)
            }
        }

        impl fmt::LowerHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!("{:0", $width, "x}"), self.0)
            }
        }
    };
}

address_fmt!(Address16, 4);
address_fmt!(Address32, 8);

impl From<u16> for Address16 {
    fn from(value: u16) -> Self {
        Address16(value)
    }
}

impl From<Address16> for u16 {
    fn from(address: Address16) -> Self {
        address.0
    }
}

impl From<u32> for Address32 {
    fn from(value: u32) -> Self {
        Address32(value)
    }
}

impl From<Address32> for u32 {
    fn from(address: Address32) -> Self {
        address.0
    }
}
