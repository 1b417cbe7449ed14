use std::fmt;

use crate::error::Error;

#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Kind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl Kind {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn is_integral(self) -> bool {
        matches!(self, Kind::Byte | Kind::Short | Kind::Int | Kind::Long)
    }

    pub fn is_floating(self) -> bool {
        matches!(self, Kind::Float | Kind::Double)
    }
}

impl TryFrom<u8> for Kind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Kind::End),
            1 => Ok(Kind::Byte),
            2 => Ok(Kind::Short),
            3 => Ok(Kind::Int),
            4 => Ok(Kind::Long),
            5 => Ok(Kind::Float),
            6 => Ok(Kind::Double),
            7 => Ok(Kind::ByteArray),
            8 => Ok(Kind::String),
            9 => Ok(Kind::List),
            10 => Ok(Kind::Compound),
            11 => Ok(Kind::IntArray),
            12 => Ok(Kind::LongArray),
            other => Err(Error::BadTag(other)),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
