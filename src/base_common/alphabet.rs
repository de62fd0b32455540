use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    DuplicateCharacter { character: char, first: usize, second: usize },
    NonPrintableCharacter { character: u8, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCharacter { character, first, second } => {
                write!(f, "Duplicate character '{}' at indexes {} and {}", character, first, second)
            }
            Self::NonPrintableCharacter { character, index } => {
                write!(f, "Non-printable character {:#04x} at index {}", character, index)
            }
        }
    }
}

/// Fixed symbol table mapping digit values `0..N` to printable ASCII bytes.
pub struct Alphabet<const N: usize> {
    symbols: [u8; N],
}

impl<const N: usize> Alphabet<N> {
    /// Space counts as printable: the trailing-symbol tables of the base 85 scheme use it.
    pub const fn new(characters: &[u8; N]) -> Result<Self, Error> {
        let mut symbols = [0u8; N];
        let mut seen: [Option<usize>; 128] = [None; 128];

        let mut index = 0;
        while index < N {
            let character = characters[index];
            if character < 0x20 || character >= 0x7f {
                return Err(Error::NonPrintableCharacter { character, index });
            }
            if let Some(first) = seen[character as usize] {
                return Err(Error::DuplicateCharacter {
                    character: character as char,
                    first,
                    second: index,
                });
            }
            seen[character as usize] = Some(index);
            symbols[index] = character;
            index += 1;
        }

        Ok(Self { symbols })
    }

    pub fn symbol(&self, digit: u32) -> u8 {
        self.symbols[digit as usize]
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.symbols
    }
}
