pub mod encode;
pub use crate::base_common::Alphabet;

/// Leading symbol of every group, and the second symbol of a partial group.
pub const LEAD_ALPHABET: Alphabet<85> =
    match Alphabet::new(b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{/}~") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("Could not build alphabet"),
    };

/// Symbols 2 to 5 of a full group and the third symbol of a partial group. Digit 84 is a space.
pub const BODY_ALPHABET: Alphabet<85> =
    match Alphabet::new(b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{/} ") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("Could not build alphabet"),
    };

/// Fourth symbol of a 3 byte partial group. Digits 82 to 84 are space, slash and brace.
pub const TAIL_ALPHABET: Alphabet<85> =
    match Alphabet::new(b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{ /}") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("Could not build alphabet"),
    };

pub use encode::{encode, encode_into, encoded_len, Encoder};
