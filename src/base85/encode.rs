use super::{Alphabet, BODY_ALPHABET, LEAD_ALPHABET, TAIL_ALPHABET};
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The output buffer cannot hold the whole encoding. Nothing has been written.
    BufferTooSmall { required: usize, available: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferTooSmall { required, available } => {
                write!(f, "Output buffer too small ({} bytes required, {} available)", required, available)
            }
        }
    }
}

const P1: u32 = 85;
const P2: u32 = 85 * 85;
const P3: u32 = 85 * 85 * 85;
const P4: u32 = 85 * 85 * 85 * 85;

/// Symbols produced by a partial group of 0, 1, 2 or 3 bytes.
const TAIL_LENGTHS: [usize; 4] = [0, 2, 3, 4];

/// Number of symbols produced for `len` input bytes.
pub const fn encoded_len(len: usize) -> usize {
    (len / 4) * 5 + TAIL_LENGTHS[len % 4]
}

/// Base 85 digits of `value`, most significant first.
const fn digits(value: u32) -> [u32; 5] {
    let r4 = value % P4;
    let r3 = r4 % P3;
    let r2 = r3 % P2;
    [value / P4, r4 / P3, r3 / P2, r2 / P1, r2 % P1]
}

pub struct Encoder<'a> {
    lead: &'a Alphabet<85>,
    body: &'a Alphabet<85>,
    tail: &'a Alphabet<85>,
}

impl<'a> Encoder<'a> {
    pub const fn new(lead: &'a Alphabet<85>, body: &'a Alphabet<85>, tail: &'a Alphabet<85>) -> Self {
        Self { lead, body, tail }
    }

    fn write(&self, input: &[u8], output: &mut [u8]) -> usize {
        let groups = input.chunks_exact(4);
        let remainder = groups.remainder();
        let mut index = 0;

        for group in groups {
            let [d0, d1, d2, d3, d4] = digits(u32::from_be_bytes([group[0], group[1], group[2], group[3]]));
            output[index] = self.lead.symbol(d0);
            output[index + 1] = self.body.symbol(d1);
            output[index + 2] = self.body.symbol(d2);
            output[index + 3] = self.body.symbol(d3);
            output[index + 4] = self.body.symbol(d4);
            index += 5;
        }

        if !remainder.is_empty() {
            let mut word = [0u8; 4];
            word[..remainder.len()].copy_from_slice(remainder);
            let [d0, d1, d2, d3, _] = digits(u32::from_be_bytes(word));
            output[index] = self.lead.symbol(d0);
            output[index + 1] = self.lead.symbol(d1);
            index += 2;
            if remainder.len() > 1 {
                output[index] = self.body.symbol(d2);
                index += 1;
            }
            if remainder.len() > 2 {
                output[index] = self.tail.symbol(d3);
                index += 1;
            }
        }

        index
    }

    pub fn encode_into(&self, input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
        let input = input.as_ref();
        let output = output.as_mut();
        let required = encoded_len(input.len());
        if output.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                available: output.len(),
            });
        }
        Ok(self.write(input, output))
    }

    pub fn encode(&self, input: impl AsRef<[u8]>) -> String {
        let input = input.as_ref();
        let mut output = vec![0u8; encoded_len(input.len())];
        let len = self.write(input, &mut output);
        output[..len].iter().copied().map(char::from).collect()
    }

    pub fn default() -> &'static Self {
        &ENCODER
    }
}

const ENCODER: Encoder = Encoder::new(&LEAD_ALPHABET, &BODY_ALPHABET, &TAIL_ALPHABET);

pub fn encode(input: impl AsRef<[u8]>) -> String {
    Encoder::default().encode(input)
}

pub fn encode_into(input: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
    Encoder::default().encode_into(input, output)
}

#[cfg(test)]
mod tests {
    use super::{encoded_len, Error};

    #[test]
    fn encode() {
        assert_eq!(super::encode([]), "");
        assert_eq!(super::encode([0x00, 0x00, 0x00, 0x00]), "00000");
        assert_eq!(super::encode([0xff, 0xff, 0xff, 0xff]), "/NsC0");
        assert_eq!(super::encode([0xde, 0xad, 0xbe, 0xef]), "-mSjx");
        assert_eq!(super::encode("ABCD"), "K/(`B");
        assert_eq!(super::encode("foobar"), "W^Zp/VR8");
        assert_eq!(super::encode("Hello world"), "NM&qnZy<MXa%^M");
        assert_eq!(super::encode([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]), "0RjUA1qKHQ");
        assert_eq!(super::encode([0x12, 0x34, 0x56, 0x78, 0x9a]), "5;RtLng");
    }

    #[test]
    fn encode_tail() {
        assert_eq!(super::encode([0x00]), "00");
        assert_eq!(super::encode("A"), "K>");
        assert_eq!(super::encode("AB"), "K/%");
        assert_eq!(super::encode("ABC"), "K/(_");
        assert_eq!(super::encode([0x00, 0x00, 0x00]), "0000");
        assert_eq!(super::encode([0xff]), "{{");
        assert_eq!(super::encode([0xff, 0xff]), "/Nj");
        assert_eq!(super::encode([0xff, 0xff, 0xff]), "/Ns9");
        assert_eq!(super::encode([0x01, 0x02]), "0Rj");
    }

    #[test]
    fn encode_diverging_symbols() {
        // digit 84 in the last position of a full group
        assert_eq!(super::encode([0x00, 0x00, 0x00, 0x54]), "0000 ");
        // digit 84 in the second position of a partial group
        assert_eq!(super::encode([0x1c]), "8~");
        assert_eq!(super::encode([0xfc]), "`~");
        // digit 84 in the third position of a partial group
        assert_eq!(super::encode([0x00, 0x67]), "0A ");
        // digits 84, 83 and 82 in the fourth position of a partial group
        assert_eq!(super::encode([0x00, 0x00, 0x1c]), "000}");
        assert_eq!(super::encode([0x00, 0x00, 0x38]), "001/");
        assert_eq!(super::encode([0x00, 0x00, 0x54]), "002 ");
    }

    #[test]
    fn encoded_lengths() {
        let expected = [0, 2, 3, 4, 5, 7, 8, 9, 10, 12, 13, 14, 15];
        for (len, &symbols) in expected.iter().enumerate() {
            assert_eq!(encoded_len(len), symbols);
            assert_eq!(super::encode(vec![0xa5u8; len]).len(), symbols);
        }
        assert_eq!(encoded_len(4000), 5000);
    }

    #[test]
    fn encode_into() {
        let mut output = [0u8; 8];
        assert_eq!(super::encode_into("foobar", &mut output), Ok(8));
        assert_eq!(&output, b"W^Zp/VR8");

        let mut output = vec![b'.'; 7];
        assert_eq!(super::encode_into("ABC", &mut output), Ok(4));
        assert_eq!(output, b"K/(_...");

        let mut output: [u8; 0] = [];
        assert_eq!(super::encode_into([], &mut output), Ok(0));
    }

    #[test]
    fn encode_into_buffer_too_small() {
        let mut output = [b'.'; 7];
        assert_eq!(
            super::encode_into("foobar", &mut output),
            Err(Error::BufferTooSmall {
                required: 8,
                available: 7
            })
        );
        assert_eq!(&output, b".......");

        let mut output = [0u8; 4];
        assert_eq!(
            super::encode_into([0xff; 4], &mut output),
            Err(Error::BufferTooSmall {
                required: 5,
                available: 4
            })
        );
    }
}
