//! Format-preserving Encryption in the FFX mode of operation
//!
//! Provides an implementation of the FFX-A2 parameter collection: a
//! ten-round, maximally balanced Feistel network over digit strings in
//! a caller-chosen radix between 2 and 36, with AES-128 behind a
//! CBC-MAC as the round function. Format-preserving encryption, in
//! short, means that both the plaintext and ciphertext consist of the
//! same alphabet of characters and have the same length: a 16-digit
//! decimal number encrypts to a 16-digit decimal number.
//!
//! The alphabet is fixed, consisting of the characters `0` through
//! `9`, followed by the letters `a` through `z`, giving a maximum
//! radix of 36. Letters are accepted in either case on input; output
//! is always lowercase.
//!
//! # Example
//! ```rust
//! use ffx::digits::DigitString;
//!
//! let a2 = ffx::a2::A2::new(
//!     &[
//!         0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6,
//!         0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
//!     ],  // the encryption key, 16 bytes for AES-128
//!     10, // radix specifies the number of digits in the alphabet
//! ).unwrap();
//!
//! let twk = DigitString::from_text("9876543210", 10, None).unwrap();
//! let pt = DigitString::from_text("0123456789", 10, None).unwrap();
//!
//! let ct = a2.encrypt(&twk, &pt).unwrap();
//! assert!(ct.to_text() == "6124200773");
//!
//! let out = a2.decrypt(&twk, &ct).unwrap();
//! assert!(out == pt);
//! ```

pub mod a2;
pub(crate) mod aes;
pub(crate) mod alphabet;
pub mod digits;
pub(crate) mod ffx;

/// Errors returned by the FPE library
pub mod error {
    use std::fmt;

    /// Everything that can fail while constructing digit strings or
    /// running the cipher. Variants carry the offending datum; callers
    /// that need richer context should wrap `Error` in their own type.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        /// Radix outside the supported range of 2 through 36.
        InvalidRadix(u32),
        /// Key is not exactly 16 bytes.
        InvalidKeyLength(usize),
        /// A character is not in the alphabet or is too large for the
        /// radix.
        InvalidDigit(char),
        /// A declared blocksize is shorter than the supplied text.
        InvalidBlocksize { blocksize: usize, len: usize },
        /// A numeric value does not fit in the declared digit count.
        ValueOutOfRange,
        /// Arithmetic or concatenation mixed digit strings of
        /// different radices.
        RadixMismatch { lhs: u32, rhs: u32 },
        /// The message domain holds fewer than 100 values.
        DomainTooSmall { radix: u32, len: usize },
        /// A tweak or message disagrees with the cipher parameters.
        InvalidArgument(&'static str),
        /// A requested byte length is too small to hold the value.
        InvalidByteLength { need: usize, have: usize },
    }

    impl fmt::Display for Error {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Error::InvalidRadix(r) => {
                    write!(f, "invalid radix; must be between 2 and 36, got {}", r)
                }
                Error::InvalidKeyLength(n) => {
                    write!(f, "invalid key length; expected 16 bytes, got {}", n)
                }
                Error::InvalidDigit(c) => {
                    write!(f, "'{}' is not a digit under this radix", c)
                }
                Error::InvalidBlocksize { blocksize, len } => write!(
                    f,
                    "invalid blocksize; {} digits do not fit in {}",
                    len, blocksize
                ),
                Error::ValueOutOfRange => {
                    write!(f, "value too large for the declared digit count")
                }
                Error::RadixMismatch { lhs, rhs } => {
                    write!(f, "radix mismatch; {} vs {}", lhs, rhs)
                }
                Error::DomainTooSmall { radix, len } => write!(
                    f,
                    "domain too small; need radix**length >= 100, got {}**{}",
                    radix, len
                ),
                Error::InvalidArgument(why) => write!(f, "invalid argument; {}", why),
                Error::InvalidByteLength { need, have } => write!(
                    f,
                    "invalid byte length; value needs {} bytes, got {}",
                    need, have
                ),
            }
        }
    }

    impl std::error::Error for Error {}
}

/// Results returned by the FPE library
pub mod result {
    /// Short hand to return a result (or an FPE error)
    pub type Result<T> = std::result::Result<T, crate::error::Error>;
}
