//! The FFX-A2 cipher
//!
//! A2 is the "addition in a given radix" parameter collection of the
//! FFX mode of operation: a ten-round, maximally balanced Feistel
//! network whose round function frames the tweak, the round index,
//! and one message half into blocks, runs them through an AES-128
//! CBC-MAC, and reduces the tag to a digit string that is added to
//! the other half. Running the rounds backwards with subtraction
//! inverts the permutation.
//!
//! This implementation contains a context structure, called A2, that
//! holds the encryption key and the radix. Once the structure has
//! been created, it can be used to encrypt and decrypt data
//!
//! # Example
//! ```rust
//! use ffx::digits::DigitString;
//!
//! let a2 = ffx::a2::A2::new(
//!     &[
//!         0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6,
//!         0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
//!     ],
//!     10,
//! ).unwrap();
//!
//! let twk = DigitString::from_text("", 10, None).unwrap();
//! let pt = DigitString::from_text("0123456789", 10, None).unwrap();
//!
//! let ct = a2.encrypt(&twk, &pt).unwrap();
//! assert!(ct.to_text() == "2433477484");
//! ```

use crate::alphabet;
use crate::digits::{self, DigitString};
use crate::ffx;
use crate::result::Result;

use byteorder::ByteOrder;
use num_bigint::BigUint;

/// Round count fixed by the A2 parameter collection.
const ROUNDS: usize = 10;

/// The FFX-A2 context structure
pub struct A2 {
    ffx: ffx::FFX,
}

impl A2 {
    /// Create a new FFX-A2 context
    ///
    /// The key must be exactly 16 bytes (AES-128) and the radix
    /// between 2 and 36. The context is immutable and may be shared
    /// across threads; each call clones its own cipher state.
    pub fn new(key: &[u8], radix: u32) -> Result<Self> {
        Ok(A2 {
            ffx: ffx::FFX::new(key, radix)?,
        })
    }

    fn cipher_digits(
        &self,
        twk: &DigitString,
        inp: &DigitString,
        which: ffx::CipherType,
    ) -> Result<DigitString> {
        let ffx = &self.ffx;
        let radix = ffx.radix();
        let blksz = ffx.block_size();

        ffx.validate_tweak(twk)?;
        ffx.validate_text(inp)?;

        let n = inp.len();
        let t = twk.len();

        // the input splits into halves of l and v digits; the left
        // half takes the smaller share when n is odd (step 1, 2)
        let l = n / 2;
        let v = n - l;
        let (mut a, mut b) = inp.split(l)?;

        // `bw` is the number of bytes required to represent the larger
        // half as a number converted from the specified radix; it is
        // the width of the value field at the end of the MAC input
        // (step 3)
        let bw = digits::bytes_per(radix, v);
        // `d` is the number of bytes extracted from the aes output to
        // become the round number (step 4)
        let d = 4 * ((bw + 3) / 4) + 4;

        // p serves as the input to the MAC. The first 16 bytes are a
        // header fixed for the whole call; the rest (the `q` slice)
        // carries the tweak text, zero padding up to a block boundary,
        // the round index, and the value of the source half. Only the
        // final bw + 1 bytes change between rounds.
        let mut p = Vec::<u8>::new();
        p.resize(16 + ((t + 1 + bw + (blksz - 1)) / blksz) * blksz, 0);

        // `r` is the output from the aes operations
        let mut r = Vec::<u8>::new();
        r.resize(((d + (blksz - 1)) / blksz) * blksz, 0);

        // (step 5)
        p[0] = 1; // version
        p[1] = 2; // method: addition in the radix
        // note that the radix is written starting at index 2, but only
        // its low order 3 bytes belong there. index 2 is the addition
        // flag and is immediately rewritten
        byteorder::BigEndian::write_u32(&mut p[2..6], radix);
        p[2] = 1;
        p[6] = ROUNDS as u8;
        p[7] = l as u8;
        byteorder::BigEndian::write_u32(&mut p[8..12], n as u32);
        byteorder::BigEndian::write_u32(&mut p[12..16], t as u32);

        // the first `t` bytes of q carry the tweak as ASCII text from
        // the uppercase alphabet, the encoding the published FFX
        // vectors fix. the padding that follows is already zero.
        // (step 6i, partial)
        {
            let q = &mut p[16..];
            for (dst, dig) in q.iter_mut().zip(twk.digits()) {
                *dst = alphabet::wire(dig);
            }
        }

        for k in 0..ROUNDS {
            // decryption runs the same rounds in reverse, deriving the
            // round number from what was the left half going forward
            let (i, src) = match which {
                ffx::CipherType::Encrypt => (k, &b),
                ffx::CipherType::Decrypt => (ROUNDS - 1 - k, &a),
            };

            // the replaced half alternates between the two sizes
            let m = if i % 2 == 0 { l } else { v };

            let c = self.round(&mut p, &mut r, i as u8, bw, d, m, src)?;

            match which {
                ffx::CipherType::Encrypt => {
                    // (step 6v, 6vi) A <- B, B <- (A + F(i, B))
                    let c = a.add_mod(&c, m)?;
                    a = std::mem::replace(&mut b, c);
                }
                ffx::CipherType::Decrypt => {
                    // B <- A, A <- (B - F(i, A))
                    let c = b.sub_mod(&c, m)?;
                    b = std::mem::replace(&mut a, c);
                }
            }
        }

        // (step 7)
        DigitString::concat(&a, &b)
    }

    /// One invocation of the round function: stamp the round index and
    /// the source half into the MAC input, compute the MAC, extend its
    /// tag to `d` bytes, and reduce to an `m`-digit string.
    fn round(
        &self,
        p: &mut [u8],
        r: &mut [u8],
        i: u8,
        bw: usize,
        d: usize,
        m: usize,
        src: &DigitString,
    ) -> Result<DigitString> {
        let ffx = &self.ffx;
        let blksz = ffx.block_size();

        // (step 6i)
        {
            // use of q_len as opposed to q.len() avoids the borrow
            // checker's wrath
            let q = &mut p[16..];
            let q_len = q.len();

            q[q_len - bw - 1] = i;
            q[q_len - bw..].copy_from_slice(&src.to_bytes(Some(bw))?);
        }

        // (step 6ii)
        ffx.prf(p, &mut r[..blksz])?;

        // (step 6iii)
        // the tag is extended a block at a time, each extension block
        // being aes of the tag xor'd with a counter:
        // tag || ciph(tag^1) || ciph(tag^2) || ...
        //
        // the counter occupies the low four bytes of its block, so the
        // xor only touches the tail of the tag. the original bytes are
        // restored after each ciph() so the next counter starts clean.
        for j in 1..r.len() / blksz {
            let (s, ext) = r.split_at_mut(blksz);
            let o = (j - 1) * blksz;

            let w = byteorder::BigEndian::read_u32(&s[blksz - 4..]);
            byteorder::BigEndian::write_u32(&mut s[blksz - 4..], w ^ j as u32);
            ffx.ciph(s, &mut ext[o..o + blksz])?;
            byteorder::BigEndian::write_u32(&mut s[blksz - 4..], w);
        }

        // (step 6iv)
        let y = BigUint::from_bytes_be(&r[..d]);

        DigitString::from_uint(y % digits::pow(ffx.radix(), m), ffx.radix(), m)
    }

    /// Encrypt a digit string
    ///
    /// The tweak must share the message's radix. The same tweak must
    /// be supplied again to decrypt.
    pub fn encrypt(&self, twk: &DigitString, pt: &DigitString) -> Result<DigitString> {
        self.cipher_digits(twk, pt, ffx::CipherType::Encrypt)
    }

    /// Decrypt a digit string
    ///
    /// The tweak must match the one used during encryption.
    pub fn decrypt(&self, twk: &DigitString, ct: &DigitString) -> Result<DigitString> {
        self.cipher_digits(twk, ct, ffx::CipherType::Decrypt)
    }
}

fn cipher(
    key: &[u8],
    twk: &DigitString,
    txt: &DigitString,
    radix: u32,
    op: fn(&A2, &DigitString, &DigitString) -> Result<DigitString>,
) -> Result<DigitString> {
    let a2 = A2::new(key, radix)?;
    op(&a2, twk, txt)
}

/// One-shot encryption for callers that do not retain a context.
pub fn encrypt(
    key: &[u8],
    twk: &DigitString,
    pt: &DigitString,
    radix: u32,
) -> Result<DigitString> {
    cipher(key, twk, pt, radix, A2::encrypt)
}

/// One-shot decryption for callers that do not retain a context.
pub fn decrypt(
    key: &[u8],
    twk: &DigitString,
    ct: &DigitString,
    radix: u32,
) -> Result<DigitString> {
    cipher(key, twk, ct, radix, A2::decrypt)
}
