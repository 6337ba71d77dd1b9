use crate::aes;
use crate::alphabet;
use crate::digits::DigitString;
use crate::error::Error;
use crate::result::Result;

pub enum CipherType {
    Encrypt,
    Decrypt,
}

struct SizeLimits {
    min: usize,
    max: usize,
}

/// State shared by every round of every call: the keyed cipher, the
/// radix, and the message-length limits derived from it.
pub struct FFX {
    cipher: aes::Cipher,
    radix: u32,
    txt: SizeLimits,
}

/// Longest supported message, in digits.
const MAX_TEXT: usize = 128;

/// Longest supported tweak, in digits; the tweak length must fit the
/// four-byte header field.
const MAX_TWEAK: usize = u32::MAX as usize;

impl FFX {
    pub fn new(key: &[u8], radix: u32) -> Result<Self> {
        alphabet::validate_radix(radix)?;

        // a balanced feistel needs a domain of some substance; the
        // minimum usable length satisfies radix**minlen >= 100
        //
        // therefore:
        //  minlen = ceil(log_radix(100))
        let mut minlen = 1;
        let mut domain = u64::from(radix);
        while domain < 100 {
            domain *= u64::from(radix);
            minlen += 1;
        }

        Ok(FFX {
            cipher: aes::Cipher::new(key)?,
            radix,
            txt: SizeLimits {
                min: minlen,
                max: MAX_TEXT,
            },
        })
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    pub fn validate_text(&self, x: &DigitString) -> Result<()> {
        if x.radix() != self.radix {
            return Err(Error::InvalidArgument(
                "message radix differs from cipher radix",
            ));
        }
        if x.len() < self.txt.min {
            return Err(Error::DomainTooSmall {
                radix: self.radix,
                len: x.len(),
            });
        }
        if x.len() > self.txt.max {
            return Err(Error::InvalidArgument("message too long"));
        }

        Ok(())
    }

    pub fn validate_tweak(&self, t: &DigitString) -> Result<()> {
        if t.radix() != self.radix {
            return Err(Error::InvalidArgument(
                "tweak radix differs from cipher radix",
            ));
        }
        if t.len() > MAX_TWEAK {
            return Err(Error::InvalidArgument("tweak too long"));
        }

        Ok(())
    }

    /// CBC-MAC of `s`, whose length must be a positive multiple of the
    /// cipher block size. The tag lands in `d`.
    pub fn prf(&self, s: &[u8], d: &mut [u8]) -> Result<()> {
        let mut c = self.cipher.clone();
        let blksz = c.block_size();

        for i in 0..(s.len() / blksz) {
            let j = i * blksz;
            c.encrypt_block(&s[j..(j + blksz)], d);
        }

        Ok(())
    }

    /// AES of the first block of `s`: a one-block CBC chain under a
    /// zero IV degenerates to the bare cipher.
    pub fn ciph(&self, s: &[u8], d: &mut [u8]) -> Result<()> {
        self.prf(&s[0..16], d)
    }
}
