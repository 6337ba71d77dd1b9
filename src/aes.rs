use crate::error::Error;
use crate::result::Result;

use aes;
use cbc;

use aes::cipher::BlockEncryptMut;
use aes::cipher::BlockSizeUser;
use aes::cipher::KeyIvInit;

/// AES-128 in CBC mode with a zero IV.
///
/// The chaining state carries across calls to [`encrypt_block`], so a
/// fresh clone run over consecutive blocks computes a CBC-MAC whose
/// tag is the last output block; run over a single block it is plain
/// AES-128.
///
/// [`encrypt_block`]: Cipher::encrypt_block
#[derive(Clone)]
pub struct Cipher {
    enc: cbc::Encryptor<aes::Aes128>,
}

impl Cipher {
    pub fn new(key: &[u8]) -> Result<Cipher> {
        const IV: &[u8] = &[0u8; 16];

        if key.len() != 16 {
            return Err(Error::InvalidKeyLength(key.len()));
        }

        Ok(Cipher {
            enc: cbc::Encryptor::<aes::Aes128>::new(key.into(), IV.into()),
        })
    }

    pub fn encrypt_block(&mut self, src: &[u8], dst: &mut [u8]) {
        self.enc.encrypt_block_b2b_mut(src.into(), dst.into());
    }

    pub fn block_size(&self) -> usize {
        aes::Aes128::block_size()
    }
}
