//! The LoRaWAN 1.0.x crypto layer: FRMPayload encryption, MIC derivation,
//! the Join Accept encrypt-to-decrypt recovery and session-key derivation.
//!
//! All multi-byte arguments are taken in host order (big-endian readable);
//! the little-endian reversal the wire demands happens only inside the
//! `A_i`/`B_0` block assembly here.
pub use generic_array;
use generic_array::GenericArray;

use alloc::vec::Vec;

use super::keys::{self, AppSKey, NwkSKey, SessionKeys, AES128};
use super::types::Direction;

/// Builds the common shape of the `A_i` (encryption) and `B_0` (MIC) blocks.
///
/// `dev_addr` is in host order; bytes 14 and 15 are left for the caller.
fn generate_helper_block(first: u8, direction: Direction, dev_addr: &[u8; 4], fcnt: u32) -> [u8; 16] {
    let mut block = [0u8; 16];
    block[0] = first;
    // block[1..5] are 0
    block[5] = direction as u8;
    block[6] = dev_addr[3];
    block[7] = dev_addr[2];
    block[8] = dev_addr[1];
    block[9] = dev_addr[0];
    block[10] = (fcnt & 0xff) as u8;
    block[11] = ((fcnt >> 8) & 0xff) as u8;
    block[12] = ((fcnt >> 16) & 0xff) as u8;
    block[13] = ((fcnt >> 24) & 0xff) as u8;
    // block[14] is 0
    // block[15] is set by the caller
    block
}

/// Computes the MIC of a data frame.
///
/// `data` is `MHDR | FHDR | FPort | FRMPayload` exactly as on the wire, MIC
/// excluded.
pub fn calculate_data_mic<M: keys::Mac>(
    data: &[u8],
    mac: M,
    direction: Direction,
    dev_addr: &[u8; 4],
    fcnt: u32,
) -> keys::DerivedMic {
    let mut header = generate_helper_block(0x49, direction, dev_addr, fcnt);
    header[15] = data.len() as u8;

    calculate_mic_with_header(&header[..], data, mac)
}

fn calculate_mic_with_header<M: keys::Mac>(header: &[u8], data: &[u8], mac: M) -> keys::DerivedMic {
    let mut mac = mac;
    if !header.is_empty() {
        mac.input(header);
    }
    mac.input(data);
    keys::DerivedMic::from_cmac(mac.result())
}

/// Computes the MIC of a join frame (plain CMAC over the given bytes).
pub fn calculate_mic<M: keys::Mac>(data: &[u8], mac: M) -> keys::DerivedMic {
    calculate_mic_with_header(&[], data, mac)
}

/// Applies the FRMPayload keystream to `msg` and returns the result.
///
/// Encryption and decryption are the same operation: each 16-byte block of
/// the message is XORed with `AES(key, A_i)`, the final short block using
/// only its leading keystream bytes.
pub fn encrypt_frm_payload<E: keys::Encrypter>(
    msg: &[u8],
    aes_enc: &E,
    direction: Direction,
    dev_addr: &[u8; 4],
    fcnt: u32,
) -> Vec<u8> {
    let mut a = generate_helper_block(0x01, direction, dev_addr, fcnt);

    let mut buf = msg.to_vec();
    let mut s = [0u8; 16];
    let mut ctr: u8 = 1;
    for (i, b) in buf.iter_mut().enumerate() {
        let j = i & 0x0f;
        if j == 0 {
            a[15] = ctr;
            ctr = ctr.wrapping_add(1);
            s.copy_from_slice(&a);
            aes_enc.encrypt_block(GenericArray::from_mut_slice(&mut s[..]));
        }
        *b ^= s[j];
    }
    buf
}

/// Recovers a Join Accept body.
///
/// The network server encrypts the Join Accept with an ECB *decrypt*, so the
/// receiving side applies an ECB *encrypt* to get the plaintext back. The
/// input (body plus trailing MIC) must be a multiple of 16 bytes, which the
/// frame format guarantees.
pub fn decrypt_join_accept<E: keys::Encrypter>(aes_enc: &E, body: &[u8]) -> Vec<u8> {
    let mut buf = body.to_vec();
    for block in buf.chunks_exact_mut(16) {
        aes_enc.encrypt_block(GenericArray::from_mut_slice(block));
    }
    buf
}

/// Derives one v1.0.x session key.
///
/// `app_nonce`, `net_id` and `dev_nonce` are in host order and get reversed
/// into the key-derivation block.
pub fn derive_session_key<E: keys::Encrypter>(
    aes_enc: &E,
    first_byte: u8,
    app_nonce: &[u8; 3],
    net_id: &[u8; 3],
    dev_nonce: &[u8; 2],
) -> AES128 {
    let mut block = [0u8; 16];
    block[0] = first_byte;
    block[1] = app_nonce[2];
    block[2] = app_nonce[1];
    block[3] = app_nonce[0];
    block[4] = net_id[2];
    block[5] = net_id[1];
    block[6] = net_id[0];
    block[7] = dev_nonce[1];
    block[8] = dev_nonce[0];
    // block[9..16] is the zero pad

    let mut input = GenericArray::clone_from_slice(&block);
    aes_enc.encrypt_block(&mut input);

    let mut output_key = [0u8; 16];
    output_key.copy_from_slice(&input[0..16]);
    AES128(output_key)
}

/// Derives the v1.0.x session key pair from the values a Join Request /
/// Join Accept exchange provides.
pub fn derive_session_keys<E: keys::Encrypter>(
    aes_enc: &E,
    app_nonce: &[u8; 3],
    net_id: &[u8; 3],
    dev_nonce: &[u8; 2],
) -> SessionKeys {
    SessionKeys {
        nwk_skey: NwkSKey(derive_session_key(aes_enc, 0x01, app_nonce, net_id, dev_nonce)),
        app_skey: AppSKey(derive_session_key(aes_enc, 0x02, app_nonce, net_id, dev_nonce)),
    }
}
