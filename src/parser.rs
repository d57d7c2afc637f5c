//! The PHY PDU dissector and the parse tree it produces.
//!
//! # Examples
//!
//! ```
//! use lorawan_dissect::parser::{dissect, Body, DissectOptions};
//!
//! let data = vec![
//!     0x40, 0xc1, 0xd2, 0x52, 0x01, 0xa5, 0x05, 0x00, 0x03, 0x07,
//!     0x07, 0x03, 0x12, 0x08, 0x64, 0xfe, 0x22, 0x6a, 0x9e,
//! ];
//! let tree = dissect(&data, &DissectOptions::default()).unwrap();
//! if let Body::MacPayload(mac) = &tree.body {
//!     assert_eq!(mac.f_port, Some(8));
//! } else {
//!     panic!("failed to parse data payload");
//! }
//! ```

use alloc::format;
use alloc::vec::Vec;

use super::diagnostics::{Diagnostic, Diagnostics};
use super::keys::{AppKey, CryptoFactory, DerivedMic, SessionKeys, MIC};
use super::maccommands::{self, MacCommand};
use super::securityhelpers;
use super::types::{DLSettings, Direction, Frequency, Region, Version};

#[cfg(feature = "default-crypto")]
use super::default_crypto::DefaultFactory;

pub const MHDR_LEN: usize = 1;
pub const MIC_LEN: usize = 4;
pub const FHDR_MIN_LEN: usize = 7;
pub const JOIN_REQUEST_LEN: usize = 23;
pub const JOIN_ACCEPT_LEN: usize = 17;
pub const JOIN_ACCEPT_WITH_CF_LIST_LEN: usize = 33;

/// Fatal dissection errors. Everything recoverable is reported through the
/// diagnostics list of the returned tree instead.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error {
    /// The input does not even contain an MHDR.
    EmptyPayload,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::EmptyPayload => write!(f, "phy_pdu must need more than 1 bytes"),
        }
    }
}

macro_rules! fixed_field_struct {
    (
        $(#[$outer:meta])*
        struct $type:ident[$size:expr];
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
        pub struct $type([u8; $size]);

        impl $type {
            /// Builds the field from host-order bytes.
            pub fn new(data: &[u8]) -> Option<$type> {
                if data.len() != $size {
                    None
                } else {
                    let mut bytes = [0u8; $size];
                    bytes.copy_from_slice(data);
                    Some($type(bytes))
                }
            }

            /// Builds the field from wire-order (little-endian) bytes. This
            /// is the single place the byte order gets reversed.
            ///
            /// Improper use of this method could lead to panic during
            /// runtime!
            pub fn from_wire(data: &[u8]) -> $type {
                let mut bytes = [0u8; $size];
                bytes.copy_from_slice(data);
                bytes.reverse();
                $type(bytes)
            }

            /// The host-order octets.
            pub fn octets(&self) -> [u8; $size] {
                self.0
            }

            /// The octets as they appear on the wire (little endian).
            pub fn to_wire(&self) -> [u8; $size] {
                let mut bytes = self.0;
                bytes.reverse();
                bytes
            }
        }

        impl From<[u8; $size]> for $type {
            fn from(v: [u8; $size]) -> Self {
                $type(v)
            }
        }

        impl AsRef<[u8]> for $type {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

fixed_field_struct! {
    /// EUI64 represents a 64-bit EUI.
    struct EUI64[8];
}

impl From<EUI64> for u64 {
    fn from(v: EUI64) -> Self {
        u64::from_be_bytes(v.0)
    }
}

fixed_field_struct! {
    /// DevNonce represents a 16-bit device nonce.
    struct DevNonce[2];
}

impl From<DevNonce> for u16 {
    fn from(v: DevNonce) -> Self {
        u16::from_be_bytes(v.0)
    }
}

impl From<u16> for DevNonce {
    fn from(v: u16) -> Self {
        Self::from(v.to_be_bytes())
    }
}

fixed_field_struct! {
    /// AppNonce represents a 24-bit network server nonce.
    struct AppNonce[3];
}

impl AppNonce {
    /// The integer value of the nonce.
    pub fn value(&self) -> u32 {
        u32::from_be_bytes([0, self.0[0], self.0[1], self.0[2]])
    }
}

fixed_field_struct! {
    /// NetId represents the 24-bit network identifier of a Join Accept.
    struct NetId[3];
}

impl NetId {
    /// The integer value of the NetID.
    pub fn value(&self) -> u32 {
        u32::from_be_bytes([0, self.0[0], self.0[1], self.0[2]])
    }

    /// The NwkID subfield: the seven most significant bits of the NetID.
    pub fn nwk_id(&self) -> u8 {
        self.0[0] >> 1
    }
}

fixed_field_struct! {
    /// DevAddr represents a 32-bit device address.
    struct DevAddr[4];
}

impl DevAddr {
    pub fn nwk_id(&self) -> u8 {
        self.0[0] >> 1
    }
}

impl From<DevAddr> for u32 {
    fn from(v: DevAddr) -> Self {
        u32::from_be_bytes(v.0)
    }
}

impl From<u32> for DevAddr {
    fn from(v: u32) -> Self {
        Self::from(v.to_be_bytes())
    }
}

fixed_field_struct! {
    /// FCnt represents the full 32-bit frame counter: the upper 16 bits are
    /// maintained by the caller, the lower 16 come from the frame.
    struct FCnt[4];
}

impl FCnt {
    /// Joins the caller-maintained upper half with the on-wire lower half.
    pub fn from_parts(upper: u16, lower: u16) -> FCnt {
        let u = upper.to_be_bytes();
        let l = lower.to_be_bytes();
        FCnt([u[0], u[1], l[0], l[1]])
    }

    /// The integer value of the counter.
    pub fn value(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// The lower 16 bits, as carried in the FHDR.
    pub fn lower(&self) -> u16 {
        u16::from_be_bytes([self.0[2], self.0[3]])
    }
}

impl From<FCnt> for u32 {
    fn from(v: FCnt) -> Self {
        v.value()
    }
}

/// MHDR represents LoRaWAN MHDR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct MHDR(u8);

impl MHDR {
    pub fn new(byte: u8) -> MHDR {
        MHDR(byte)
    }

    /// Type of message the PhyPdu is carrying.
    pub fn mtype(&self) -> MType {
        match self.0 >> 5 {
            0 => MType::JoinRequest,
            1 => MType::JoinAccept,
            2 => MType::UnconfirmedDataUp,
            3 => MType::UnconfirmedDataDown,
            4 => MType::ConfirmedDataUp,
            5 => MType::ConfirmedDataDown,
            6 => MType::RFU,
            _ => MType::Proprietary,
        }
    }

    /// Version of the LoRaWAN payload format.
    pub fn major(&self) -> Major {
        if self.0.trailing_zeros() >= 2 {
            Major::LoRaWANR1
        } else {
            Major::RFU
        }
    }

    /// The three reserved bits between MType and Major.
    pub fn rfu_bits(&self) -> u8 {
        (self.0 >> 2) & 0x07
    }

    pub fn raw_value(&self) -> u8 {
        self.0
    }
}

impl From<u8> for MHDR {
    fn from(v: u8) -> Self {
        MHDR(v)
    }
}

/// MType gives the possible message types of the PhyPayload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum MType {
    JoinRequest,
    JoinAccept,
    UnconfirmedDataUp,
    UnconfirmedDataDown,
    ConfirmedDataUp,
    ConfirmedDataDown,
    RFU,
    Proprietary,
}

/// Major gives the supported LoRaWAN payload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Major {
    LoRaWANR1,
    RFU,
}

/// FCtrl represents the FCtrl from FHDR.
///
/// Bits 4 and 6 change meaning with the direction and, for some of them,
/// with the LoRaWAN revision; both are captured at parse time so the
/// accessors need no further context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct FCtrl {
    raw: u8,
    direction: Direction,
    version: Version,
}

impl FCtrl {
    pub fn new(raw: u8, direction: Direction, version: Version) -> FCtrl {
        FCtrl { raw, direction, version }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Gives whether ADR is enabled or not.
    pub fn adr(&self) -> bool {
        self.raw & (1 << 7) != 0
    }

    /// Gives whether ADR ACK is requested. On downlinks the bit is RFU
    /// before 1.0.3.
    pub fn adr_ack_req(&self) -> bool {
        match self.direction {
            Direction::Up => self.raw & (1 << 6) != 0,
            Direction::Down => self.version.extended_fctrl_bits() && self.raw & (1 << 6) != 0,
        }
    }

    /// Gives whether the ack bit is set.
    pub fn ack(&self) -> bool {
        self.raw & (1 << 5) != 0
    }

    /// Gives whether there are more downlink payloads pending.
    pub fn f_pending(&self) -> bool {
        self.direction == Direction::Down && self.raw & (1 << 4) != 0
    }

    /// Gives whether the device operates in Class B. On uplinks the bit is
    /// RFU before 1.0.3.
    pub fn class_b(&self) -> bool {
        self.direction == Direction::Up
            && self.version.extended_fctrl_bits()
            && self.raw & (1 << 4) != 0
    }

    /// Gives the size of FOpts.
    pub fn f_opts_len(&self) -> u8 {
        self.raw & 0x0f
    }

    /// Gives the binary representation of the FCtrl.
    pub fn raw_value(&self) -> u8 {
        self.raw
    }
}

/// The top of the parse tree: one dissected PHY PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhyPdu {
    pub mhdr: MHDR,
    pub body: Body,
    /// The integrity code as transmitted, reversed into host order. Absent
    /// only for Join Accepts that could not be decrypted.
    pub mic_in_frame: Option<MIC>,
    /// The integrity code recomputed from the supplied key, present iff the
    /// relevant key was supplied.
    pub mic_derived: Option<DerivedMic>,
    pub diagnostics: Vec<Diagnostic>,
}

/// The per-MType body of a PHY PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Body {
    JoinRequest(JoinRequest),
    JoinAccept(JoinAccept),
    /// A Join Accept that could not be decrypted for lack of an AppKey.
    EncryptedJoinAccept(EncryptedJoinAccept),
    MacPayload(MacPayload),
    /// A proprietary or RFU frame, surfaced as raw bytes.
    Proprietary(Proprietary),
}

/// A dissected Join Request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoinRequest {
    pub app_eui: EUI64,
    pub dev_eui: EUI64,
    pub dev_nonce: DevNonce,
}

/// A decrypted, dissected Join Accept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoinAccept {
    pub app_nonce: AppNonce,
    pub net_id: NetId,
    pub dev_addr: DevAddr,
    pub dl_settings: DLSettings,
    /// Delay before RX1 in seconds; the encoded values 0 and 1 both mean 1.
    pub rx_delay: u8,
    pub c_f_list: Option<CfList>,
}

impl JoinAccept {
    /// Derives the session key pair this Join Accept establishes, given the
    /// DevNonce of the Join Request it answers.
    pub fn derive_session_keys_with_factory<F: CryptoFactory>(
        &self,
        dev_nonce: &DevNonce,
        app_key: &AppKey,
        factory: &F,
    ) -> SessionKeys {
        securityhelpers::derive_session_keys(
            &factory.new_enc(app_key.inner()),
            &self.app_nonce.octets(),
            &self.net_id.octets(),
            &dev_nonce.octets(),
        )
    }

    /// Same as [`derive_session_keys_with_factory`](Self::derive_session_keys_with_factory)
    /// with the default software crypto.
    #[cfg(feature = "default-crypto")]
    pub fn derive_session_keys(&self, dev_nonce: &DevNonce, app_key: &AppKey) -> SessionKeys {
        self.derive_session_keys_with_factory(dev_nonce, app_key, &DefaultFactory)
    }
}

/// A Join Accept body kept encrypted because no AppKey was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncryptedJoinAccept {
    pub payload: Vec<u8>,
}

/// The optional channel frequency list of a Join Accept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CfList {
    pub frequencies: [Frequency; 5],
    /// Index of the first listed channel; region dependent.
    pub first_channel: u8,
    pub c_f_list_type: u8,
}

/// A dissected data frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MacPayload {
    pub dev_addr: DevAddr,
    pub fctrl: FCtrl,
    pub fcnt: FCnt,
    pub fopts: FOpts,
    pub f_port: Option<u8>,
    pub frm_payload: Option<FRMPayload>,
}

impl MacPayload {
    pub fn direction(&self) -> Direction {
        self.fctrl.direction()
    }
}

/// The MAC commands piggybacked in the FHDR, raw and decoded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FOpts {
    pub raw: Vec<u8>,
    pub commands: Vec<MacCommand>,
}

/// The FRMPayload of a data frame after decryption was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FRMPayload {
    /// Port 0: decrypted MAC commands.
    MacCommands { raw: Vec<u8>, commands: Vec<MacCommand> },
    /// Ports 1-223: decrypted application data.
    Application(Vec<u8>),
    /// Port 224: decrypted test data.
    Test(Vec<u8>),
    /// The ciphertext as on the wire; the key needed to decrypt it was not
    /// supplied.
    Encrypted(Vec<u8>),
}

/// The body of a proprietary frame, or of a frame too mangled to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proprietary {
    pub payload: Vec<u8>,
}

/// Options controlling one dissection. Keys that are absent simply skip the
/// corresponding MIC derivation or decryption, with a warning.
#[derive(Debug, Clone, Default)]
pub struct DissectOptions {
    pub app_key: Option<AppKey>,
    pub nwk_skey: Option<super::keys::NwkSKey>,
    pub app_skey: Option<super::keys::AppSKey>,
    pub version: Version,
    /// The upper 16 bits of the rolling frame counter, maintained by the
    /// caller.
    pub upper_fcnt: u16,
    pub region: Region,
    /// Suppresses the sink callback of [`dissect_with_sink`]; the tree is
    /// returned regardless.
    pub parse_only: bool,
}

/// A rendering sink. The core produces the tree; turning it into any
/// human-readable form is a separate pass implemented outside this crate.
pub trait Render {
    fn render(&mut self, pdu: &PhyPdu);
}

/// Dissects a payload as a LoRaWAN physical payload using the default
/// software crypto.
///
/// # Examples
///
/// ```
/// let data = vec![
///     0x00, 0x04, 0x03, 0x02, 0x01, 0x04, 0x03, 0x02, 0x01, 0x05, 0x04,
///     0x03, 0x02, 0x05, 0x04, 0x03, 0x02, 0x2d, 0x10, 0x6a, 0x99, 0x0e,
///     0x12,
/// ];
/// let opts = lorawan_dissect::parser::DissectOptions::default();
/// let tree = lorawan_dissect::parser::dissect(&data, &opts).unwrap();
/// ```
#[cfg(feature = "default-crypto")]
pub fn dissect(phy_pdu: &[u8], opts: &DissectOptions) -> Result<PhyPdu, Error> {
    dissect_with_factory(phy_pdu, opts, &DefaultFactory)
}

/// Dissects a payload as a LoRaWAN physical payload.
///
/// Check out [dissect](fn.dissect.html) if you do not need a custom crypto
/// factory.
pub fn dissect_with_factory<F: CryptoFactory>(
    phy_pdu: &[u8],
    opts: &DissectOptions,
    factory: &F,
) -> Result<PhyPdu, Error> {
    if phy_pdu.is_empty() {
        return Err(Error::EmptyPayload);
    }
    let mut diags = Diagnostics::new();
    let mhdr = MHDR(phy_pdu[0]);
    if mhdr.major() != Major::LoRaWANR1 {
        diags.warn("Major version is RFU, decoding as LoRaWAN R1");
    }
    let wire_mic = if phy_pdu.len() >= MHDR_LEN + MIC_LEN {
        let d = &phy_pdu[phy_pdu.len() - MIC_LEN..];
        Some(MIC([d[3], d[2], d[1], d[0]]))
    } else {
        diags.warn("PDU too short to carry a MIC");
        None
    };
    let raw_body = if phy_pdu.len() >= MHDR_LEN + MIC_LEN {
        &phy_pdu[1..phy_pdu.len() - MIC_LEN]
    } else {
        &phy_pdu[1..]
    };

    let (body, mic_in_frame, mic_derived) = match mhdr.mtype() {
        MType::JoinRequest => {
            dissect_join_request(phy_pdu, raw_body, opts, factory, &mut diags, wire_mic)
        }
        MType::JoinAccept => dissect_join_accept(phy_pdu, opts, factory, &mut diags),
        MType::UnconfirmedDataUp | MType::ConfirmedDataUp => {
            dissect_mac_payload(phy_pdu, raw_body, Direction::Up, opts, factory, &mut diags, wire_mic)
        }
        MType::UnconfirmedDataDown | MType::ConfirmedDataDown => {
            dissect_mac_payload(phy_pdu, raw_body, Direction::Down, opts, factory, &mut diags, wire_mic)
        }
        MType::RFU => {
            diags.warn("RFU message type, not decoded");
            (Body::Proprietary(Proprietary { payload: raw_body.to_vec() }), wire_mic, None)
        }
        MType::Proprietary => {
            (Body::Proprietary(Proprietary { payload: raw_body.to_vec() }), wire_mic, None)
        }
    };

    Ok(PhyPdu { mhdr, body, mic_in_frame, mic_derived, diagnostics: diags.into_vec() })
}

/// Dissects a payload and hands the finished tree to `sink`, unless
/// `parse_only` is set in the options.
pub fn dissect_with_sink<F: CryptoFactory, R: Render>(
    phy_pdu: &[u8],
    opts: &DissectOptions,
    factory: &F,
    sink: &mut R,
) -> Result<PhyPdu, Error> {
    let pdu = dissect_with_factory(phy_pdu, opts, factory)?;
    if !opts.parse_only {
        sink.render(&pdu);
    }
    Ok(pdu)
}

fn dissect_join_request<F: CryptoFactory>(
    phy_pdu: &[u8],
    raw_body: &[u8],
    opts: &DissectOptions,
    factory: &F,
    diags: &mut Diagnostics,
    wire_mic: Option<MIC>,
) -> (Body, Option<MIC>, Option<DerivedMic>) {
    if phy_pdu.len() != JOIN_REQUEST_LEN {
        diags.warn(format!(
            "length of PHY PDU of Join Request must be 23, but {}",
            phy_pdu.len()
        ));
        if phy_pdu.len() < JOIN_REQUEST_LEN {
            return (Body::Proprietary(Proprietary { payload: raw_body.to_vec() }), wire_mic, None);
        }
    }
    let body = &phy_pdu[MHDR_LEN..];
    let request = JoinRequest {
        app_eui: EUI64::from_wire(&body[0..8]),
        dev_eui: EUI64::from_wire(&body[8..16]),
        dev_nonce: DevNonce::from_wire(&body[16..18]),
    };
    let mic_derived = match &opts.app_key {
        Some(key) => Some(securityhelpers::calculate_mic(
            &phy_pdu[..phy_pdu.len() - MIC_LEN],
            factory.new_mac(key.inner()),
        )),
        None => {
            diags.warn("not calculated MIC due to no AppKey specified");
            None
        }
    };
    (Body::JoinRequest(request), wire_mic, mic_derived)
}

fn dissect_join_accept<F: CryptoFactory>(
    phy_pdu: &[u8],
    opts: &DissectOptions,
    factory: &F,
    diags: &mut Diagnostics,
) -> (Body, Option<MIC>, Option<DerivedMic>) {
    if phy_pdu.len() != JOIN_ACCEPT_LEN && phy_pdu.len() != JOIN_ACCEPT_WITH_CF_LIST_LEN {
        diags.warn(format!(
            "length of PHY PDU of Join Accept must be 17 or 33, but {}",
            phy_pdu.len()
        ));
    }
    let encrypted = &phy_pdu[MHDR_LEN..];
    let key = match &opts.app_key {
        Some(key) => key,
        None => {
            diags.warn("not decrypt Join Accept due to no AppKey specified");
            let body = Body::EncryptedJoinAccept(EncryptedJoinAccept { payload: encrypted.to_vec() });
            return (body, None, None);
        }
    };
    if encrypted.is_empty() || encrypted.len() % 16 != 0 {
        diags.warn("Join Accept body is not a whole number of AES blocks, not decrypted");
        let body = Body::EncryptedJoinAccept(EncryptedJoinAccept { payload: encrypted.to_vec() });
        return (body, None, None);
    }

    // The server encrypted with an ECB decrypt, so an ECB encrypt recovers
    // the plaintext, trailing MIC included.
    let plaintext = securityhelpers::decrypt_join_accept(&factory.new_enc(key.inner()), encrypted);
    let accept = JoinAccept {
        app_nonce: AppNonce::from_wire(&plaintext[0..3]),
        net_id: NetId::from_wire(&plaintext[3..6]),
        dev_addr: DevAddr::from_wire(&plaintext[6..10]),
        dl_settings: DLSettings::new(plaintext[10]),
        rx_delay: match plaintext[11] {
            0 => 1,
            d => d,
        },
        c_f_list: if plaintext.len() == 32 {
            dissect_cf_list(&plaintext[12..28], opts.region, diags)
        } else {
            None
        },
    };

    let n = plaintext.len();
    let mic_in_frame = MIC([plaintext[n - 1], plaintext[n - 2], plaintext[n - 3], plaintext[n - 4]]);
    let mut buf = Vec::with_capacity(MHDR_LEN + n - MIC_LEN);
    buf.push(phy_pdu[0]);
    buf.extend_from_slice(&plaintext[..n - MIC_LEN]);
    let mic_derived = securityhelpers::calculate_mic(&buf, factory.new_mac(key.inner()));

    (Body::JoinAccept(accept), Some(mic_in_frame), Some(mic_derived))
}

fn dissect_cf_list(data: &[u8], region: Region, diags: &mut Diagnostics) -> Option<CfList> {
    let first_channel = match region {
        Region::As923 => 2,
        Region::Eu868 => 3,
        Region::Us920 => {
            diags.warn("CFList of US920 is not implemented yet");
            return None;
        }
    };
    Some(CfList {
        frequencies: [
            Frequency::new_from_raw(&data[0..3]),
            Frequency::new_from_raw(&data[3..6]),
            Frequency::new_from_raw(&data[6..9]),
            Frequency::new_from_raw(&data[9..12]),
            Frequency::new_from_raw(&data[12..15]),
        ],
        first_channel,
        c_f_list_type: data[15],
    })
}

#[allow(clippy::too_many_arguments)]
fn dissect_mac_payload<F: CryptoFactory>(
    phy_pdu: &[u8],
    raw_body: &[u8],
    direction: Direction,
    opts: &DissectOptions,
    factory: &F,
    diags: &mut Diagnostics,
    wire_mic: Option<MIC>,
) -> (Body, Option<MIC>, Option<DerivedMic>) {
    if phy_pdu.len() < MHDR_LEN + FHDR_MIN_LEN + MIC_LEN {
        diags.warn(format!("MAC payload too short for an FHDR, {} bytes", phy_pdu.len()));
        return (Body::Proprietary(Proprietary { payload: raw_body.to_vec() }), wire_mic, None);
    }
    let body = raw_body;
    let dev_addr = DevAddr::from_wire(&body[0..4]);
    let fctrl = FCtrl::new(body[4], direction, opts.version);
    let fcnt = FCnt::from_parts(opts.upper_fcnt, u16::from_le_bytes([body[5], body[6]]));
    let fopts_len = fctrl.f_opts_len() as usize;

    let mut fhdr_len = FHDR_MIN_LEN + fopts_len;
    let mut truncated = false;
    let mut fopts = FOpts::default();
    if fhdr_len <= body.len() {
        if fopts_len > 0 {
            let raw = body[FHDR_MIN_LEN..fhdr_len].to_vec();
            let commands = maccommands::parse_mac_commands(&raw, direction, diags);
            fopts = FOpts { raw, commands };
        }
    } else {
        diags.warn(format!("FOptsLen {fopts_len} exceeds the MAC payload"));
        fhdr_len = body.len();
        truncated = true;
    }

    let mic_derived = match &opts.nwk_skey {
        Some(key) => Some(securityhelpers::calculate_data_mic(
            &phy_pdu[..phy_pdu.len() - MIC_LEN],
            factory.new_mac(key.inner()),
            direction,
            &dev_addr.octets(),
            fcnt.value(),
        )),
        None => {
            diags.warn("not checked MIC due to no NwkSKey specified");
            None
        }
    };

    let rest = &body[fhdr_len..];
    let (f_port, frm_payload) = if truncated || rest.is_empty() {
        // FHDR-only frame.
        (None, None)
    } else {
        let f_port = rest[0];
        let frm = &rest[1..];
        if frm.is_empty() {
            diags.warn("payload size is too short");
            (Some(f_port), None)
        } else if f_port == 0 {
            if fopts_len > 0 {
                diags.warn("MAC Commands exist in both FOpts and FRMPayload");
            }
            match &opts.nwk_skey {
                Some(key) => {
                    let raw = securityhelpers::encrypt_frm_payload(
                        frm,
                        &factory.new_enc(key.inner()),
                        direction,
                        &dev_addr.octets(),
                        fcnt.value(),
                    );
                    let commands = maccommands::parse_mac_commands(&raw, direction, diags);
                    (Some(f_port), Some(FRMPayload::MacCommands { raw, commands }))
                }
                None => {
                    diags.warn("not decrypted MAC Command due to no NwkSKey specified");
                    (Some(f_port), Some(FRMPayload::Encrypted(frm.to_vec())))
                }
            }
        } else {
            match &opts.app_skey {
                Some(key) => {
                    let data = securityhelpers::encrypt_frm_payload(
                        frm,
                        &factory.new_enc(key.inner()),
                        direction,
                        &dev_addr.octets(),
                        fcnt.value(),
                    );
                    let payload = if f_port == 224 {
                        FRMPayload::Test(data)
                    } else {
                        FRMPayload::Application(data)
                    };
                    (Some(f_port), Some(payload))
                }
                None => {
                    diags.warn("not decrypt Application Data due to no AppSKey specified");
                    (Some(f_port), Some(FRMPayload::Encrypted(frm.to_vec())))
                }
            }
        }
    };

    let mac = MacPayload { dev_addr, fctrl, fcnt, fopts, f_port, frm_payload };
    (Body::MacPayload(mac), wire_mic, mic_derived)
}
