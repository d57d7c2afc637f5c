//! MAC commands and the (CID, direction) registry used to decode them.
//!
//! The same CID names two different commands depending on the direction the
//! frame travels in, so every lookup is keyed by both. Decoding a command
//! sequence stops at the first CID the registry does not know: the length of
//! a proprietary command cannot be guessed.

use alloc::format;
use alloc::vec::Vec;

use crate::diagnostics::Diagnostics;
use crate::types::{ChannelMask, DLSettings, DataRateRange, DeviceClass, Direction, Frequency, Redundancy};

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error {
    UnknownMacCommand,
    BufferTooShort,
    InvalidIndex,
    InvalidDataRateRange,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::UnknownMacCommand => write!(f, "unknown MAC command"),
            Error::BufferTooShort => write!(f, "buffer too short"),
            Error::InvalidIndex => write!(f, "invalid index"),
            Error::InvalidDataRateRange => write!(f, "invalid data rate range"),
        }
    }
}

macro_rules! mac_cmd_zero_len {
    (
        $(
            $(#[$outer:meta])*
            struct $type:ident[cmd=$name:ident, cid=$cid:expr, uplink=$uplink:expr]
        )*
    ) => {
        $(
            $(#[$outer])*
            pub struct $type();

            impl $type {
                /// Creation.
                pub fn new(_: &[u8]) -> $type {
                    $type()
                }

                /// Duplicate fn to be compatible with the mac_cmds macro.
                pub fn new_from_raw(_: &[u8]) -> $type {
                    $type()
                }

                /// Get the CID.
                pub const fn cid() -> u8 {
                    $cid
                }

                /// Sent by end device or sent by network server.
                pub const fn uplink() -> bool {
                    $uplink
                }

                /// Length of empty payload.
                pub const fn len() -> usize {
                    0
                }

                /// Reference to the empty payload.
                pub fn bytes(&self) -> &[u8] {
                    &[]
                }
            }
        )*
    }
}

macro_rules! mac_cmds {
    (
        $(
            $(#[$outer:meta])*
            struct $type:ident[cmd=$name:ident, cid=$cid:expr, uplink=$uplink:expr, size=$size:expr]
        )*
    ) => {
        $(
            $(#[$outer])*
            pub struct $type(pub(crate) [u8; $size]);

            impl $type {
                /// Creates a new instance of the MAC command if there is
                /// enough data.
                pub fn new(data: &[u8]) -> Result<$type, Error> {
                    if data.len() != $size {
                        Err(Error::BufferTooShort)
                    } else {
                        Ok(Self::new_from_raw(data))
                    }
                }

                /// Constructs a new instance of the MAC command from the
                /// provided data, without verifying the data length.
                ///
                /// Improper use of this method could lead to panic during
                /// runtime!
                pub fn new_from_raw(data: &[u8]) -> $type {
                    let mut payload = [0u8; $size];
                    payload.copy_from_slice(&data[..$size]);
                    $type(payload)
                }

                /// Get the CID.
                pub const fn cid() -> u8 {
                    $cid
                }

                /// Sent by end device or sent by network server.
                pub const fn uplink() -> bool {
                    $uplink
                }

                /// Length of payload without the CID.
                pub const fn len() -> usize {
                    $size
                }

                /// Reference to the payload.
                pub fn bytes(&self) -> &[u8] {
                    &self.0
                }
            }

            impl From<[u8; $size]> for $type {
                fn from(v: [u8; $size]) -> Self {
                    $type(v)
                }
            }
        )*
    }
}

macro_rules! mac_cmds_enum {
    (
        $(#[$outer:meta])*
        pub enum $outer_type:ident {
        $(
            $name:ident($type:ident)
        )*
    }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
        #[allow(clippy::len_without_is_empty, missing_docs)]
        pub enum $outer_type {
            $(
                $name($type),
            )*
        }

        impl $outer_type {
            /// The command name.
            pub fn name(&self) -> &'static str {
                match *self {
                    $(
                        Self::$name(_) => stringify!($name),
                    )*
                }
            }

            /// The command identifier.
            pub fn cid(&self) -> u8 {
                match *self {
                    $(
                        Self::$name(_) => $type::cid(),
                    )*
                }
            }

            /// Get the length of the payload, CID excluded.
            pub fn len(&self) -> usize {
                match *self {
                    $(
                        Self::$name(_) => $type::len(),
                    )*
                }
            }

            /// Sent by end device or sent by network server.
            pub fn uplink(&self) -> bool {
                match *self {
                    $(
                        Self::$name(_) => $type::uplink(),
                    )*
                }
            }

            /// The direction the command travels in.
            pub fn direction(&self) -> Direction {
                if self.uplink() {
                    Direction::Up
                } else {
                    Direction::Down
                }
            }

            /// Get reference to the payload bytes.
            pub fn bytes(&self) -> &[u8] {
                match *self {
                    $(
                        Self::$name(ref v) => v.bytes(),
                    )*
                }
            }

            /// Registry lookup: the fixed payload length of `(cid, direction)`,
            /// or `None` for an unknown (proprietary) command.
            pub fn registered_len(cid: u8, direction: Direction) -> Option<usize> {
                let uplink = direction == Direction::Up;
                $(
                    if cid == $type::cid() && uplink == $type::uplink() {
                        return Some($type::len());
                    }
                )*
                None
            }

            fn build(cid: u8, direction: Direction, payload: &[u8]) -> Option<$outer_type> {
                let uplink = direction == Direction::Up;
                $(
                    if cid == $type::cid() && uplink == $type::uplink() {
                        return Some($outer_type::$name($type::new_from_raw(payload)));
                    }
                )*
                None
            }
        }
    }
}

mac_cmds_enum! {
    /// One decoded MAC command. The variant name resolves the CID together
    /// with the direction the command was seen in.
    pub enum MacCommand {
        ResetInd(ResetIndPayload)
        ResetConf(ResetConfPayload)
        LinkCheckReq(LinkCheckReqPayload)
        LinkCheckAns(LinkCheckAnsPayload)
        LinkADRReq(LinkADRReqPayload)
        LinkADRAns(LinkADRAnsPayload)
        DutyCycleReq(DutyCycleReqPayload)
        DutyCycleAns(DutyCycleAnsPayload)
        RXParamSetupReq(RXParamSetupReqPayload)
        RXParamSetupAns(RXParamSetupAnsPayload)
        DevStatusReq(DevStatusReqPayload)
        DevStatusAns(DevStatusAnsPayload)
        NewChannelReq(NewChannelReqPayload)
        NewChannelAns(NewChannelAnsPayload)
        RXTimingSetupReq(RXTimingSetupReqPayload)
        RXTimingSetupAns(RXTimingSetupAnsPayload)
        TxParamSetupReq(TxParamSetupReqPayload)
        TxParamSetupAns(TxParamSetupAnsPayload)
        DlChannelReq(DlChannelReqPayload)
        DlChannelAns(DlChannelAnsPayload)
        PingSlotInfoReq(PingSlotInfoReqPayload)
        PingSlotInfoAns(PingSlotInfoAnsPayload)
        PingSlotChannelReq(PingSlotChannelReqPayload)
        PingSlotChannelAns(PingSlotChannelAnsPayload)
        BeaconTimingReq(BeaconTimingReqPayload)
        BeaconTimingAns(BeaconTimingAnsPayload)
        BeaconFreqReq(BeaconFreqReqPayload)
        BeaconFreqAns(BeaconFreqAnsPayload)
        DeviceModeInd(DeviceModeIndPayload)
        DeviceModeConf(DeviceModeConfPayload)
    }
}

mac_cmd_zero_len! {
    /// LinkCheckReqPayload represents the LinkCheckReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct LinkCheckReqPayload[cmd=LinkCheckReq, cid=0x02, uplink=true]

    /// DutyCycleAnsPayload represents the DutyCycleAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct DutyCycleAnsPayload[cmd=DutyCycleAns, cid=0x04, uplink=true]

    /// DevStatusReqPayload represents the DevStatusReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct DevStatusReqPayload[cmd=DevStatusReq, cid=0x06, uplink=false]

    /// RXTimingSetupAnsPayload represents the RXTimingSetupAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct RXTimingSetupAnsPayload[cmd=RXTimingSetupAns, cid=0x08, uplink=true]

    /// TxParamSetupAnsPayload represents the TxParamSetupAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct TxParamSetupAnsPayload[cmd=TxParamSetupAns, cid=0x09, uplink=true]

    /// PingSlotInfoAnsPayload represents the PingSlotInfoAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct PingSlotInfoAnsPayload[cmd=PingSlotInfoAns, cid=0x10, uplink=false]

    /// BeaconTimingReqPayload represents the (deprecated) BeaconTimingReq
    /// LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct BeaconTimingReqPayload[cmd=BeaconTimingReq, cid=0x12, uplink=true]
}

mac_cmds! {
    /// ResetIndPayload represents the ResetInd LoRaWAN MACCommand.
    ///
    /// Only meaningful to ABP devices on a LoRaWAN 1.1 network server.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct ResetIndPayload[cmd=ResetInd, cid=0x01, uplink=true, size=1]

    /// ResetConfPayload represents the ResetConf LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct ResetConfPayload[cmd=ResetConf, cid=0x01, uplink=false, size=1]

    /// LinkCheckAnsPayload represents the LinkCheckAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct LinkCheckAnsPayload[cmd=LinkCheckAns, cid=0x02, uplink=false, size=2]

    /// LinkADRReqPayload represents the LinkADRReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct LinkADRReqPayload[cmd=LinkADRReq, cid=0x03, uplink=false, size=4]

    /// LinkADRAnsPayload represents the LinkADRAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct LinkADRAnsPayload[cmd=LinkADRAns, cid=0x03, uplink=true, size=1]

    /// DutyCycleReqPayload represents the DutyCycleReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct DutyCycleReqPayload[cmd=DutyCycleReq, cid=0x04, uplink=false, size=1]

    /// RXParamSetupReqPayload represents the RXParamSetupReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct RXParamSetupReqPayload[cmd=RXParamSetupReq, cid=0x05, uplink=false, size=4]

    /// RXParamSetupAnsPayload represents the RXParamSetupAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct RXParamSetupAnsPayload[cmd=RXParamSetupAns, cid=0x05, uplink=true, size=1]

    /// DevStatusAnsPayload represents the DevStatusAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct DevStatusAnsPayload[cmd=DevStatusAns, cid=0x06, uplink=true, size=2]

    /// NewChannelReqPayload represents the NewChannelReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct NewChannelReqPayload[cmd=NewChannelReq, cid=0x07, uplink=false, size=5]

    /// NewChannelAnsPayload represents the NewChannelAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct NewChannelAnsPayload[cmd=NewChannelAns, cid=0x07, uplink=true, size=1]

    /// RXTimingSetupReqPayload represents the RXTimingSetupReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct RXTimingSetupReqPayload[cmd=RXTimingSetupReq, cid=0x08, uplink=false, size=1]

    /// TxParamSetupReqPayload represents the TxParamSetupReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct TxParamSetupReqPayload[cmd=TxParamSetupReq, cid=0x09, uplink=false, size=1]

    /// DlChannelReqPayload represents the DlChannelReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct DlChannelReqPayload[cmd=DlChannelReq, cid=0x0A, uplink=false, size=4]

    /// DlChannelAnsPayload represents the DlChannelAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct DlChannelAnsPayload[cmd=DlChannelAns, cid=0x0A, uplink=true, size=1]

    /// PingSlotInfoReqPayload represents the PingSlotInfoReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct PingSlotInfoReqPayload[cmd=PingSlotInfoReq, cid=0x10, uplink=true, size=1]

    /// PingSlotChannelReqPayload represents the PingSlotChannelReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct PingSlotChannelReqPayload[cmd=PingSlotChannelReq, cid=0x11, uplink=false, size=4]

    /// PingSlotChannelAnsPayload represents the PingSlotChannelAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct PingSlotChannelAnsPayload[cmd=PingSlotChannelAns, cid=0x11, uplink=true, size=4]

    /// BeaconTimingAnsPayload represents the (deprecated) BeaconTimingAns
    /// LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct BeaconTimingAnsPayload[cmd=BeaconTimingAns, cid=0x12, uplink=false, size=3]

    /// BeaconFreqReqPayload represents the BeaconFreqReq LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct BeaconFreqReqPayload[cmd=BeaconFreqReq, cid=0x13, uplink=false, size=3]

    /// BeaconFreqAnsPayload represents the BeaconFreqAns LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct BeaconFreqAnsPayload[cmd=BeaconFreqAns, cid=0x13, uplink=true, size=1]

    /// DeviceModeIndPayload represents the DeviceModeInd LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct DeviceModeIndPayload[cmd=DeviceModeInd, cid=0x20, uplink=true, size=1]

    /// DeviceModeConfPayload represents the DeviceModeConf LoRaWAN MACCommand.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    struct DeviceModeConfPayload[cmd=DeviceModeConf, cid=0x20, uplink=false, size=1]
}

/// Parses a MAC command sequence (FOpts or a port-0 FRMPayload).
///
/// Decoding stops at the first unknown CID or at a command whose fixed length
/// overruns the buffer; both cases leave a warning in `diagnostics` and the
/// commands decoded so far are returned.
pub fn parse_mac_commands(
    data: &[u8],
    direction: Direction,
    diagnostics: &mut Diagnostics,
) -> Vec<MacCommand> {
    let mut cmds = Vec::new();
    let mut offset = 0;
    while offset < data.len() {
        let cid = data[offset];
        let len = match MacCommand::registered_len(cid, direction) {
            Some(len) => len,
            None => {
                diagnostics.warn(format!("looks a proprietary MAC command 0x{cid:02x}"));
                break;
            }
        };
        if offset + 1 + len > data.len() {
            diagnostics.warn(format!(
                "MAC command 0x{cid:02x} needs {len} payload bytes, {} remain",
                data.len() - offset - 1
            ));
            break;
        }
        let payload = &data[offset + 1..offset + 1 + len];
        if let Some(cmd) = MacCommand::build(cid, direction, payload) {
            cmds.push(cmd);
        }
        offset += 1 + len;
    }
    cmds
}

macro_rules! create_ack_fn {
    (
        $(#[$outer:meta])*
        $fn_name:ident, $offset:expr
    ) => (
        $(#[$outer])*
        pub fn $fn_name(&self) -> bool {
            self.0[0] & (0x01 << $offset) != 0
        }
    )
}

macro_rules! create_value_reader_fn {
    (
        $(#[$outer:meta])*
        $fn_name:ident, $index:expr
    ) => (
        $(#[$outer])*
        pub fn $fn_name(&self) -> u8 {
            self.0[$index]
        }
    )
}

impl ResetIndPayload {
    /// The minor LoRaWAN version the device speaks.
    pub fn lorawan_minor(&self) -> u8 {
        self.0[0] & 0x0f
    }
}

impl ResetConfPayload {
    /// The minor LoRaWAN version the server accepted; must match the
    /// device's version.
    pub fn lorawan_minor(&self) -> u8 {
        self.0[0] & 0x0f
    }
}

impl LinkCheckAnsPayload {
    create_value_reader_fn!(
        /// The link margin in dB of the last successfully received
        /// LinkCheckReq command.
        margin,
        0
    );

    create_value_reader_fn!(
        /// The number of gateways that successfully received the last
        /// LinkCheckReq command.
        gateway_count,
        1
    );
}

impl<'a> From<&'a [u8; 2]> for LinkCheckAnsPayload {
    fn from(v: &'a [u8; 2]) -> Self {
        LinkCheckAnsPayload(*v)
    }
}

impl LinkADRReqPayload {
    /// Data Rate that the device should use for its next transmissions.
    /// A value of 0xF means "keep the current one".
    pub fn data_rate(&self) -> u8 {
        self.0[0] >> 4
    }

    /// TX Power that the device should use for its next transmissions.
    /// A value of 0xF means "keep the current one".
    pub fn tx_power(&self) -> u8 {
        self.0[0] & 0x0f
    }

    /// Usable channels for next transmissions.
    pub fn channel_mask(&self) -> ChannelMask<2> {
        ChannelMask::<2>::new_from_raw(&self.0[1..3])
    }

    /// Provides information how channel mask is to be interpreted and how
    /// many times each message should be repeated.
    pub fn redundancy(&self) -> Redundancy {
        Redundancy::new(self.0[3])
    }
}

impl LinkADRAnsPayload {
    create_ack_fn!(
        /// Whether the channel mask change was applied successfully.
        channel_mask_ack,
        0
    );

    create_ack_fn!(
        /// Whether the data rate change was applied successfully.
        data_rate_ack,
        1
    );

    create_ack_fn!(
        /// Whether the power change was applied successfully.
        power_ack,
        2
    );

    /// Whether the device has accepted the new parameters or not.
    pub fn ack(&self) -> bool {
        self.0[0] == 0x07
    }
}

impl DutyCycleReqPayload {
    /// Integer value of the max duty cycle field.
    pub fn max_duty_cycle_raw(&self) -> u8 {
        self.0[0] & 0x0f
    }

    /// Value of the max duty cycle field as portion of time (ex: 0.5).
    /// A raw value of 0 means no limit beyond the regional regulation.
    pub fn max_duty_cycle(&self) -> f32 {
        let divisor = 1 << self.max_duty_cycle_raw();
        1.0 / (divisor as f32)
    }
}

impl RXParamSetupReqPayload {
    /// Downlink settings, namely rx1_dr_offset and rx2_data_rate.
    pub fn dl_settings(&self) -> DLSettings {
        DLSettings::new(self.0[0])
    }

    /// RX2 frequency.
    pub fn frequency(&self) -> Frequency {
        Frequency::new_from_raw(&self.0[1..])
    }
}

impl RXParamSetupAnsPayload {
    create_ack_fn!(
        /// Whether the channel change was applied successfully.
        channel_ack,
        0
    );

    create_ack_fn!(
        /// Whether the rx2 data rate change was applied successfully.
        rx2_data_rate_ack,
        1
    );

    create_ack_fn!(
        /// Whether the rx1 data rate offset change was applied successfully.
        rx1_dr_offset_ack,
        2
    );

    /// Whether the device has accepted the new parameters or not.
    pub fn ack(&self) -> bool {
        self.0[0] == 0x07
    }
}

impl DevStatusAnsPayload {
    create_value_reader_fn!(
        /// The battery level of the device.
        ///
        /// Note: 0 means that the device is powered by an external source,
        /// 255 means that the device was unable to measure its battery
        /// level, any other value represents the actual battery level.
        battery,
        0
    );

    /// The margin is the demodulation signal-to-noise ratio in dB rounded to
    /// the nearest integer value for the last successfully received
    /// DevStatusReq command. It is a signed 6-bit integer, minimum -32,
    /// maximum 31.
    pub fn margin(&self) -> i8 {
        ((self.0[1] << 2) as i8) >> 2
    }
}

impl NewChannelReqPayload {
    create_value_reader_fn!(
        /// The index of the channel being created or modified.
        channel_index,
        0
    );

    /// The frequency of the new or modified channel. An encoded value of 0
    /// disables the channel.
    pub fn frequency(&self) -> Frequency {
        Frequency::new_from_raw(&self.0[1..4])
    }

    /// The data rate range specifies allowed data rates for the new or
    /// modified channel.
    pub fn data_rate_range(&self) -> DataRateRange {
        DataRateRange::new_from_raw(self.0[4])
    }
}

impl NewChannelAnsPayload {
    create_ack_fn!(
        /// Whether the channel frequency change was applied successfully.
        channel_freq_ack,
        0
    );

    create_ack_fn!(
        /// Whether the data rate range change was applied successfully.
        data_rate_range_ack,
        1
    );

    /// Whether the device has accepted the new channel.
    pub fn ack(&self) -> bool {
        self.0[0] == 0x03
    }
}

impl RXTimingSetupReqPayload {
    /// Delay before the first RX window, in seconds. The encoded values 0
    /// and 1 both mean 1 second.
    pub fn delay(&self) -> u8 {
        match self.0[0] & 0x0f {
            0 => 1,
            d => d,
        }
    }
}

impl TxParamSetupReqPayload {
    /// Whether downlinks are limited to a 400 ms dwell time.
    pub fn downlink_dwell_time(&self) -> bool {
        self.0[0] & (1 << 5) != 0
    }

    /// Whether uplinks are limited to a 400 ms dwell time.
    pub fn uplink_dwell_time(&self) -> bool {
        self.0[0] & (1 << 4) != 0
    }

    /// The maximum allowed EIRP in dBm, decoded from the low nibble.
    pub fn max_eirp(&self) -> u8 {
        match self.0[0] & 0b1111 {
            0 => 8,
            1 => 10,
            2 => 12,
            3 => 13,
            4 => 14,
            5 => 16,
            6 => 18,
            7 => 20,
            8 => 21,
            9 => 24,
            10 => 26,
            11 => 27,
            12 => 29,
            13 => 30,
            14 => 33,
            _ => 36,
        }
    }
}

impl DlChannelReqPayload {
    create_value_reader_fn!(
        /// The index of the channel whose downlink frequency is modified.
        channel_index,
        0
    );

    /// The new downlink frequency of the channel.
    pub fn frequency(&self) -> Frequency {
        Frequency::new_from_raw(&self.0[1..4])
    }
}

impl DlChannelAnsPayload {
    create_ack_fn!(
        /// Channel frequency ok.
        channel_freq_ack,
        0
    );

    create_ack_fn!(
        /// Uplink frequency exists.
        uplink_freq_ack,
        1
    );

    /// Whether the device has accepted the new downlink frequency.
    pub fn ack(&self) -> bool {
        self.0[0] & 0x03 == 0x03
    }
}

impl PingSlotInfoReqPayload {
    /// The periodicity exponent, 0..=7.
    pub fn periodicity(&self) -> u8 {
        self.0[0] & 0x07
    }

    /// The ping slot period in seconds: 2^periodicity.
    pub fn ping_slot_period(&self) -> u16 {
        1 << self.periodicity()
    }
}

impl PingSlotChannelReqPayload {
    /// The frequency used for the ping slot downlinks.
    pub fn frequency(&self) -> Frequency {
        Frequency::new_from_raw(&self.0[0..3])
    }

    /// The index of the data rate used for the ping slot downlinks.
    pub fn data_rate(&self) -> u8 {
        self.0[3] & 0x0f
    }
}

impl PingSlotChannelAnsPayload {
    create_ack_fn!(
        /// Whether the device can use the requested frequency.
        channel_freq_ack,
        0
    );

    create_ack_fn!(
        /// Whether the requested data rate is defined for this device.
        data_rate_ack,
        1
    );

    /// Whether the ping slot parameters were modified.
    pub fn ack(&self) -> bool {
        self.0[0] & 0x03 == 0x03
    }
}

impl BeaconTimingAnsPayload {
    /// Delay between the end of the current downlink and the next beacon,
    /// such that 30 ms x Delay <= RTime < 30 ms x (Delay + 1).
    pub fn delay(&self) -> u16 {
        u16::from_le_bytes([self.0[0], self.0[1]])
    }

    create_value_reader_fn!(
        /// Index of the beaconing channel of the next beacon; 0 on networks
        /// with a fixed beacon frequency.
        channel,
        2
    );
}

impl BeaconFreqReqPayload {
    /// The frequency the device should expect the beacon on. An encoded
    /// value of 0 resumes the default beacon frequency plan.
    pub fn frequency(&self) -> Frequency {
        Frequency::new_from_raw(&self.0[0..3])
    }
}

impl BeaconFreqAnsPayload {
    create_ack_fn!(
        /// Whether the beacon frequency was changed.
        beacon_freq_ack,
        0
    );
}

impl DeviceModeIndPayload {
    /// The class the device wants to operate in.
    pub fn class(&self) -> DeviceClass {
        DeviceClass::from(self.0[0])
    }
}

impl DeviceModeConfPayload {
    /// The class the server acknowledges.
    pub fn class(&self) -> DeviceClass {
        DeviceClass::from(self.0[0])
    }
}
