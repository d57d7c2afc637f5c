//! This crate dissects LoRaWAN 1.0.x PHY payloads into a typed parse tree.
//!
//! The entry point is [`parser::dissect`] (or [`parser::dissect_with_factory`]
//! for a custom crypto backend). It consumes one PHY PDU as a byte slice plus
//! a [`parser::DissectOptions`] record carrying the optional keys, and returns
//! an owned [`parser::PhyPdu`] tree together with a list of parse diagnostics.
//! Recoverable problems never abort the parse.
#![no_std]
#![allow(clippy::upper_case_acronyms)]

extern crate alloc;

pub mod diagnostics;
pub mod keys;
pub mod maccommands;
pub mod parser;
pub mod securityhelpers;
pub mod string;
pub mod types;
pub mod wire;

#[cfg(feature = "default-crypto")]
pub mod default_crypto;
