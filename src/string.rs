//! Hex string conversions for keys, EUIs and addresses.
//!
//! Strings are read and written MSB first, the way keys and addresses are
//! usually displayed.
use crate::keys::{AppKey, AppSKey, NwkSKey, AES128};
use crate::parser::{AppNonce, DevAddr, DevNonce, NetId, EUI64};

pub use hex::FromHexError;

macro_rules! fixed_len_struct_impl_string_msb {
    (
        $type:ident, $size:expr;
    ) => {
        impl core::str::FromStr for $type {
            type Err = FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut res = [0; $size];
                hex::decode_to_slice(s.as_bytes(), &mut res)?;
                Ok(Self::from(res))
            }
        }

        #[cfg(feature = "with-to-string")]
        impl core::fmt::Display for $type {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let mut res = [0u8; $size * 2];
                hex::encode_to_slice(self.as_ref(), &mut res).map_err(|_| core::fmt::Error)?;
                f.write_str(core::str::from_utf8(&res).map_err(|_| core::fmt::Error)?)
            }
        }
    };
}

fixed_len_struct_impl_string_msb! {
    EUI64, 8;
}

fixed_len_struct_impl_string_msb! {
    DevNonce, 2;
}

fixed_len_struct_impl_string_msb! {
    AppNonce, 3;
}

fixed_len_struct_impl_string_msb! {
    NetId, 3;
}

fixed_len_struct_impl_string_msb! {
    DevAddr, 4;
}

fixed_len_struct_impl_string_msb! {
    AES128, 16;
}

fixed_len_struct_impl_string_msb! {
    AppKey, 16;
}

fixed_len_struct_impl_string_msb! {
    NwkSKey, 16;
}

fixed_len_struct_impl_string_msb! {
    AppSKey, 16;
}
