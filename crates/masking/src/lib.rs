#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg_hide))]
#![warn(missing_docs)]

//!
//! Keeps customer data and credentials out of logs.
//!
//! Bearer tokens, passwords, phone numbers and email addresses are wrapped in [`Secret`],
//! whose `Debug` output is decided by a masking [`Strategy`]. Reading the value back is an
//! explicit call to [`PeekInterface::peek`] or [`ExposeInterface::expose`].
//!

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub use zeroize::Zeroize as ZeroizableSecret;

mod strategy;
pub use strategy::{Strategy, WithType};

mod secret;
pub use secret::{ExposeInterface, PeekInterface, Secret};

#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "serde")]
pub use crate::serde::{masked_serialize, ErasedMaskSerialize, SerializableSecret};

mod maskable;
pub use maskable::{Mask, Maskable};
