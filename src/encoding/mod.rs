pub mod legacy;

pub use legacy::{encode_legacy_str, encode_legacy_text, lookup_sequence, EncodedText};
