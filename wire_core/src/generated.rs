//! Reference data compiled from `data/conductors.toml` at build time.

pub mod conductor_data {
    include!(concat!(env!("OUT_DIR"), "/conductor_data.rs"));
}
