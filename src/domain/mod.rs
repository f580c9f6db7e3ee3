pub mod release;

pub use release::{parse_timestamp, Asset, Changelog, Platform, Release};
