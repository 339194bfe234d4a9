//! Archive format detection, probing and codecs.

pub mod compression;
pub mod detect;
pub mod gzip;
pub mod probe;
pub mod tar;
pub mod traits;
pub mod zip;

// Re-export main types for convenience
pub use detect::ArchiveKind;
pub use detect::classify;
pub use detect::default_destination;
pub use probe::probe;
pub use probe::probe_as;
pub use traits::ArchiveCodec;
pub use traits::codec_for;
