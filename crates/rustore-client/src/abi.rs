//! Binary-architecture tokens accepted by the download-link endpoint.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// CPU architecture of a downloadable package variant.
///
/// The backend understands exactly these four tokens; anything else is
/// rejected before a request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Abi {
    #[serde(rename = "armeabi-v7a")]
    ArmeabiV7a,
    #[serde(rename = "arm64-v8a")]
    Arm64V8a,
    #[serde(rename = "x86")]
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
}

impl Abi {
    /// All supported architectures, in the order the backend lists them.
    pub const ALL: [Abi; 4] = [Abi::ArmeabiV7a, Abi::Arm64V8a, Abi::X86, Abi::X86_64];

    /// The wire token for this architecture.
    pub fn as_str(&self) -> &'static str {
        match self {
            Abi::ArmeabiV7a => "armeabi-v7a",
            Abi::Arm64V8a => "arm64-v8a",
            Abi::X86 => "x86",
            Abi::X86_64 => "x86_64",
        }
    }
}

impl fmt::Display for Abi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Abi {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "armeabi-v7a" => Ok(Abi::ArmeabiV7a),
            "arm64-v8a" => Ok(Abi::Arm64V8a),
            "x86" => Ok(Abi::X86),
            "x86_64" => Ok(Abi::X86_64),
            other => Err(ClientError::UnknownAbi(other.to_string())),
        }
    }
}
