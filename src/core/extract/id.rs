//! Identifier resolution for descriptors written without an explicit `id`.
//!
//! The resolver is consulted once per identifier-less descriptor. The stock
//! implementation, [`InterpolatedId`], understands webpack-style name
//! interpolation patterns such as `[sha512:contenthash:base64:6]`, hashing
//! `"{defaultMessage}#{description}"` so the same text always gets the same id.

use std::{path::Path, sync::LazyLock};

use anyhow::{Result, bail};
use base64::{Engine, engine::general_purpose::STANDARD};
use regex::{Captures, Regex};
use md4::Md4;
use sha2::{Digest as _, Sha256, Sha512};

pub const DEFAULT_ID_INTERPOLATION_PATTERN: &str = "[sha512:contenthash:base64:6]";

/// Supplies an id for a descriptor that has none.
pub trait IdResolver: Send + Sync {
    fn resolve(
        &self,
        default_message: Option<&str>,
        description: Option<&str>,
        file_path: &str,
    ) -> Result<String>;
}

static HASH_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?:([^:\]]+):)?(?:hash|contenthash)(?::([a-z]+\d*))?(?::(\d+))?\]")
        .expect("valid hash token regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HashAlgorithm {
    Md4,
    Md5,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    fn parse(name: Option<&str>) -> Result<Self> {
        match name {
            None | Some("md4") => Ok(Self::Md4),
            Some("md5") => Ok(Self::Md5),
            Some("sha256") => Ok(Self::Sha256),
            Some("sha512") => Ok(Self::Sha512),
            Some(other) => bail!(
                "Unsupported hash algorithm '{}' (supported: md4, md5, sha256, sha512)",
                other
            ),
        }
    }

    fn digest(self, content: &[u8]) -> Vec<u8> {
        match self {
            Self::Md4 => Md4::digest(content).to_vec(),
            Self::Md5 => md5::compute(content).0.to_vec(),
            Self::Sha256 => Sha256::digest(content).to_vec(),
            Self::Sha512 => Sha512::digest(content).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DigestEncoding {
    Hex,
    Base64,
    /// Base-N digits over a fixed alphabet, reading the digest as a little-endian number.
    Alphabet(&'static str),
}

const BASE26: &str = "abcdefghijklmnopqrstuvwxyz";
const BASE32: &str = "123456789abcdefghjkmnpqrstuvwxyz";
const BASE36: &str = "0123456789abcdefghijklmnopqrstuvwxyz";
const BASE49: &str = "abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";
const BASE52: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const BASE58: &str = "123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";
const BASE62: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn encode_alphabet(bytes: &[u8], alphabet: &str) -> String {
    let digits = alphabet.as_bytes();
    let base = digits.len() as u32;
    // Most significant first.
    let mut number: Vec<u32> = bytes.iter().rev().map(|&b| u32::from(b)).collect();
    let mut encoded = Vec::new();

    while number.iter().any(|&d| d != 0) {
        let mut remainder = 0;
        for digit in number.iter_mut() {
            let acc = remainder * 256 + *digit;
            *digit = acc / base;
            remainder = acc % base;
        }
        encoded.push(digits[remainder as usize] as char);
    }

    encoded.iter().rev().collect()
}

impl DigestEncoding {
    fn parse(name: Option<&str>) -> Result<Self> {
        match name {
            None | Some("hex") => Ok(Self::Hex),
            Some("base64") => Ok(Self::Base64),
            Some("base26") => Ok(Self::Alphabet(BASE26)),
            Some("base32") => Ok(Self::Alphabet(BASE32)),
            Some("base36") => Ok(Self::Alphabet(BASE36)),
            Some("base49") => Ok(Self::Alphabet(BASE49)),
            Some("base52") => Ok(Self::Alphabet(BASE52)),
            Some("base58") => Ok(Self::Alphabet(BASE58)),
            Some("base62") => Ok(Self::Alphabet(BASE62)),
            Some(other) => bail!(
                "Unsupported digest encoding '{}' (supported: hex, base64, base26..base62)",
                other
            ),
        }
    }

    fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(bytes),
            Self::Base64 => STANDARD.encode(bytes),
            Self::Alphabet(alphabet) => encode_alphabet(bytes, alphabet),
        }
    }
}

/// Interpolate `pattern` against a file path and message content.
///
/// Path tokens: `[name]` (file stem), `[ext]` (extension without dot),
/// `[folder]` (parent directory name), `[path]` (parent directory with a
/// trailing slash). Hash tokens: `[<algo>:contenthash:<digest>:<length>]`,
/// where every part but `contenthash` (or `hash`) is optional.
/// Unknown tokens are left as written.
pub fn interpolate_name(pattern: &str, file_path: &str, content: &str) -> Result<String> {
    let mut error = None;
    let hashed = HASH_TOKEN_RE.replace_all(pattern, |caps: &Captures| {
        match hash_token(caps, content) {
            Ok(value) => value,
            Err(e) => {
                error.get_or_insert(e);
                String::new()
            }
        }
    });
    if let Some(e) = error {
        return Err(e);
    }

    let path = Path::new(file_path);
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let folder = parent
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = parent.to_string_lossy().replace('\\', "/");
    let dir = if dir.is_empty() { dir } else { format!("{}/", dir) };

    Ok(hashed
        .replace("[name]", &name)
        .replace("[ext]", &ext)
        .replace("[folder]", &folder)
        .replace("[path]", &dir))
}

fn hash_token(caps: &Captures, content: &str) -> Result<String> {
    let algorithm = HashAlgorithm::parse(caps.get(1).map(|m| m.as_str()))?;
    let encoding = DigestEncoding::parse(caps.get(2).map(|m| m.as_str()))?;
    let encoded = encoding.encode(&algorithm.digest(content.as_bytes()));

    match caps.get(3).and_then(|m| m.as_str().parse::<usize>().ok()) {
        Some(len) => Ok(encoded.chars().take(len).collect()),
        None => Ok(encoded),
    }
}

/// Resolver driven by an interpolation pattern.
#[derive(Debug, Clone)]
pub struct InterpolatedId {
    pattern: String,
}

impl InterpolatedId {
    /// Build a resolver, rejecting unsupported hash algorithms or encodings upfront.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        for caps in HASH_TOKEN_RE.captures_iter(&pattern) {
            HashAlgorithm::parse(caps.get(1).map(|m| m.as_str()))?;
            DigestEncoding::parse(caps.get(2).map(|m| m.as_str()))?;
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for InterpolatedId {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_ID_INTERPOLATION_PATTERN.to_string(),
        }
    }
}

impl IdResolver for InterpolatedId {
    fn resolve(
        &self,
        default_message: Option<&str>,
        description: Option<&str>,
        file_path: &str,
    ) -> Result<String> {
        // Missing fields render the way a JavaScript template literal would.
        let content = format!(
            "{}#{}",
            default_message.unwrap_or("undefined"),
            description.unwrap_or("undefined")
        );
        interpolate_name(&self.pattern, file_path, &content)
    }
}
