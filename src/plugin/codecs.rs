//! Built-in decoders, encoders and hashers

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};

use super::base::{Plugin, PluginError, PluginInfo};

/// Author recorded for everything shipped with the crate
pub const BUILTIN_AUTHOR: &str = "codecs";

/// Characters left untouched by URL encoding (RFC 3986 unreserved)
const URL_RESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

type Transform = fn(&str) -> Result<String>;
type Probe = fn(&str) -> bool;

/// A stateless codec made of a transform and an optional decode probe
pub struct SimpleCodec {
    info: PluginInfo,
    transform: Transform,
    probe: Option<Probe>,
}

impl SimpleCodec {
    pub fn new(info: PluginInfo, transform: Transform) -> Self {
        Self {
            info,
            transform,
            probe: None,
        }
    }

    pub fn with_probe(mut self, probe: Probe) -> Self {
        self.probe = Some(probe);
        self
    }
}

impl Plugin for SimpleCodec {
    fn info(&self) -> &PluginInfo {
        &self.info
    }

    fn run(&self, input: &str) -> Result<String> {
        (self.transform)(input)
    }

    fn can_be_decoded(&self, input: &str) -> bool {
        self.probe.map(|probe| probe(input)).unwrap_or(false)
    }
}

/// All built-in codecs, decoders first
pub fn builtin_codecs() -> Result<Vec<SimpleCodec>, PluginError> {
    Ok(vec![
        SimpleCodec::new(PluginInfo::decoder("Base64", BUILTIN_AUTHOR)?, decode_base64)
            .with_probe(looks_like_base64),
        SimpleCodec::new(PluginInfo::decoder("Hex", BUILTIN_AUTHOR)?, decode_hex)
            .with_probe(looks_like_hex),
        SimpleCodec::new(PluginInfo::decoder("URL", BUILTIN_AUTHOR)?, decode_url)
            .with_probe(looks_like_url),
        SimpleCodec::new(PluginInfo::encoder("Base64", BUILTIN_AUTHOR)?, encode_base64),
        SimpleCodec::new(PluginInfo::encoder("Hex", BUILTIN_AUTHOR)?, encode_hex),
        SimpleCodec::new(PluginInfo::encoder("URL", BUILTIN_AUTHOR)?, encode_url),
        SimpleCodec::new(PluginInfo::hasher("MD5", BUILTIN_AUTHOR)?, hash_md5),
        SimpleCodec::new(PluginInfo::hasher("SHA256", BUILTIN_AUTHOR)?, hash_sha256),
        SimpleCodec::new(PluginInfo::hasher("BLAKE3", BUILTIN_AUTHOR)?, hash_blake3),
    ])
}

fn compact(input: &str) -> String {
    input.split_whitespace().collect()
}

fn decode_base64(input: &str) -> Result<String> {
    let bytes = BASE64
        .decode(compact(input))
        .context("Input is not valid base64")?;
    String::from_utf8(bytes).context("Decoded base64 is not valid UTF-8")
}

fn looks_like_base64(input: &str) -> bool {
    let compact = compact(input);
    !compact.is_empty()
        && compact.len() % 4 == 0
        && compact
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=')
        && decode_base64(&compact).is_ok()
}

fn decode_hex(input: &str) -> Result<String> {
    let bytes = hex::decode(compact(input)).context("Input is not valid hex")?;
    String::from_utf8(bytes).context("Decoded hex is not valid UTF-8")
}

fn looks_like_hex(input: &str) -> bool {
    let compact = compact(input);
    !compact.is_empty()
        && compact.len() % 2 == 0
        && compact.chars().all(|c| c.is_ascii_hexdigit())
        && decode_hex(&compact).is_ok()
}

fn decode_url(input: &str) -> Result<String> {
    let decoded = percent_decode_str(input)
        .decode_utf8()
        .context("Decoded URL text is not valid UTF-8")?;
    Ok(decoded.into_owned())
}

fn looks_like_url(input: &str) -> bool {
    input.contains('%')
        && decode_url(input)
            .map(|decoded| decoded != input)
            .unwrap_or(false)
}

fn encode_base64(input: &str) -> Result<String> {
    Ok(BASE64.encode(input.as_bytes()))
}

fn encode_hex(input: &str) -> Result<String> {
    Ok(hex::encode(input.as_bytes()))
}

fn encode_url(input: &str) -> Result<String> {
    Ok(utf8_percent_encode(input, URL_RESERVED).to_string())
}

fn hash_md5(input: &str) -> Result<String> {
    Ok(format!("{:x}", md5::compute(input.as_bytes())))
}

fn hash_sha256(input: &str) -> Result<String> {
    Ok(hex::encode(Sha256::digest(input.as_bytes())))
}

fn hash_blake3(input: &str) -> Result<String> {
    Ok(blake3::hash(input.as_bytes()).to_hex().to_string())
}
