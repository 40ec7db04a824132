//! Per-member classification and decoding.

use tracing::debug;
use tracing::warn;

use crate::ExtractionConfig;
use crate::classify::Classification;
use crate::classify::classify_stream;
use crate::encoding::Codec;
use crate::encoding::EncodingGuess;
use crate::encoding::resolve;
use crate::formats::ArchiveMember;
use crate::formats::ArchiveSource;
use crate::io::BoundedReader;
use crate::report::SkipReason;

/// Outcome of scanning one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberScan {
    /// The member was not decoded.
    Skipped(SkipReason),
    /// The member is text and was decoded.
    Text {
        /// Decoded content, without a leading byte-order mark.
        content: String,
        /// What the encoding resolver found in the first chunk.
        guess: EncodingGuess,
        /// The codec that actually produced `content`.
        codec: Codec,
    },
}

/// Reads, classifies and decodes the member at `index`.
///
/// Never fails: every per-member problem becomes a [`SkipReason`]. The member
/// stream is classified as it is read, so a binary member costs no more than
/// the chunk holding its first blocked byte. A text member is held in memory
/// up to [`ExtractionConfig::max_member_size`] bytes; anything larger is
/// skipped as oversized, whatever size the archive directory declared.
pub fn scan_member(
    source: &mut dyn ArchiveSource,
    index: usize,
    member: &ArchiveMember,
    config: &ExtractionConfig,
) -> MemberScan {
    if member.is_dir {
        return MemberScan::Skipped(SkipReason::Directory);
    }
    if member.size > config.max_member_size {
        warn!(path = %member.path, size = member.size, "member exceeds size bound");
        return MemberScan::Skipped(SkipReason::Oversized);
    }

    let mut bytes = Vec::new();
    let classification = match read_member(source, index, config.max_member_size, &mut bytes) {
        Ok(Streamed::Within(classification)) => classification,
        Ok(Streamed::Exceeded) => {
            warn!(path = %member.path, declared = member.size, "member inflates past size bound");
            return MemberScan::Skipped(SkipReason::Oversized);
        }
        Err(reason) => {
            warn!(path = %member.path, %reason, "member is unreadable");
            return MemberScan::Skipped(SkipReason::Unreadable(reason));
        }
    };
    if !classification.is_text {
        debug!(path = %member.path, read = bytes.len(), "binary member");
        return MemberScan::Skipped(SkipReason::Binary);
    }

    let guess = resolve(&classification.sample);
    let (content, codec) = decode(&bytes, &guess);
    debug!(
        path = %member.path,
        dialect = ?guess.dialect,
        declared = guess.encoding_name.as_deref(),
        %codec,
        "text member"
    );

    MemberScan::Text {
        content,
        guess,
        codec,
    }
}

/// How far a member stream got before classification settled.
enum Streamed {
    Within(Classification),
    Exceeded,
}

/// Classifies the member stream while collecting it into `bytes`.
///
/// Only a stream still judged text is read on to its end, so `bytes` holds
/// the whole member exactly when the classification says text.
fn read_member(
    source: &mut dyn ArchiveSource,
    index: usize,
    limit: u64,
    bytes: &mut Vec<u8>,
) -> Result<Streamed, String> {
    let reader = source.open_member(index).map_err(|e| e.to_string())?;
    let mut bounded = BoundedReader::new(reader, limit);
    let classification = classify_stream(&mut bounded, bytes).map_err(|e| e.to_string())?;
    if classification.is_text && bounded.exceeded() {
        return Ok(Streamed::Exceeded);
    }
    Ok(Streamed::Within(classification))
}

/// Decodes full member content with the declared codec, falling back to
/// UTF-8 with replacement characters. Never fails.
pub(crate) fn decode(bytes: &[u8], guess: &EncodingGuess) -> (String, Codec) {
    let declared = guess
        .codec()
        .and_then(|codec| codec.decode_strict(bytes).map(|text| (text, codec)));

    let (mut content, codec) = declared.unwrap_or_else(|| {
        let utf8 = Codec::utf8();
        (utf8.decode_lossy(bytes), utf8)
    });

    if content.starts_with('\u{FEFF}') {
        content.remove(0);
    }
    (content, codec)
}
